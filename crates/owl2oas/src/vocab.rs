//! Vocabulary terms used when projecting an ontology graph.

use oxigraph::model::NamedNodeRef;

pub const RDF_TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");

pub const RDFS_LABEL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
pub const RDFS_DOMAIN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#domain");
pub const RDFS_RANGE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#range");
pub const RDFS_SUB_CLASS_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");

pub const OWL_ONTOLOGY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Ontology");
pub const OWL_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
pub const OWL_THING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Thing");
pub const OWL_RESTRICTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Restriction");
pub const OWL_DATATYPE_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
pub const OWL_OBJECT_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
pub const OWL_ANNOTATION_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AnnotationProperty");
pub const OWL_FUNCTIONAL_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#FunctionalProperty");
pub const OWL_DEPRECATED: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#deprecated");
pub const OWL_VERSION_INFO: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#versionInfo");
pub const OWL_ON_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onProperty");
pub const OWL_ON_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onClass");
pub const OWL_ON_DATA_RANGE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#onDataRange");
pub const OWL_SOME_VALUES_FROM: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#someValuesFrom");
pub const OWL_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#cardinality");
pub const OWL_QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#qualifiedCardinality");
pub const OWL_MIN_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#minCardinality");
pub const OWL_MIN_QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#minQualifiedCardinality");
pub const OWL_MAX_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#maxCardinality");
pub const OWL_MAX_QUALIFIED_CARDINALITY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#maxQualifiedCardinality");

pub const DC_TITLE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/title");
pub const DC_DESCRIPTION: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://purl.org/dc/terms/description");
pub const CC_LICENSE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://creativecommons.org/ns#license");

/// Namespace under which all recognised datatype IRIs live.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";

/// True when the IRI names an XSD datatype rather than a modelled class.
pub fn is_datatype_class(iri: &str) -> bool {
    iri.starts_with(XSD_NS)
}

/// Maps an XSD datatype IRI onto an OpenAPI `(type, format)` pair.
///
/// Returns `None` for datatypes outside the supported table; callers are
/// expected to degrade to a plain string schema in that case.
pub fn xsd_to_oas(datatype: &str) -> Option<(&'static str, Option<&'static str>)> {
    let local = datatype.strip_prefix(XSD_NS)?;
    Some(match local {
        "boolean" => ("boolean", None),
        "byte" | "base64Binary" => ("string", Some("byte")),
        "dateTime" | "dateTimeStamp" => ("string", Some("date-time")),
        "double" => ("number", Some("double")),
        "float" => ("number", Some("float")),
        "int" | "integer" => ("integer", Some("int32")),
        "long" => ("integer", Some("int64")),
        "string" => ("string", None),
        "anyURI" => ("string", Some("uri")),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_core_datatypes() {
        assert_eq!(
            xsd_to_oas("http://www.w3.org/2001/XMLSchema#boolean"),
            Some(("boolean", None))
        );
        assert_eq!(
            xsd_to_oas("http://www.w3.org/2001/XMLSchema#dateTime"),
            Some(("string", Some("date-time")))
        );
        assert_eq!(
            xsd_to_oas("http://www.w3.org/2001/XMLSchema#long"),
            Some(("integer", Some("int64")))
        );
    }

    #[test]
    fn rejects_unknown_datatypes() {
        assert_eq!(xsd_to_oas("http://www.w3.org/2001/XMLSchema#gYear"), None);
        assert_eq!(xsd_to_oas("http://example.com/custom#thing"), None);
    }

    #[test]
    fn datatype_classes_are_recognised_by_namespace() {
        assert!(is_datatype_class("http://www.w3.org/2001/XMLSchema#string"));
        assert!(!is_datatype_class("http://example.com/ontology#Building"));
    }
}
