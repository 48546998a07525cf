//! Loads an RDF graph and projects it into the intermediate model.
//!
//! Everything here is plain pattern matching against the store; no
//! reasoning is performed beyond what the graph asserts directly.

use std::collections::BTreeMap;

use oxigraph::io::RdfFormat;
use oxigraph::model::{BlankNodeRef, NamedNode, NamedNodeRef, Subject, SubjectRef, Term};
use oxigraph::store::Store;

use crate::error::{GenError, Result};
use crate::types::{
    insert_label, Cardinality, Ontology, OntologyClass, OntologyProperty, PropertyKind,
    Restriction,
};
use crate::vocab;

/// Parses `source` in the given serialization and projects the graph into
/// an [`Ontology`].
pub fn parse_ontology(source: &str, format: RdfFormat) -> Result<Ontology> {
    let store = Store::new().map_err(|e| GenError::Load(e.to_string()))?;
    store
        .load_from_reader(format, source.as_bytes())
        .map_err(|e| GenError::Load(e.to_string()))?;

    let mut ontology = ontology_header(&store)?;
    ontology.properties = collect_properties(&store)?;
    ontology.classes = collect_classes(&store);
    Ok(ontology)
}

fn objects(store: &Store, subject: SubjectRef<'_>, predicate: NamedNodeRef<'_>) -> Vec<Term> {
    store
        .quads_for_pattern(Some(subject), Some(predicate), None, None)
        .flatten()
        .map(|quad| quad.object)
        .collect()
}

fn typed_subjects(store: &Store, class: NamedNodeRef<'_>) -> Vec<Subject> {
    store
        .quads_for_pattern(None, Some(vocab::RDF_TYPE), Some(class.into()), None)
        .flatten()
        .map(|quad| quad.subject)
        .collect()
}

fn has_type(store: &Store, subject: SubjectRef<'_>, class: NamedNodeRef<'_>) -> bool {
    store
        .quads_for_pattern(Some(subject), Some(vocab::RDF_TYPE), Some(class.into()), None)
        .next()
        .is_some()
}

fn first_named_object(
    store: &Store,
    subject: SubjectRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> Option<String> {
    objects(store, subject, predicate)
        .into_iter()
        .find_map(|term| match term {
            Term::NamedNode(node) => Some(node.into_string()),
            _ => None,
        })
}

fn integer_object(
    store: &Store,
    subject: SubjectRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> Option<u64> {
    objects(store, subject, predicate)
        .iter()
        .find_map(|term| match term {
            Term::Literal(literal) => literal.value().parse().ok(),
            _ => None,
        })
}

fn is_deprecated(store: &Store, subject: SubjectRef<'_>) -> bool {
    objects(store, subject, vocab::OWL_DEPRECATED)
        .iter()
        .any(|term| matches!(term, Term::Literal(l) if l.value() == "true"))
}

fn collect_labels(
    store: &Store,
    subject: SubjectRef<'_>,
    owner: &str,
    labels: &mut BTreeMap<Option<String>, String>,
) {
    for term in objects(store, subject, vocab::RDFS_LABEL) {
        if let Term::Literal(literal) = term {
            let tag = literal.language().map(str::to_string);
            insert_label(labels, tag, literal.value().to_string(), owner);
        }
    }
}

/// Among the literal objects of one predicate, prefer a language-less
/// literal, then sort lexicographically, so repeated annotations resolve
/// the same way on every run.
fn preferred_literal(
    store: &Store,
    subject: SubjectRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> Option<String> {
    let mut candidates: Vec<(bool, String)> = objects(store, subject, predicate)
        .iter()
        .filter_map(|term| match term {
            Term::Literal(l) => Some((l.language().is_some(), l.value().to_string())),
            _ => None,
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next().map(|(_, value)| value)
}

/// Reads the `owl:Ontology` resource and its mandatory document metadata.
fn ontology_header(store: &Store) -> Result<Ontology> {
    let iri = typed_subjects(store, vocab::OWL_ONTOLOGY)
        .into_iter()
        .find_map(|subject| match subject {
            Subject::NamedNode(node) => Some(node),
            _ => None,
        })
        .ok_or_else(|| GenError::Load("graph declares no owl:Ontology resource".into()))?;
    let subject: SubjectRef<'_> = iri.as_ref().into();

    let missing = |annotation: &str| GenError::MissingAnnotation {
        ontology: iri.as_str().to_string(),
        annotation: annotation.to_string(),
    };

    let title =
        preferred_literal(store, subject, vocab::DC_TITLE).ok_or_else(|| missing("dc:title"))?;
    let version = preferred_literal(store, subject, vocab::OWL_VERSION_INFO)
        .ok_or_else(|| missing("owl:versionInfo"))?;

    // Licenses are usually linked as IRIs; fall back to literal objects.
    // An IRI license carries its address through to the document.
    let license_terms = objects(store, subject, vocab::CC_LICENSE);
    let (license, license_url) = license_terms
        .iter()
        .find_map(|term| match term {
            Term::NamedNode(node) => Some((
                crate::types::local_name(node.as_str()).to_string(),
                Some(node.as_str().to_string()),
            )),
            _ => None,
        })
        .or_else(|| {
            license_terms.iter().find_map(|term| match term {
                Term::Literal(l) => Some((l.value().to_string(), None)),
                _ => None,
            })
        })
        .ok_or_else(|| missing("cc:license"))?;

    let description = preferred_literal(store, subject, vocab::DC_DESCRIPTION)
        .map(|text| text.trim().to_string());

    Ok(Ontology {
        iri: iri.into_string(),
        title,
        version,
        license,
        license_url,
        description,
        classes: BTreeMap::new(),
        properties: BTreeMap::new(),
    })
}

fn collect_properties(store: &Store) -> Result<BTreeMap<String, OntologyProperty>> {
    let declarations = [
        (vocab::OWL_DATATYPE_PROPERTY, PropertyKind::Data),
        (vocab::OWL_OBJECT_PROPERTY, PropertyKind::Object),
        (vocab::OWL_ANNOTATION_PROPERTY, PropertyKind::Annotation),
    ];

    let mut kinds: BTreeMap<String, PropertyKind> = BTreeMap::new();
    for (declaration, kind) in declarations {
        for subject in typed_subjects(store, declaration) {
            let Subject::NamedNode(node) = subject else {
                continue;
            };
            let iri = node.into_string();
            match kinds.get(&iri) {
                Some(PropertyKind::Data) if kind == PropertyKind::Object => {
                    return Err(GenError::ConflictingPropertyKind(iri));
                }
                Some(PropertyKind::Object) if kind == PropertyKind::Data => {
                    return Err(GenError::ConflictingPropertyKind(iri));
                }
                Some(PropertyKind::Annotation) | None => {
                    kinds.insert(iri, kind);
                }
                Some(_) => {}
            }
        }
    }

    let mut properties = BTreeMap::new();
    for (iri, kind) in kinds {
        let node = NamedNode::new(iri.clone()).map_err(|e| GenError::Load(e.to_string()))?;
        let subject: SubjectRef<'_> = node.as_ref().into();

        let mut property = OntologyProperty::new(iri.clone(), kind);
        for term in objects(store, subject, vocab::RDFS_DOMAIN) {
            if let Term::NamedNode(domain) = term {
                property.domains.insert(domain.into_string());
            }
        }
        for term in objects(store, subject, vocab::RDFS_RANGE) {
            if let Term::NamedNode(range) = term {
                property.ranges.insert(range.into_string());
            }
        }
        property.functional = has_type(store, subject, vocab::OWL_FUNCTIONAL_PROPERTY);
        property.deprecated = is_deprecated(store, subject);
        collect_labels(store, subject, &iri, &mut property.labels);
        properties.insert(iri, property);
    }
    Ok(properties)
}

fn collect_classes(store: &Store) -> BTreeMap<String, OntologyClass> {
    let mut classes = BTreeMap::new();
    for subject in typed_subjects(store, vocab::OWL_CLASS) {
        // Anonymous class expressions are not addressable resources.
        let Subject::NamedNode(node) = subject else {
            continue;
        };
        let iri = node.as_str().to_string();
        let subject: SubjectRef<'_> = node.as_ref().into();

        let mut class = OntologyClass::new(iri.clone());
        class.deprecated = is_deprecated(store, subject);
        collect_labels(store, subject, &iri, &mut class.labels);

        for term in objects(store, subject, vocab::RDFS_SUB_CLASS_OF) {
            match term {
                Term::NamedNode(parent) => {
                    if parent.as_str() != vocab::OWL_THING.as_str() {
                        class.super_classes.insert(parent.into_string());
                    }
                }
                Term::BlankNode(anon) => {
                    if let Some(restriction) = read_restriction(store, anon.as_ref()) {
                        class.restrictions.push(restriction);
                    }
                }
                _ => {}
            }
        }
        classes.insert(iri, class);
    }
    classes
}

/// Decodes one `owl:Restriction` blank node. Returns `None` when the node
/// is not a restriction or carries no constraint this generator models.
fn read_restriction(store: &Store, node: BlankNodeRef<'_>) -> Option<Restriction> {
    let subject: SubjectRef<'_> = node.into();
    if !has_type(store, subject, vocab::OWL_RESTRICTION) {
        return None;
    }
    let property = first_named_object(store, subject, vocab::OWL_ON_PROPERTY)?;

    // owl:Thing qualifies nothing, so such restrictions count unqualified.
    let qualifier = first_named_object(store, subject, vocab::OWL_ON_CLASS)
        .or_else(|| first_named_object(store, subject, vocab::OWL_ON_DATA_RANGE))
        .filter(|q| q != vocab::OWL_THING.as_str());

    let qualified = |n: u64,
                     qualifier: &Option<String>,
                     plain: fn(u64) -> Cardinality,
                     with: fn(u64, String) -> Cardinality| match qualifier {
        Some(q) => with(n, q.clone()),
        None => plain(n),
    };

    let cardinality = if let Some(n) = integer_object(store, subject, vocab::OWL_CARDINALITY) {
        Cardinality::Exact(n)
    } else if let Some(n) = integer_object(store, subject, vocab::OWL_QUALIFIED_CARDINALITY) {
        qualified(n, &qualifier, Cardinality::Exact, Cardinality::QualifiedExact)
    } else if let Some(n) = integer_object(store, subject, vocab::OWL_MIN_CARDINALITY) {
        Cardinality::Min(n)
    } else if let Some(n) = integer_object(store, subject, vocab::OWL_MIN_QUALIFIED_CARDINALITY) {
        qualified(n, &qualifier, Cardinality::Min, Cardinality::QualifiedMin)
    } else if let Some(n) = integer_object(store, subject, vocab::OWL_MAX_CARDINALITY) {
        Cardinality::Max(n)
    } else if let Some(n) = integer_object(store, subject, vocab::OWL_MAX_QUALIFIED_CARDINALITY) {
        qualified(n, &qualifier, Cardinality::Max, Cardinality::QualifiedMax)
    } else if let Some(range) = first_named_object(store, subject, vocab::OWL_SOME_VALUES_FROM) {
        // Existential quantification guarantees at least one value.
        if range == vocab::OWL_THING.as_str() {
            Cardinality::Min(1)
        } else {
            Cardinality::QualifiedMin(1, range)
        }
    } else {
        return None;
    };

    Some(Restriction {
        property,
        cardinality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Multiplicity;

    const PREFIXES: &str = r#"
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix owl: <http://www.w3.org/2002/07/owl#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
        @prefix dc: <http://purl.org/dc/terms/> .
        @prefix cc: <http://creativecommons.org/ns#> .
        @prefix ex: <http://example.com/o#> .
    "#;

    const HEADER: &str = r#"
        <http://example.com/o> a owl:Ontology ;
            dc:title "Example Ontology" ;
            owl:versionInfo "1.2.0" ;
            cc:license <https://creativecommons.org/licenses/by/4.0/> .
    "#;

    fn parse(body: &str) -> Result<Ontology> {
        let source = format!("{PREFIXES}{HEADER}{body}");
        parse_ontology(&source, RdfFormat::Turtle)
    }

    #[test]
    fn reads_document_metadata() {
        let ontology = parse("").unwrap();
        assert_eq!(ontology.iri, "http://example.com/o");
        assert_eq!(ontology.title, "Example Ontology");
        assert_eq!(ontology.version, "1.2.0");
        assert_eq!(ontology.license, "4.0");
        assert_eq!(
            ontology.license_url.as_deref(),
            Some("https://creativecommons.org/licenses/by/4.0/")
        );
        assert_eq!(ontology.description, None);
    }

    #[test]
    fn reads_optional_description() {
        let ontology = parse(
            r#"
            <http://example.com/o> dc:description "  Models example deployments.  " .
            "#,
        )
        .unwrap();
        assert_eq!(
            ontology.description.as_deref(),
            Some("Models example deployments.")
        );
    }

    #[test]
    fn literal_license_has_no_url() {
        let source = format!(
            r#"{PREFIXES}
            <http://example.com/o> a owl:Ontology ;
                dc:title "Example Ontology" ;
                owl:versionInfo "1.0.0" ;
                cc:license "MIT" .
            "#
        );
        let ontology = parse_ontology(&source, RdfFormat::Turtle).unwrap();
        assert_eq!(ontology.license, "MIT");
        assert_eq!(ontology.license_url, None);
    }

    #[test]
    fn missing_title_is_fatal() {
        let source = format!(
            r#"{PREFIXES}
            <http://example.com/o> a owl:Ontology ;
                owl:versionInfo "1.0.0" ;
                cc:license "MIT" .
            "#
        );
        let err = parse_ontology(&source, RdfFormat::Turtle).unwrap_err();
        assert!(matches!(
            err,
            GenError::MissingAnnotation { annotation, .. } if annotation == "dc:title"
        ));
    }

    #[test]
    fn collects_classes_and_superclasses() {
        let ontology = parse(
            r#"
            ex:Equipment a owl:Class .
            ex:Device a owl:Class ;
                rdfs:label "Device"@en ;
                rdfs:subClassOf ex:Equipment, owl:Thing .
            "#,
        )
        .unwrap();
        let device = &ontology.classes["http://example.com/o#Device"];
        assert!(device.super_classes.contains("http://example.com/o#Equipment"));
        // owl:Thing never shows up as a parent.
        assert_eq!(device.super_classes.len(), 1);
        assert_eq!(
            device.labels[&Some("en".to_string())],
            "Device"
        );
    }

    #[test]
    fn collects_property_declarations() {
        let ontology = parse(
            r#"
            ex:Device a owl:Class .
            ex:serial a owl:DatatypeProperty, owl:FunctionalProperty ;
                rdfs:domain ex:Device ;
                rdfs:range xsd:string .
            ex:partOf a owl:ObjectProperty ;
                rdfs:domain ex:Device ;
                rdfs:range ex:Device .
            ex:note a owl:AnnotationProperty .
            "#,
        )
        .unwrap();
        let serial = &ontology.properties["http://example.com/o#serial"];
        assert_eq!(serial.kind, PropertyKind::Data);
        assert!(serial.functional);
        assert!(serial.ranges.contains("http://www.w3.org/2001/XMLSchema#string"));

        let part_of = &ontology.properties["http://example.com/o#partOf"];
        assert_eq!(part_of.kind, PropertyKind::Object);
        assert!(part_of.domains.contains("http://example.com/o#Device"));

        let note = &ontology.properties["http://example.com/o#note"];
        assert_eq!(note.kind, PropertyKind::Annotation);
    }

    #[test]
    fn conflicting_property_kinds_are_fatal() {
        let err = parse(
            r#"
            ex:odd a owl:DatatypeProperty, owl:ObjectProperty .
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GenError::ConflictingPropertyKind(iri) if iri == "http://example.com/o#odd"
        ));
    }

    #[test]
    fn reads_cardinality_restrictions() {
        let ontology = parse(
            r#"
            ex:Device a owl:Class ;
                rdfs:subClassOf [
                    a owl:Restriction ;
                    owl:onProperty ex:serial ;
                    owl:maxCardinality "1"^^xsd:nonNegativeInteger
                ] , [
                    a owl:Restriction ;
                    owl:onProperty ex:hasSensor ;
                    owl:qualifiedCardinality "2"^^xsd:nonNegativeInteger ;
                    owl:onClass ex:Sensor
                ] .
            ex:serial a owl:DatatypeProperty .
            ex:hasSensor a owl:ObjectProperty .
            "#,
        )
        .unwrap();
        let device = &ontology.classes["http://example.com/o#Device"];
        assert_eq!(device.restrictions.len(), 2);
        assert!(device.restrictions.contains(&Restriction {
            property: "http://example.com/o#serial".into(),
            cardinality: Cardinality::Max(1),
        }));
        assert!(device.restrictions.contains(&Restriction {
            property: "http://example.com/o#hasSensor".into(),
            cardinality: Cardinality::QualifiedExact(2, "http://example.com/o#Sensor".into()),
        }));
    }

    #[test]
    fn some_values_from_becomes_a_qualified_minimum() {
        let ontology = parse(
            r#"
            ex:Device a owl:Class ;
                rdfs:subClassOf [
                    a owl:Restriction ;
                    owl:onProperty ex:hasSensor ;
                    owl:someValuesFrom ex:Sensor
                ] .
            ex:hasSensor a owl:ObjectProperty .
            "#,
        )
        .unwrap();
        let device = &ontology.classes["http://example.com/o#Device"];
        assert_eq!(
            device.restrictions,
            vec![Restriction {
                property: "http://example.com/o#hasSensor".into(),
                cardinality: Cardinality::QualifiedMin(1, "http://example.com/o#Sensor".into()),
            }]
        );

        let effective = crate::types::effective_cardinality(
            device,
            &ontology.properties["http://example.com/o#hasSensor"],
        );
        assert!(effective.required);
        assert_eq!(
            effective.multiplicity,
            Multiplicity::Array {
                min_items: Some(1),
                max_items: None
            }
        );
    }

    #[test]
    fn qualifier_of_owl_thing_counts_unqualified() {
        let ontology = parse(
            r#"
            ex:Device a owl:Class ;
                rdfs:subClassOf [
                    a owl:Restriction ;
                    owl:onProperty ex:hasPart ;
                    owl:qualifiedCardinality "1"^^xsd:nonNegativeInteger ;
                    owl:onClass owl:Thing
                ] .
            ex:hasPart a owl:ObjectProperty .
            "#,
        )
        .unwrap();
        let device = &ontology.classes["http://example.com/o#Device"];
        assert_eq!(
            device.restrictions,
            vec![Restriction {
                property: "http://example.com/o#hasPart".into(),
                cardinality: Cardinality::Exact(1),
            }]
        );
    }

    #[test]
    fn deprecation_flags_are_read() {
        let ontology = parse(
            r#"
            ex:Legacy a owl:Class ;
                owl:deprecated "true"^^xsd:boolean .
            ex:oldField a owl:DatatypeProperty ;
                owl:deprecated "true"^^xsd:boolean .
            "#,
        )
        .unwrap();
        assert!(ontology.classes["http://example.com/o#Legacy"].deprecated);
        assert!(ontology.properties["http://example.com/o#oldField"].deprecated);
    }
}
