//! Synthesises the OpenAPI 3.0 document from a projected ontology.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::{GenError, Result};
use crate::types::{
    effective_cardinality, resolve_label, Multiplicity, Ontology, OntologyClass,
    OntologyProperty, PropertyKind,
};
use crate::vocab;

/// Builds the complete document. Fails fast on superclass cycles and on
/// two classes resolving to the same schema name.
pub fn generate_openapi_document(ontology: &Ontology, language: &str) -> Result<Value> {
    detect_cycles(ontology)?;
    let labels = resolve_class_labels(ontology, language)?;

    let mut schemas = Map::new();
    let mut paths = Map::new();
    let by_label: BTreeMap<&String, &String> =
        labels.iter().map(|(iri, label)| (label, iri)).collect();
    for (label, iri) in by_label {
        let class = &ontology.classes[iri.as_str()];
        schemas.insert(label.clone(), class_schema(ontology, class, &labels, language)?);
        paths.insert(format!("/{label}"), path_entry(label));
    }

    Ok(json!({
        "openapi": "3.0.0",
        "info": document_info(ontology),
        "components": { "schemas": schemas },
        "paths": paths,
    }))
}

fn document_info(ontology: &Ontology) -> Value {
    let mut license = Map::new();
    license.insert("name".to_string(), json!(ontology.license));
    if let Some(url) = &ontology.license_url {
        license.insert("url".to_string(), json!(url));
    }

    let mut info = Map::new();
    info.insert("title".to_string(), json!(ontology.title));
    info.insert("version".to_string(), json!(ontology.version));
    info.insert("license".to_string(), Value::Object(license));
    if let Some(description) = &ontology.description {
        info.insert("description".to_string(), json!(description));
    }
    Value::Object(info)
}

/// Walks `rdfs:subClassOf` edges depth-first; revisiting a class already on
/// the current path means the hierarchy cannot be linearised.
fn detect_cycles(ontology: &Ontology) -> Result<()> {
    fn visit(
        ontology: &Ontology,
        iri: &str,
        done: &mut BTreeSet<String>,
        path: &mut BTreeSet<String>,
    ) -> Result<()> {
        if done.contains(iri) {
            return Ok(());
        }
        if !path.insert(iri.to_string()) {
            return Err(GenError::CycleDetected(iri.to_string()));
        }
        if let Some(class) = ontology.classes.get(iri) {
            for parent in &class.super_classes {
                visit(ontology, parent, done, path)?;
            }
        }
        path.remove(iri);
        done.insert(iri.to_string());
        Ok(())
    }

    let mut done = BTreeSet::new();
    for iri in ontology.classes.keys() {
        let mut path = BTreeSet::new();
        visit(ontology, iri, &mut done, &mut path)?;
    }
    Ok(())
}

/// Resolves every synthesised class to its schema name, rejecting
/// collisions. Datatype classes never produce schemas.
fn resolve_class_labels(
    ontology: &Ontology,
    language: &str,
) -> Result<BTreeMap<String, String>> {
    let mut by_label: BTreeMap<String, String> = BTreeMap::new();
    let mut by_iri = BTreeMap::new();
    for (iri, class) in &ontology.classes {
        if vocab::is_datatype_class(iri) {
            continue;
        }
        let label = resolve_label(&class.labels, iri, language);
        if let Some(first) = by_label.get(&label) {
            return Err(GenError::DuplicateLabel {
                label,
                first: first.clone(),
                second: iri.clone(),
            });
        }
        by_label.insert(label.clone(), iri.clone());
        by_iri.insert(iri.clone(), label);
    }
    Ok(by_iri)
}

fn class_schema(
    ontology: &Ontology,
    class: &OntologyClass,
    labels: &BTreeMap<String, String>,
    language: &str,
) -> Result<Value> {
    let label = &labels[&class.iri];
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();

    for (prop_iri, property) in &ontology.properties {
        if !matches!(property.kind, PropertyKind::Data | PropertyKind::Object) {
            continue;
        }
        if !class.declares(property) {
            continue;
        }
        // Properties a direct superclass already contributes arrive through
        // the composed reference instead.
        let inherited = class.super_classes.iter().any(|parent| {
            labels.contains_key(parent)
                && ontology
                    .classes
                    .get(parent)
                    .is_some_and(|parent_class| parent_class.declares(property))
        });
        if inherited {
            continue;
        }

        let effective = effective_cardinality(class, property);
        let base = match property.kind {
            PropertyKind::Data => {
                data_property_schema(property, effective.range_override.as_deref())
            }
            PropertyKind::Object => object_property_schema(
                property,
                effective.range_override.as_deref(),
                labels,
            )?,
            PropertyKind::Annotation => unreachable!("filtered above"),
        };
        let mut value = apply_multiplicity(base, &effective.multiplicity);
        if property.deprecated {
            value = mark_deprecated(value);
        }

        let name = resolve_label(&property.labels, prop_iri, language);
        if effective.required {
            required.push(Value::String(name.clone()));
        }
        properties.insert(name, value);
    }

    required.sort_by(|a, b| a.as_str().cmp(&b.as_str()));

    let mut own = Map::new();
    own.insert("type".to_string(), json!("object"));
    own.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        own.insert("required".to_string(), Value::Array(required));
    }
    if class.deprecated {
        own.insert("deprecated".to_string(), json!(true));
    }

    // Only superclasses that themselves become schemas are composable.
    let mut parents: Vec<&String> = class
        .super_classes
        .iter()
        .filter_map(|parent| labels.get(parent))
        .collect();
    if parents.is_empty() {
        own.insert("title".to_string(), json!(label));
        return Ok(Value::Object(own));
    }
    parents.sort();

    let mut all_of: Vec<Value> = parents
        .into_iter()
        .map(|parent| json!({ "$ref": format!("#/components/schemas/{parent}") }))
        .collect();
    all_of.push(Value::Object(own));

    Ok(json!({
        "title": label,
        "allOf": all_of,
    }))
}

fn data_property_schema(property: &OntologyProperty, range_override: Option<&str>) -> Value {
    let datatype = match range_override {
        Some(datatype) => Some(datatype.to_string()),
        None if property.ranges.len() == 1 => property.ranges.iter().next().cloned(),
        None => {
            if !property.ranges.is_empty() {
                warn!(
                    property = %property.iri,
                    "multiple declared ranges, falling back to string"
                );
            }
            None
        }
    };
    match datatype {
        Some(datatype) => match vocab::xsd_to_oas(&datatype) {
            Some((ty, Some(format))) => json!({ "type": ty, "format": format }),
            Some((ty, None)) => json!({ "type": ty }),
            None => {
                warn!(
                    property = %property.iri,
                    datatype = %datatype,
                    "unmapped datatype, falling back to string"
                );
                json!({ "type": "string" })
            }
        },
        None => json!({ "type": "string" }),
    }
}

fn object_property_schema(
    property: &OntologyProperty,
    range_override: Option<&str>,
    labels: &BTreeMap<String, String>,
) -> Result<Value> {
    let target = match range_override {
        Some(range) => Some(range.to_string()),
        None => {
            if property.ranges.len() > 1 {
                return Err(GenError::AmbiguousRange {
                    property: property.iri.clone(),
                    ranges: property.ranges.iter().cloned().collect(),
                });
            }
            property.ranges.iter().next().cloned()
        }
    };
    match target.as_ref().and_then(|iri| labels.get(iri)) {
        Some(target_label) => Ok(json!({
            "$ref": format!("#/components/schemas/{target_label}")
        })),
        None => {
            warn!(
                property = %property.iri,
                "range does not resolve to a synthesised class, emitting a free-form object"
            );
            Ok(json!({ "type": "object" }))
        }
    }
}

fn apply_multiplicity(base: Value, multiplicity: &Multiplicity) -> Value {
    match multiplicity {
        Multiplicity::Scalar => base,
        Multiplicity::Array {
            min_items,
            max_items,
        } => {
            let mut array = Map::new();
            array.insert("type".to_string(), json!("array"));
            array.insert("items".to_string(), base);
            // minItems of zero is the default and adds nothing.
            if let Some(n) = (*min_items).filter(|n| *n > 0) {
                array.insert("minItems".to_string(), json!(n));
            }
            if let Some(n) = *max_items {
                array.insert("maxItems".to_string(), json!(n));
            }
            Value::Object(array)
        }
    }
}

/// `$ref` tolerates no sibling keywords, so a deprecated reference gets
/// wrapped before the flag is attached.
fn mark_deprecated(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            if map.contains_key("$ref") {
                json!({ "allOf": [Value::Object(map)], "deprecated": true })
            } else {
                map.insert("deprecated".to_string(), json!(true));
                Value::Object(map)
            }
        }
        other => other,
    }
}

fn path_entry(label: &str) -> Value {
    json!({
        "get": {
            "summary": format!("Get all '{label}' objects."),
            "responses": {
                "200": {
                    "description": format!("A paged array of '{label}' objects."),
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "array",
                                "items": { "$ref": format!("#/components/schemas/{label}") },
                            }
                        }
                    }
                }
            }
        }
    })
}
