//! Intermediate model an ontology graph is projected into before any
//! OpenAPI synthesis happens.
//!
//! All collections are ordered so that downstream output is deterministic
//! for a given input graph.

use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

use tracing::warn;

/// The three property declarations recognised in a graph. Annotation
/// properties are tracked so their IRIs are known, but never synthesised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Data,
    Object,
    Annotation,
}

/// A cardinality constraint attached to a property via a restriction.
/// Qualified variants carry the IRI of the class or datatype the
/// restriction counts, which overrides the property's declared range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    Exact(u64),
    Min(u64),
    Max(u64),
    QualifiedExact(u64, String),
    QualifiedMin(u64, String),
    QualifiedMax(u64, String),
}

/// An `owl:Restriction` read off a class, reduced to the property it
/// targets and the constraint it imposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub property: String,
    pub cardinality: Cardinality,
}

#[derive(Debug, Clone)]
pub struct OntologyClass {
    pub iri: String,
    /// Named superclasses, with `owl:Thing` already filtered out.
    pub super_classes: BTreeSet<String>,
    pub restrictions: Vec<Restriction>,
    pub deprecated: bool,
    /// `rdfs:label` literals keyed by language tag.
    pub labels: BTreeMap<Option<String>, String>,
}

impl OntologyClass {
    pub fn new(iri: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            super_classes: BTreeSet::new(),
            restrictions: Vec::new(),
            deprecated: false,
            labels: BTreeMap::new(),
        }
    }

    /// True when this class declares `property` itself, either through the
    /// property's domain or through one of its own restrictions.
    pub fn declares(&self, property: &OntologyProperty) -> bool {
        property.domains.contains(&self.iri)
            || self.restrictions.iter().any(|r| r.property == property.iri)
    }
}

#[derive(Debug, Clone)]
pub struct OntologyProperty {
    pub iri: String,
    pub kind: PropertyKind,
    pub domains: BTreeSet<String>,
    pub ranges: BTreeSet<String>,
    pub functional: bool,
    pub deprecated: bool,
    pub labels: BTreeMap<Option<String>, String>,
}

impl OntologyProperty {
    pub fn new(iri: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            iri: iri.into(),
            kind,
            domains: BTreeSet::new(),
            ranges: BTreeSet::new(),
            functional: false,
            deprecated: false,
            labels: BTreeMap::new(),
        }
    }
}

/// The projected ontology: document metadata plus every named class and
/// property, keyed by IRI.
#[derive(Debug, Clone)]
pub struct Ontology {
    pub iri: String,
    pub title: String,
    pub version: String,
    pub license: String,
    /// Set when the license annotation is an IRI rather than a literal.
    pub license_url: Option<String>,
    /// Optional `dc:description` annotation.
    pub description: Option<String>,
    pub classes: BTreeMap<String, OntologyClass>,
    pub properties: BTreeMap<String, OntologyProperty>,
}

/// How a property materialises on a schema once every restriction on it
/// has been taken into account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Multiplicity {
    Scalar,
    Array {
        min_items: Option<u64>,
        max_items: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveCardinality {
    pub multiplicity: Multiplicity,
    pub required: bool,
    /// Range forced by a qualified restriction, taking precedence over the
    /// property's declared range.
    pub range_override: Option<String>,
}

/// Folds the restrictions a class places on a property into a single
/// multiplicity decision.
///
/// An exact cardinality of one, a maximum of one, or a functional property
/// all collapse to a scalar; an exact cardinality above one pins both array
/// bounds; anything else stays an unbounded or half-bounded array. The
/// property becomes required when at least one value is guaranteed.
pub fn effective_cardinality(
    class: &OntologyClass,
    property: &OntologyProperty,
) -> EffectiveCardinality {
    let mut exact = None;
    let mut min = None;
    let mut max = None;
    let mut range_override = None;

    for restriction in class
        .restrictions
        .iter()
        .filter(|r| r.property == property.iri)
    {
        match &restriction.cardinality {
            Cardinality::Exact(n) => exact = Some(*n),
            Cardinality::Min(n) => min = Some(*n),
            Cardinality::Max(n) => max = Some(*n),
            Cardinality::QualifiedExact(n, qualifier) => {
                exact = Some(*n);
                range_override = Some(qualifier.clone());
            }
            Cardinality::QualifiedMin(n, qualifier) => {
                min = Some(*n);
                range_override = Some(qualifier.clone());
            }
            Cardinality::QualifiedMax(n, qualifier) => {
                max = Some(*n);
                range_override = Some(qualifier.clone());
            }
        }
    }

    let required = exact.is_some_and(|n| n >= 1) || min.is_some_and(|n| n >= 1);

    let multiplicity = match exact {
        Some(1) => Multiplicity::Scalar,
        Some(n) => Multiplicity::Array {
            min_items: Some(n),
            max_items: Some(n),
        },
        None if max == Some(1) || property.functional => Multiplicity::Scalar,
        None => Multiplicity::Array {
            min_items: min,
            max_items: max,
        },
    };

    EffectiveCardinality {
        multiplicity,
        required,
        range_override,
    }
}

/// Resolves a display label: an exact language-tag match wins, then a
/// plain literal, then the trailing segment of the IRI.
pub fn resolve_label(
    labels: &BTreeMap<Option<String>, String>,
    iri: &str,
    language: &str,
) -> String {
    labels
        .get(&Some(language.to_string()))
        .or_else(|| labels.get(&None))
        .cloned()
        .unwrap_or_else(|| local_name(iri).to_string())
}

/// The fragment after the last `#` or `/`, ignoring a trailing separator.
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['#', '/']);
    match trimmed.rfind(['#', '/']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Records a label literal, resolving repeated literals under one language
/// tag to the lexicographically smallest so output stays deterministic.
pub fn insert_label(
    labels: &mut BTreeMap<Option<String>, String>,
    tag: Option<String>,
    literal: String,
    owner: &str,
) {
    match labels.entry(tag) {
        Entry::Vacant(slot) => {
            slot.insert(literal);
        }
        Entry::Occupied(mut slot) => {
            warn!(
                resource = owner,
                kept = %slot.get().clone().min(literal.clone()),
                "multiple label literals share one language tag"
            );
            if literal < *slot.get() {
                slot.insert(literal);
            }
        }
    }
}
