use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load ontology graph: {0}")]
    Load(String),

    #[error("ontology <{ontology}> is missing a required {annotation} annotation")]
    MissingAnnotation { ontology: String, annotation: String },

    #[error("property <{0}> is declared as both a datatype property and an object property")]
    ConflictingPropertyKind(String),

    #[error("object property <{property}> declares more than one range class: {ranges:?}")]
    AmbiguousRange {
        property: String,
        ranges: Vec<String>,
    },

    #[error("classes <{first}> and <{second}> both resolve to the schema name '{label}'")]
    DuplicateLabel {
        label: String,
        first: String,
        second: String,
    },

    #[error("superclass cycle detected involving <{0}>")]
    CycleDetected(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GenError>;
