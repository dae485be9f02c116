//! Schema module - static field declarations for structured model calls

/// Value type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text
    Text,

    /// Whole number
    Integer,

    /// Ordered list of strings
    TextList,
}

impl FieldKind {
    /// JSON type name used when describing the field to a model
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::TextList => "array of strings",
        }
    }
}

/// A named, typed field of a stage's input or output
///
/// Field specs are declared as constants so the structured-output contract
/// of every stage is fixed at compile time.
///
/// # Examples
///
/// ```
/// use claimscope_domain::{FieldKind, FieldSpec};
///
/// const SCORE: FieldSpec = FieldSpec::new("novelty_score", FieldKind::Integer)
///     .with_description("Score from 1-10");
///
/// assert_eq!(SCORE.name, "novelty_score");
/// assert_eq!(SCORE.description, Some("Score from 1-10"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Field name as it appears in the JSON payload
    pub name: &'static str,

    /// Value type
    pub kind: FieldKind,

    /// Optional hint shown to the model
    pub description: Option<&'static str>,
}

impl FieldSpec {
    /// Declare a field without a description
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            description: None,
        }
    }

    /// Attach a description
    pub const fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}
