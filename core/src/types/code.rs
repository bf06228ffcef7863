use std::fmt;

/// A coded concept: scheme designator, code value and code meaning
///
/// Identity is the (scheme, value) pair; the meaning is display text
/// and never participates in matching.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CodedEntry {
    pub scheme: String,
    pub value: String,
    pub meaning: String,
}

impl CodedEntry {
    /// Creates a new CodedEntry
    pub fn new(
        scheme: impl Into<String>,
        value: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
            meaning: meaning.into(),
        }
    }

    /// Checks whether this entry designates the given (scheme, value) pair
    pub fn designates(&self, scheme: &str, value: &str) -> bool {
        self.scheme == scheme && self.value == value
    }
}

impl fmt::Display for CodedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meaning)
    }
}
