use thiserror::Error;

/// Reasons a name, namespace ID or subdomain is rejected by the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// When a value does not match the required pattern or alphabet.
    #[error("{field} ('{value}') is not allowed")]
    PatternMismatch {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// When a value is empty or longer than its configured maximum.
    #[error("{field} length ({value}) is out of bounds")]
    OutOfBounds {
        /// Field name that is out of bounds.
        field: &'static str,
        /// Offending length.
        value: usize,
    },
    /// When a value has the wrong number of `.` separators.
    #[error("{field} ('{value}') must contain exactly {expected} '.'")]
    Separators {
        /// Field name that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
        /// Required number of separators.
        expected: usize,
    },
}

/// Errors raised while building a consensus configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration JSON could not be parsed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
    /// A configured pattern is not a valid regular expression.
    #[error("invalid {field} pattern: {source}")]
    Pattern {
        /// Pattern name.
        field: &'static str,
        /// Regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// The epoch table violates its invariants.
    #[error("invalid epoch table: {0}")]
    Epochs(String),
    /// Some other configured value is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
