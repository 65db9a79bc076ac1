//! Errors reported while interpreting style strings.

use thiserror::Error;

/// A style value that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// A keyword property received a keyword it does not define.
    #[error("unknown {property} keyword '{value}'")]
    UnknownKeyword {
        /// The property being parsed.
        property: &'static str,
        /// The offending value.
        value: String,
    },

    /// A length could not be parsed.
    #[error("malformed length '{0}'")]
    MalformedLength(String),
}
