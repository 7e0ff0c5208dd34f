//! Error types for Lookthrough core.
//!
//! Normalization, coercion and lookup are total and never produce these
//! errors. They only arise when decoding API payloads or identifiers.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while decoding security and portfolio data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A JSON payload could not be decoded.
    #[error("Invalid {context} payload: {reason}")]
    InvalidJson {
        /// What was being decoded (e.g. "target portfolio").
        context: String,
        /// Decoder message.
        reason: String,
    },

    /// A security identifier was empty or malformed.
    #[error("Invalid security id: '{value}'")]
    InvalidSecurityId {
        /// The rejected identifier text.
        value: String,
    },
}

impl CoreError {
    /// Creates an invalid JSON error.
    #[must_use]
    pub fn invalid_json(context: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidJson {
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an invalid security id error.
    #[must_use]
    pub fn invalid_security_id(value: impl Into<String>) -> Self {
        Self::InvalidSecurityId {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_json("target portfolio", "expected value at line 1");
        assert!(err.to_string().contains("target portfolio"));
        assert!(err.to_string().contains("line 1"));

        let err = CoreError::invalid_security_id("");
        assert!(err.to_string().contains("Invalid security id"));
    }
}
