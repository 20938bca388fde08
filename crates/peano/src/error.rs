//! Engine error type.
//!
//! The engine has exactly one failure mode: the caller handed it an
//! operand outside the domain of Peano arithmetic. It performs no I/O and
//! no external calls, so nothing else can fail. Invalid input is reported
//! synchronously and no partial derivation is ever returned.

/// An operand outside the engine's domain.
///
/// Raised for negative operands at the construction entry points, zero
/// denominators, division or modulo by zero, division by a zero fraction,
/// and malformed Peano terms at the parsing boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller supplied an operand the axioms cannot express.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates an [`Error::InvalidInput`] from a reason string.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Invalid-input error for a term that does not parse as `0` or `s(…)`.
    pub(crate) fn malformed_term(term: &str) -> Self {
        Self::InvalidInput(format!("malformed Peano term `{term}`"))
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = Error::invalid("denominator cannot be 0");
        assert_eq!(err.to_string(), "invalid input: denominator cannot be 0");
    }

    #[test]
    fn malformed_term_names_the_term() {
        let err = Error::malformed_term("s(s(1))");
        assert!(err.to_string().contains("s(s(1))"));
    }
}
