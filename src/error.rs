use std::fmt;

/// Why a reduction (or a noun construction) failed.
///
/// Nock has crash-only semantics: every failure is terminal for the call that
/// raised it and is handed back unchanged through every enclosing reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NockError {
    /// An atom was requested from a negative integer.
    InvalidAtom,
    /// Structural access walked into an atom.
    AddressOutOfBounds,
    /// Axis `0`, or an axis that is not an atom.
    InvalidAddress,
    /// Increment applied to a cell.
    NotAnAtom,
    /// A pair was required (`=` on an atom).
    NotACell,
    /// The formula matches none of the reduction rules.
    IllFormedFormula,
    /// A caller-imposed step budget ran out. Never raised by rule dispatch.
    EvaluationAborted { limit: u64 },
}

impl NockError {
    /// Short identifier, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            NockError::InvalidAtom => "InvalidAtom",
            NockError::AddressOutOfBounds => "AddressOutOfBounds",
            NockError::InvalidAddress => "InvalidAddress",
            NockError::NotAnAtom => "NotAnAtom",
            NockError::NotACell => "NotACell",
            NockError::IllFormedFormula => "IllFormedFormula",
            NockError::EvaluationAborted { .. } => "EvaluationAborted",
        }
    }
}

impl fmt::Display for NockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NockError::InvalidAtom => write!(f, "atoms are natural numbers, got a negative value"),
            NockError::AddressOutOfBounds => write!(f, "axis addresses into an atom"),
            NockError::InvalidAddress => write!(f, "axis must be a nonzero atom"),
            NockError::NotAnAtom => write!(f, "cannot increment a cell"),
            NockError::NotACell => write!(f, "expected a cell, found an atom"),
            NockError::IllFormedFormula => write!(f, "formula matches no reduction rule"),
            NockError::EvaluationAborted { limit } => {
                write!(f, "evaluation aborted after {} steps", limit)
            }
        }
    }
}

impl std::error::Error for NockError {}

pub type Result<T> = std::result::Result<T, NockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_variants() {
        assert_eq!(NockError::InvalidAddress.kind(), "InvalidAddress");
        assert_eq!(
            NockError::EvaluationAborted { limit: 3 }.kind(),
            "EvaluationAborted"
        );
    }

    #[test]
    fn test_display_mentions_limit() {
        let err = NockError::EvaluationAborted { limit: 250 };
        assert_eq!(err.to_string(), "evaluation aborted after 250 steps");
    }
}
