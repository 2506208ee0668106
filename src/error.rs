//! Error types
//!
//! Validation failures are recovered by the front-ends; persistence
//! failures propagate out to whoever drives the controller.

use crate::sim::Side;

/// Rejected setup input. The match state is left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} name must not be empty", .0.player_label())]
    EmptyName(Side),

    #[error("point goal must be a positive whole number, got {0:?}")]
    InvalidGoal(String),
}

/// History or name registry storage failed.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("browser storage failed: {0}")]
    Storage(String),
}

/// Any failure surfaced by the controller.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmptyName(Side::Left).to_string(),
            "Player 1 name must not be empty"
        );
        assert_eq!(
            ValidationError::InvalidGoal("abc".into()).to_string(),
            "point goal must be a positive whole number, got \"abc\""
        );
    }

    #[test]
    fn test_error_wraps_transparently() {
        let err: Error = ValidationError::InvalidGoal("0".into()).into();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(
            err.to_string(),
            "point goal must be a positive whole number, got \"0\""
        );
    }
}
