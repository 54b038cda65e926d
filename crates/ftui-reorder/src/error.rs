#![forbid(unsafe_code)]

//! Error types.
//!
//! Only caller bugs surface as errors. Geometry that cannot be resolved and
//! drag ends whose indices cannot be recovered are absorbed by the engine and
//! reported through no-op transitions instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReorderError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    /// The item list handed to a sync contained the same key twice.
    #[error("duplicate item key {key} at positions {first} and {second}")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("item list cannot change while a drag is in progress")]
    DragInProgress,

    #[error("unknown item key {key}")]
    UnknownKey { key: String },
}

impl ReorderError {
    /// Whether the error indicates a broken item collection on the host side.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. })
    }

    pub(crate) fn duplicate_key(key: &impl std::fmt::Debug, first: usize, second: usize) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
            first,
            second,
        }
    }

    pub(crate) fn unknown_key(key: &impl std::fmt::Debug) -> Self {
        Self::UnknownKey {
            key: format!("{key:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_message() {
        let err = ReorderError::duplicate_key(&"tile-3", 1, 4);
        assert_eq!(
            err.to_string(),
            "duplicate item key \"tile-3\" at positions 1 and 4"
        );
        assert!(err.is_configuration_error());
    }

    #[test]
    fn unknown_key_message() {
        let err = ReorderError::unknown_key(&7_u32);
        assert_eq!(err.to_string(), "unknown item key 7");
        assert!(!err.is_configuration_error());
        assert!(!ReorderError::DragInProgress.is_configuration_error());
    }
}
