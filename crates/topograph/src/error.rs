//! Error types for Topograph rendering.
//!
//! This module provides the main error type [`TopographError`]. Every error
//! is terminal for a render: no partial document is ever produced.

use thiserror::Error;

use crate::icon::FetchError;

/// The main error type for Topograph operations.
#[derive(Debug, Error)]
pub enum TopographError {
    /// A relation names a component that is not part of the topology.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    #[error("component \"{component}\" does not have a valid position")]
    InvalidPosition { component: String },

    /// The icon fetcher failed. The message is the fetcher's, unchanged.
    #[error("{0}")]
    Fetch(FetchError),

    #[error("component \"{component}\" has an unusable icon: {reason}")]
    InvalidIcon { component: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TopographError {
    /// Create a new `InvalidPosition` error for the named component.
    pub fn invalid_position(component: impl Into<String>) -> Self {
        Self::InvalidPosition {
            component: component.into(),
        }
    }

    /// Create a new `InvalidIcon` error for the named component.
    pub fn invalid_icon(component: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidIcon {
            component: component.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_position_message() {
        let err = TopographError::invalid_position("charmworld");
        assert_eq!(
            err.to_string(),
            r#"component "charmworld" does not have a valid position"#
        );
    }

    #[test]
    fn test_fetch_message_is_verbatim() {
        let err = TopographError::Fetch("bad-wolf".into());
        assert_eq!(err.to_string(), "bad-wolf");
    }

    #[test]
    fn test_invalid_icon_message() {
        let err = TopographError::invalid_icon("mongodb", "not UTF-8");
        assert_eq!(
            err.to_string(),
            r#"component "mongodb" has an unusable icon: not UTF-8"#
        );
    }
}
