//! Error types for declaration parsing and validation.

use thiserror::Error;

/// Error type for declaration model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Unknown resource category name.
    #[error("unknown resource type '{name}'")]
    UnknownResourceType {
        /// Name that failed to parse.
        name: String,
    },

    /// Unknown verb tag.
    #[error("unknown verb '{tag}'")]
    UnknownVerb {
        /// Tag that failed to parse.
        tag: String,
    },

    /// Declaration without a name.
    #[error("{kind} declaration at position {position} has an empty name")]
    EmptyName {
        /// Kind of declaration (getter, interface).
        kind: String,
        /// Position in the declaration list.
        position: usize,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (declaration, method).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },
}

impl SchemaError {
    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an empty name error.
    pub fn empty_name(kind: impl Into<String>, position: usize) -> Self {
        Self::EmptyName {
            kind: kind.into(),
            position,
        }
    }
}
