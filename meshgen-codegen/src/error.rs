//! Error types for code generation.

use meshgen_schema::{ResourceType, SchemaError};
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// Declaration validation error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Interface member is not a method.
    #[error("method should contain a function type")]
    NotAFunction,

    /// Method without a declared name.
    #[error("function name is required")]
    MissingMethodName,

    /// Type node outside the supported shapes.
    #[error("unsupported type '{ty}' at position {position} of method '{method}'")]
    UnsupportedType {
        /// Method name.
        method: String,
        /// Zero-based position in the parameter or result list.
        position: usize,
        /// Source text of the type node.
        ty: String,
    },

    /// Factory method emitted before any getter record.
    #[error("no getter record emitted before factory method '{method}'")]
    NoGetterRecord {
        /// Method name.
        method: String,
    },

    /// Resource category missing from the URL mapping.
    #[error("resource type '{resource}' has no URL template")]
    UnmappedResource {
        /// Resource category.
        resource: ResourceType,
    },

    /// Signature does not fit the verb's expected shape.
    #[error("invalid signature for method '{method}': {message}")]
    InvalidSignature {
        /// Method name.
        method: String,
        /// What is wrong.
        message: String,
    },

    /// Error wrapped with a description of the failing step.
    #[error("{context}: {source}")]
    Context {
        /// Description of the failing step.
        context: String,
        /// Underlying error.
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Creates an invalid signature error.
    pub fn invalid_signature(method: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSignature {
            method: method.into(),
            message: message.into(),
        }
    }

    /// Wraps the error with a description of the failing step.
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping context layers.
    #[must_use]
    pub fn root_cause(&self) -> &CodegenError {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display_chains_messages() {
        let err = CodegenError::MissingMethodName.context("extract arguments and results");
        assert_eq!(
            err.to_string(),
            "extract arguments and results: function name is required"
        );
    }

    #[test]
    fn test_root_cause_skips_context() {
        let err = CodegenError::UnmappedResource {
            resource: ResourceType::Tenant,
        }
        .context("build get interface method error")
        .context("ServiceInterface");

        assert_eq!(
            err.root_cause(),
            &CodegenError::UnmappedResource {
                resource: ResourceType::Tenant
            }
        );
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: CodegenError = SchemaError::duplicate("method", "Get").into();
        assert!(matches!(err, CodegenError::Schema(_)));
    }
}
