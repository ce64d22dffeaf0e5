//! Interface file validation.
//!
//! Checks naming consistency of a file before generation. Signature shapes
//! are left to the extractor, which reports them per method.

use crate::error::SchemaError;
use crate::types::{InterfaceDecl, InterfaceFile};
use std::collections::HashSet;

/// Validates an interface file.
///
/// # Errors
/// Returns `SchemaError` if a declaration is unnamed, two declarations map to
/// the same record name, or a declaration repeats a method name.
pub fn validate_file(file: &InterfaceFile) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    validate_decls("getter", &file.getters, &mut seen)?;
    validate_decls("interface", &file.interfaces, &mut seen)?;
    Ok(())
}

fn validate_decls(
    kind: &str,
    decls: &[InterfaceDecl],
    seen: &mut HashSet<String>,
) -> Result<(), SchemaError> {
    for (position, decl) in decls.iter().enumerate() {
        if decl.name.is_empty() {
            return Err(SchemaError::empty_name(kind, position));
        }
        // `ServiceGetter` and `serviceGetter` share the record `serviceGetter`.
        if !seen.insert(decl.record_name()) {
            return Err(SchemaError::duplicate("declaration", &decl.name));
        }
        validate_methods(decl)?;
    }
    Ok(())
}

/// Validates that method names are unique within a declaration.
fn validate_methods(decl: &InterfaceDecl) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for name in decl.methods.iter().filter_map(|m| m.name()) {
        if !seen.insert(name) {
            return Err(SchemaError::duplicate(
                "method",
                format!("{}.{}", decl.name, name),
            ));
        }
    }
    Ok(())
}
