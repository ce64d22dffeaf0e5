//! # meshgen Codegen
//!
//! Client wrapper generation from declared mesh resource interfaces.
//!
//! This crate provides:
//! - Type descriptor extraction from method signatures
//! - CRUD method builders targeting the HTTP client runtime
//! - The interface visitor and the generation driver
//! - An append-only emission buffer rendering the final file

pub mod buffer;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod visitor;

pub use buffer::{CodeBuffer, DeclKind, Declaration, FileSpec, ImportSet};
pub use builder::{BuildInfo, HttpMethodBuilder, InterfaceMethodBuilder};
pub use config::{ErrorPolicy, GeneratorBuilder, GeneratorConfig};
pub use descriptor::{Modifier, TypeDescriptor, TypeRef};
pub use error::CodegenError;
pub use extractor::{Extractor, ResolutionGap};
pub use generator::{Generated, Generator};
pub use visitor::{InterfaceVisitor, MeshClientVisitor};

use meshgen_schema::{InterfaceFile, ResourceMapping};

/// Generates client wrapper source for an interface file.
///
/// # Arguments
/// * `file` - Declarations of one resource category
/// * `mapping` - Resource category to URL template mapping
///
/// # Returns
/// Generated source as a string.
///
/// # Errors
/// Returns `CodegenError` if validation, extraction or building fails.
pub fn generate(file: &InterfaceFile, mapping: &ResourceMapping) -> Result<String, CodegenError> {
    let generated = Generator::default().generate(file, mapping)?;
    Ok(generated.render())
}
