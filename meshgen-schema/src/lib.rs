//! # meshgen Schema
//!
//! Declaration model consumed by the mesh client generator.
//!
//! This crate provides:
//! - Type nodes, fields and method signatures of declared interfaces
//! - Import tables for resolving package-qualified type references
//! - Resource categories, CRUD verbs and the resource URL mapping
//! - Validation of an interface file before generation

pub mod error;
pub mod imports;
pub mod resource;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use imports::{ImportSpec, ImportTable};
pub use resource::{ResourceMapping, ResourceType, Verb};
pub use types::{
    Field, FuncType, InterfaceDecl, InterfaceFile, MemberType, MethodDecl, TypeExpr, lower_first,
};
pub use validation::validate_file;
