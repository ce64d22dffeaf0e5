//! # meshgen
//!
//! Generator of typed client wrappers for mesh control-plane resources.
//!
//! meshgen reads declared resource interfaces, where each method carries a
//! CRUD verb tag, and emits source for records whose methods call a shared
//! HTTP client runtime.
//!
//! ## Features
//!
//! - **Getter factories** - One factory method per resource interface
//! - **Verb-driven methods** - get, list, create, patch and delete bodies
//! - **URL templates** - Per-category templates with sub-resource support
//! - **Import tracking** - Only packages referenced by emitted code are imported
//!
//! ## Quick Start
//!
//! ```
//! use meshgen::prelude::*;
//!
//! let mut file = InterfaceFile::new("meshclient", ResourceType::Tenant);
//! file.interfaces.push(InterfaceDecl::new(
//!     "TenantInterface",
//!     vec![MethodDecl::func(
//!         "Delete",
//!         vec![Field::named("name", TypeExpr::ident("string"))],
//!         vec![Field::unnamed(TypeExpr::ident("error"))],
//!     )
//!     .with_verb("delete")],
//! ));
//! let mapping = ResourceMapping::new().with(ResourceType::Tenant, "/tenants/{name}");
//!
//! let source = meshgen::generate(&file, &mapping)?;
//! assert!(source.contains("func (t *tenantInterface) Delete(name string) error {"));
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Declaration model, resource categories and validation
//! - [`codegen`] - Extraction, method builders, visitor and generator

pub mod prelude;

/// Declaration model and validation.
pub mod schema {
    pub use meshgen_schema::*;
}

/// Client wrapper generation.
pub mod codegen {
    pub use meshgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use meshgen_codegen::{CodegenError, Generated, Generator, GeneratorConfig, generate};
pub use meshgen_schema::{InterfaceFile, ResourceMapping, ResourceType, Verb};
