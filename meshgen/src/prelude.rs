//! Prelude module for convenient imports.
//!
//! ```
//! use meshgen::prelude::*;
//! ```

// Declaration model
pub use meshgen_schema::{
    Field, FuncType, ImportSpec, ImportTable, InterfaceDecl, InterfaceFile, MemberType,
    MethodDecl, TypeExpr,
};
pub use meshgen_schema::{ResourceMapping, ResourceType, SchemaError, Verb};

// Generation
pub use meshgen_codegen::{
    CodeBuffer, CodegenError, DeclKind, ErrorPolicy, FileSpec, Generated, Generator,
    GeneratorConfig, HttpMethodBuilder, InterfaceMethodBuilder, InterfaceVisitor,
    MeshClientVisitor,
};
