//! Verb method builders.
//!
//! Each builder emits one method declaration on a resource-interface record.
//! Builders only produce source text; the generated code performs the
//! requests when compiled against the client runtime.

pub mod http;
pub mod url;

pub use http::HttpMethodBuilder;

use crate::buffer::CodeBuffer;
use crate::descriptor::TypeDescriptor;
use crate::error::CodegenError;
use meshgen_schema::{ImportTable, MethodDecl, ResourceMapping, ResourceType};

/// Everything a builder needs to emit one method.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo<'a> {
    /// Record type the method is declared on.
    pub record_name: &'a str,
    /// Declared method.
    pub method: &'a MethodDecl,
    /// Imports of the declaring file.
    pub imports: &'a ImportTable,
    /// Resource category of the declaring interface.
    pub resource_type: ResourceType,
    /// Whether the category is nested under a parent resource.
    pub sub_resource: bool,
    /// Resource category to URL template mapping.
    pub resource_mapping: &'a ResourceMapping,
}

/// Emits CRUD methods into a code buffer.
pub trait InterfaceMethodBuilder {
    /// Emits a method fetching a single resource.
    ///
    /// # Errors
    /// Returns `CodegenError` if the signature cannot be extracted or the
    /// resource has no URL template.
    fn build_get_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError>;

    /// Emits a method updating a resource.
    ///
    /// # Errors
    /// See [`InterfaceMethodBuilder::build_get_method`].
    fn build_patch_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError>;

    /// Emits a method deleting a resource.
    ///
    /// # Errors
    /// See [`InterfaceMethodBuilder::build_get_method`].
    fn build_delete_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError>;

    /// Emits a method listing resources.
    ///
    /// # Errors
    /// See [`InterfaceMethodBuilder::build_get_method`].
    fn build_list_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError>;

    /// Emits a method creating a resource.
    ///
    /// # Errors
    /// See [`InterfaceMethodBuilder::build_get_method`].
    fn build_create_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError>;
}

/// Formats the opening line of a method declaration.
pub(crate) fn method_header(
    receiver: &str,
    record: &str,
    name: &str,
    params: &str,
    results: &str,
) -> String {
    if results.is_empty() {
        format!("func ({} *{}) {}({}) {{\n", receiver, record, name, params)
    } else {
        format!(
            "func ({} *{}) {}({}) {} {{\n",
            receiver, record, name, params, results
        )
    }
}

/// Receiver name for methods on `record`: its lowercased first letter.
pub(crate) fn receiver_name(record: &str) -> String {
    record
        .chars()
        .next()
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_else(|| "r".to_string())
}

/// Rejects parameters named like an identifier the generated body refers to.
///
/// Such a parameter would redeclare the receiver, break a `:=` assignment, or
/// hide an imported package from the body.
pub(crate) fn check_shadowing(
    method: &str,
    arguments: &[TypeDescriptor],
    reserved: &[&str],
) -> Result<(), CodegenError> {
    let clash = arguments
        .iter()
        .filter_map(|arg| arg.name.as_deref())
        .find(|name| reserved.contains(name));

    match clash {
        Some(name) => Err(CodegenError::invalid_signature(
            method,
            format!("parameter '{}' shadows a generated identifier", name),
        )),
        None => Ok(()),
    }
}

/// Quotes `s` as a Go interpreted string literal.
pub(crate) fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
