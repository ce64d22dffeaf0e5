//! Emittable type descriptors.
//!
//! A descriptor is the reconstructed form of a parameter or result type:
//! an optional name, the pointer/sequence markers in nesting order and the
//! terminal type reference.

use crate::buffer::ImportSet;

/// Indirection marker applied on top of the terminal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// `*T`
    Pointer,
    /// `[]T`
    Sequence,
}

impl Modifier {
    /// Source text of the marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pointer => "*",
            Self::Sequence => "[]",
        }
    }
}

/// Terminal type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Unqualified name visible in the generated package.
    Local(String),
    /// Name qualified by a full import path.
    Qualified {
        /// Full import path.
        path: String,
        /// Type name.
        name: String,
    },
}

impl TypeRef {
    /// Creates a qualified reference; an empty path yields a local reference.
    #[must_use]
    pub fn qualified(path: impl Into<String>, name: impl Into<String>) -> Self {
        let path = path.into();
        let name = name.into();
        if path.is_empty() {
            Self::Local(name)
        } else {
            Self::Qualified { path, name }
        }
    }

    /// Returns the bare type name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local(name) | Self::Qualified { name, .. } => name,
        }
    }

    /// Renders the reference, registering its import in `imports`.
    pub fn render(&self, imports: &mut ImportSet) -> String {
        match self {
            Self::Local(name) => name.clone(),
            Self::Qualified { path, name } => format!("{}.{}", imports.add(path), name),
        }
    }
}

/// Emittable representation of one parameter or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Declared or synthesized name.
    pub name: Option<String>,
    /// Markers, outermost first.
    pub modifiers: Vec<Modifier>,
    /// Terminal type.
    pub base: TypeRef,
}

impl TypeDescriptor {
    /// Creates an unnamed descriptor without markers.
    #[must_use]
    pub fn new(base: TypeRef) -> Self {
        Self {
            name: None,
            modifiers: Vec::new(),
            base,
        }
    }

    /// Returns true for the built-in `error` result.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.modifiers.is_empty() && self.base == TypeRef::Local("error".to_string())
    }

    /// Returns true for an unmodified `context.Context`.
    #[must_use]
    pub fn is_context(&self) -> bool {
        match &self.base {
            TypeRef::Qualified { path, name } => {
                self.modifiers.is_empty() && path == "context" && name == "Context"
            }
            TypeRef::Local(_) => false,
        }
    }

    /// Returns true if the outermost marker is a pointer.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        self.modifiers.first() == Some(&Modifier::Pointer)
    }

    /// Returns true if the outermost marker is a sequence.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        self.modifiers.first() == Some(&Modifier::Sequence)
    }

    /// Returns the descriptor with its outermost marker removed, unnamed.
    #[must_use]
    pub fn elem(&self) -> TypeDescriptor {
        Self {
            name: None,
            modifiers: self.modifiers.iter().skip(1).copied().collect(),
            base: self.base.clone(),
        }
    }

    /// Renders the type expression without the name.
    pub fn render_type(&self, imports: &mut ImportSet) -> String {
        let mut out: String = self.modifiers.iter().map(|m| m.as_str()).collect();
        out.push_str(&self.base.render(imports));
        out
    }

    /// Renders `name type`, or just the type when unnamed.
    pub fn render(&self, imports: &mut ImportSet) -> String {
        let ty = self.render_type(imports);
        match &self.name {
            Some(name) => format!("{} {}", name, ty),
            None => ty,
        }
    }
}

/// Renders a parameter list body: `a string, b *pkg.T`.
pub fn render_params(params: &[TypeDescriptor], imports: &mut ImportSet) -> String {
    params
        .iter()
        .map(|p| p.render(imports))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a result list: empty, bare for one unnamed result, otherwise
/// parenthesized.
pub fn render_results(results: &[TypeDescriptor], imports: &mut ImportSet) -> String {
    match results {
        [] => String::new(),
        [single] if single.name.is_none() => single.render(imports),
        _ => format!("({})", render_params(results, imports)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_ptr_seq() -> TypeDescriptor {
        TypeDescriptor {
            name: Some("services".to_string()),
            modifiers: vec![Modifier::Pointer, Modifier::Sequence],
            base: TypeRef::qualified("example.org/mod/v1alpha1", "Service"),
        }
    }

    #[test]
    fn test_render_markers_in_nesting_order() {
        let mut imports = ImportSet::new();
        let desc = service_ptr_seq();
        assert_eq!(desc.render(&mut imports), "services *[]v1alpha1.Service");
        assert_eq!(imports.alias_of("example.org/mod/v1alpha1"), Some("v1alpha1"));
    }

    #[test]
    fn test_empty_path_degrades_to_local() {
        assert_eq!(
            TypeRef::qualified("", "Service"),
            TypeRef::Local("Service".to_string())
        );
    }

    #[test]
    fn test_elem_strips_outer_marker() {
        let elem = service_ptr_seq().elem();
        assert!(elem.is_sequence());
        assert!(elem.name.is_none());
        assert_eq!(elem.base.name(), "Service");
    }

    #[test]
    fn test_is_error_and_context() {
        let err = TypeDescriptor::new(TypeRef::Local("error".to_string()));
        assert!(err.is_error());
        assert!(!err.is_context());

        let ctx = TypeDescriptor::new(TypeRef::qualified("context", "Context"));
        assert!(ctx.is_context());
        assert!(!ctx.is_pointer());
    }

    #[test]
    fn test_render_results_shapes() {
        let mut imports = ImportSet::new();
        let err = TypeDescriptor::new(TypeRef::Local("error".to_string()));
        assert_eq!(render_results(&[], &mut imports), "");
        assert_eq!(render_results(&[err.clone()], &mut imports), "error");

        let ptr = TypeDescriptor {
            name: None,
            modifiers: vec![Modifier::Pointer],
            base: TypeRef::Local("Service".to_string()),
        };
        assert_eq!(
            render_results(&[ptr, err], &mut imports),
            "(*Service, error)"
        );
    }
}
