//! Type nodes and declarations of resource-client interfaces.
//!
//! The model mirrors the narrow signature shapes the interface convention
//! produces: plain identifiers, package-qualified identifiers, pointers and
//! sequences. Anything else is carried as [`TypeExpr::Unsupported`] so that
//! extraction can report it instead of guessing.

use crate::imports::ImportTable;
use crate::resource::ResourceType;

/// A type node of a parameter or result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Plain identifier, e.g. `string` or `error`.
    Ident(String),
    /// Package-qualified identifier, e.g. `v1alpha1.Service`.
    Qualified {
        /// Package name or import alias as written at the use site.
        package: String,
        /// Type name within the package.
        name: String,
    },
    /// Pointer to the inner type.
    Pointer(Box<TypeExpr>),
    /// Sequence (slice) of the inner type.
    Sequence(Box<TypeExpr>),
    /// Any other node shape, kept as its source text.
    Unsupported(String),
}

impl TypeExpr {
    /// Creates a plain identifier node.
    #[must_use]
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Creates a package-qualified identifier node.
    #[must_use]
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Wraps `inner` in a pointer node.
    #[must_use]
    pub fn pointer(inner: TypeExpr) -> Self {
        Self::Pointer(Box::new(inner))
    }

    /// Wraps `inner` in a sequence node.
    #[must_use]
    pub fn sequence(inner: TypeExpr) -> Self {
        Self::Sequence(Box::new(inner))
    }
}

/// A parameter or result entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared name, if any.
    pub name: Option<String>,
    /// Type node.
    pub ty: TypeExpr,
}

impl Field {
    /// Creates a named field.
    #[must_use]
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    /// Creates an unnamed field.
    #[must_use]
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self { name: None, ty }
    }
}

/// Parameter and result lists of a function type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncType {
    /// Ordered parameters.
    pub params: Vec<Field>,
    /// Ordered results.
    pub results: Vec<Field>,
}

/// Type of an interface member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberType {
    /// A method with a function signature.
    Func(FuncType),
    /// An embedded type (not a method).
    Embedded(TypeExpr),
}

/// A member of an interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Declared name slots; a well-formed method has exactly one.
    pub names: Vec<String>,
    /// Member type.
    pub ty: MemberType,
    /// Raw verb tag attached by the parser, if any.
    pub verb: Option<String>,
}

impl MethodDecl {
    /// Creates a method with the given signature and no verb tag.
    #[must_use]
    pub fn func(name: impl Into<String>, params: Vec<Field>, results: Vec<Field>) -> Self {
        Self {
            names: vec![name.into()],
            ty: MemberType::Func(FuncType { params, results }),
            verb: None,
        }
    }

    /// Attaches a verb tag.
    #[must_use]
    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// Returns the first declared name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Returns the function signature, if this member is a method.
    #[must_use]
    pub fn func_type(&self) -> Option<&FuncType> {
        match &self.ty {
            MemberType::Func(func) => Some(func),
            MemberType::Embedded(_) => None,
        }
    }
}

/// A named interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Interface name.
    pub name: String,
    /// Members in declaration order.
    pub methods: Vec<MethodDecl>,
}

impl InterfaceDecl {
    /// Creates an interface declaration.
    #[must_use]
    pub fn new(name: impl Into<String>, methods: Vec<MethodDecl>) -> Self {
        Self {
            name: name.into(),
            methods,
        }
    }

    /// Name of the generated record type implementing this interface.
    #[must_use]
    pub fn record_name(&self) -> String {
        lower_first(&self.name)
    }
}

/// One generation unit: the declarations of a single resource category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceFile {
    /// Package of the generated file.
    pub package: String,
    /// Imports visible to the declarations.
    pub imports: ImportTable,
    /// Resource category targeted by the resource interfaces.
    pub resource_type: ResourceType,
    /// Whether the category is nested under a parent resource.
    pub sub_resource: bool,
    /// Getter declarations, in declaration order.
    pub getters: Vec<InterfaceDecl>,
    /// Resource-interface declarations, in declaration order.
    pub interfaces: Vec<InterfaceDecl>,
}

impl InterfaceFile {
    /// Creates an empty file for the given package and resource category.
    #[must_use]
    pub fn new(package: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            package: package.into(),
            imports: ImportTable::default(),
            resource_type,
            sub_resource: false,
            getters: Vec::new(),
            interfaces: Vec::new(),
        }
    }
}

/// Lowercases the first character of `s`.
#[must_use]
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Service"), "service");
        assert_eq!(lower_first("ServiceGetter"), "serviceGetter");
        assert_eq!(lower_first("x"), "x");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_method_decl_accessors() {
        let method = MethodDecl::func(
            "Get",
            vec![Field::named("name", TypeExpr::ident("string"))],
            vec![Field::unnamed(TypeExpr::ident("error"))],
        )
        .with_verb("get");

        assert_eq!(method.name(), Some("Get"));
        assert_eq!(method.verb.as_deref(), Some("get"));
        let func = method.func_type().expect("Failed to get func type");
        assert_eq!(func.params.len(), 1);
        assert_eq!(func.results.len(), 1);
    }

    #[test]
    fn test_embedded_member_has_no_func_type() {
        let method = MethodDecl {
            names: Vec::new(),
            ty: MemberType::Embedded(TypeExpr::qualified("io", "Closer")),
            verb: None,
        };
        assert!(method.func_type().is_none());
        assert!(method.name().is_none());
    }

    #[test]
    fn test_type_expr_nesting() {
        let ty = TypeExpr::pointer(TypeExpr::sequence(TypeExpr::qualified(
            "v1alpha1", "Service",
        )));
        match ty {
            TypeExpr::Pointer(inner) => assert!(matches!(*inner, TypeExpr::Sequence(_))),
            other => panic!("unexpected node: {other:?}"),
        }
    }

    #[test]
    fn test_interface_record_name() {
        let decl = InterfaceDecl::new("ServiceInterface", Vec::new());
        assert_eq!(decl.record_name(), "serviceInterface");
    }
}
