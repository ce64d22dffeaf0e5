//! Type descriptor extraction from method signatures.
//!
//! [`Extractor`] is a first-error-wins accumulator: once an error has been
//! recorded every further extraction call is a no-op, and [`Extractor::error`]
//! reports the first error unchanged.
//!
//! ```
//! use meshgen_codegen::extractor::Extractor;
//! use meshgen_schema::{Field, ImportTable, MethodDecl, TypeExpr};
//!
//! let method = MethodDecl::func(
//!     "Get",
//!     vec![Field::unnamed(TypeExpr::ident("string"))],
//!     vec![Field::unnamed(TypeExpr::ident("error"))],
//! );
//! let imports = ImportTable::new();
//! let (mut arguments, mut results) = (Vec::new(), Vec::new());
//!
//! Extractor::new(&method, &imports)
//!     .extract_arguments(&mut arguments)
//!     .extract_results(&mut results)
//!     .error()
//!     .unwrap();
//!
//! assert_eq!(arguments[0].name.as_deref(), Some("arg0"));
//! assert!(results[0].name.is_none());
//! ```

use crate::descriptor::{Modifier, TypeDescriptor, TypeRef};
use crate::error::CodegenError;
use meshgen_schema::{Field, FuncType, ImportTable, MethodDecl, TypeExpr};

/// A package-qualified reference whose package is not in the import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionGap {
    /// Method the reference appears in.
    pub method: String,
    /// Package name as written.
    pub package: String,
    /// Type name.
    pub name: String,
}

/// Converts the parameter and result lists of one method into descriptors.
#[derive(Debug)]
pub struct Extractor<'a> {
    err: Option<CodegenError>,
    func: Option<&'a FuncType>,
    method_name: &'a str,
    imports: &'a ImportTable,
    gaps: Vec<ResolutionGap>,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor for `method`.
    ///
    /// A member that is not a function, or has no declared name, yields an
    /// extractor already carrying the corresponding error.
    #[must_use]
    pub fn new(method: &'a MethodDecl, imports: &'a ImportTable) -> Self {
        let (func, err) = match (method.func_type(), method.name()) {
            (None, _) => (None, Some(CodegenError::NotAFunction)),
            (Some(_), None) => (None, Some(CodegenError::MissingMethodName)),
            (Some(func), Some(_)) => (Some(func), None),
        };

        Self {
            err,
            func,
            method_name: method.name().unwrap_or_default(),
            imports,
            gaps: Vec::new(),
        }
    }

    /// Appends parameter descriptors, naming unnamed ones `argN`.
    pub fn extract_arguments(&mut self, codes: &mut Vec<TypeDescriptor>) -> &mut Self {
        self.extract(true, codes)
    }

    /// Appends result descriptors. Unnamed results stay unnamed.
    pub fn extract_results(&mut self, codes: &mut Vec<TypeDescriptor>) -> &mut Self {
        self.extract(false, codes)
    }

    /// Writes the method name.
    pub fn extract_method_name(&mut self, name: &mut String) -> &mut Self {
        if self.err.is_none() {
            *name = self.method_name.to_string();
        }
        self
    }

    /// Returns the accumulated error, if any.
    ///
    /// # Errors
    /// Returns the first error recorded by this extractor.
    pub fn error(&self) -> Result<(), CodegenError> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Qualified references that could not be resolved so far.
    #[must_use]
    pub fn gaps(&self) -> &[ResolutionGap] {
        &self.gaps
    }

    fn extract(&mut self, synthesize: bool, codes: &mut Vec<TypeDescriptor>) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        let Some(func) = self.func else {
            return self;
        };
        let fields = if synthesize {
            &func.params
        } else {
            &func.results
        };

        let mut extracted = Vec::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            match self.describe(position, field, synthesize) {
                Ok(desc) => extracted.push(desc),
                Err(err) => {
                    self.err = Some(err);
                    return self;
                }
            }
        }

        codes.extend(extracted);
        self
    }

    fn describe(
        &mut self,
        position: usize,
        field: &Field,
        synthesize: bool,
    ) -> Result<TypeDescriptor, CodegenError> {
        let name = field
            .name
            .clone()
            .or_else(|| synthesize.then(|| format!("arg{}", position)));

        let mut modifiers = Vec::new();
        let mut node = &field.ty;
        let base = loop {
            match node {
                TypeExpr::Ident(ident) => break TypeRef::Local(ident.clone()),
                TypeExpr::Qualified { package, name } => break self.qualify(package, name),
                TypeExpr::Pointer(inner) => {
                    modifiers.push(Modifier::Pointer);
                    node = &**inner;
                }
                TypeExpr::Sequence(inner) => {
                    modifiers.push(Modifier::Sequence);
                    node = &**inner;
                }
                TypeExpr::Unsupported(text) => {
                    return Err(CodegenError::UnsupportedType {
                        method: self.method_name.to_string(),
                        position,
                        ty: text.clone(),
                    });
                }
            }
        };

        Ok(TypeDescriptor {
            name,
            modifiers,
            base,
        })
    }

    fn qualify(&mut self, package: &str, name: &str) -> TypeRef {
        match self.imports.resolve(package) {
            Some(path) => TypeRef::qualified(path, name),
            None => {
                tracing::warn!(
                    "Unresolved package '{}' for {}.{} in method '{}'",
                    package,
                    package,
                    name,
                    self.method_name
                );
                self.gaps.push(ResolutionGap {
                    method: self.method_name.to_string(),
                    package: package.to_string(),
                    name: name.to_string(),
                });
                TypeRef::qualified("", name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshgen_schema::{ImportSpec, MemberType};

    fn imports() -> ImportTable {
        [
            ImportSpec::new("context"),
            ImportSpec::aliased("v1a", "example.org/mod/v1alpha1"),
        ]
        .into_iter()
        .collect()
    }

    fn extract(method: &MethodDecl) -> (Vec<TypeDescriptor>, Vec<TypeDescriptor>) {
        let imports = imports();
        let (mut arguments, mut results) = (Vec::new(), Vec::new());
        Extractor::new(method, &imports)
            .extract_arguments(&mut arguments)
            .extract_results(&mut results)
            .error()
            .expect("Failed to extract");
        (arguments, results)
    }

    #[test]
    fn test_pointer_to_sequence_of_qualified() {
        let method = MethodDecl::func(
            "Replace",
            vec![Field::named(
                "services",
                TypeExpr::pointer(TypeExpr::sequence(TypeExpr::qualified("v1a", "Service"))),
            )],
            Vec::new(),
        );

        let (arguments, _) = extract(&method);
        assert_eq!(arguments.len(), 1);
        assert_eq!(
            arguments[0].modifiers,
            vec![Modifier::Pointer, Modifier::Sequence]
        );
        assert_eq!(
            arguments[0].base,
            TypeRef::Qualified {
                path: "example.org/mod/v1alpha1".to_string(),
                name: "Service".to_string(),
            }
        );
    }

    #[test]
    fn test_sequence_of_pointer_keeps_order() {
        let method = MethodDecl::func(
            "List",
            Vec::new(),
            vec![Field::unnamed(TypeExpr::sequence(TypeExpr::pointer(
                TypeExpr::ident("Service"),
            )))],
        );

        let (_, results) = extract(&method);
        assert_eq!(
            results[0].modifiers,
            vec![Modifier::Sequence, Modifier::Pointer]
        );
    }

    #[test]
    fn test_synthesized_argument_names() {
        let string = || Field::unnamed(TypeExpr::ident("string"));
        let method = MethodDecl::func(
            "Get",
            vec![string(), string(), string()],
            vec![string(), Field::unnamed(TypeExpr::ident("error"))],
        );

        let (arguments, results) = extract(&method);
        let names: Vec<_> = arguments.iter().map(|a| a.name.as_deref()).collect();
        assert_eq!(names, vec![Some("arg0"), Some("arg1"), Some("arg2")]);
        assert!(results.iter().all(|r| r.name.is_none()));
    }

    #[test]
    fn test_declared_names_are_kept() {
        let method = MethodDecl::func(
            "Get",
            vec![
                Field::named("ctx", TypeExpr::qualified("context", "Context")),
                Field::unnamed(TypeExpr::ident("string")),
            ],
            vec![Field::named("err", TypeExpr::ident("error"))],
        );

        let (arguments, results) = extract(&method);
        assert_eq!(arguments[0].name.as_deref(), Some("ctx"));
        assert_eq!(arguments[1].name.as_deref(), Some("arg1"));
        assert_eq!(results[0].name.as_deref(), Some("err"));
        assert!(arguments[0].is_context());
    }

    #[test]
    fn test_unresolved_package_degrades_and_records_gap() {
        let method = MethodDecl::func(
            "Get",
            Vec::new(),
            vec![Field::unnamed(TypeExpr::pointer(TypeExpr::qualified(
                "v2", "Service",
            )))],
        );
        let imports = imports();
        let mut results = Vec::new();
        let mut extractor = Extractor::new(&method, &imports);
        extractor.extract_results(&mut results);

        assert!(extractor.error().is_ok());
        assert_eq!(results[0].base, TypeRef::Local("Service".to_string()));
        assert_eq!(
            extractor.gaps(),
            &[ResolutionGap {
                method: "Get".to_string(),
                package: "v2".to_string(),
                name: "Service".to_string(),
            }]
        );
    }

    #[test]
    fn test_not_a_function_is_reported() {
        let method = MethodDecl {
            names: vec!["Closer".to_string()],
            ty: MemberType::Embedded(TypeExpr::qualified("io", "Closer")),
            verb: None,
        };
        let imports = imports();
        let mut arguments = Vec::new();
        let mut name = String::new();

        let result = Extractor::new(&method, &imports)
            .extract_arguments(&mut arguments)
            .extract_method_name(&mut name)
            .error();

        assert_eq!(result, Err(CodegenError::NotAFunction));
        assert!(arguments.is_empty());
        assert!(name.is_empty());
    }

    #[test]
    fn test_missing_name_is_reported_without_panic() {
        let method = MethodDecl {
            names: Vec::new(),
            ty: MemberType::Func(FuncType::default()),
            verb: None,
        };
        let imports = imports();
        let mut results = Vec::new();

        let result = Extractor::new(&method, &imports)
            .extract_results(&mut results)
            .error();
        assert_eq!(result, Err(CodegenError::MissingMethodName));
    }

    #[test]
    fn test_first_error_wins() {
        let method = MethodDecl::func(
            "Watch",
            vec![
                Field::unnamed(TypeExpr::ident("string")),
                Field::unnamed(TypeExpr::Unsupported("chan Event".to_string())),
            ],
            vec![Field::unnamed(TypeExpr::Unsupported(
                "map[string]int".to_string(),
            ))],
        );
        let imports = imports();
        let (mut arguments, mut results) = (Vec::new(), Vec::new());
        let mut extractor = Extractor::new(&method, &imports);

        extractor.extract_arguments(&mut arguments);
        let first = extractor.error().expect_err("Expected extraction failure");
        extractor.extract_results(&mut results);

        assert_eq!(extractor.error(), Err(first.clone()));
        assert_eq!(
            first,
            CodegenError::UnsupportedType {
                method: "Watch".to_string(),
                position: 1,
                ty: "chan Event".to_string(),
            }
        );
        assert!(arguments.is_empty());
        assert!(results.is_empty());
    }

    #[test]
    fn test_extract_method_name() {
        let method = MethodDecl::func("Delete", Vec::new(), Vec::new());
        let imports = imports();
        let mut name = String::new();

        Extractor::new(&method, &imports)
            .extract_method_name(&mut name)
            .error()
            .expect("Failed to extract");
        assert_eq!(name, "Delete");
    }
}
