//! Generation driver.
//!
//! Walks an [`InterfaceFile`] in declaration order and feeds it to an
//! [`InterfaceVisitor`]: header, getters, resource interfaces, trailer.

use crate::buffer::FileSpec;
use crate::config::{ErrorPolicy, GeneratorConfig};
use crate::error::CodegenError;
use crate::extractor::ResolutionGap;
use crate::visitor::{InterfaceVisitor, MeshClientVisitor};
use meshgen_schema::{ImportTable, InterfaceDecl, InterfaceFile, ResourceMapping, validate_file};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// File spec holding the emitted declarations.
    pub spec: FileSpec,
    /// Declaration errors recorded under [`ErrorPolicy::SkipDeclaration`].
    pub skipped: Vec<CodegenError>,
}

impl Generated {
    /// Renders the generated file.
    #[must_use]
    pub fn render(&self) -> String {
        self.spec.buf.render()
    }

    /// Qualified references emitted unqualified because their package was
    /// not imported.
    #[must_use]
    pub fn gaps(&self) -> &[ResolutionGap] {
        self.spec.buf.gaps()
    }
}

/// Drives generation of one interface file.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates client wrappers for `file` with the mesh client visitor.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation fails, or if a declaration fails
    /// under [`ErrorPolicy::Abort`].
    pub fn generate(
        &self,
        file: &InterfaceFile,
        mapping: &ResourceMapping,
    ) -> Result<Generated, CodegenError> {
        let visitor = MeshClientVisitor::with_config(file.resource_type, &self.config);
        self.generate_with(file, mapping, visitor)
    }

    /// Generates client wrappers for `file` with a custom visitor.
    ///
    /// # Errors
    /// See [`Generator::generate`].
    pub fn generate_with<V: InterfaceVisitor>(
        &self,
        file: &InterfaceFile,
        mapping: &ResourceMapping,
        mut visitor: V,
    ) -> Result<Generated, CodegenError> {
        validate_file(file)?;
        tracing::info!(
            "Generating {} client in package '{}' ({} getters, {} interfaces)",
            file.resource_type,
            file.package,
            file.getters.len(),
            file.interfaces.len()
        );

        let mut spec = FileSpec::new(&file.package, file.sub_resource, mapping.clone());
        let mut skipped = Vec::new();

        visitor.begin(&file.imports, &mut spec)?;

        for decl in &file.getters {
            let result = visit_getter(&mut visitor, decl, &file.imports, &mut spec);
            self.handle(result, decl, &mut visitor, &mut skipped)?;
        }

        for decl in &file.interfaces {
            let result = visit_interface(&mut visitor, decl, &file.imports, &mut spec);
            self.handle(result, decl, &mut visitor, &mut skipped)?;
        }

        visitor.end(&mut spec)?;

        tracing::info!(
            "Generated {} declarations for package '{}' ({} skipped, {} unresolved references)",
            spec.buf.declarations().len(),
            file.package,
            skipped.len(),
            spec.buf.gaps().len()
        );
        Ok(Generated { spec, skipped })
    }

    fn handle<V: InterfaceVisitor>(
        &self,
        result: Result<(), CodegenError>,
        decl: &InterfaceDecl,
        visitor: &mut V,
        skipped: &mut Vec<CodegenError>,
    ) -> Result<(), CodegenError> {
        let Err(err) = result else {
            return Ok(());
        };
        let err = err.context(format!("declaration '{}'", decl.name));
        visitor.on_error(err.clone());

        match self.config.error_policy {
            ErrorPolicy::Abort => Err(err),
            ErrorPolicy::SkipDeclaration => {
                tracing::warn!("Skipping rest of declaration: {}", err);
                skipped.push(err);
                Ok(())
            }
        }
    }
}

fn visit_getter<V: InterfaceVisitor>(
    visitor: &mut V,
    decl: &InterfaceDecl,
    imports: &ImportTable,
    spec: &mut FileSpec,
) -> Result<(), CodegenError> {
    visitor.getter_record(&decl.record_name(), spec)?;
    for method in &decl.methods {
        visitor.getter_method(method.name().unwrap_or_default(), method, imports, spec)?;
    }
    Ok(())
}

fn visit_interface<V: InterfaceVisitor>(
    visitor: &mut V,
    decl: &InterfaceDecl,
    imports: &ImportTable,
    spec: &mut FileSpec,
) -> Result<(), CodegenError> {
    let record = decl.record_name();
    visitor.interface_record(&record, spec)?;

    for method in &decl.methods {
        match method.verb.as_deref() {
            Some(verb) => visitor.interface_method(&record, verb, method, imports, spec)?,
            None => tracing::debug!(
                "Skipping untagged method '{}' on '{}'",
                method.name().unwrap_or_default(),
                record
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DeclKind;
    use meshgen_schema::{Field, ImportSpec, MethodDecl, ResourceType, TypeExpr, Verb};

    fn error() -> Field {
        Field::unnamed(TypeExpr::ident("error"))
    }

    fn service() -> TypeExpr {
        TypeExpr::pointer(TypeExpr::qualified("v1alpha1", "Service"))
    }

    fn create_test_file() -> InterfaceFile {
        let mut file = InterfaceFile::new("meshclient", ResourceType::Service);
        file.imports = [
            ImportSpec::new("context"),
            ImportSpec::new("example.org/mod/v1alpha1"),
        ]
        .into_iter()
        .collect();
        file.getters.push(InterfaceDecl::new(
            "ServiceGetter",
            vec![MethodDecl::func(
                "Service",
                Vec::new(),
                vec![Field::unnamed(TypeExpr::ident("ServiceInterface"))],
            )],
        ));
        file.interfaces.push(InterfaceDecl::new(
            "ServiceInterface",
            vec![
                MethodDecl::func(
                    "Get",
                    vec![Field::named("name", TypeExpr::ident("string"))],
                    vec![Field::unnamed(service()), error()],
                )
                .with_verb("get"),
                MethodDecl::func(
                    "Delete",
                    vec![Field::named("name", TypeExpr::ident("string"))],
                    vec![error()],
                )
                .with_verb("delete"),
                MethodDecl::func(
                    "String",
                    Vec::new(),
                    vec![Field::unnamed(TypeExpr::ident("string"))],
                ),
            ],
        ));
        file
    }

    fn mapping() -> ResourceMapping {
        ResourceMapping::new().with(ResourceType::Service, "/services/{name}")
    }

    #[test]
    fn test_generate_emits_in_declaration_order() {
        let generated = Generator::default()
            .generate(&create_test_file(), &mapping())
            .expect("Failed to generate");

        let names: Vec<_> = generated
            .spec
            .buf
            .declarations()
            .iter()
            .map(|d| (d.kind, d.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                (DeclKind::Record, "serviceGetter"),
                (DeclKind::FactoryMethod, "Service"),
                (DeclKind::Record, "serviceInterface"),
                (DeclKind::CrudMethod(Verb::Get), "Get"),
                (DeclKind::CrudMethod(Verb::Delete), "Delete"),
            ]
        );
        assert!(generated.skipped.is_empty());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = Generator::default()
            .generate(&create_test_file(), &mapping())
            .expect("Failed to generate");
        let second = Generator::default()
            .generate(&create_test_file(), &mapping())
            .expect("Failed to generate");
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_generate_rejects_invalid_file() {
        let mut file = create_test_file();
        file.interfaces.push(InterfaceDecl::new("ServiceGetter", Vec::new()));

        let err = Generator::default()
            .generate(&file, &mapping())
            .expect_err("Expected validation failure");
        assert!(matches!(err, CodegenError::Schema(_)));
    }

    #[test]
    fn test_generate_rejects_records_differing_in_case() {
        let mut file = create_test_file();
        file.getters.push(InterfaceDecl::new("serviceGetter", Vec::new()));

        let err = Generator::default()
            .generate(&file, &mapping())
            .expect_err("Expected duplicate record");
        assert_eq!(
            err.to_string(),
            "schema error: duplicate declaration definition: 'serviceGetter'"
        );
    }

    #[test]
    fn test_generate_collects_resolution_gaps() {
        let mut file = create_test_file();
        file.interfaces[0].methods[0] = MethodDecl::func(
            "Get",
            vec![Field::named("name", TypeExpr::ident("string"))],
            vec![
                Field::unnamed(TypeExpr::pointer(TypeExpr::qualified("v2", "Service"))),
                error(),
            ],
        )
        .with_verb("get");

        let generated = Generator::default()
            .generate(&file, &mapping())
            .expect("Failed to generate");
        assert_eq!(generated.gaps().len(), 1);
        assert_eq!(generated.gaps()[0].method, "Get");
        assert!(generated.render().contains("(*Service, error)"));
    }

    #[test]
    fn test_abort_policy_stops_on_first_failure() {
        let err = Generator::default()
            .generate(&create_test_file(), &ResourceMapping::new())
            .expect_err("Expected mapping miss");

        assert_eq!(
            err.to_string(),
            "declaration 'ServiceInterface': build get interface method error: \
             resource type 'Service' has no URL template"
        );
    }

    #[test]
    fn test_skip_policy_keeps_prior_emissions() {
        let mut file = create_test_file();
        file.interfaces.push(InterfaceDecl::new(
            "ServiceExtra",
            vec![MethodDecl::func("Get", Vec::new(), vec![error()]).with_verb("get")],
        ));
        let config = GeneratorConfig::builder()
            .error_policy(ErrorPolicy::SkipDeclaration)
            .build();

        let generated = Generator::new(config)
            .generate(&file, &mapping())
            .expect("Failed to generate");

        assert_eq!(generated.skipped.len(), 1);
        assert!(matches!(
            generated.skipped[0].root_cause(),
            CodegenError::InvalidSignature { .. }
        ));
        let buf = &generated.spec.buf;
        assert_eq!(buf.count(DeclKind::Record), 3);
        assert_eq!(buf.count(DeclKind::CrudMethod(Verb::Get)), 1);
    }
}
