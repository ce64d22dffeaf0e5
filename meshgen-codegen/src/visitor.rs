//! Interface visitor driving emission into a [`FileSpec`].

use crate::buffer::{CodeBuffer, DeclKind, Declaration, FileSpec};
use crate::builder::{
    BuildInfo, HttpMethodBuilder, InterfaceMethodBuilder, check_shadowing, method_header,
    receiver_name,
};
use crate::config::GeneratorConfig;
use crate::descriptor::{render_params, render_results};
use crate::error::CodegenError;
use crate::extractor::Extractor;
use meshgen_schema::{ImportTable, MethodDecl, ResourceType, Verb, lower_first};

/// Callbacks invoked while traversing the declarations of one file.
pub trait InterfaceVisitor {
    /// Emits the file header. Calling it twice duplicates the header.
    ///
    /// # Errors
    /// Implementations may fail; the default visitor never does.
    fn begin(&mut self, imports: &ImportTable, spec: &mut FileSpec) -> Result<(), CodegenError>;

    /// Emits the record type of a getter declaration and makes it the
    /// receiver of subsequent factory methods.
    ///
    /// # Errors
    /// Implementations may fail; the default visitor never does.
    fn getter_record(&mut self, name: &str, spec: &mut FileSpec) -> Result<(), CodegenError>;

    /// Emits the record type of a resource-interface declaration.
    ///
    /// # Errors
    /// Implementations may fail; the default visitor never does.
    fn interface_record(&mut self, name: &str, spec: &mut FileSpec) -> Result<(), CodegenError>;

    /// Emits a factory method on the current getter record.
    ///
    /// # Errors
    /// Returns `CodegenError` if no getter record was emitted or the
    /// signature cannot be extracted.
    fn getter_method(
        &mut self,
        name: &str,
        method: &MethodDecl,
        imports: &ImportTable,
        spec: &mut FileSpec,
    ) -> Result<(), CodegenError>;

    /// Emits the CRUD method matching `verb`; unrecognized verbs emit nothing.
    ///
    /// # Errors
    /// Returns `CodegenError` if the verb's builder fails.
    fn interface_method(
        &mut self,
        record_name: &str,
        verb: &str,
        method: &MethodDecl,
        imports: &ImportTable,
        spec: &mut FileSpec,
    ) -> Result<(), CodegenError>;

    /// Emits trailing declarations.
    ///
    /// # Errors
    /// Implementations may fail; the default visitor never does.
    fn end(&mut self, spec: &mut FileSpec) -> Result<(), CodegenError>;

    /// Records an error reported by the traversal.
    fn on_error(&mut self, err: CodegenError);
}

type BuildFn = fn(
    &dyn InterfaceMethodBuilder,
    &BuildInfo<'_>,
    &mut CodeBuffer,
) -> Result<(), CodegenError>;

const DISPATCH: [(Verb, BuildFn); 5] = [
    (Verb::Get, |b, info, buf| b.build_get_method(info, buf)),
    (Verb::Patch, |b, info, buf| b.build_patch_method(info, buf)),
    (Verb::Delete, |b, info, buf| b.build_delete_method(info, buf)),
    (Verb::List, |b, info, buf| b.build_list_method(info, buf)),
    (Verb::Create, |b, info, buf| b.build_create_method(info, buf)),
];

/// Visitor emitting mesh client wrappers.
pub struct MeshClientVisitor {
    err: Option<CodegenError>,
    getter_id: Option<String>,
    resource_type: ResourceType,
    license: String,
    marker: String,
    client_type: String,
    builder: Box<dyn InterfaceMethodBuilder>,
}

impl MeshClientVisitor {
    /// Creates a visitor with the default configuration.
    #[must_use]
    pub fn new(resource_type: ResourceType) -> Self {
        Self::with_config(resource_type, &GeneratorConfig::default())
    }

    /// Creates a visitor using an HTTP builder for the configured runtime.
    #[must_use]
    pub fn with_config(resource_type: ResourceType, config: &GeneratorConfig) -> Self {
        let builder = HttpMethodBuilder::new(config.runtime_path.clone());
        Self::with_builder(resource_type, config, Box::new(builder))
    }

    /// Creates a visitor delegating CRUD methods to `builder`.
    #[must_use]
    pub fn with_builder(
        resource_type: ResourceType,
        config: &GeneratorConfig,
        builder: Box<dyn InterfaceMethodBuilder>,
    ) -> Self {
        Self {
            err: None,
            getter_id: None,
            resource_type,
            license: config.license.clone(),
            marker: config.marker.clone(),
            client_type: config.client_type.clone(),
            builder,
        }
    }

    /// First error recorded through [`InterfaceVisitor::on_error`].
    #[must_use]
    pub fn error(&self) -> Option<&CodegenError> {
        self.err.as_ref()
    }

    fn record(&self, name: &str) -> Declaration {
        Declaration {
            kind: DeclKind::Record,
            name: name.to_string(),
            receiver: None,
            source: format!("type {} struct {{\n\tclient {}\n}}\n", name, self.client_type),
        }
    }
}

impl std::fmt::Debug for MeshClientVisitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshClientVisitor")
            .field("err", &self.err)
            .field("getter_id", &self.getter_id)
            .field("resource_type", &self.resource_type)
            .field("client_type", &self.client_type)
            .finish_non_exhaustive()
    }
}

impl InterfaceVisitor for MeshClientVisitor {
    fn begin(&mut self, imports: &ImportTable, spec: &mut FileSpec) -> Result<(), CodegenError> {
        tracing::debug!(
            "Begin {} file with {} imports",
            self.resource_type,
            imports.specs().len()
        );
        spec.buf.package_comment(self.license.clone());
        spec.buf.package_comment(self.marker.clone());
        Ok(())
    }

    fn getter_record(&mut self, name: &str, spec: &mut FileSpec) -> Result<(), CodegenError> {
        spec.buf.push(self.record(name));
        self.getter_id = Some(name.to_string());
        Ok(())
    }

    fn interface_record(&mut self, name: &str, spec: &mut FileSpec) -> Result<(), CodegenError> {
        spec.buf.push(self.record(name));
        Ok(())
    }

    fn getter_method(
        &mut self,
        name: &str,
        method: &MethodDecl,
        imports: &ImportTable,
        spec: &mut FileSpec,
    ) -> Result<(), CodegenError> {
        let getter = self
            .getter_id
            .as_deref()
            .ok_or_else(|| CodegenError::NoGetterRecord {
                method: name.to_string(),
            })?;

        let (mut arguments, mut results) = (Vec::new(), Vec::new());
        let mut extractor = Extractor::new(method, imports);
        extractor
            .extract_arguments(&mut arguments)
            .extract_results(&mut results);
        extractor.error().map_err(|e| {
            e.context(format!(
                "extract arguments and results from method '{}'",
                name
            ))
        })?;

        let receiver = receiver_name(getter);
        let struct_name = format!("{}Interface", lower_first(name));
        check_shadowing(name, &arguments, &[receiver.as_str(), struct_name.as_str()])?;

        spec.buf.record_gaps(extractor.gaps());
        let imports = spec.buf.imports_mut();
        let params = render_params(&arguments, imports);
        let results = render_results(&results, imports);

        let mut output = method_header(&receiver, getter, name, &params, &results);
        output.push_str(&format!(
            "\treturn &{}{{client: {}.client}}\n",
            struct_name, receiver
        ));
        output.push_str("}\n");

        spec.buf.push(Declaration {
            kind: DeclKind::FactoryMethod,
            name: name.to_string(),
            receiver: Some(getter.to_string()),
            source: output,
        });
        Ok(())
    }

    fn interface_method(
        &mut self,
        record_name: &str,
        verb: &str,
        method: &MethodDecl,
        imports: &ImportTable,
        spec: &mut FileSpec,
    ) -> Result<(), CodegenError> {
        let Some((verb, build)) = verb
            .parse::<Verb>()
            .ok()
            .and_then(|verb| DISPATCH.iter().find(|(v, _)| *v == verb))
        else {
            tracing::debug!(
                "Skipping '{}' on '{}': unrecognized verb '{}'",
                method.name().unwrap_or_default(),
                record_name,
                verb
            );
            return Ok(());
        };

        let info = BuildInfo {
            record_name,
            method,
            imports,
            resource_type: self.resource_type,
            sub_resource: spec.sub_resource,
            resource_mapping: &spec.resource_mapping,
        };

        build(&*self.builder, &info, &mut spec.buf)
            .map_err(|e| e.context(format!("build {} interface method error", verb)))
    }

    fn end(&mut self, _spec: &mut FileSpec) -> Result<(), CodegenError> {
        Ok(())
    }

    fn on_error(&mut self, err: CodegenError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }
}
