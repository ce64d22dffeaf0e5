//! Builder emitting methods that call the HTTP client runtime.
//!
//! Generated methods expand the resource URL template through the runtime's
//! `ExpandURL` and send the request with the record's client handle:
//!
//! ```text
//! func (s *serviceInterface) Get(ctx context.Context, name string) (*v1alpha1.Service, error) {
//!     url := runtime.ExpandURL("/mesh/services/{name}", name)
//!     result := new(v1alpha1.Service)
//!     if err := s.client.Do(ctx, http.MethodGet, url, nil, result); err != nil {
//!         return nil, fmt.Errorf("get Service %s: %w", url, err)
//!     }
//!     return result, nil
//! }
//! ```

use super::url::{placeholders, resolve_template};
use super::{
    BuildInfo, InterfaceMethodBuilder, check_shadowing, go_quote, method_header, receiver_name,
};
use crate::buffer::{CodeBuffer, DeclKind, Declaration, ImportSet};
use crate::config::DEFAULT_RUNTIME_PATH;
use crate::descriptor::{TypeDescriptor, TypeRef, render_params, render_results};
use crate::error::CodegenError;
use crate::extractor::{Extractor, ResolutionGap};
use meshgen_schema::Verb;

/// Emits CRUD methods backed by the HTTP client runtime.
#[derive(Debug, Clone)]
pub struct HttpMethodBuilder {
    runtime_path: String,
}

impl HttpMethodBuilder {
    /// Creates a builder referencing the runtime package at `runtime_path`.
    #[must_use]
    pub fn new(runtime_path: impl Into<String>) -> Self {
        Self {
            runtime_path: runtime_path.into(),
        }
    }

    /// Import path of the client runtime package.
    #[must_use]
    pub fn runtime_path(&self) -> &str {
        &self.runtime_path
    }

    fn build(
        &self,
        verb: Verb,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        let sig = Signature::extract(info)?;
        sig.check_results(verb)?;
        let template = resolve_template(
            info.resource_mapping,
            info.resource_type,
            info.sub_resource,
            verb,
        )?;

        // Render against a copy so a rejected method leaves no imports behind.
        let mut imports = buf.imports().clone();
        let request = Request::plan(&sig, &template, verb, &mut imports)?;
        let receiver = receiver_name(info.record_name);

        let mut output = sig.render_header(&receiver, info.record_name, &mut imports);
        let runtime = imports.add(&self.runtime_path);
        let http = imports.add("net/http");
        let fmt = imports.add("fmt");
        let mut reserved = vec![receiver.clone(), "url".to_string(), "err".to_string()];
        reserved.extend([runtime.clone(), http.clone(), fmt.clone()]);
        if let Some(alias) = &request.background {
            reserved.push(alias.clone());
        }

        output.push_str(&format!(
            "\turl := {}.ExpandURL({}{})\n",
            runtime,
            go_quote(&template),
            request
                .path_values
                .iter()
                .map(|v| format!(", {}", v))
                .collect::<String>()
        ));

        let action = format!("{} {}", verb, info.resource_type);
        let http_method = format!("{}.{}", http, http_method(verb));
        let errorf = format!("{}.Errorf", fmt);

        match verb {
            Verb::Get | Verb::List => {
                let target = &sig.results[0];
                if let TypeRef::Qualified { path, .. } = &target.base {
                    reserved.extend(imports.alias_of(path).map(str::to_string));
                }
                reserved.push("result".to_string());

                let (decl, out, zero) = if target.is_pointer() {
                    reserved.push("new".to_string());
                    (
                        format!("result := new({})", target.elem().render_type(&mut imports)),
                        "result",
                        "nil",
                    )
                } else {
                    let zero = if target.modifiers.is_empty() {
                        "result"
                    } else {
                        "nil"
                    };
                    (
                        format!("var result {}", target.render_type(&mut imports)),
                        "&result",
                        zero,
                    )
                };

                output.push_str(&format!("\t{}\n", decl));
                output.push_str(&format!(
                    "\tif err := {}.client.Do({}, {}, url, nil, {}); err != nil {{\n",
                    receiver, request.ctx, http_method, out
                ));
                output.push_str(&format!(
                    "\t\treturn {}, {}(\"{} %s: %w\", url, err)\n",
                    zero, errorf, action
                ));
                output.push_str("\t}\n");
                output.push_str("\treturn result, nil\n");
            }
            Verb::Create | Verb::Patch | Verb::Delete => {
                output.push_str(&format!(
                    "\tif err := {}.client.Do({}, {}, url, {}, nil); err != nil {{\n",
                    receiver,
                    request.ctx,
                    http_method,
                    request.body.as_deref().unwrap_or("nil")
                ));
                output.push_str(&format!(
                    "\t\treturn {}(\"{} %s: %w\", url, err)\n",
                    errorf, action
                ));
                output.push_str("\t}\n");
                output.push_str("\treturn nil\n");
            }
        }
        output.push_str("}\n");

        let reserved: Vec<&str> = reserved.iter().map(String::as_str).collect();
        check_shadowing(&sig.name, &sig.arguments, &reserved)?;

        *buf.imports_mut() = imports;
        buf.record_gaps(&sig.gaps);
        buf.push(Declaration {
            kind: DeclKind::CrudMethod(verb),
            name: sig.name,
            receiver: Some(info.record_name.to_string()),
            source: output,
        });
        Ok(())
    }
}

impl Default for HttpMethodBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_PATH)
    }
}

impl InterfaceMethodBuilder for HttpMethodBuilder {
    fn build_get_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        self.build(Verb::Get, info, buf)
    }

    fn build_patch_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        self.build(Verb::Patch, info, buf)
    }

    fn build_delete_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        self.build(Verb::Delete, info, buf)
    }

    fn build_list_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        self.build(Verb::List, info, buf)
    }

    fn build_create_method(
        &self,
        info: &BuildInfo<'_>,
        buf: &mut CodeBuffer,
    ) -> Result<(), CodegenError> {
        self.build(Verb::Create, info, buf)
    }
}

const fn http_method(verb: Verb) -> &'static str {
    match verb {
        Verb::Get | Verb::List => "MethodGet",
        Verb::Create => "MethodPost",
        Verb::Patch => "MethodPut",
        Verb::Delete => "MethodDelete",
    }
}

/// Extracted method signature.
struct Signature {
    name: String,
    arguments: Vec<TypeDescriptor>,
    results: Vec<TypeDescriptor>,
    gaps: Vec<ResolutionGap>,
}

impl Signature {
    fn extract(info: &BuildInfo<'_>) -> Result<Self, CodegenError> {
        let mut sig = Self {
            name: String::new(),
            arguments: Vec::new(),
            results: Vec::new(),
            gaps: Vec::new(),
        };
        let mut extractor = Extractor::new(info.method, info.imports);
        extractor
            .extract_method_name(&mut sig.name)
            .extract_arguments(&mut sig.arguments)
            .extract_results(&mut sig.results);
        extractor.error()?;
        sig.gaps = extractor.gaps().to_vec();
        Ok(sig)
    }

    fn check_results(&self, verb: Verb) -> Result<(), CodegenError> {
        match verb {
            Verb::Get | Verb::List => match self.results.as_slice() {
                [value, err] if err.is_error() && !value.is_error() => Ok(()),
                _ => Err(CodegenError::invalid_signature(
                    &self.name,
                    format!("{} expects (T, error) results", verb),
                )),
            },
            Verb::Create | Verb::Patch | Verb::Delete => match self.results.as_slice() {
                [err] if err.is_error() => Ok(()),
                _ => Err(CodegenError::invalid_signature(
                    &self.name,
                    format!("{} expects a single error result", verb),
                )),
            },
        }
    }

    fn render_header(&self, receiver: &str, record: &str, imports: &mut ImportSet) -> String {
        let params = render_params(&self.arguments, imports);
        let unnamed: Vec<TypeDescriptor> = self
            .results
            .iter()
            .map(|r| TypeDescriptor {
                name: None,
                ..r.clone()
            })
            .collect();
        let results = render_results(&unnamed, imports);

        method_header(receiver, record, &self.name, &params, &results)
    }
}

/// How the extracted parameters map onto the request.
struct Request {
    ctx: String,
    /// Alias of the `context` package when no context parameter is declared.
    background: Option<String>,
    body: Option<String>,
    path_values: Vec<String>,
}

impl Request {
    fn plan(
        sig: &Signature,
        template: &str,
        verb: Verb,
        imports: &mut ImportSet,
    ) -> Result<Self, CodegenError> {
        let ctx_index = sig.arguments.iter().position(TypeDescriptor::is_context);

        let body_index = match verb {
            Verb::Create | Verb::Patch => {
                let index = sig
                    .arguments
                    .iter()
                    .enumerate()
                    .rev()
                    .find(|(i, arg)| Some(*i) != ctx_index && is_body(arg))
                    .map(|(i, _)| i);
                if index.is_none() {
                    return Err(CodegenError::invalid_signature(
                        &sig.name,
                        format!("{} expects a request body parameter", verb),
                    ));
                }
                index
            }
            Verb::Get | Verb::List | Verb::Delete => None,
        };

        let body = body_index.map(|i| argument_name(&sig.arguments[i]));
        let mut path_values: Vec<String> = sig
            .arguments
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != ctx_index && Some(*i) != body_index)
            .map(|(_, arg)| argument_name(arg))
            .collect();

        let expected = placeholders(template).len();
        if let Some(body) = &body {
            if path_values.len() + 1 == expected {
                path_values.push(format!("{}.Name()", body));
            }
        }
        if path_values.len() != expected {
            return Err(CodegenError::invalid_signature(
                &sig.name,
                format!(
                    "URL template '{}' needs {} path values, method supplies {}",
                    template,
                    expected,
                    path_values.len()
                ),
            ));
        }

        let (ctx, background) = match ctx_index {
            Some(i) => (argument_name(&sig.arguments[i]), None),
            None => {
                let alias = imports.add("context");
                (format!("{}.Background()", alias), Some(alias))
            }
        };

        Ok(Self {
            ctx,
            background,
            body,
            path_values,
        })
    }
}

fn is_body(arg: &TypeDescriptor) -> bool {
    if arg.is_context() {
        return false;
    }
    arg.is_pointer() || matches!(arg.base, TypeRef::Qualified { .. })
}

fn argument_name(arg: &TypeDescriptor) -> String {
    arg.name.clone().unwrap_or_default()
}
