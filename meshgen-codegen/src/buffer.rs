//! Emission buffer and per-run file spec.
//!
//! The buffer is append-only: declarations keep the order they were emitted
//! in, and the import set only grows as qualified types are rendered.

use crate::extractor::ResolutionGap;
use meshgen_schema::{ResourceMapping, Verb};
use std::collections::{BTreeMap, BTreeSet};

/// Imports referenced by generated code, keyed by full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    aliases: BTreeMap<String, String>,
    taken: BTreeSet<String>,
}

impl ImportSet {
    /// Creates an empty import set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` and returns the alias to reference it with.
    ///
    /// The alias is the sanitized final path segment; a numeric suffix is
    /// appended when another path already uses it.
    pub fn add(&mut self, path: &str) -> String {
        if let Some(alias) = self.aliases.get(path) {
            return alias.clone();
        }

        let base = guess_alias(path);
        let mut alias = base.clone();
        let mut suffix = 1;
        while self.taken.contains(&alias) {
            alias = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.taken.insert(alias.clone());
        self.aliases.insert(path.to_string(), alias.clone());
        alias
    }

    /// Returns the alias registered for `path`.
    #[must_use]
    pub fn alias_of(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    /// Returns true if no import has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Iterates `(path, alias)` pairs ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    /// Renders the import block.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();
        if self.is_empty() {
            return output;
        }

        output.push_str("import (\n");
        for (path, alias) in self.iter() {
            if path.rsplit('/').next() == Some(alias) {
                output.push_str(&format!("\t\"{}\"\n", path));
            } else {
                output.push_str(&format!("\t{} \"{}\"\n", alias, path));
            }
        }
        output.push_str(")\n");
        output
    }
}

fn guess_alias(path: &str) -> String {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let alias: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    match alias.chars().next() {
        None => "pkg".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", alias),
        Some(_) => alias,
    }
}

/// Kind of an emitted declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// Record type holding the client handle.
    Record,
    /// Factory method on a getter record.
    FactoryMethod,
    /// CRUD method on a resource-interface record.
    CrudMethod(Verb),
}

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Declared name.
    pub name: String,
    /// Receiver record for methods.
    pub receiver: Option<String>,
    /// Generated source text.
    pub source: String,
}

/// Append-only buffer of generated declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBuffer {
    package: String,
    header: Vec<String>,
    imports: ImportSet,
    decls: Vec<Declaration>,
    gaps: Vec<ResolutionGap>,
}

impl CodeBuffer {
    /// Creates an empty buffer for the given package.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            header: Vec::new(),
            imports: ImportSet::new(),
            decls: Vec::new(),
            gaps: Vec::new(),
        }
    }

    /// Package of the generated file.
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Appends a comment block to the file header.
    pub fn package_comment(&mut self, text: impl Into<String>) {
        self.header.push(text.into());
    }

    /// Header comment blocks in emission order.
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Imports referenced so far.
    #[must_use]
    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    /// Mutable access to the import set, used while rendering types.
    pub fn imports_mut(&mut self) -> &mut ImportSet {
        &mut self.imports
    }

    /// Appends a declaration.
    pub fn push(&mut self, decl: Declaration) {
        tracing::debug!(
            "Emitted {:?} '{}'{}",
            decl.kind,
            decl.name,
            decl.receiver
                .as_deref()
                .map(|r| format!(" on '{}'", r))
                .unwrap_or_default()
        );
        self.decls.push(decl);
    }

    /// Declarations in emission order.
    #[must_use]
    pub fn declarations(&self) -> &[Declaration] {
        &self.decls
    }

    /// Records unresolved references of an emitted declaration.
    pub fn record_gaps(&mut self, gaps: &[ResolutionGap]) {
        self.gaps.extend_from_slice(gaps);
    }

    /// Unresolved references emitted as unqualified names.
    #[must_use]
    pub fn gaps(&self) -> &[ResolutionGap] {
        &self.gaps
    }

    /// Number of declarations of the given kind.
    #[must_use]
    pub fn count(&self, kind: DeclKind) -> usize {
        self.decls.iter().filter(|d| d.kind == kind).count()
    }

    /// Renders the complete file.
    #[must_use]
    pub fn render(&self) -> String {
        let mut output = String::new();

        for block in &self.header {
            for line in block.lines() {
                if line.is_empty() {
                    output.push_str("//\n");
                } else {
                    output.push_str(&format!("// {}\n", line));
                }
            }
            output.push('\n');
        }

        output.push_str(&format!("package {}\n\n", self.package));

        if !self.imports.is_empty() {
            output.push_str(&self.imports.render());
            output.push('\n');
        }

        for decl in &self.decls {
            output.push_str(&decl.source);
            output.push('\n');
        }

        output
    }
}

/// State of one generation run: the buffer plus per-file settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Emission buffer.
    pub buf: CodeBuffer,
    /// Whether the resource category is nested under a parent resource.
    pub sub_resource: bool,
    /// Resource category to URL template mapping.
    pub resource_mapping: ResourceMapping,
}

impl FileSpec {
    /// Creates a file spec with an empty buffer.
    #[must_use]
    pub fn new(
        package: impl Into<String>,
        sub_resource: bool,
        resource_mapping: ResourceMapping,
    ) -> Self {
        Self {
            buf: CodeBuffer::new(package),
            sub_resource,
            resource_mapping,
        }
    }
}
