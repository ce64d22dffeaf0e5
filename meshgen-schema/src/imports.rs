//! Import table used to resolve package-qualified type references.

/// A single import entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Explicit alias, if the import was renamed.
    pub alias: Option<String>,
    /// Full module path, without surrounding quotes.
    pub path: String,
}

impl ImportSpec {
    /// Creates an import without alias. Surrounding quotes are stripped.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: unquote(path.into()),
        }
    }

    /// Creates an aliased import. Surrounding quotes are stripped.
    #[must_use]
    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: unquote(path.into()),
        }
    }

    /// Returns the final segment of the import path.
    #[must_use]
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

fn unquote(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Ordered import entries of a declaration file. Read-only during generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    specs: Vec<ImportSpec>,
}

impl ImportTable {
    /// Creates an empty import table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an import entry.
    pub fn push(&mut self, spec: ImportSpec) {
        self.specs.push(spec);
    }

    /// Returns the import entries in source order.
    #[must_use]
    pub fn specs(&self) -> &[ImportSpec] {
        &self.specs
    }

    /// Resolves a package name used at a reference site to its full path.
    ///
    /// Aliases are matched first; otherwise the final path segment of each
    /// entry is compared. Entries with an empty path never match.
    #[must_use]
    pub fn resolve(&self, package: &str) -> Option<&str> {
        let candidates = || self.specs.iter().filter(|spec| !spec.path.is_empty());

        candidates()
            .find(|spec| spec.alias.as_deref() == Some(package))
            .or_else(|| candidates().find(|spec| spec.last_segment() == package))
            .map(|spec| spec.path.as_str())
    }
}

impl FromIterator<ImportSpec> for ImportTable {
    fn from_iter<I: IntoIterator<Item = ImportSpec>>(iter: I) -> Self {
        Self {
            specs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_by_alias() {
        let table: ImportTable = [ImportSpec::aliased("v1a", "example.org/mod/v1alpha1")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve("v1a"), Some("example.org/mod/v1alpha1"));
    }

    #[test]
    fn test_resolve_by_last_segment() {
        let table: ImportTable = [ImportSpec::new("example.org/mod/v1alpha1")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve("v1alpha1"), Some("example.org/mod/v1alpha1"));
    }

    #[test]
    fn test_resolve_miss_returns_none() {
        let table: ImportTable = [ImportSpec::new("example.org/mod/v1alpha1")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve("v2"), None);
        assert_eq!(ImportTable::new().resolve("v1alpha1"), None);
    }

    #[test]
    fn test_alias_wins_over_earlier_segment_match() {
        let table: ImportTable = [
            ImportSpec::new("example.org/other/meta"),
            ImportSpec::aliased("meta", "example.org/mod/meta/v1"),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.resolve("meta"), Some("example.org/mod/meta/v1"));
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let table: ImportTable = [ImportSpec::aliased("x", ""), ImportSpec::new("lib/x")]
            .into_iter()
            .collect();
        assert_eq!(table.resolve("x"), Some("lib/x"));
    }

    #[test]
    fn test_quotes_are_stripped() {
        let spec = ImportSpec::new("\"context\"");
        assert_eq!(spec.path, "context");
        assert_eq!(spec.last_segment(), "context");
    }
}
