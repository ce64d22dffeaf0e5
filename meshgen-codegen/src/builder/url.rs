//! URL template selection for resource-interface methods.

use crate::error::CodegenError;
use meshgen_schema::{ResourceMapping, ResourceType, Verb};

/// Returns the URL template a verb of `resource` is sent to.
///
/// Get, Patch and Delete address a single item; List addresses the
/// collection; Create posts to the collection, or to the item for a
/// sub-resource since a nested resource is keyed by its parent.
///
/// # Errors
/// Returns `CodegenError::UnmappedResource` if `resource` has no template.
pub fn resolve_template(
    mapping: &ResourceMapping,
    resource: ResourceType,
    sub_resource: bool,
    verb: Verb,
) -> Result<String, CodegenError> {
    let item = mapping
        .get(resource)
        .ok_or(CodegenError::UnmappedResource { resource })?;

    let template = match verb {
        Verb::Get | Verb::Patch | Verb::Delete => item.to_string(),
        Verb::List => collection_template(item, sub_resource),
        Verb::Create if sub_resource => item.to_string(),
        Verb::Create => collection_template(item, false),
    };
    Ok(template)
}

/// Derives the collection template from an item template.
///
/// A top-level resource drops its trailing placeholder segment; a
/// sub-resource drops every placeholder segment.
#[must_use]
pub fn collection_template(item: &str, sub_resource: bool) -> String {
    let mut segments: Vec<&str> = item.split('/').collect();

    if sub_resource {
        segments.retain(|segment| !is_placeholder(segment));
    } else if segments.last().is_some_and(|segment| is_placeholder(segment)) {
        segments.pop();
    }

    let joined = segments.join("/");
    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Returns the placeholder names of a template in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

fn is_placeholder(segment: &str) -> bool {
    segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}')
}
