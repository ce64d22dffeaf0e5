//! Resource categories, CRUD verbs and the resource URL mapping.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Category of remote resource a resource interface manages.
///
/// Parsed case-insensitively, both through [`FromStr`] and serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceType {
    /// Mesh controller.
    MeshController,
    /// Service.
    Service,
    /// Service instance.
    ServiceInstance,
    /// Canary release rules.
    Canary,
    /// Load balance settings.
    LoadBalance,
    /// Resilience settings.
    Resilience,
    /// Tenant.
    Tenant,
    /// Tracing observability settings.
    ObservabilityTracings,
    /// Metrics observability settings.
    ObservabilityMetrics,
    /// Observability output server.
    ObservabilityOutputServer,
    /// Ingress.
    Ingress,
    /// HTTP route group.
    HttpRouteGroup,
    /// Traffic target.
    TrafficTarget,
    /// Custom resource kind.
    CustomResourceKind,
    /// Custom resource.
    CustomResource,
}

impl ResourceType {
    /// All resource categories in declaration order.
    pub const ALL: [ResourceType; 15] = [
        Self::MeshController,
        Self::Service,
        Self::ServiceInstance,
        Self::Canary,
        Self::LoadBalance,
        Self::Resilience,
        Self::Tenant,
        Self::ObservabilityTracings,
        Self::ObservabilityMetrics,
        Self::ObservabilityOutputServer,
        Self::Ingress,
        Self::HttpRouteGroup,
        Self::TrafficTarget,
        Self::CustomResourceKind,
        Self::CustomResource,
    ];

    /// Returns the category name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MeshController => "MeshController",
            Self::Service => "Service",
            Self::ServiceInstance => "ServiceInstance",
            Self::Canary => "Canary",
            Self::LoadBalance => "LoadBalance",
            Self::Resilience => "Resilience",
            Self::Tenant => "Tenant",
            Self::ObservabilityTracings => "ObservabilityTracings",
            Self::ObservabilityMetrics => "ObservabilityMetrics",
            Self::ObservabilityOutputServer => "ObservabilityOutputServer",
            Self::Ingress => "Ingress",
            Self::HttpRouteGroup => "HttpRouteGroup",
            Self::TrafficTarget => "TrafficTarget",
            Self::CustomResourceKind => "CustomResourceKind",
            Self::CustomResource => "CustomResource",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SchemaError::UnknownResourceType {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for ResourceType {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResourceType> for String {
    fn from(resource: ResourceType) -> Self {
        resource.name().to_string()
    }
}

/// CRUD operation a resource-interface method represents.
///
/// Parsed case-insensitively, both through [`FromStr`] and serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Verb {
    /// Fetch a single resource.
    Get,
    /// Fetch all resources of the category.
    List,
    /// Create a resource.
    Create,
    /// Update a resource.
    Patch,
    /// Delete a resource.
    Delete,
}

impl Verb {
    /// All verbs.
    pub const ALL: [Verb; 5] = [
        Self::Get,
        Self::List,
        Self::Create,
        Self::Patch,
        Self::Delete,
    ];

    /// Returns the lowercase verb name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| SchemaError::UnknownVerb {
                tag: s.to_string(),
            })
    }
}

impl TryFrom<String> for Verb {
    type Error = SchemaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Verb> for String {
    fn from(verb: Verb) -> Self {
        verb.as_str().to_string()
    }
}

/// Mapping from resource category to its item URL template.
///
/// Templates use `{placeholder}` segments, e.g. `/mesh/services/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceMapping {
    templates: BTreeMap<ResourceType, String>,
}

impl ResourceMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, returning the mapping for chaining.
    #[must_use]
    pub fn with(mut self, resource: ResourceType, template: impl Into<String>) -> Self {
        self.insert(resource, template);
        self
    }

    /// Inserts or replaces a template.
    pub fn insert(&mut self, resource: ResourceType, template: impl Into<String>) {
        self.templates.insert(resource, template.into());
    }

    /// Returns the template for a resource category.
    #[must_use]
    pub fn get(&self, resource: ResourceType) -> Option<&str> {
        self.templates.get(&resource).map(String::as_str)
    }

    /// Returns the number of mapped categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_from_str() {
        assert_eq!("get".parse::<Verb>().expect("Failed to parse"), Verb::Get);
        assert_eq!("List".parse::<Verb>().expect("Failed to parse"), Verb::List);
        assert_eq!(
            " DELETE ".parse::<Verb>().expect("Failed to parse"),
            Verb::Delete
        );
        assert!("watch".parse::<Verb>().is_err());
    }

    #[test]
    fn test_verb_display() {
        for verb in Verb::ALL {
            assert_eq!(verb.to_string(), verb.as_str());
        }
    }

    #[test]
    fn test_resource_type_round_trip_names() {
        for resource in ResourceType::ALL {
            let parsed: ResourceType = resource.name().parse().expect("Failed to parse");
            assert_eq!(parsed, resource);
        }
        assert!(matches!(
            "Gateway".parse::<ResourceType>(),
            Err(SchemaError::UnknownResourceType { .. })
        ));
    }

    #[test]
    fn test_mapping_lookup() {
        let mapping = ResourceMapping::new()
            .with(ResourceType::Service, "/mesh/services/{name}")
            .with(ResourceType::Tenant, "/mesh/tenants/{name}");

        assert_eq!(mapping.len(), 2);
        assert_eq!(
            mapping.get(ResourceType::Service),
            Some("/mesh/services/{name}")
        );
        assert_eq!(mapping.get(ResourceType::Ingress), None);
    }

    #[test]
    fn test_mapping_from_json() {
        let json = r#"{
            "Service": "/mesh/services/{name}",
            "Canary": "/mesh/services/{name}/canary"
        }"#;
        let mapping: ResourceMapping = serde_json::from_str(json).expect("Failed to parse");
        assert_eq!(
            mapping.get(ResourceType::Canary),
            Some("/mesh/services/{name}/canary")
        );
        assert!(!mapping.is_empty());
    }

    #[test]
    fn test_verb_from_json() {
        let verbs: Vec<Verb> =
            serde_json::from_str(r#"["get", "patch"]"#).expect("Failed to parse");
        assert_eq!(verbs, vec![Verb::Get, Verb::Patch]);
    }

    #[test]
    fn test_serde_accepts_any_case() {
        let verbs: Vec<Verb> =
            serde_json::from_str(r#"["GET", "Patch", " delete "]"#).expect("Failed to parse");
        assert_eq!(verbs, vec![Verb::Get, Verb::Patch, Verb::Delete]);

        let mapping: ResourceMapping =
            serde_json::from_str(r#"{"service": "/services/{name}", "TENANT": "/tenants/{name}"}"#)
                .expect("Failed to parse");
        assert_eq!(mapping.get(ResourceType::Service), Some("/services/{name}"));
        assert_eq!(mapping.get(ResourceType::Tenant), Some("/tenants/{name}"));
    }

    #[test]
    fn test_serde_rejects_unknown_names() {
        let err = serde_json::from_str::<Verb>(r#""watch""#).expect_err("Expected parse failure");
        assert!(err.to_string().contains("unknown verb 'watch'"));
        assert!(serde_json::from_str::<ResourceMapping>(r#"{"Gateway": "/gw"}"#).is_err());
    }

    #[test]
    fn test_serialize_uses_canonical_names() {
        let mapping = ResourceMapping::new().with(ResourceType::HttpRouteGroup, "/routes/{name}");
        assert_eq!(
            serde_json::to_string(&mapping).expect("Failed to serialize"),
            r#"{"HttpRouteGroup":"/routes/{name}"}"#
        );
        assert_eq!(
            serde_json::to_string(&Verb::Create).expect("Failed to serialize"),
            r#""create""#
        );
    }
}
