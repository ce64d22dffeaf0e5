//! Generator configuration.

/// License notice emitted at the top of every generated file.
pub const DEFAULT_LICENSE: &str = "Copyright (c) 2021, MegaEase
All rights reserved.

Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

	http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.";

/// Marker identifying generated files.
pub const DEFAULT_MARKER: &str =
    "code generated by github.com/megaease/easemeshctl/cmd/generator, DO NOT EDIT.";

/// Client handle type held by every generated record.
pub const DEFAULT_CLIENT_TYPE: &str = "*meshClient";

/// Import path of the client runtime called by generated methods.
pub const DEFAULT_RUNTIME_PATH: &str = "github.com/megaease/easemeshctl/cmd/client/runtime";

/// What the generator does when a declaration fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Record the error, keep earlier emissions and continue with the next
    /// declaration.
    SkipDeclaration,
}

/// Settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// License notice for the file header.
    pub license: String,
    /// Generated-file marker for the file header.
    pub marker: String,
    /// Type of the client handle field.
    pub client_type: String,
    /// Import path of the client runtime.
    pub runtime_path: String,
    /// Failure handling.
    pub error_policy: ErrorPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            license: DEFAULT_LICENSE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            client_type: DEFAULT_CLIENT_TYPE.to_string(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            error_policy: ErrorPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Starts a builder with default settings.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }
}

/// Builder for [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorBuilder {
    config: GeneratorConfig,
}

impl GeneratorBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the license notice.
    #[must_use]
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.config.license = license.into();
        self
    }

    /// Sets the generated-file marker.
    #[must_use]
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.config.marker = marker.into();
        self
    }

    /// Sets the client handle type.
    #[must_use]
    pub fn client_type(mut self, client_type: impl Into<String>) -> Self {
        self.config.client_type = client_type.into();
        self
    }

    /// Sets the runtime import path.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.config.runtime_path = path.into();
        self
    }

    /// Sets the failure handling.
    #[must_use]
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.error_policy = policy;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
