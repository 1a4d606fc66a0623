// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Lifecycle operations invoked by the host runtime, one handler per type

pub mod app;
pub mod framework;
pub mod job;
pub mod provider;

pub use self::app::AppResource;
pub use self::framework::FrameworkResource;
pub use self::job::JobResource;
pub use self::provider::{KetchProvider, Operation};

use crate::domain::config::ConfigMap;
use crate::shared::diagnostics::{Diagnostic, Diagnostics};
use crate::shared::error::{ProviderError, Result};
use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Per-invocation resource data: the desired configuration, the last
/// observed state and the persistent identity.
#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: String,
    config: ConfigMap,
    state: Option<ConfigMap>,
    created: Option<DateTime<Utc>>,
    warnings: Diagnostics,
}

impl ResourceData {
    pub fn new(config: ConfigMap) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Data for an existing resource known only by its id.
    pub fn imported(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn clear_id(&mut self) {
        self.id.clear();
        self.state = None;
        self.created = None;
    }

    pub fn config(&self) -> &ConfigMap {
        &self.config
    }

    pub fn set_config(&mut self, config: ConfigMap) {
        self.config = config;
    }

    pub fn state(&self) -> Option<&ConfigMap> {
        self.state.as_ref()
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Record what was read back from the store.
    pub fn set_state(&mut self, state: ConfigMap, metadata: &ObjectMeta) {
        self.state = Some(state);
        self.created = metadata.creation_timestamp.as_ref().map(|t| t.0);
    }

    /// Queue a warning for the host; the operation still succeeds.
    pub fn warn(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.warnings.push(Diagnostic::warning(summary, detail));
    }

    pub fn take_warnings(&mut self) -> Diagnostics {
        std::mem::take(&mut self.warnings)
    }

    /// Whether the desired configuration differs from the last read state.
    pub fn has_change(&self) -> bool {
        self.state.as_ref() != Some(&self.config)
    }

    pub(crate) fn require_id(&self, type_name: &str) -> Result<&str> {
        if self.id.is_empty() {
            return Err(ProviderError::Validation(format!(
                "{} has no id; create or import it first",
                type_name
            )));
        }
        Ok(&self.id)
    }
}

#[async_trait::async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Resource type name, e.g. `ketch_app`.
    fn type_name(&self) -> &'static str;

    /// Key of the resource block in the configuration tree.
    fn schema_key(&self) -> &'static str;

    async fn create(&self, data: &mut ResourceData) -> Result<()>;

    async fn read(&self, data: &mut ResourceData) -> Result<()>;

    async fn update(&self, data: &mut ResourceData) -> Result<()>;

    async fn delete(&self, data: &mut ResourceData) -> Result<()>;

    /// Import passthrough: the id is the name, so a read is enough.
    async fn import(&self, data: &mut ResourceData) -> Result<()> {
        self.read(data).await
    }
}

/// Context attached to errors leaving a lifecycle operation.
pub(crate) fn operation_context(operation: &str, type_name: &str, name: &str) -> String {
    if name.is_empty() {
        format!("{} {}", operation, type_name)
    } else {
        format!("{} {} '{}'", operation, type_name, name)
    }
}

/// Names are immutable once a resource has an id.
pub(crate) fn ensure_same_name(type_name: &str, id: &str, name: &str) -> Result<()> {
    if !id.is_empty() && id != name {
        return Err(ProviderError::Validation(format!(
            "{} name is immutable: '{}' cannot be renamed to '{}'",
            type_name, id, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Value;

    #[test]
    fn test_has_change() {
        let mut config = ConfigMap::new();
        config.insert("name".to_string(), Value::String("web".to_string()));

        let mut data = ResourceData::new(config.clone());
        assert!(data.has_change());

        data.set_state(config, &ObjectMeta::default());
        assert!(!data.has_change());

        let mut changed = ConfigMap::new();
        changed.insert("name".to_string(), Value::String("api".to_string()));
        data.set_config(changed);
        assert!(data.has_change());
    }

    #[test]
    fn test_clear_id_drops_state() {
        let mut data = ResourceData::imported("web");
        data.set_state(ConfigMap::new(), &ObjectMeta::default());
        data.clear_id();
        assert!(data.id().is_empty());
        assert!(data.state().is_none());
        assert!(data.require_id("ketch_app").is_err());
    }

    #[test]
    fn test_rename_rejected() {
        assert!(ensure_same_name("ketch_app", "", "web").is_ok());
        assert!(ensure_same_name("ketch_app", "web", "web").is_ok());
        assert!(ensure_same_name("ketch_app", "web", "api")
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_operation_context() {
        assert_eq!(
            operation_context("creating", "ketch_job", "etl"),
            "creating ketch_job 'etl'"
        );
        assert_eq!(operation_context("reading", "ketch_job", ""), "reading ketch_job");
    }
}
