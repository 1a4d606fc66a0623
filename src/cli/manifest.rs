//! Resource manifests read by the CLI

use crate::domain::config::{ConfigMap, Value};
use crate::shared::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

/// A YAML or JSON document naming the resource type next to its block:
///
/// ```yaml
/// resource: ketch_framework
/// framework:
///   - name: acme
///     ingress_controller:
///       - class_name: istio
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceManifest {
    pub resource: String,
    #[serde(flatten)]
    pub body: ConfigMap,
}

impl ResourceManifest {
    pub fn new(resource: impl Into<String>, body: ConfigMap) -> Self {
        Self {
            resource: resource.into(),
            body,
        }
    }

    /// Load a manifest from a file; JSON parses as YAML.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = read_to_string(path).map_err(|e| {
            ProviderError::config_error(format!("Failed to read manifest {}: {}", path, e))
        })?;
        let manifest: Self = serde_yaml::from_str(&content)?;
        Ok(manifest)
    }

    /// The `name` field of the resource block, in either nesting form.
    pub fn name(&self, schema_key: &str) -> Option<&str> {
        let fields = match self.body.get(schema_key)? {
            Value::List(items) => match items.first()? {
                Value::Map(fields) => fields,
                _ => return None,
            },
            Value::Map(fields) => fields,
            _ => return None,
        };
        match fields.get("name")? {
            Value::String(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "resource: ketch_job\njob:\n  - name: etl\n    framework: fw\n    parallelism: 2"
        )
        .unwrap();

        let manifest = ResourceManifest::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(manifest.resource, "ketch_job");
        assert_eq!(manifest.name("job"), Some("etl"));
        assert!(!manifest.body.contains_key("resource"));
    }

    #[test]
    fn test_load_json_manifest_with_bare_block() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"resource": "ketch_framework", "framework": {{"name": "acme"}}}}"#
        )
        .unwrap();

        let manifest = ResourceManifest::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(manifest.name("framework"), Some("acme"));
        assert_eq!(manifest.name("app"), None);
    }

    #[test]
    fn test_missing_manifest() {
        let err = ResourceManifest::from_file("/nonexistent/app.yaml").unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
