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

//! Container image metadata lookup

pub mod registry;

use crate::shared::error::{ProviderError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

pub use self::registry::RegistryImageSource;

/// The parts of an image config that drive application defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageConfig {
    pub entrypoint: Vec<String>,
    pub cmd: Vec<String>,
    /// Declared ports in `<port>/<proto>` form, e.g. `8080/tcp`.
    pub exposed_ports: Vec<String>,
}

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    config: Option<ContainerConfig>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
struct ContainerConfig {
    #[serde(default)]
    entrypoint: Option<Vec<String>>,
    #[serde(default)]
    cmd: Option<Vec<String>>,
    #[serde(default)]
    exposed_ports: Option<BTreeMap<String, serde_json::Value>>,
}

impl ImageConfig {
    /// Parse the config blob referenced by an image manifest.
    pub fn parse(config_json: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(config_json)?;
        let config = file.config.unwrap_or_default();
        Ok(Self {
            entrypoint: config.entrypoint.unwrap_or_default(),
            cmd: config.cmd.unwrap_or_default(),
            exposed_ports: config
                .exposed_ports
                .map(|ports| ports.into_keys().collect())
                .unwrap_or_default(),
        })
    }

    /// Entrypoint followed by cmd.
    pub fn command(&self) -> Vec<String> {
        self.entrypoint
            .iter()
            .chain(self.cmd.iter())
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
pub trait ImageMetadataSource: Send + Sync {
    async fn image_config(&self, image: &str) -> Result<ImageConfig>;
}

/// Source used when image lookups are turned off in the provider config.
pub struct DisabledImageSource;

#[async_trait::async_trait]
impl ImageMetadataSource for DisabledImageSource {
    async fn image_config(&self, image: &str) -> Result<ImageConfig> {
        Err(ProviderError::ImageLookup(format!(
            "lookup disabled, skipping image {:?}",
            image
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_config() {
        let json = r#"{
            "architecture": "amd64",
            "config": {
                "Entrypoint": ["./app"],
                "Cmd": ["serve", "--port=8080"],
                "ExposedPorts": {"8080/tcp": {}, "9090/udp": {}}
            }
        }"#;
        let config = ImageConfig::parse(json).unwrap();
        assert_eq!(config.entrypoint, vec!["./app"]);
        assert_eq!(config.command(), vec!["./app", "serve", "--port=8080"]);
        assert_eq!(config.exposed_ports, vec!["8080/tcp", "9090/udp"]);
    }

    #[test]
    fn test_parse_config_with_nulls() {
        let json = r#"{"config": {"Entrypoint": null, "Cmd": ["sh"]}}"#;
        let config = ImageConfig::parse(json).unwrap();
        assert!(config.entrypoint.is_empty());
        assert_eq!(config.command(), vec!["sh"]);
        assert!(config.exposed_ports.is_empty());
    }

    #[test]
    fn test_parse_config_without_config_section() {
        let config = ImageConfig::parse("{}").unwrap();
        assert_eq!(config, ImageConfig::default());
    }

    #[tokio::test]
    async fn test_disabled_source_reports_unavailable() {
        let err = DisabledImageSource.image_config("nginx").await.unwrap_err();
        assert!(matches!(err, ProviderError::ImageLookup(_)));
    }
}
