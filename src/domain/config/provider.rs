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

//! Provider configuration, loaded from TOML

use crate::infrastructure::constants::{
    DEFAULT_FIELD_MANAGER, DEFAULT_IMAGE_LOOKUP_RETRIES, PROVIDER_CONF_ENV,
};
use crate::shared::error::{ProviderError, Result};
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderConf {
    pub kubernetes: KubernetesConf,
    pub image: ImageConf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KubernetesConf {
    /// Path to a kubeconfig file; default resolution when unset.
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub field_manager: String,
}

impl Default for KubernetesConf {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            context: None,
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConf {
    /// Derive ports and commands from the image when not configured.
    pub lookup: bool,
    pub retries: usize,
    /// Registries reached over plain HTTP.
    pub insecure_registries: Vec<String>,
}

impl Default for ImageConf {
    fn default() -> Self {
        Self {
            lookup: true,
            retries: DEFAULT_IMAGE_LOOKUP_RETRIES,
            insecure_registries: Vec::new(),
        }
    }
}

impl ProviderConf {
    /// Load configuration from a TOML file
    pub fn from_file<T: AsRef<str>>(path: T) -> Result<Self> {
        let content = read_to_string(path.as_ref()).map_err(|e| {
            ProviderError::config_error(format!(
                "Failed to read config file {}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let conf: Self = toml::from_str(&content)?;
        Ok(conf)
    }

    /// Explicit path > `KETCH_PROVIDER_CONF` > defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match std::env::var(PROVIDER_CONF_ENV) {
            Ok(env_path) if !env_path.is_empty() => Self::from_file(env_path),
            _ => Ok(Self::default()),
        }
    }

    /// Command line values win over the file.
    pub fn with_overrides(mut self, kubeconfig: Option<String>, context: Option<String>) -> Self {
        if kubeconfig.is_some() {
            self.kubernetes.kubeconfig = kubeconfig;
        }
        if context.is_some() {
            self.kubernetes.context = context;
        }
        self
    }
}
