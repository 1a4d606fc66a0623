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

use super::{ImageConfig, ImageMetadataSource};
use crate::domain::config::ImageConf;
use crate::shared::error::{ProviderError, Result};
use backon::{BackoffBuilder, ExponentialBuilder};
use oci_distribution::client::{ClientConfig, ClientProtocol};
use oci_distribution::secrets::RegistryAuth;
use oci_distribution::{Client, Reference};
use tracing::debug;

/// Reads image configs from an OCI registry with anonymous auth.
pub struct RegistryImageSource {
    insecure_registries: Vec<String>,
    retries: usize,
}

impl RegistryImageSource {
    pub fn new(conf: &ImageConf) -> Self {
        Self {
            insecure_registries: conf.insecure_registries.clone(),
            retries: conf.retries,
        }
    }

    fn client_config(&self) -> ClientConfig {
        let protocol = if self.insecure_registries.is_empty() {
            ClientProtocol::Https
        } else {
            ClientProtocol::HttpsExcept(self.insecure_registries.clone())
        };
        ClientConfig {
            protocol,
            ..Default::default()
        }
    }

    async fn fetch(&self, image: &str, reference: &Reference) -> Result<ImageConfig> {
        let mut client = Client::new(self.client_config());
        let (_manifest, digest, config) = client
            .pull_manifest_and_config(reference, &RegistryAuth::Anonymous)
            .await
            .map_err(|e| {
                ProviderError::ImageLookup(format!(
                    "could not get config for image {:?}: {}",
                    image, e
                ))
            })?;
        debug!("Pulled config for image {} ({})", image, digest);

        ImageConfig::parse(&config).map_err(|e| {
            ProviderError::ImageLookup(format!("invalid config for image {:?}: {}", image, e))
        })
    }
}

#[async_trait::async_trait]
impl ImageMetadataSource for RegistryImageSource {
    async fn image_config(&self, image: &str) -> Result<ImageConfig> {
        let reference = Reference::try_from(image).map_err(|e| {
            ProviderError::ImageLookup(format!(
                "failed to parse reference for image {:?}: {}",
                image, e
            ))
        })?;

        let mut delays = ExponentialBuilder::default()
            .with_max_times(self.retries)
            .build();

        loop {
            match self.fetch(image, &reference).await {
                Ok(config) => return Ok(config),
                Err(e) => match delays.next() {
                    Some(delay) => {
                        debug!("Retrying image lookup in {:?}: {}", delay, e);
                        tokio::time::sleep(delay).await;
                    }
                    None => return Err(e),
                },
            }
        }
    }
}
