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

use super::{AppResource, FrameworkResource, JobResource, ResourceData, ResourceHandler};
use crate::domain::config::ProviderConf;
use crate::infrastructure::image::{DisabledImageSource, ImageMetadataSource, RegistryImageSource};
use crate::infrastructure::kubernetes::{KetchKubeClient, KetchKubeClientImpl};
use crate::shared::diagnostics::{Diagnostic, Diagnostics};
use crate::shared::error::{ProviderError, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Lifecycle operations the host can invoke on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Import,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Import => "import",
        };
        f.write_str(name)
    }
}

/// Registry of resource handlers sharing one store client.
pub struct KetchProvider {
    resources: BTreeMap<&'static str, Box<dyn ResourceHandler>>,
}

impl KetchProvider {
    pub fn new(client: Arc<dyn KetchKubeClient>, images: Arc<dyn ImageMetadataSource>) -> Self {
        let handlers: Vec<Box<dyn ResourceHandler>> = vec![
            Box::new(AppResource::new(client.clone(), images)),
            Box::new(JobResource::new(client.clone())),
            Box::new(FrameworkResource::new(client)),
        ];

        let resources = handlers
            .into_iter()
            .map(|handler| (handler.type_name(), handler))
            .collect();
        Self { resources }
    }

    /// Build the Kubernetes client and image source once from configuration.
    pub async fn configure(conf: &ProviderConf) -> std::result::Result<Self, Diagnostics> {
        let client = KetchKubeClientImpl::from_conf(&conf.kubernetes)
            .await
            .map_err(|e| {
                let mut diags = Diagnostics::default();
                diags.push(Diagnostic::error("Unable to create Ketch client", e.to_string()));
                diags
            })?;

        let images: Arc<dyn ImageMetadataSource> = if conf.image.lookup {
            Arc::new(RegistryImageSource::new(&conf.image))
        } else {
            Arc::new(DisabledImageSource)
        };

        info!("Ketch provider configured");
        Ok(Self::new(Arc::new(client), images))
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn ResourceHandler> {
        self.resources
            .get(type_name)
            .map(|handler| handler.as_ref())
            .ok_or_else(|| {
                ProviderError::Validation(format!(
                    "unknown resource type '{}', expected one of: {}",
                    type_name,
                    self.resources.keys().copied().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Run one lifecycle operation; failures come back as diagnostics.
    pub async fn invoke(
        &self,
        operation: Operation,
        type_name: &str,
        data: &mut ResourceData,
    ) -> Diagnostics {
        let handler = match self.resource(type_name) {
            Ok(handler) => handler,
            Err(e) => return e.into(),
        };

        debug!("Invoking {} on {} '{}'", operation, type_name, data.id());
        let result = match operation {
            Operation::Create => handler.create(data).await,
            Operation::Read => handler.read(data).await,
            Operation::Update => handler.update(data).await,
            Operation::Delete => handler.delete(data).await,
            Operation::Import => handler.import(data).await,
        };

        let mut diagnostics = data.take_warnings();
        if let Err(e) = result {
            diagnostics.extend(e.into());
        }
        diagnostics
    }
}
