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

use super::{ensure_same_name, operation_context, ResourceData, ResourceHandler};
use crate::domain::config::{decode_block, encode_block};
use crate::domain::model::Framework;
use crate::domain::validator::ResourceValidator;
use crate::infrastructure::constants::{RESOURCE_FRAMEWORK, SCHEMA_KEY_FRAMEWORK};
use crate::infrastructure::kubernetes::resources::FrameworkBuilder;
use crate::infrastructure::kubernetes::KetchKubeClient;
use crate::shared::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub struct FrameworkResource {
    client: Arc<dyn KetchKubeClient>,
}

impl FrameworkResource {
    pub fn new(client: Arc<dyn KetchKubeClient>) -> Self {
        Self { client }
    }

    fn decode(&self, data: &ResourceData) -> Result<Framework> {
        let framework: Framework = decode_block(data.config(), SCHEMA_KEY_FRAMEWORK)?;
        debug!("Converted framework data: {:?}", framework);
        ResourceValidator::new().validate_framework(&framework)?;
        Ok(framework)
    }

    async fn create_framework(&self, framework: &Framework, data: &mut ResourceData) -> Result<()> {
        let obj = FrameworkBuilder::new(framework)
            .managed_by(self.client.field_manager())
            .build()?;
        self.client.create_framework(&obj).await?;
        data.set_id(&framework.name);
        info!("Created {} {}", RESOURCE_FRAMEWORK, framework.name);
        Ok(())
    }

    async fn update_framework(&self, framework: &Framework, data: &ResourceData) -> Result<()> {
        ensure_same_name(RESOURCE_FRAMEWORK, data.id(), &framework.name)?;

        let mut current = self.client.get_framework(&framework.name).await?;
        current.spec = FrameworkBuilder::new(framework).build_spec()?;
        self.client.update_framework(&current).await?;
        info!("Updated {} {}", RESOURCE_FRAMEWORK, framework.name);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResourceHandler for FrameworkResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_FRAMEWORK
    }

    fn schema_key(&self) -> &'static str {
        SCHEMA_KEY_FRAMEWORK
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let framework = self
            .decode(data)
            .map_err(|e| e.context(operation_context("creating", RESOURCE_FRAMEWORK, "")))?;
        self.create_framework(&framework, data)
            .await
            .map_err(|e| e.context(operation_context("creating", RESOURCE_FRAMEWORK, &framework.name)))?;
        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_FRAMEWORK)?.to_string();
        let obj = self
            .client
            .get_framework(&name)
            .await
            .map_err(|e| e.context(operation_context("reading", RESOURCE_FRAMEWORK, &name)))?;
        let framework = Framework::from(&obj);
        data.set_state(encode_block(SCHEMA_KEY_FRAMEWORK, &framework), &obj.metadata);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        if !data.has_change() {
            return self.read(data).await;
        }
        let framework = self
            .decode(data)
            .map_err(|e| e.context(operation_context("updating", RESOURCE_FRAMEWORK, data.id())))?;
        self.update_framework(&framework, data)
            .await
            .map_err(|e| e.context(operation_context("updating", RESOURCE_FRAMEWORK, &framework.name)))?;
        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_FRAMEWORK)?.to_string();
        let obj = self
            .client
            .get_framework(&name)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_FRAMEWORK, &name)))?;
        self.client
            .delete_framework(&obj)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_FRAMEWORK, &name)))?;
        info!("Deleted {} {}", RESOURCE_FRAMEWORK, name);
        data.clear_id();
        Ok(())
    }
}
