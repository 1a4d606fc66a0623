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
use crate::domain::model::App;
use crate::domain::policy::needs_image_config;
use crate::domain::validator::ResourceValidator;
use crate::infrastructure::constants::{RESOURCE_APP, SCHEMA_KEY_APP};
use crate::infrastructure::image::{ImageConfig, ImageMetadataSource};
use crate::infrastructure::kubernetes::crd::KetchApp;
use crate::infrastructure::kubernetes::resources::AppBuilder;
use crate::infrastructure::kubernetes::KetchKubeClient;
use crate::shared::error::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct AppResource {
    client: Arc<dyn KetchKubeClient>,
    images: Arc<dyn ImageMetadataSource>,
}

impl AppResource {
    pub fn new(client: Arc<dyn KetchKubeClient>, images: Arc<dyn ImageMetadataSource>) -> Self {
        Self { client, images }
    }

    fn decode(&self, data: &ResourceData) -> Result<App> {
        let app: App = decode_block(data.config(), SCHEMA_KEY_APP)?;
        debug!("Converted app data: {:?}", app);
        ResourceValidator::new().validate_app(&app)?;
        Ok(app)
    }

    /// Best effort: a failed lookup only means there is nothing to derive.
    async fn image_config(&self, app: &App) -> Option<ImageConfig> {
        if !needs_image_config(&app.ports, &app.processes) {
            return None;
        }
        match self.images.image_config(&app.image).await {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Image lookup for app {} failed: {}", app.name, e);
                None
            }
        }
    }

    async fn build(&self, app: &App) -> Result<KetchApp> {
        let image_config = self.image_config(app).await;
        AppBuilder::new(app)
            .with_image_config(image_config.as_ref())
            .managed_by(self.client.field_manager())
            .build()
    }

    async fn create_app(&self, app: &App, data: &mut ResourceData) -> Result<()> {
        let obj = self.build(app).await?;
        self.client.create_app(&obj).await?;
        data.set_id(&app.name);
        info!("Created {} {}", RESOURCE_APP, app.name);
        Ok(())
    }

    async fn update_app(&self, app: &App, data: &ResourceData) -> Result<()> {
        ensure_same_name(RESOURCE_APP, data.id(), &app.name)?;

        let mut current = self.client.get_app(&app.name).await?;
        let updates = self.build(app).await?;
        current.spec = updates.spec;
        self.client.update_app(&current).await?;
        info!("Updated {} {}", RESOURCE_APP, app.name);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResourceHandler for AppResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_APP
    }

    fn schema_key(&self) -> &'static str {
        SCHEMA_KEY_APP
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let app = self
            .decode(data)
            .map_err(|e| e.context(operation_context("creating", RESOURCE_APP, "")))?;
        self.create_app(&app, data)
            .await
            .map_err(|e| e.context(operation_context("creating", RESOURCE_APP, &app.name)))?;
        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_APP)?.to_string();
        let obj = self
            .client
            .get_app(&name)
            .await
            .map_err(|e| e.context(operation_context("reading", RESOURCE_APP, &name)))?;
        let app = App::from(&obj);
        data.set_state(encode_block(SCHEMA_KEY_APP, &app), &obj.metadata);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        if !data.has_change() {
            return self.read(data).await;
        }
        let app = self
            .decode(data)
            .map_err(|e| e.context(operation_context("updating", RESOURCE_APP, data.id())))?;
        self.update_app(&app, data)
            .await
            .map_err(|e| e.context(operation_context("updating", RESOURCE_APP, &app.name)))?;
        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_APP)?.to_string();
        let obj = self
            .client
            .get_app(&name)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_APP, &name)))?;
        self.client
            .delete_app(&obj)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_APP, &name)))?;
        info!("Deleted {} {}", RESOURCE_APP, name);
        data.clear_id();
        Ok(())
    }
}
