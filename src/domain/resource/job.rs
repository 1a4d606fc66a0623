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
use crate::domain::model::Job;
use crate::domain::policy::restart_policy_fallback;
use crate::domain::validator::ResourceValidator;
use crate::infrastructure::constants::{RESOURCE_JOB, SCHEMA_KEY_JOB};
use crate::infrastructure::kubernetes::resources::JobBuilder;
use crate::infrastructure::kubernetes::KetchKubeClient;
use crate::shared::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub struct JobResource {
    client: Arc<dyn KetchKubeClient>,
}

impl JobResource {
    pub fn new(client: Arc<dyn KetchKubeClient>) -> Self {
        Self { client }
    }

    fn decode(&self, data: &ResourceData) -> Result<Job> {
        let job: Job = decode_block(data.config(), SCHEMA_KEY_JOB)?;
        debug!("Converted job data: {:?}", job);
        ResourceValidator::new().validate_job(&job)?;
        Ok(job)
    }

    fn report_fallbacks(job: &Job, data: &mut ResourceData) {
        if let Some(detail) = restart_policy_fallback(job.policy.as_ref()) {
            data.warn("Restart policy replaced", detail);
        }
    }

    async fn create_job(&self, job: &Job, data: &mut ResourceData) -> Result<()> {
        let obj = JobBuilder::new(job)
            .managed_by(self.client.field_manager())
            .build()?;
        self.client.create_job(&obj).await?;
        data.set_id(&job.name);
        info!("Created {} {}", RESOURCE_JOB, job.name);
        Ok(())
    }

    async fn update_job(&self, job: &Job, data: &ResourceData) -> Result<()> {
        ensure_same_name(RESOURCE_JOB, data.id(), &job.name)?;

        let mut current = self.client.get_job(&job.name).await?;
        current.spec = JobBuilder::new(job).build_spec()?;
        self.client.update_job(&current).await?;
        info!("Updated {} {}", RESOURCE_JOB, job.name);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResourceHandler for JobResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_JOB
    }

    fn schema_key(&self) -> &'static str {
        SCHEMA_KEY_JOB
    }

    async fn create(&self, data: &mut ResourceData) -> Result<()> {
        let job = self
            .decode(data)
            .map_err(|e| e.context(operation_context("creating", RESOURCE_JOB, "")))?;
        Self::report_fallbacks(&job, data);
        self.create_job(&job, data)
            .await
            .map_err(|e| e.context(operation_context("creating", RESOURCE_JOB, &job.name)))?;
        self.read(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_JOB)?.to_string();
        let obj = self
            .client
            .get_job(&name)
            .await
            .map_err(|e| e.context(operation_context("reading", RESOURCE_JOB, &name)))?;
        let job = Job::from(&obj);
        data.set_state(encode_block(SCHEMA_KEY_JOB, &job), &obj.metadata);
        Ok(())
    }

    async fn update(&self, data: &mut ResourceData) -> Result<()> {
        if !data.has_change() {
            return self.read(data).await;
        }
        let job = self
            .decode(data)
            .map_err(|e| e.context(operation_context("updating", RESOURCE_JOB, data.id())))?;
        Self::report_fallbacks(&job, data);
        self.update_job(&job, data)
            .await
            .map_err(|e| e.context(operation_context("updating", RESOURCE_JOB, &job.name)))?;
        self.read(data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let name = data.require_id(RESOURCE_JOB)?.to_string();
        let obj = self
            .client
            .get_job(&name)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_JOB, &name)))?;
        self.client
            .delete_job(&obj)
            .await
            .map_err(|e| e.context(operation_context("deleting", RESOURCE_JOB, &name)))?;
        info!("Deleted {} {}", RESOURCE_JOB, name);
        data.clear_id();
        Ok(())
    }
}
