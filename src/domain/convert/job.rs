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

use crate::domain::config::tree::{ConfigMap, Fields, TreeBuilder, TreeRecord};
use crate::domain::model::{Container, Job, Policy};
use crate::shared::error::Result;

impl TreeRecord for Job {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.string("name")?,
            job_type: fields.string("type")?,
            framework: fields.string("framework")?,
            version: fields.string("version")?,
            description: fields.string("description")?,
            parallelism: fields.int("parallelism")?,
            completions: fields.int("completions")?,
            suspend: fields.bool("suspend")?,
            backoff_limit: fields.int("backoff_limit")?,
            containers: fields.records("containers")?,
            policy: fields.record("policy")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("name", &self.name)
            .string("type", &self.job_type)
            .string("framework", &self.framework)
            .string("version", &self.version)
            .string("description", &self.description)
            .int("parallelism", self.parallelism)
            .int("completions", self.completions)
            .bool("suspend", self.suspend)
            .int("backoff_limit", self.backoff_limit)
            .records("containers", &self.containers)
            .record("policy", self.policy.as_ref())
            .build()
    }
}

impl TreeRecord for Container {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.string("name")?,
            image: fields.string("image")?,
            command: fields.strings("command")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("name", &self.name)
            .string("image", &self.image)
            .strings("command", &self.command)
            .build()
    }
}

impl TreeRecord for Policy {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            restart_policy: fields.string("restart_policy")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("restart_policy", &self.restart_policy)
            .build()
    }
}
