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

use crate::domain::model::{App, Framework, Job};
use crate::domain::policy::resolve_namespace;
use crate::infrastructure::constants::{MAX_NAME_LENGTH, MAX_PORT, MAX_ROUTING_WEIGHT};
use crate::shared::error::{ProviderError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DNS_LABEL: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap()
    };
}

/// Checks run on decoded records before anything reaches the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceValidator;

impl ResourceValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_app(&self, app: &App) -> Result<()> {
        self.validate_name("app.name", &app.name)?;
        require("app.image", &app.image)?;
        require("app.framework", &app.framework)?;

        if app.units < 0 {
            return Err(ProviderError::Validation(format!(
                "app.units must be non-negative, got {}",
                app.units
            )));
        }
        if app.version < 0 {
            return Err(ProviderError::Validation(format!(
                "app.version must be non-negative, got {}",
                app.version
            )));
        }
        if let Some(port) = app.ports.iter().find(|p| !(1..=MAX_PORT).contains(*p)) {
            return Err(ProviderError::Validation(format!(
                "app.ports: {} is not a valid port number",
                port
            )));
        }
        if let Some(routing) = &app.routing_settings {
            if routing.weight > MAX_ROUTING_WEIGHT {
                return Err(ProviderError::Validation(format!(
                    "app.routing_settings.weight must be at most {}, got {}",
                    MAX_ROUTING_WEIGHT, routing.weight
                )));
            }
        }
        for (i, process) in app.processes.iter().enumerate() {
            require(&format!("app.processes[{}].name", i), &process.name)?;
        }
        Ok(())
    }

    pub fn validate_job(&self, job: &Job) -> Result<()> {
        self.validate_name("job.name", &job.name)?;
        require("job.framework", &job.framework)?;

        for (field, value) in [
            ("parallelism", job.parallelism),
            ("completions", job.completions),
            ("backoff_limit", job.backoff_limit),
        ] {
            if value < 0 {
                return Err(ProviderError::Validation(format!(
                    "job.{} must be non-negative, got {}",
                    field, value
                )));
            }
        }
        for (i, container) in job.containers.iter().enumerate() {
            require(&format!("job.containers[{}].name", i), &container.name)?;
            require(&format!("job.containers[{}].image", i), &container.image)?;
        }
        Ok(())
    }

    pub fn validate_framework(&self, framework: &Framework) -> Result<()> {
        self.validate_name("framework.name", &framework.name)?;
        // A blank namespace becomes `ketch-<name>`, which must still be a label.
        let namespace = resolve_namespace(&framework.name, &framework.namespace);
        self.validate_name("framework.namespace", &namespace)
    }

    fn validate_name(&self, path: &str, name: &str) -> Result<()> {
        require(path, name)?;
        if name.len() > MAX_NAME_LENGTH || !DNS_LABEL.is_match(name) {
            return Err(ProviderError::Validation(format!(
                "{} '{}' must be a lowercase RFC 1123 label of at most {} characters",
                path, name, MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

fn require(path: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ProviderError::Validation(format!("{} is required", path)));
    }
    Ok(())
}
