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

use super::managed_labels;
use crate::domain::model::{Framework, IngressController};
use crate::domain::policy;
use crate::infrastructure::constants::DEFAULT_FIELD_MANAGER;
use crate::infrastructure::kubernetes::crd::{FrameworkSpec, IngressControllerSpec, KetchFramework};
use crate::shared::error::Result;

pub struct FrameworkBuilder<'a> {
    framework: &'a Framework,
    managed_by: &'a str,
}

impl<'a> FrameworkBuilder<'a> {
    pub fn new(framework: &'a Framework) -> Self {
        Self {
            framework,
            managed_by: DEFAULT_FIELD_MANAGER,
        }
    }

    pub fn managed_by(mut self, manager: &'a str) -> Self {
        self.managed_by = manager;
        self
    }

    pub fn build(&self) -> Result<KetchFramework> {
        let mut ketch_framework = KetchFramework::new(&self.framework.name, self.build_spec()?);
        ketch_framework.metadata.labels = Some(managed_labels(self.managed_by));
        Ok(ketch_framework)
    }

    pub fn build_spec(&self) -> Result<FrameworkSpec> {
        let framework = self.framework;
        let ingress = &framework.ingress_controller;
        Ok(FrameworkSpec {
            name: framework.name.clone(),
            namespace_name: policy::resolve_namespace(&framework.name, &framework.namespace),
            app_quota_limit: Some(policy::resolve_app_quota_limit(framework.app_quota_limit)?),
            ingress_controller: IngressControllerSpec {
                class_name: ingress.class_name.clone(),
                service_endpoint: ingress.service_endpoint.clone(),
                ingress_type: ingress.ingress_type.clone(),
                cluster_issuer: ingress.cluster_issuer.clone(),
            },
        })
    }
}

/// A missing quota reads back as zero; a stored -1 reads back as -1.
impl From<&KetchFramework> for Framework {
    fn from(ketch_framework: &KetchFramework) -> Self {
        let spec = &ketch_framework.spec;
        let ingress = &spec.ingress_controller;
        Framework {
            name: spec.name.clone(),
            namespace: spec.namespace_name.clone(),
            app_quota_limit: spec.app_quota_limit.map(i64::from).unwrap_or_default(),
            ingress_controller: IngressController {
                class_name: ingress.class_name.clone(),
                service_endpoint: ingress.service_endpoint.clone(),
                ingress_type: ingress.ingress_type.clone(),
                cluster_issuer: ingress.cluster_issuer.clone(),
            },
        }
    }
}
