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

use crate::domain::config::KubernetesConf;
use crate::infrastructure::constants::DEFAULT_FIELD_MANAGER;
use crate::infrastructure::kubernetes::crd::{KetchApp, KetchFramework, KetchJob};
use crate::shared::error::{ProviderError, Result};
use kube::api::{DeleteParams, PostParams, Preconditions};
use kube::{Api, Client, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

/// Store for the three Ketch custom resources, keyed by name.
#[async_trait::async_trait]
pub trait KetchKubeClient: Send + Sync {
    /// Name recorded as the writer of every object this client creates.
    fn field_manager(&self) -> &str {
        DEFAULT_FIELD_MANAGER
    }

    async fn get_app(&self, name: &str) -> Result<KetchApp>;

    async fn create_app(&self, app: &KetchApp) -> Result<KetchApp>;

    async fn update_app(&self, app: &KetchApp) -> Result<KetchApp>;

    async fn delete_app(&self, app: &KetchApp) -> Result<()>;

    async fn get_job(&self, name: &str) -> Result<KetchJob>;

    async fn create_job(&self, job: &KetchJob) -> Result<KetchJob>;

    async fn update_job(&self, job: &KetchJob) -> Result<KetchJob>;

    async fn delete_job(&self, job: &KetchJob) -> Result<()>;

    async fn get_framework(&self, name: &str) -> Result<KetchFramework>;

    async fn create_framework(&self, framework: &KetchFramework) -> Result<KetchFramework>;

    async fn update_framework(&self, framework: &KetchFramework) -> Result<KetchFramework>;

    async fn delete_framework(&self, framework: &KetchFramework) -> Result<()>;
}

pub struct KetchKubeClientImpl {
    client: Client,
    field_manager: String,
}

impl KetchKubeClientImpl {
    pub async fn new(field_manager: String) -> Result<Self> {
        let client = Client::try_default().await.map_err(|e| {
            ProviderError::Backend(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            field_manager,
        })
    }

    pub async fn new_with_config(
        field_manager: String,
        kubeconfig_path: Option<String>,
        context: Option<String>,
    ) -> Result<Self> {
        use kube::config::{KubeConfigOptions, Kubeconfig};

        let kubeconfig = if let Some(path) = kubeconfig_path {
            Kubeconfig::read_from(path).map_err(|e| {
                ProviderError::Backend(format!("Failed to load kubeconfig: {}", e))
            })?
        } else {
            Kubeconfig::read().map_err(|e| {
                ProviderError::Backend(format!("Failed to load kubeconfig: {}", e))
            })?
        };

        let config_options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };

        let config = kube::Config::from_custom_kubeconfig(kubeconfig, &config_options)
            .await
            .map_err(|e| {
                ProviderError::Backend(format!("Failed to create Kubernetes config: {}", e))
            })?;

        let client = Client::try_from(config).map_err(|e| {
            ProviderError::Backend(format!("Failed to create Kubernetes client: {}", e))
        })?;

        Ok(Self {
            client,
            field_manager,
        })
    }

    /// Default resolution (in-cluster or `$KUBECONFIG`) unless a kubeconfig
    /// or context is configured.
    pub async fn from_conf(conf: &KubernetesConf) -> Result<Self> {
        if conf.kubeconfig.is_none() && conf.context.is_none() {
            Self::new(conf.field_manager.clone()).await
        } else {
            Self::new_with_config(
                conf.field_manager.clone(),
                conf.kubeconfig.clone(),
                conf.context.clone(),
            )
            .await
        }
    }

    fn post_params(&self) -> PostParams {
        PostParams {
            field_manager: Some(self.field_manager.clone()),
            ..Default::default()
        }
    }

    async fn get<K>(&self, name: &str) -> Result<K>
    where
        K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        debug!("Getting {} {}", K::kind(&()), name);
        api.get(name)
            .await
            .map_err(|e| ProviderError::from_kube(e, &K::kind(&()), name))
    }

    async fn create<K>(&self, obj: &K) -> Result<K>
    where
        K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let name = obj.name_any();
        debug!("Creating {} {}", K::kind(&()), name);
        api.create(&self.post_params(), obj)
            .await
            .map_err(|e| ProviderError::from_kube(e, &K::kind(&()), &name))
    }

    async fn replace<K>(&self, obj: &K) -> Result<K>
    where
        K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Serialize + Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let name = obj.name_any();
        debug!("Replacing {} {}", K::kind(&()), name);
        api.replace(&name, &self.post_params(), obj)
            .await
            .map_err(|e| ProviderError::from_kube(e, &K::kind(&()), &name))
    }

    /// Deletes the exact object that was fetched, guarded by its uid.
    async fn delete<K>(&self, obj: &K) -> Result<()>
    where
        K: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug,
    {
        let api: Api<K> = Api::all(self.client.clone());
        let name = obj.name_any();
        let dp = DeleteParams {
            preconditions: obj.uid().map(|uid| Preconditions {
                uid: Some(uid),
                resource_version: None,
            }),
            ..Default::default()
        };
        debug!("Deleting {} {}", K::kind(&()), name);
        api.delete(&name, &dp)
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::from_kube(e, &K::kind(&()), &name))
    }
}

#[async_trait::async_trait]
impl KetchKubeClient for KetchKubeClientImpl {
    fn field_manager(&self) -> &str {
        &self.field_manager
    }

    async fn get_app(&self, name: &str) -> Result<KetchApp> {
        self.get(name).await
    }

    async fn create_app(&self, app: &KetchApp) -> Result<KetchApp> {
        self.create(app).await
    }

    async fn update_app(&self, app: &KetchApp) -> Result<KetchApp> {
        self.replace(app).await
    }

    async fn delete_app(&self, app: &KetchApp) -> Result<()> {
        self.delete(app).await
    }

    async fn get_job(&self, name: &str) -> Result<KetchJob> {
        self.get(name).await
    }

    async fn create_job(&self, job: &KetchJob) -> Result<KetchJob> {
        self.create(job).await
    }

    async fn update_job(&self, job: &KetchJob) -> Result<KetchJob> {
        self.replace(job).await
    }

    async fn delete_job(&self, job: &KetchJob) -> Result<()> {
        self.delete(job).await
    }

    async fn get_framework(&self, name: &str) -> Result<KetchFramework> {
        self.get(name).await
    }

    async fn create_framework(&self, framework: &KetchFramework) -> Result<KetchFramework> {
        self.create(framework).await
    }

    async fn update_framework(&self, framework: &KetchFramework) -> Result<KetchFramework> {
        self.replace(framework).await
    }

    async fn delete_framework(&self, framework: &KetchFramework) -> Result<()> {
        self.delete(framework).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Framework;
    use crate::infrastructure::kubernetes::resources::FrameworkBuilder;

    #[tokio::test]
    #[ignore] // Requires a cluster with the Ketch CRDs installed
    async fn test_framework_lifecycle() {
        let client = KetchKubeClientImpl::from_conf(&KubernetesConf::default())
            .await
            .unwrap();
        let framework = Framework {
            name: "ketch-provider-it".to_string(),
            ..Default::default()
        };
        let obj = FrameworkBuilder::new(&framework).build().unwrap();

        let created = client.create_framework(&obj).await.unwrap();
        assert!(created.uid().is_some());
        assert!(client
            .create_framework(&obj)
            .await
            .unwrap_err()
            .is_already_exists());

        let fetched = client.get_framework("ketch-provider-it").await.unwrap();
        client.delete_framework(&fetched).await.unwrap();
    }
}
