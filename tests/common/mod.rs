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

#![allow(dead_code)]

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use ketch_provider::infrastructure::kubernetes::crd::{KetchApp, KetchFramework, KetchJob};
use ketch_provider::{
    ConfigMap, ImageConfig, ImageMetadataSource, KetchKubeClient, KetchProvider, ProviderError,
    Result,
};
use kube::{Resource, ResourceExt};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Objects of one kind keyed by name, with API-server-like conflict rules.
struct Store<K> {
    objects: Mutex<BTreeMap<String, K>>,
}

impl<K> Default for Store<K> {
    fn default() -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<K> Store<K>
where
    K: Resource<DynamicType = ()> + Clone,
{
    fn get(&self, name: &str) -> Result<K> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(K::kind(&()), name))
    }

    fn create(&self, obj: &K, serial: usize) -> Result<K> {
        let name = obj.name_any();
        let mut objects = self.objects.lock().unwrap();
        if objects.contains_key(&name) {
            return Err(ProviderError::already_exists(K::kind(&()), name));
        }
        let mut stored = obj.clone();
        stored.meta_mut().uid = Some(format!("uid-{}", serial));
        stored.meta_mut().resource_version = Some("1".to_string());
        stored.meta_mut().creation_timestamp = Some(Time(chrono::Utc::now()));
        objects.insert(name, stored.clone());
        Ok(stored)
    }

    fn update(&self, obj: &K) -> Result<K> {
        let name = obj.name_any();
        let mut objects = self.objects.lock().unwrap();
        let existing = objects
            .get(&name)
            .ok_or_else(|| ProviderError::not_found(K::kind(&()), name.clone()))?;
        let version = existing
            .meta()
            .resource_version
            .as_deref()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);
        let mut stored = obj.clone();
        stored.meta_mut().resource_version = Some((version + 1).to_string());
        objects.insert(name, stored.clone());
        Ok(stored)
    }

    fn delete(&self, obj: &K) -> Result<()> {
        let name = obj.name_any();
        let mut objects = self.objects.lock().unwrap();
        match objects.get(&name) {
            None => Err(ProviderError::not_found(K::kind(&()), name)),
            Some(existing) if existing.uid() != obj.uid() => Err(ProviderError::Backend(format!(
                "Precondition failed: UID in precondition: {:?}, UID in object meta: {:?}",
                obj.uid(),
                existing.uid()
            ))),
            Some(_) => {
                objects.remove(&name);
                Ok(())
            }
        }
    }

    fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

/// In-memory stand-in for the Kubernetes API.
#[derive(Default)]
pub struct InMemoryKetchClient {
    apps: Store<KetchApp>,
    jobs: Store<KetchJob>,
    frameworks: Store<KetchFramework>,
    mutations: AtomicUsize,
    field_manager: Option<String>,
}

impl InMemoryKetchClient {
    pub fn with_field_manager(mut self, manager: &str) -> Self {
        self.field_manager = Some(manager.to_string());
        self
    }

    /// Number of successful create, update and delete calls.
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub fn object_count(&self) -> usize {
        self.apps.len() + self.jobs.len() + self.frameworks.len()
    }

    pub fn stored_app(&self, name: &str) -> Option<KetchApp> {
        self.apps.get(name).ok()
    }

    pub fn stored_job(&self, name: &str) -> Option<KetchJob> {
        self.jobs.get(name).ok()
    }

    pub fn stored_framework(&self, name: &str) -> Option<KetchFramework> {
        self.frameworks.get(name).ok()
    }

    fn mutated<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.mutations.fetch_add(1, Ordering::SeqCst);
        }
        result
    }

    fn serial(&self) -> usize {
        self.mutations.load(Ordering::SeqCst) + 1
    }
}

#[async_trait::async_trait]
impl KetchKubeClient for InMemoryKetchClient {
    fn field_manager(&self) -> &str {
        self.field_manager.as_deref().unwrap_or("ketch-provider")
    }

    async fn get_app(&self, name: &str) -> Result<KetchApp> {
        self.apps.get(name)
    }

    async fn create_app(&self, app: &KetchApp) -> Result<KetchApp> {
        self.mutated(self.apps.create(app, self.serial()))
    }

    async fn update_app(&self, app: &KetchApp) -> Result<KetchApp> {
        self.mutated(self.apps.update(app))
    }

    async fn delete_app(&self, app: &KetchApp) -> Result<()> {
        self.mutated(self.apps.delete(app))
    }

    async fn get_job(&self, name: &str) -> Result<KetchJob> {
        self.jobs.get(name)
    }

    async fn create_job(&self, job: &KetchJob) -> Result<KetchJob> {
        self.mutated(self.jobs.create(job, self.serial()))
    }

    async fn update_job(&self, job: &KetchJob) -> Result<KetchJob> {
        self.mutated(self.jobs.update(job))
    }

    async fn delete_job(&self, job: &KetchJob) -> Result<()> {
        self.mutated(self.jobs.delete(job))
    }

    async fn get_framework(&self, name: &str) -> Result<KetchFramework> {
        self.frameworks.get(name)
    }

    async fn create_framework(&self, framework: &KetchFramework) -> Result<KetchFramework> {
        self.mutated(self.frameworks.create(framework, self.serial()))
    }

    async fn update_framework(&self, framework: &KetchFramework) -> Result<KetchFramework> {
        self.mutated(self.frameworks.update(framework))
    }

    async fn delete_framework(&self, framework: &KetchFramework) -> Result<()> {
        self.mutated(self.frameworks.delete(framework))
    }
}

/// Image source answering from a fixed table; unknown images fail.
#[derive(Default)]
pub struct FakeImageSource {
    configs: BTreeMap<String, ImageConfig>,
    lookups: AtomicUsize,
}

impl FakeImageSource {
    pub fn with_image(mut self, image: &str, config: ImageConfig) -> Self {
        self.configs.insert(image.to_string(), config);
        self
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ImageMetadataSource for FakeImageSource {
    async fn image_config(&self, image: &str) -> Result<ImageConfig> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.configs
            .get(image)
            .cloned()
            .ok_or_else(|| ProviderError::ImageLookup(format!("no such image {:?}", image)))
    }
}

pub fn provider_with(
    client: Arc<InMemoryKetchClient>,
    images: Arc<FakeImageSource>,
) -> KetchProvider {
    KetchProvider::new(client, images)
}

/// Parse a YAML configuration tree.
pub fn tree(yaml: &str) -> ConfigMap {
    serde_yaml::from_str(yaml).unwrap()
}
