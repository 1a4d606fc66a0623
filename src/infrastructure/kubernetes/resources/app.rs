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
use crate::domain::model::{App, ProcessParameters, RoutingSettings};
use crate::domain::policy;
use crate::infrastructure::constants::DEFAULT_FIELD_MANAGER;
use crate::infrastructure::image::ImageConfig;
use crate::infrastructure::kubernetes::crd::{
    AppDeploymentSpec, AppSpec, IngressSpec, KetchApp, RoutingSettingsSpec,
};
use crate::shared::error::Result;
use kube::ResourceExt;

pub struct AppBuilder<'a> {
    app: &'a App,
    image_config: Option<&'a ImageConfig>,
    managed_by: &'a str,
}

impl<'a> AppBuilder<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            app,
            image_config: None,
            managed_by: DEFAULT_FIELD_MANAGER,
        }
    }

    /// Value of the managed-by label on created objects.
    pub fn managed_by(mut self, manager: &'a str) -> Self {
        self.managed_by = manager;
        self
    }

    /// Image metadata used to derive ports and processes.
    pub fn with_image_config(mut self, image_config: Option<&'a ImageConfig>) -> Self {
        self.image_config = image_config;
        self
    }

    pub fn build(&self) -> Result<KetchApp> {
        let mut ketch_app = KetchApp::new(&self.app.name, self.build_spec()?);
        ketch_app.metadata.labels = Some(managed_labels(self.managed_by));
        Ok(ketch_app)
    }

    /// The mutable portion of the record, used as the update payload.
    pub fn build_spec(&self) -> Result<AppSpec> {
        let deployment = AppDeploymentSpec {
            image: self.app.image.clone(),
            version: self.app.version,
            processes: policy::resolve_processes(&self.app.processes, self.image_config),
            exposed_ports: policy::resolve_exposed_ports(&self.app.ports, self.image_config),
            routing_settings: RoutingSettingsSpec {
                weight: policy::resolve_weight(self.app.routing_settings.as_ref())?,
            },
        };

        Ok(AppSpec {
            deployments: vec![deployment],
            deployments_count: policy::resolve_units(self.app.units)?,
            ingress: IngressSpec {
                generate_default_cname: true,
                cnames: self.app.cnames.clone(),
            },
            framework: self.app.framework.clone(),
        })
    }
}

/// Stored record back to the domain view; only the first deployment is read.
impl From<&KetchApp> for App {
    fn from(ketch_app: &KetchApp) -> Self {
        let spec = &ketch_app.spec;
        let deployment = spec.deployments.first().cloned().unwrap_or_default();

        App {
            name: ketch_app.name_any(),
            image: deployment.image,
            framework: spec.framework.clone(),
            cnames: spec.ingress.cnames.clone(),
            ports: deployment.exposed_ports.iter().map(|p| p.port).collect(),
            units: i64::from(spec.deployments_count),
            processes: deployment
                .processes
                .into_iter()
                .map(|p| ProcessParameters {
                    name: p.name,
                    cmd: p.cmd,
                })
                .collect(),
            routing_settings: Some(RoutingSettings {
                weight: i64::from(deployment.routing_settings.weight),
            }),
            version: deployment.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::crd::{ExposedPort, ProcessSpec};

    fn sparse_app() -> App {
        App {
            name: "web".to_string(),
            image: "registry.example.com/web:1.0".to_string(),
            framework: "fw".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let app = sparse_app();
        let ketch_app = AppBuilder::new(&app).build().unwrap();

        assert_eq!(ketch_app.name_any(), "web");
        assert_eq!(
            ketch_app.labels().get("app.kubernetes.io/managed-by").map(String::as_str),
            Some("ketch-provider")
        );

        let spec = &ketch_app.spec;
        assert_eq!(spec.deployments_count, 1);
        assert!(spec.ingress.generate_default_cname);
        assert_eq!(spec.deployments.len(), 1);

        let deployment = &spec.deployments[0];
        assert_eq!(deployment.version, 0);
        assert_eq!(deployment.routing_settings.weight, 100);
        assert_eq!(deployment.exposed_ports, vec![ExposedPort::tcp(8000)]);
        assert!(deployment.processes.is_empty());
    }

    #[test]
    fn test_build_derives_from_image() {
        let mut app = sparse_app();
        app.ports = vec![8080, 8081];
        let image = ImageConfig {
            entrypoint: vec!["./app".to_string()],
            cmd: vec!["serve".to_string()],
            exposed_ports: vec!["9000/tcp".to_string()],
        };

        let spec = AppBuilder::new(&app)
            .with_image_config(Some(&image))
            .build_spec()
            .unwrap();
        let deployment = &spec.deployments[0];
        assert_eq!(
            deployment.exposed_ports,
            vec![ExposedPort::tcp(8080), ExposedPort::tcp(8081)]
        );
        assert_eq!(
            deployment.processes,
            vec![ProcessSpec {
                name: "web".to_string(),
                cmd: vec!["./app".to_string(), "serve".to_string()],
            }]
        );
    }

    #[test]
    fn test_build_rejects_heavy_weight() {
        let mut app = sparse_app();
        app.routing_settings = Some(RoutingSettings { weight: 120 });
        assert!(AppBuilder::new(&app).build().unwrap_err().is_validation());
    }

    #[test]
    fn test_read_back() {
        let mut app = sparse_app();
        app.cnames = vec!["web.example.com".to_string()];
        app.units = 3;
        app.version = 2;
        app.routing_settings = Some(RoutingSettings { weight: 40 });

        let ketch_app = AppBuilder::new(&app).build().unwrap();
        let read = App::from(&ketch_app);
        assert_eq!(read.name, "web");
        assert_eq!(read.cnames, vec!["web.example.com"]);
        assert_eq!(read.units, 3);
        assert_eq!(read.version, 2);
        assert_eq!(read.ports, vec![8000]);
        assert_eq!(read.routing_settings, Some(RoutingSettings { weight: 40 }));
    }

    #[test]
    fn test_read_without_deployments() {
        let ketch_app = KetchApp::new(
            "empty",
            AppSpec {
                framework: "fw".to_string(),
                ..Default::default()
            },
        );
        let read = App::from(&ketch_app);
        assert_eq!(read.name, "empty");
        assert!(read.image.is_empty());
        assert_eq!(read.routing_settings, Some(RoutingSettings { weight: 0 }));
    }
}
