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
use crate::domain::model::{App, ProcessParameters, RoutingSettings};
use crate::shared::error::Result;

impl TreeRecord for App {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.string("name")?,
            image: fields.string("image")?,
            framework: fields.string("framework")?,
            cnames: fields.strings("cnames")?,
            ports: fields.ints("ports")?,
            units: fields.int("units")?,
            processes: fields.records("processes")?,
            routing_settings: fields.record("routing_settings")?,
            version: fields.int("version")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("name", &self.name)
            .string("image", &self.image)
            .string("framework", &self.framework)
            .strings("cnames", &self.cnames)
            .ints("ports", &self.ports)
            .int("units", self.units)
            .records("processes", &self.processes)
            .record("routing_settings", self.routing_settings.as_ref())
            .int("version", self.version)
            .build()
    }
}

impl TreeRecord for ProcessParameters {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.string("name")?,
            cmd: fields.strings("cmd")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("name", &self.name)
            .strings("cmd", &self.cmd)
            .build()
    }
}

impl TreeRecord for RoutingSettings {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            weight: fields.int("weight")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new().int("weight", self.weight).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::tree::{decode_block, encode_block, Value};

    fn sample_app() -> App {
        App {
            name: "testapp".to_string(),
            image: "gcr.io/test".to_string(),
            framework: "testfw".to_string(),
            cnames: vec!["cname1".to_string(), "cname2".to_string()],
            ports: vec![8080, 8081],
            units: 4,
            processes: vec![
                ProcessParameters {
                    name: "web".to_string(),
                    cmd: vec!["./web".to_string()],
                },
                ProcessParameters {
                    name: "worker".to_string(),
                    cmd: vec!["./worker".to_string(), "-v".to_string()],
                },
            ],
            routing_settings: Some(RoutingSettings { weight: 100 }),
            version: 2,
        }
    }

    #[test]
    fn test_extract_app_from_yaml() {
        let yaml = r#"
app:
  - name: testapp
    image: gcr.io/test
    framework: testfw
    cnames: [cname1, cname2]
    ports: [8080, 8081]
    units: 4
    processes:
      - name: web
        cmd: ["./web"]
      - name: worker
        cmd: ["./worker", "-v"]
    routing_settings:
      - weight: 100
    version: 2
"#;
        let root: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let app: App = decode_block(&root, "app").unwrap();
        assert_eq!(app, sample_app());
    }

    #[test]
    fn test_app_round_trip() {
        let app = sample_app();
        let root = encode_block("app", &app);
        assert_eq!(decode_block::<App>(&root, "app").unwrap(), app);
    }

    #[test]
    fn test_minimal_app_omits_optional_fields() {
        let app = App {
            name: "web".to_string(),
            image: "nginx".to_string(),
            framework: "fw".to_string(),
            ..Default::default()
        };
        let tree = app.to_tree();
        assert_eq!(tree.len(), 3);
        assert!(!tree.contains_key("ports"));
        assert!(!tree.contains_key("routing_settings"));
        assert_eq!(App::from_fields(&Fields::new(&tree, "app")).unwrap(), app);
    }

    #[test]
    fn test_process_with_wrong_cmd_type() {
        let yaml = r#"
name: web
image: nginx
framework: fw
processes:
  - name: web
    cmd: "./web"
"#;
        let tree: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let err = App::from_fields(&Fields::new(&tree, "app")).unwrap_err();
        assert!(err.is_conversion());
        assert!(err.to_string().contains("app.processes[0].cmd"));
    }

    #[test]
    fn test_empty_routing_list_is_absent() {
        let mut tree = sample_app().to_tree();
        tree.insert("routing_settings".to_string(), Value::List(vec![]));
        let app = App::from_fields(&Fields::new(&tree, "app")).unwrap();
        assert_eq!(app.routing_settings, None);
    }
}
