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
use crate::domain::model::{Framework, IngressController};
use crate::shared::error::Result;

impl TreeRecord for Framework {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            name: fields.string("name")?,
            namespace: fields.string("namespace")?,
            app_quota_limit: fields.int("app_quota_limit")?,
            ingress_controller: fields.required_record("ingress_controller")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("name", &self.name)
            .string("namespace", &self.namespace)
            .int("app_quota_limit", self.app_quota_limit)
            .record("ingress_controller", Some(&self.ingress_controller))
            .build()
    }
}

impl TreeRecord for IngressController {
    fn from_fields(fields: &Fields<'_>) -> Result<Self> {
        Ok(Self {
            class_name: fields.string("class_name")?,
            service_endpoint: fields.string("service_endpoint")?,
            ingress_type: fields.string("type")?,
            cluster_issuer: fields.string("cluster_issuer")?,
        })
    }

    fn to_tree(&self) -> ConfigMap {
        TreeBuilder::new()
            .string("class_name", &self.class_name)
            .string("service_endpoint", &self.service_endpoint)
            .string("type", &self.ingress_type)
            .string("cluster_issuer", &self.cluster_issuer)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::tree::{decode_block, encode_block, Value};

    #[test]
    fn test_extract_framework() {
        let yaml = r#"
framework:
  - name: acme
    app_quota_limit: 5
    ingress_controller:
      - class_name: istio
        service_endpoint: 10.10.20.30
        type: istio
"#;
        let root: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let framework: Framework = decode_block(&root, "framework").unwrap();
        assert_eq!(
            framework,
            Framework {
                name: "acme".to_string(),
                namespace: String::new(),
                app_quota_limit: 5,
                ingress_controller: IngressController {
                    class_name: "istio".to_string(),
                    service_endpoint: "10.10.20.30".to_string(),
                    ingress_type: "istio".to_string(),
                    cluster_issuer: String::new(),
                },
            }
        );
    }

    #[test]
    fn test_ingress_controller_is_required() {
        let yaml = "name: acme\n";
        let tree: ConfigMap = serde_yaml::from_str(yaml).unwrap();
        let err = Framework::from_fields(&Fields::new(&tree, "framework")).unwrap_err();
        assert!(err.to_string().contains("framework.ingress_controller"));
    }

    #[test]
    fn test_empty_ingress_controller_still_emitted() {
        let framework = Framework {
            name: "acme".to_string(),
            ..Default::default()
        };
        let tree = framework.to_tree();
        assert_eq!(
            tree.get("ingress_controller"),
            Some(&Value::List(vec![Value::Map(ConfigMap::new())]))
        );
        let root = encode_block("framework", &framework);
        assert_eq!(decode_block::<Framework>(&root, "framework").unwrap(), framework);
    }
}
