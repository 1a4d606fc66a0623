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

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Spec of the cluster-scoped `Framework` custom resource
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "theketch.io",
    version = "v1beta1",
    kind = "Framework",
    root = "KetchFramework",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkSpec {
    pub name: String,
    #[serde(rename = "namespace")]
    pub namespace_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_quota_limit: Option<i32>,
    #[serde(default)]
    pub ingress_controller: IngressControllerSpec,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngressControllerSpec {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub service_endpoint: String,
    #[serde(rename = "type", default)]
    pub ingress_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cluster_issuer: String,
}
