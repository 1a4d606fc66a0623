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

/// Deployment environment grouping apps and jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Framework {
    pub name: String,
    /// Blank means `ketch-<name>`.
    pub namespace: String,
    /// Zero means unset; stored as -1 (unlimited).
    pub app_quota_limit: i64,
    pub ingress_controller: IngressController,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngressController {
    pub class_name: String,
    pub service_endpoint: String,
    pub ingress_type: String,
    pub cluster_issuer: String,
}
