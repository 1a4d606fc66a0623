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

/// Resource type names exposed to the host runtime
pub const RESOURCE_APP: &str = "ketch_app";
pub const RESOURCE_JOB: &str = "ketch_job";
pub const RESOURCE_FRAMEWORK: &str = "ketch_framework";

/// Keys holding each resource block in a configuration tree
pub const SCHEMA_KEY_APP: &str = "app";
pub const SCHEMA_KEY_JOB: &str = "job";
pub const SCHEMA_KEY_FRAMEWORK: &str = "framework";

/// Application defaults
pub const DEFAULT_APP_UNITS: i32 = 1;
pub const DEFAULT_ROUTING_WEIGHT: u8 = 100;
pub const MAX_ROUTING_WEIGHT: i64 = 100;
pub const MAX_PORT: i32 = 65535;
pub const DEFAULT_EXPOSED_PORT: i32 = 8000;
pub const DEFAULT_PORT_PROTOCOL: &str = "TCP";
pub const DEFAULT_PROCESS_NAME: &str = "web";

/// Job defaults
pub const JOB_TYPE: &str = "Job";
pub const DEFAULT_JOB_VERSION: &str = "v1";
pub const DEFAULT_JOB_PARALLELISM: i32 = 1;
pub const DEFAULT_JOB_COMPLETIONS: i32 = 1;
pub const DEFAULT_JOB_BACKOFF_LIMIT: i32 = 6;

/// Framework defaults
pub const FRAMEWORK_NAMESPACE_PREFIX: &str = "ketch-";
pub const UNLIMITED_APP_QUOTA: i32 = -1;

/// Kubernetes client settings
pub const DEFAULT_FIELD_MANAGER: &str = "ketch-provider";
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Provider configuration
pub const PROVIDER_CONF_ENV: &str = "KETCH_PROVIDER_CONF";
pub const DEFAULT_IMAGE_LOOKUP_RETRIES: usize = 2;

/// RFC 1123 label limits
pub const MAX_NAME_LENGTH: usize = 63;
