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

//! Defaulting and derivation rules applied before records are stored

pub mod app;
pub mod framework;
pub mod job;

pub use self::app::{
    needs_image_config, resolve_exposed_ports, resolve_processes, resolve_units,
    resolve_weight,
};
pub use self::framework::{resolve_app_quota_limit, resolve_namespace};
pub use self::job::{
    apply_job_defaults, resolve_counter, resolve_restart_policy, restart_policy_fallback,
};
