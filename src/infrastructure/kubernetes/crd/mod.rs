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

//! Ketch custom resources (`theketch.io/v1beta1`)

pub mod app;
pub mod framework;
pub mod job;

pub use self::app::{
    AppDeploymentSpec, AppSpec, ExposedPort, IngressSpec, KetchApp, ProcessSpec,
    RoutingSettingsSpec,
};
pub use self::framework::{FrameworkSpec, IngressControllerSpec, KetchFramework};
pub use self::job::{ContainerSpec, JobSpec, KetchJob, PolicySpec, RestartPolicy};
