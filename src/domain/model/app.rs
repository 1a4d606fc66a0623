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

/// Application as configured by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct App {
    /// Immutable; identifies the resource.
    pub name: String,
    pub image: String,
    pub framework: String,
    pub cnames: Vec<String>,
    pub ports: Vec<i32>,
    pub units: i64,
    pub processes: Vec<ProcessParameters>,
    pub routing_settings: Option<RoutingSettings>,
    pub version: i64,
}

/// A named process and the command it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessParameters {
    pub name: String,
    pub cmd: Vec<String>,
}

/// Share of traffic, in percent, sent to the deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingSettings {
    pub weight: i64,
}
