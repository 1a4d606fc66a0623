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

/// Batch job as configured by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    /// Always rewritten to `Job` before it is stored.
    pub job_type: String,
    pub framework: String,
    pub version: String,
    pub description: String,
    pub parallelism: i64,
    pub completions: i64,
    pub suspend: bool,
    pub backoff_limit: i64,
    pub containers: Vec<Container>,
    pub policy: Option<Policy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub image: String,
    pub command: Vec<String>,
}

/// Raw policy block. The restart policy is kept as typed so that
/// unrecognized values can be coerced when the record is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Policy {
    pub restart_policy: String,
}
