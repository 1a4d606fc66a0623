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

//! Builders turning domain records into stored custom resources

pub mod app;
pub mod framework;
pub mod job;

pub use self::app::AppBuilder;
pub use self::framework::FrameworkBuilder;
pub use self::job::JobBuilder;

use crate::infrastructure::constants::MANAGED_BY_LABEL;
use std::collections::BTreeMap;

/// Labels stamped on every object the provider creates.
pub(crate) fn managed_labels(manager: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(MANAGED_BY_LABEL.to_string(), manager.to_string());
    labels
}
