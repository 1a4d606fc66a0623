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

use crate::infrastructure::constants::{FRAMEWORK_NAMESPACE_PREFIX, UNLIMITED_APP_QUOTA};
use crate::shared::error::{ProviderError, Result};

/// Blank namespaces become `ketch-<name>`.
pub fn resolve_namespace(name: &str, namespace: &str) -> String {
    if namespace.is_empty() {
        format!("{}{}", FRAMEWORK_NAMESPACE_PREFIX, name)
    } else {
        namespace.to_string()
    }
}

/// Zero is the unset sentinel and maps to unlimited (-1).
pub fn resolve_app_quota_limit(limit: i64) -> Result<i32> {
    if limit == 0 {
        return Ok(UNLIMITED_APP_QUOTA);
    }
    i32::try_from(limit).map_err(|_| {
        ProviderError::Validation(format!("app_quota_limit {} is out of range", limit))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_default() {
        assert_eq!(resolve_namespace("acme", ""), "ketch-acme");
        assert_eq!(resolve_namespace("acme", "team-a"), "team-a");
    }

    #[test]
    fn test_quota_sentinel() {
        assert_eq!(resolve_app_quota_limit(0).unwrap(), -1);
        assert_eq!(resolve_app_quota_limit(5).unwrap(), 5);
        assert_eq!(resolve_app_quota_limit(-1).unwrap(), -1);
        assert!(resolve_app_quota_limit(i64::MAX).is_err());
    }
}
