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

use crate::domain::model::Policy;
use crate::infrastructure::constants::{
    DEFAULT_JOB_BACKOFF_LIMIT, DEFAULT_JOB_COMPLETIONS, DEFAULT_JOB_PARALLELISM,
    DEFAULT_JOB_VERSION, JOB_TYPE,
};
use crate::infrastructure::kubernetes::crd::{JobSpec, RestartPolicy};
use crate::shared::error::{ProviderError, Result};
use tracing::warn;

/// Unrecognized values, including case mismatches, fall back to `Never`.
pub fn resolve_restart_policy(policy: Option<&Policy>) -> RestartPolicy {
    let raw = match policy {
        Some(policy) if !policy.restart_policy.is_empty() => &policy.restart_policy,
        _ => return RestartPolicy::default(),
    };

    match raw.parse::<RestartPolicy>() {
        Ok(restart_policy) => restart_policy,
        Err(e) => {
            warn!("{}, using {}", e, RestartPolicy::default());
            RestartPolicy::default()
        }
    }
}

/// Describes the fallback when a configured restart policy is not recognized.
pub fn restart_policy_fallback(policy: Option<&Policy>) -> Option<String> {
    let raw = policy.map(|p| p.restart_policy.as_str()).unwrap_or_default();
    if raw.is_empty() || raw.parse::<RestartPolicy>().is_ok() {
        return None;
    }
    Some(format!(
        "job.policy.restart_policy {:?} is not one of Never, OnFailure; using {}",
        raw,
        RestartPolicy::default()
    ))
}

/// Narrow a job counter, treating zero as unset.
pub fn resolve_counter(field: &str, value: i64, default: i32) -> Result<i32> {
    match value {
        0 => Ok(default),
        v if v < 0 => Err(ProviderError::Validation(format!(
            "job.{} must be non-negative, got {}",
            field, v
        ))),
        v => i32::try_from(v).map_err(|_| {
            ProviderError::conversion(
                format!("job.{}", field),
                format!("integer {} is out of range", v),
            )
        }),
    }
}

/// Fill zero-valued fields and force the job type.
pub fn apply_job_defaults(spec: &mut JobSpec) {
    spec.job_type = JOB_TYPE.to_string();
    if spec.version.is_empty() {
        spec.version = DEFAULT_JOB_VERSION.to_string();
    }
    if spec.parallelism == 0 {
        spec.parallelism = DEFAULT_JOB_PARALLELISM;
    }
    if spec.completions == 0 {
        spec.completions = DEFAULT_JOB_COMPLETIONS;
    }
    if spec.backoff_limit == 0 {
        spec.backoff_limit = DEFAULT_JOB_BACKOFF_LIMIT;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(value: &str) -> Policy {
        Policy {
            restart_policy: value.to_string(),
        }
    }

    #[test]
    fn test_restart_policy_valid() {
        assert_eq!(
            resolve_restart_policy(Some(&policy("OnFailure"))),
            RestartPolicy::OnFailure
        );
        assert_eq!(resolve_restart_policy(Some(&policy("Never"))), RestartPolicy::Never);
    }

    #[test]
    fn test_restart_policy_coerced() {
        assert_eq!(resolve_restart_policy(Some(&policy("maybe"))), RestartPolicy::Never);
        assert_eq!(resolve_restart_policy(Some(&policy("onfailure"))), RestartPolicy::Never);
        assert_eq!(resolve_restart_policy(Some(&policy(""))), RestartPolicy::Never);
        assert_eq!(resolve_restart_policy(None), RestartPolicy::Never);
    }

    #[test]
    fn test_restart_policy_fallback_message() {
        let message = restart_policy_fallback(Some(&policy("maybe"))).unwrap();
        assert!(message.contains("\"maybe\""));
        assert!(message.ends_with("using Never"));
        assert!(restart_policy_fallback(Some(&policy("OnFailure"))).is_none());
        assert!(restart_policy_fallback(Some(&policy(""))).is_none());
        assert!(restart_policy_fallback(None).is_none());
    }

    #[test]
    fn test_job_defaults() {
        let mut spec = JobSpec {
            job_type: "CronJob".to_string(),
            parallelism: 3,
            ..Default::default()
        };
        apply_job_defaults(&mut spec);
        assert_eq!(spec.job_type, "Job");
        assert_eq!(spec.version, "v1");
        assert_eq!(spec.parallelism, 3);
        assert_eq!(spec.completions, 1);
        assert_eq!(spec.backoff_limit, 6);
    }

    #[test]
    fn test_counter_bounds() {
        assert_eq!(resolve_counter("parallelism", 0, 1).unwrap(), 1);
        assert_eq!(resolve_counter("parallelism", 5, 1).unwrap(), 5);
        assert!(resolve_counter("completions", -1, 1).unwrap_err().is_validation());
        assert!(resolve_counter("completions", i64::from(i32::MAX) + 1, 1)
            .unwrap_err()
            .is_conversion());
    }
}
