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

use super::managed_labels;
use crate::domain::model::{Container, Job, Policy};
use crate::domain::policy;
use crate::infrastructure::constants::DEFAULT_FIELD_MANAGER;
use crate::infrastructure::kubernetes::crd::{ContainerSpec, JobSpec, KetchJob, PolicySpec};
use crate::shared::error::Result;

pub struct JobBuilder<'a> {
    job: &'a Job,
    managed_by: &'a str,
}

impl<'a> JobBuilder<'a> {
    pub fn new(job: &'a Job) -> Self {
        Self {
            job,
            managed_by: DEFAULT_FIELD_MANAGER,
        }
    }

    pub fn managed_by(mut self, manager: &'a str) -> Self {
        self.managed_by = manager;
        self
    }

    pub fn build(&self) -> Result<KetchJob> {
        let mut ketch_job = KetchJob::new(&self.job.name, self.build_spec()?);
        ketch_job.metadata.labels = Some(managed_labels(self.managed_by));
        Ok(ketch_job)
    }

    pub fn build_spec(&self) -> Result<JobSpec> {
        let job = self.job;
        let mut spec = JobSpec {
            version: job.version.clone(),
            job_type: job.job_type.clone(),
            name: job.name.clone(),
            framework: job.framework.clone(),
            description: job.description.clone(),
            parallelism: policy::resolve_counter("parallelism", job.parallelism, 0)?,
            completions: policy::resolve_counter("completions", job.completions, 0)?,
            suspend: job.suspend,
            backoff_limit: policy::resolve_counter("backoff_limit", job.backoff_limit, 0)?,
            containers: job
                .containers
                .iter()
                .map(|c| ContainerSpec {
                    name: c.name.clone(),
                    image: c.image.clone(),
                    command: c.command.clone(),
                })
                .collect(),
            policy: PolicySpec {
                restart_policy: policy::resolve_restart_policy(job.policy.as_ref()),
            },
        };
        policy::apply_job_defaults(&mut spec);
        Ok(spec)
    }
}

/// The job name is read from the spec, not the object metadata.
impl From<&KetchJob> for Job {
    fn from(ketch_job: &KetchJob) -> Self {
        let spec = &ketch_job.spec;
        Job {
            name: spec.name.clone(),
            job_type: spec.job_type.clone(),
            framework: spec.framework.clone(),
            version: spec.version.clone(),
            description: spec.description.clone(),
            parallelism: i64::from(spec.parallelism),
            completions: i64::from(spec.completions),
            suspend: spec.suspend,
            backoff_limit: i64::from(spec.backoff_limit),
            containers: spec
                .containers
                .iter()
                .map(|c| Container {
                    name: c.name.clone(),
                    image: c.image.clone(),
                    command: c.command.clone(),
                })
                .collect(),
            policy: Some(Policy {
                restart_policy: spec.policy.restart_policy.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kubernetes::crd::RestartPolicy;
    use kube::ResourceExt;

    fn empty_job() -> Job {
        Job {
            name: "etl".to_string(),
            framework: "fw".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_job_defaults() {
        let ketch_job = JobBuilder::new(&empty_job()).build().unwrap();
        assert_eq!(ketch_job.name_any(), "etl");

        let spec = &ketch_job.spec;
        assert_eq!(spec.job_type, "Job");
        assert_eq!(spec.version, "v1");
        assert_eq!(spec.parallelism, 1);
        assert_eq!(spec.completions, 1);
        assert_eq!(spec.backoff_limit, 6);
        assert_eq!(spec.policy.restart_policy, RestartPolicy::Never);
    }

    #[test]
    fn test_supplied_type_is_overwritten() {
        let mut job = empty_job();
        job.job_type = "CronJob".to_string();
        job.policy = Some(Policy {
            restart_policy: "maybe".to_string(),
        });
        let spec = JobBuilder::new(&job).build_spec().unwrap();
        assert_eq!(spec.job_type, "Job");
        assert_eq!(spec.policy.restart_policy, RestartPolicy::Never);
    }

    #[test]
    fn test_read_back() {
        let mut job = empty_job();
        job.description = "nightly export".to_string();
        job.suspend = true;
        job.containers = vec![Container {
            name: "main".to_string(),
            image: "busybox".to_string(),
            command: vec!["sh".to_string(), "-c".to_string(), "date".to_string()],
        }];
        job.policy = Some(Policy {
            restart_policy: "OnFailure".to_string(),
        });

        let read = Job::from(&JobBuilder::new(&job).build().unwrap());
        assert_eq!(read.name, "etl");
        assert_eq!(read.job_type, "Job");
        assert_eq!(read.description, "nightly export");
        assert!(read.suspend);
        assert_eq!(read.containers, job.containers);
        assert_eq!(read.policy, job.policy);
        assert_eq!(read.backoff_limit, 6);
    }
}
