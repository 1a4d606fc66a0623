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

use crate::domain::model::{ProcessParameters, RoutingSettings};
use crate::infrastructure::constants::{
    DEFAULT_APP_UNITS, DEFAULT_EXPOSED_PORT, DEFAULT_PROCESS_NAME, DEFAULT_ROUTING_WEIGHT,
    MAX_PORT, MAX_ROUTING_WEIGHT,
};
use crate::infrastructure::image::ImageConfig;
use crate::infrastructure::kubernetes::crd::{ExposedPort, ProcessSpec};
use crate::shared::error::{ProviderError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref IMAGE_PORT: Regex = {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^(\d+)/([A-Za-z]+)$").unwrap()
    };
}

/// Zero units means one deployment.
pub fn resolve_units(units: i64) -> Result<i32> {
    match units {
        0 => Ok(DEFAULT_APP_UNITS),
        u if u < 0 => Err(ProviderError::Validation(format!(
            "app.units must be non-negative, got {}",
            u
        ))),
        u => i32::try_from(u).map_err(|_| {
            ProviderError::conversion("app.units", format!("integer {} is out of range", u))
        }),
    }
}

/// Missing or non-positive weight routes all traffic to the deployment.
pub fn resolve_weight(routing: Option<&RoutingSettings>) -> Result<u8> {
    match routing.map(|r| r.weight) {
        Some(weight) if weight > MAX_ROUTING_WEIGHT => Err(ProviderError::Validation(format!(
            "routing weight must be between 0 and {}, got {}",
            MAX_ROUTING_WEIGHT, weight
        ))),
        Some(weight) if weight > 0 => Ok(weight as u8),
        _ => Ok(DEFAULT_ROUTING_WEIGHT),
    }
}

/// Parse an image-declared port such as `8080/tcp`; ports outside
/// 1..=65535 are malformed.
pub fn parse_exposed_port(port: &str) -> Option<ExposedPort> {
    let caps = IMAGE_PORT.captures(port)?;
    let number = caps
        .get(1)?
        .as_str()
        .parse::<i32>()
        .ok()
        .filter(|n| (1..=MAX_PORT).contains(n))?;
    let protocol = caps.get(2)?.as_str().to_uppercase();
    Some(ExposedPort {
        port: number,
        protocol,
    })
}

/// Explicit ports win, then image-declared ports, then 8000/TCP.
pub fn resolve_exposed_ports(ports: &[i32], image: Option<&ImageConfig>) -> Vec<ExposedPort> {
    let mut exposed: Vec<ExposedPort> = if !ports.is_empty() {
        ports.iter().map(|port| ExposedPort::tcp(*port)).collect()
    } else if let Some(config) = image {
        let mut declared: Vec<ExposedPort> = config
            .exposed_ports
            .iter()
            .filter_map(|p| parse_exposed_port(p))
            .collect();
        declared.sort();
        declared.dedup();
        declared
    } else {
        Vec::new()
    };

    if exposed.is_empty() {
        exposed.push(ExposedPort::tcp(DEFAULT_EXPOSED_PORT));
    }
    exposed
}

/// Explicit processes win; otherwise a single `web` process running the
/// image entrypoint and cmd, when the image declares any.
pub fn resolve_processes(
    processes: &[ProcessParameters],
    image: Option<&ImageConfig>,
) -> Vec<ProcessSpec> {
    if !processes.is_empty() {
        return processes
            .iter()
            .map(|p| ProcessSpec {
                name: p.name.clone(),
                cmd: p.cmd.clone(),
            })
            .collect();
    }

    match image.map(|config| config.command()) {
        Some(cmd) if !cmd.is_empty() => vec![ProcessSpec {
            name: DEFAULT_PROCESS_NAME.to_string(),
            cmd,
        }],
        _ => Vec::new(),
    }
}

/// Whether building the record needs image metadata at all.
pub fn needs_image_config(ports: &[i32], processes: &[ProcessParameters]) -> bool {
    ports.is_empty() || processes.is_empty()
}
