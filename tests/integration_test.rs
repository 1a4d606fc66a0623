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

mod common;

use clap::Parser;
use common::{provider_with, FakeImageSource, InMemoryKetchClient};
use ketch_provider::cli::manifest::ResourceManifest;
use ketch_provider::cli::resource::OutputFormat;
use ketch_provider::cli::{CliArgs, Commands};
use ketch_provider::*;
use std::io::Write;
use std::sync::Arc;

fn manifest_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_parse_create_command() {
    let args = CliArgs::try_parse_from([
        "ketch-provider",
        "create",
        "-f",
        "app.yaml",
        "--context",
        "staging",
        "-o",
        "json",
    ])
    .unwrap();

    match args.command {
        Commands::Create(cmd) => {
            assert_eq!(cmd.file, "app.yaml");
            assert_eq!(cmd.connection.context.as_deref(), Some("staging"));
            assert_eq!(cmd.output, OutputFormat::Json);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_parse_read_and_import_defaults() {
    let args = CliArgs::try_parse_from(["ketch-provider", "read", "ketch_job", "etl"]).unwrap();
    match args.command {
        Commands::Read(cmd) => {
            assert_eq!(cmd.resource, "ketch_job");
            assert_eq!(cmd.name, "etl");
            assert_eq!(cmd.output, OutputFormat::Table);
        }
        other => panic!("unexpected command {:?}", other),
    }

    let args =
        CliArgs::try_parse_from(["ketch-provider", "import", "ketch_app", "web"]).unwrap();
    match args.command {
        Commands::Import(cmd) => assert_eq!(cmd.output, OutputFormat::Yaml),
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_parse_rejects_missing_manifest() {
    assert!(CliArgs::try_parse_from(["ketch-provider", "create"]).is_err());
    assert!(CliArgs::try_parse_from(["ketch-provider", "delete", "ketch_app"]).is_err());
}

#[test]
fn test_connection_overrides_config_file() {
    let mut conf_file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        conf_file,
        "[kubernetes]\ncontext = \"from-file\"\nfield_manager = \"ci\"\n\n[image]\nlookup = false"
    )
    .unwrap();
    let path = conf_file.path().to_str().unwrap().to_string();

    let args = CliArgs::try_parse_from([
        "ketch-provider",
        "delete",
        "ketch_app",
        "web",
        "--config",
        &path,
        "--context",
        "from-flag",
    ])
    .unwrap();
    let Commands::Delete(cmd) = args.command else {
        panic!("expected delete");
    };

    let conf = cmd.connection.load_conf().unwrap();
    assert_eq!(conf.kubernetes.context.as_deref(), Some("from-flag"));
    assert_eq!(conf.kubernetes.field_manager, "ci");
    assert!(conf.kubernetes.kubeconfig.is_none());
    assert!(!conf.image.lookup);
}

#[tokio::test]
async fn test_manifest_pipeline_create_then_read() {
    let file = manifest_file(
        r#"
resource: ketch_job
job:
  - name: nightly
    framework: acme
    completions: 3
    containers:
      - name: main
        image: busybox
        command: ["sh", "-c", "echo hello"]
"#,
    );
    let manifest = ResourceManifest::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(manifest.name("job"), Some("nightly"));

    let client = Arc::new(InMemoryKetchClient::default());
    let provider = provider_with(client.clone(), Arc::new(FakeImageSource::default()));

    let mut data = ResourceData::new(manifest.body.clone());
    let diagnostics = provider
        .invoke(Operation::Create, &manifest.resource, &mut data)
        .await;
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let mut fresh = ResourceData::imported("nightly");
    let diagnostics = provider
        .invoke(Operation::Read, &manifest.resource, &mut fresh)
        .await;
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let job: Job = domain::config::decode_block(fresh.state().unwrap(), "job").unwrap();
    assert_eq!(job.completions, 3);
    assert_eq!(job.parallelism, 1);
    assert_eq!(job.containers.len(), 1);
    assert_eq!(job.containers[0].command, vec!["sh", "-c", "echo hello"]);

    let stored = client.stored_job("nightly").unwrap();
    assert_eq!(
        stored.metadata.labels.unwrap().get("app.kubernetes.io/managed-by"),
        Some(&"ketch-provider".to_string())
    );
}

#[tokio::test]
async fn test_read_back_state_round_trips_as_manifest() {
    let client = Arc::new(InMemoryKetchClient::default());
    let provider = provider_with(client, Arc::new(FakeImageSource::default()));

    let file = manifest_file(
        r#"{"resource": "ketch_framework", "framework": {"name": "team-a", "app_quota_limit": 5, "ingress_controller": {"class_name": "traefik", "type": "traefik"}}}"#,
    );
    let manifest = ResourceManifest::from_file(file.path().to_str().unwrap()).unwrap();

    let mut data = ResourceData::new(manifest.body);
    let diagnostics = provider
        .invoke(Operation::Create, "ketch_framework", &mut data)
        .await;
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let written = ResourceManifest::new("ketch_framework", data.state().cloned().unwrap());
    let reparsed: ResourceManifest =
        serde_yaml::from_str(&serde_yaml::to_string(&written).unwrap()).unwrap();
    assert_eq!(reparsed, written);

    let framework: Framework =
        domain::config::decode_block(&reparsed.body, "framework").unwrap();
    assert_eq!(framework.namespace, "ketch-team-a");
    assert_eq!(framework.app_quota_limit, 5);
    assert_eq!(framework.ingress_controller.ingress_type, "traefik");
}

#[tokio::test]
#[ignore] // Requires Kubernetes cluster with the Ketch CRDs installed
async fn test_live_framework_lifecycle() {
    let conf = ProviderConf::load(None).expect("Failed to load provider configuration");
    let provider = KetchProvider::configure(&conf)
        .await
        .expect("Failed to configure provider");

    let config: ConfigMap = serde_yaml::from_str(
        r#"
framework:
  - name: provider-it
    ingress_controller:
      - class_name: istio
        type: istio
"#,
    )
    .unwrap();

    let mut data = ResourceData::new(config);
    let diagnostics = provider
        .invoke(Operation::Create, "ketch_framework", &mut data)
        .await;
    assert!(!diagnostics.has_error(), "{:?}", diagnostics);
    assert_eq!(data.id(), "provider-it");

    let diagnostics = provider
        .invoke(Operation::Delete, "ketch_framework", &mut data)
        .await;
    assert!(!diagnostics.has_error(), "{:?}", diagnostics);
    assert!(data.id().is_empty());
}
