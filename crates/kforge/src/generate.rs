//! Manifest generation entry points.
//!
//! Every entry point builds the manifest tree, prunes it and emits YAML. The functions
//! are pure: the same input always produces the same text.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
	builder::{
		job::{build_cron_job, build_job},
		pod::build_pod,
		resource::build_resource,
		stateful_set::build_stateful_set,
		workload::build_workload,
	},
	error::{ManifestError, Result},
	kind::ResourceKind,
	model::{
		decode, ContainerConfig, CronJobConfig, DaemonSetConfig, DeploymentConfig, JobConfig,
		PodConfig, ReplicaSetConfig, ResourceConfig, StatefulSetConfig,
	},
	prune::prune,
	settings::{GatewayDefaults, Settings},
	yaml::to_yaml,
};

fn emit(manifest: Value) -> Result<String> {
	to_yaml(&prune(manifest)).map_err(ManifestError::Yaml)
}

pub fn generate_pod_yaml(
	name: &str,
	config: &PodConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_pod(name, config, containers, namespace)?)
}

pub fn generate_deployment_yaml(
	name: &str,
	config: &DeploymentConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_workload(name, config, containers, namespace)?)
}

pub fn generate_replica_set_yaml(
	name: &str,
	config: &ReplicaSetConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_workload(name, config, containers, namespace)?)
}

pub fn generate_daemon_set_yaml(
	name: &str,
	config: &DaemonSetConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_workload(name, config, containers, namespace)?)
}

pub fn generate_stateful_set_yaml(
	name: &str,
	config: &StatefulSetConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_stateful_set(name, config, containers, namespace)?)
}

pub fn generate_job_yaml(
	name: &str,
	config: &JobConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_job(name, config, containers, namespace)?)
}

pub fn generate_cron_job_yaml(
	name: &str,
	config: &CronJobConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<String> {
	emit(build_cron_job(name, config, containers, namespace)?)
}

/// Any non-workload kind. Routes attach to the gateway described by `gateway`.
pub fn generate_resource_yaml(
	name: &str,
	config: &ResourceConfig,
	namespace: Option<&str>,
	gateway: &GatewayDefaults,
) -> Result<String> {
	emit(build_resource(name, config, namespace, gateway)?)
}

/// One "generate" action: a kind, a name and an untyped configuration record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManifestRequest {
	pub kind: String,
	pub name: String,
	pub namespace: Option<String>,
	pub config: Value,
	/// Ignored for kinds without a pod template.
	pub containers: Vec<ContainerConfig>,
}

/// Decode `request.config` for the requested kind and generate its manifest.
#[instrument(skip_all, fields(kind = %request.kind, name = %request.name))]
pub fn generate(request: &ManifestRequest, settings: &Settings) -> Result<String> {
	let kind = ResourceKind::from(request.kind.as_str());
	let name = request.name.as_str();
	let namespace = request.namespace.as_deref();
	let containers = request.containers.as_slice();
	let config = request.config.clone();
	if !kind.is_workload() && !containers.is_empty() {
		debug!(count = containers.len(), "kind has no pod template, ignoring containers");
	}

	match kind {
		ResourceKind::Pod => generate_pod_yaml(name, &decode(&kind, config)?, containers, namespace),
		ResourceKind::Deployment => {
			generate_deployment_yaml(name, &decode(&kind, config)?, containers, namespace)
		}
		ResourceKind::ReplicaSet => {
			generate_replica_set_yaml(name, &decode(&kind, config)?, containers, namespace)
		}
		ResourceKind::DaemonSet => {
			generate_daemon_set_yaml(name, &decode(&kind, config)?, containers, namespace)
		}
		ResourceKind::StatefulSet => {
			generate_stateful_set_yaml(name, &decode(&kind, config)?, containers, namespace)
		}
		ResourceKind::Job => generate_job_yaml(name, &decode(&kind, config)?, containers, namespace),
		ResourceKind::CronJob => {
			generate_cron_job_yaml(name, &decode(&kind, config)?, containers, namespace)
		}
		kind => {
			let config = ResourceConfig::from_value(kind, config)?;
			generate_resource_yaml(name, &config, namespace, &settings.gateway)
		}
	}
}
