//! Deployment, ReplicaSet and DaemonSet manifests.
//!
//! The three kinds share one assembly path; the kind-specific part of `spec` comes from
//! [`WorkloadSpec`], so a kind can only ever emit the fields its record has.

use serde_json::Value;
use tracing::instrument;

use super::{manifest_header, pod_template, Fields};
use crate::{
	error::Result,
	kind::ResourceKind,
	model::{
		ContainerConfig, DaemonSetConfig, DeploymentConfig, MetadataConfig, PodTemplateConfig,
		ReplicaSetConfig, UpdateStrategyConfig,
	},
};

/// A replica-style workload record.
pub trait WorkloadSpec {
	fn kind(&self) -> ResourceKind;
	fn metadata(&self) -> &MetadataConfig;
	fn template(&self) -> &PodTemplateConfig;
	/// Write the spec fields preceding `template`.
	fn write_spec(&self, spec: &mut Fields);
}

impl WorkloadSpec for DeploymentConfig {
	fn kind(&self) -> ResourceKind {
		ResourceKind::Deployment
	}
	fn metadata(&self) -> &MetadataConfig {
		&self.metadata
	}
	fn template(&self) -> &PodTemplateConfig {
		&self.template
	}
	fn write_spec(&self, spec: &mut Fields) {
		let config = &self.spec;
		spec.opt("replicas", &config.replicas)
			.opt("minReadySeconds", &config.min_ready_seconds)
			.opt("progressDeadlineSeconds", &config.progress_deadline_seconds)
			.opt("revisionHistoryLimit", &config.revision_history_limit)
			.opt("paused", &config.paused)
			.opt("selector", &config.selector);
		if let Some(strategy) = &config.strategy {
			spec.object("strategy", update_strategy(strategy));
		}
	}
}

impl WorkloadSpec for ReplicaSetConfig {
	fn kind(&self) -> ResourceKind {
		ResourceKind::ReplicaSet
	}
	fn metadata(&self) -> &MetadataConfig {
		&self.metadata
	}
	fn template(&self) -> &PodTemplateConfig {
		&self.template
	}
	fn write_spec(&self, spec: &mut Fields) {
		let config = &self.spec;
		spec.opt("replicas", &config.replicas)
			.opt("minReadySeconds", &config.min_ready_seconds)
			.opt("selector", &config.selector);
	}
}

impl WorkloadSpec for DaemonSetConfig {
	fn kind(&self) -> ResourceKind {
		ResourceKind::DaemonSet
	}
	fn metadata(&self) -> &MetadataConfig {
		&self.metadata
	}
	fn template(&self) -> &PodTemplateConfig {
		&self.template
	}
	fn write_spec(&self, spec: &mut Fields) {
		let config = &self.spec;
		spec.opt("minReadySeconds", &config.min_ready_seconds)
			.opt("revisionHistoryLimit", &config.revision_history_limit)
			.opt("selector", &config.selector);
		if let Some(strategy) = &config.update_strategy {
			spec.object("updateStrategy", update_strategy(strategy));
		}
	}
}

fn update_strategy(strategy: &UpdateStrategyConfig) -> Fields {
	let mut fields = Fields::new();
	fields.opt("type", &strategy.type_);
	if let Some(rolling) = &strategy.rolling_update {
		let mut rolling_update = Fields::new();
		rolling_update
			.opt("maxSurge", &rolling.max_surge)
			.opt("maxUnavailable", &rolling.max_unavailable);
		fields.object("rollingUpdate", rolling_update);
	}
	fields
}

#[instrument(skip_all, fields(kind = %workload.kind(), name = name))]
pub fn build_workload<W: WorkloadSpec>(
	name: &str,
	workload: &W,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<Value> {
	let mut manifest = manifest_header(&workload.kind(), name, namespace, workload.metadata())?;
	let mut spec = Fields::new();
	workload.write_spec(&mut spec);
	spec.set("template", pod_template(workload.template(), containers)?);
	manifest.set("spec", spec);
	Ok(manifest.into())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::prune::prune;

	#[test]
	fn test_deployment() {
		let config: DeploymentConfig = serde_json::from_value(json!({
			"metadata": { "labels": { "app": "web" } },
			"spec": {
				"replicas": 0,
				"selector": { "matchLabels": { "app": "web" } },
				"strategy": { "type": "RollingUpdate", "rollingUpdate": { "maxSurge": "25%", "maxUnavailable": 0 } },
			},
			"template": {
				"metadata": { "labels": { "app": "web" } },
				"serviceAccountName": "web",
			},
		}))
		.unwrap();
		let manifest = build_workload(
			"web",
			&config,
			&[ContainerConfig::new("web", "nginx")],
			Some("apps"),
		)
		.unwrap();
		assert_eq!(
			manifest,
			json!({
				"apiVersion": "apps/v1",
				"kind": "Deployment",
				"metadata": { "name": "web", "namespace": "apps", "labels": { "app": "web" } },
				"spec": {
					"replicas": 0,
					"selector": { "matchLabels": { "app": "web" } },
					"strategy": {
						"type": "RollingUpdate",
						"rollingUpdate": { "maxSurge": "25%", "maxUnavailable": 0 },
					},
					"template": {
						"metadata": { "labels": { "app": "web" } },
						"spec": {
							"containers": [{ "name": "web", "image": "nginx" }],
							"serviceAccountName": "web",
						},
					},
				},
			})
		);
	}

	#[test]
	fn test_daemon_set_never_has_replicas() {
		let config: DaemonSetConfig = serde_json::from_value(json!({
			"spec": {
				"replicas": 3,
				"updateStrategy": { "type": "OnDelete", "rollingUpdate": {} },
			},
		}))
		.unwrap();
		let manifest = build_workload("agent", &config, &[], None).unwrap();
		assert_eq!(manifest["kind"], json!("DaemonSet"));
		assert_eq!(manifest["spec"].get("replicas"), None);
		assert_eq!(manifest["spec"]["updateStrategy"], json!({ "type": "OnDelete" }));
	}

	#[test]
	fn test_replica_set_empty_template_metadata_is_pruned() {
		let manifest = build_workload(
			"rs",
			&ReplicaSetConfig::default(),
			&[ContainerConfig::new("c", "i")],
			None,
		)
		.unwrap();
		assert_eq!(
			prune(manifest),
			json!({
				"apiVersion": "apps/v1",
				"kind": "ReplicaSet",
				"metadata": { "name": "rs" },
				"spec": {
					"template": { "spec": { "containers": [{ "name": "c", "image": "i" }] } },
				},
			})
		);
	}
}
