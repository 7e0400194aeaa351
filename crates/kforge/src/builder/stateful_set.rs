//! StatefulSet manifests.

use serde_json::Value;
use tracing::instrument;

use super::{manifest_header, pod_template, write_meta_fields, Fields};
use crate::{
	error::Result,
	kind::ResourceKind,
	model::{
		ContainerConfig, StatefulSetConfig, StatefulSetUpdateStrategyConfig,
		VolumeClaimTemplateConfig,
	},
	prune::prune_object,
};

#[instrument(skip_all, fields(name = name))]
pub fn build_stateful_set(
	name: &str,
	config: &StatefulSetConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<Value> {
	let mut manifest = manifest_header(
		&ResourceKind::StatefulSet,
		name,
		namespace,
		&config.metadata,
	)?;

	let spec_config = &config.spec;
	let mut spec = Fields::new();
	spec.opt("replicas", &spec_config.replicas)
		.opt("minReadySeconds", &spec_config.min_ready_seconds)
		.opt("revisionHistoryLimit", &spec_config.revision_history_limit)
		.opt("selector", &spec_config.selector)
		.opt("serviceName", &spec_config.service_name)
		.opt("podManagementPolicy", &spec_config.pod_management_policy);

	if let Some(strategy) = &spec_config.update_strategy {
		spec.object("updateStrategy", update_strategy(strategy));
	}
	if let Some(ordinals) = &spec_config.ordinals {
		let mut fields = Fields::new();
		fields.opt("start", &ordinals.start);
		spec.object("ordinals", fields);
	}
	if let Some(policy) = &spec_config.persistent_volume_claim_retention_policy {
		let mut fields = Fields::new();
		fields
			.opt("whenDeleted", &policy.when_deleted)
			.opt("whenScaled", &policy.when_scaled);
		spec.object("persistentVolumeClaimRetentionPolicy", fields);
	}

	spec.values(
		"volumeClaimTemplates",
		spec_config
			.volume_claim_templates
			.iter()
			.flatten()
			.map(volume_claim_template)
			.collect(),
	);
	spec.set("template", pod_template(&config.template, containers)?);

	manifest.set("spec", spec);
	Ok(manifest.into())
}

fn update_strategy(strategy: &StatefulSetUpdateStrategyConfig) -> Fields {
	let mut fields = Fields::new();
	fields.opt("type", &strategy.type_);
	if let Some(rolling) = &strategy.rolling_update {
		let mut rolling_update = Fields::new();
		rolling_update
			.opt("maxUnavailable", &rolling.max_unavailable)
			.opt("partition", &rolling.partition);
		fields.object("rollingUpdate", rolling_update);
	}
	fields
}

/// `{metadata, spec}` of one claim template, each half pruned on its own.
fn volume_claim_template(template: &VolumeClaimTemplateConfig) -> Value {
	let mut metadata = Fields::new();
	metadata.opt("name", &template.metadata.name);
	write_meta_fields(&mut metadata, &template.metadata.meta);

	let claim = &template.spec;
	let mut spec = Fields::new();
	spec.list("accessModes", &claim.access_modes)
		.opt("storageClassName", &claim.storage_class_name)
		.opt("volumeName", &claim.volume_name)
		.opt("volumeMode", &claim.volume_mode)
		.opt(
			"volumeAttributesClassName",
			&claim.volume_attributes_class_name,
		)
		.opt("resources", &claim.resources)
		.opt("dataSource", &claim.data_source)
		.opt("dataSourceRef", &claim.data_source_ref)
		.opt("selector", &claim.selector);

	let mut fields = Fields::new();
	fields
		.set("metadata", prune_object(metadata.into_map()))
		.set("spec", prune_object(spec.into_map()));
	fields.into()
}
