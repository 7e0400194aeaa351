//! Replica-style workload records. Each kind only carries the spec fields that are
//! valid for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MetadataConfig, PodTemplateConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
	pub metadata: MetadataConfig,
	pub spec: DeploymentSpecConfig,
	pub template: PodTemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeploymentSpecConfig {
	pub replicas: Option<i32>,
	pub min_ready_seconds: Option<i32>,
	pub progress_deadline_seconds: Option<i32>,
	pub revision_history_limit: Option<i32>,
	pub paused: Option<bool>,
	pub selector: Option<Value>,
	pub strategy: Option<UpdateStrategyConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicaSetConfig {
	pub metadata: MetadataConfig,
	pub spec: ReplicaSetSpecConfig,
	pub template: PodTemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicaSetSpecConfig {
	pub replicas: Option<i32>,
	pub min_ready_seconds: Option<i32>,
	pub selector: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonSetConfig {
	pub metadata: MetadataConfig,
	pub spec: DaemonSetSpecConfig,
	pub template: PodTemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaemonSetSpecConfig {
	pub min_ready_seconds: Option<i32>,
	pub revision_history_limit: Option<i32>,
	pub selector: Option<Value>,
	pub update_strategy: Option<UpdateStrategyConfig>,
}

/// `strategy` of a Deployment or `updateStrategy` of a DaemonSet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStrategyConfig {
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub rolling_update: Option<RollingUpdateConfig>,
}

/// `maxSurge` and `maxUnavailable` are int-or-percent, kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RollingUpdateConfig {
	pub max_surge: Option<Value>,
	pub max_unavailable: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatefulSetConfig {
	pub metadata: MetadataConfig,
	pub spec: StatefulSetSpecConfig,
	pub template: PodTemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatefulSetSpecConfig {
	pub replicas: Option<i32>,
	pub min_ready_seconds: Option<i32>,
	pub revision_history_limit: Option<i32>,
	pub selector: Option<Value>,
	pub service_name: Option<String>,
	pub pod_management_policy: Option<String>,
	pub update_strategy: Option<StatefulSetUpdateStrategyConfig>,
	pub ordinals: Option<OrdinalsConfig>,
	pub persistent_volume_claim_retention_policy: Option<PvcRetentionPolicyConfig>,
	pub volume_claim_templates: Option<Vec<VolumeClaimTemplateConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatefulSetUpdateStrategyConfig {
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub rolling_update: Option<StatefulSetRollingUpdateConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatefulSetRollingUpdateConfig {
	pub max_unavailable: Option<Value>,
	pub partition: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdinalsConfig {
	pub start: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PvcRetentionPolicyConfig {
	pub when_deleted: Option<String>,
	pub when_scaled: Option<String>,
}

/// A per-replica PersistentVolumeClaim blueprint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeClaimTemplateConfig {
	pub metadata: VolumeClaimMetadataConfig,
	pub spec: VolumeClaimSpecConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeClaimMetadataConfig {
	pub name: Option<String>,
	#[serde(flatten)]
	pub meta: MetadataConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeClaimSpecConfig {
	pub access_modes: Option<Vec<String>>,
	pub storage_class_name: Option<String>,
	pub volume_name: Option<String>,
	pub volume_mode: Option<String>,
	pub volume_attributes_class_name: Option<String>,
	pub resources: Option<Value>,
	pub data_source: Option<Value>,
	pub data_source_ref: Option<Value>,
	pub selector: Option<Value>,
}
