use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MetadataConfig, PodTemplateConfig, TemplateMetadataConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
	pub metadata: MetadataConfig,
	pub spec: JobSpecConfig,
	pub template: PodTemplateConfig,
}

/// Job control fields, shared by Jobs and CronJob job templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSpecConfig {
	pub active_deadline_seconds: Option<i64>,
	pub backoff_limit: Option<i32>,
	pub backoff_limit_per_index: Option<i32>,
	pub completion_mode: Option<String>,
	pub completions: Option<i32>,
	pub manual_selector: Option<bool>,
	pub max_failed_indexes: Option<i32>,
	pub parallelism: Option<i32>,
	pub pod_replacement_policy: Option<String>,
	pub suspend: Option<bool>,
	pub ttl_seconds_after_finished: Option<i32>,
	pub selector: Option<Value>,
	pub pod_failure_policy: Option<PodFailurePolicyConfig>,
	pub success_policy: Option<SuccessPolicyConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodFailurePolicyConfig {
	pub rules: Vec<PodFailurePolicyRuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodFailurePolicyRuleConfig {
	pub action: Option<String>,
	pub on_exit_codes: Option<OnExitCodesConfig>,
	pub on_pod_conditions: Option<Vec<OnPodConditionConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnExitCodesConfig {
	pub container_name: Option<String>,
	pub operator: Option<String>,
	pub values: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnPodConditionConfig {
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessPolicyConfig {
	pub rules: Vec<SuccessPolicyRuleConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuccessPolicyRuleConfig {
	pub succeeded_count: Option<i32>,
	pub succeeded_indexes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CronJobConfig {
	pub metadata: MetadataConfig,
	pub spec: CronJobSpecConfig,
	pub job_template: JobTemplateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CronJobSpecConfig {
	pub schedule: Option<String>,
	pub time_zone: Option<String>,
	pub concurrency_policy: Option<String>,
	pub starting_deadline_seconds: Option<i64>,
	pub successful_jobs_history_limit: Option<i32>,
	pub failed_jobs_history_limit: Option<i32>,
	pub suspend: Option<bool>,
}

/// The job a CronJob creates on every run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobTemplateConfig {
	pub metadata: Option<TemplateMetadataConfig>,
	pub spec: JobSpecConfig,
	pub template: Option<PodTemplateConfig>,
}
