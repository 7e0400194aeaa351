use k8s_openapi::api::core::v1::{NodeSelectorTerm, PodAffinityTerm};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ContainerConfig, MetadataConfig, StringMap, TemplateMetadataConfig};

/// Pod spec fields as edited in the pod form.
///
/// Containers are edited separately and passed to the builders next to this record;
/// init and ephemeral containers live here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSpecConfig {
	pub node_name: Option<String>,
	pub priority: Option<i32>,
	pub priority_class_name: Option<String>,
	pub service_account_name: Option<String>,
	pub automount_service_account_token: Option<bool>,
	pub hostname: Option<String>,
	pub subdomain: Option<String>,
	#[serde(rename = "setHostnameAsFQDN")]
	pub set_hostname_as_fqdn: Option<bool>,
	pub dns_policy: Option<String>,
	pub host_network: Option<bool>,
	#[serde(rename = "hostPID")]
	pub host_pid: Option<bool>,
	#[serde(rename = "hostIPC")]
	pub host_ipc: Option<bool>,
	pub host_users: Option<bool>,
	pub share_process_namespace: Option<bool>,
	pub restart_policy: Option<String>,
	pub termination_grace_period_seconds: Option<i64>,
	pub active_deadline_seconds: Option<i64>,
	pub scheduler_name: Option<String>,
	pub runtime_class_name: Option<String>,
	pub preemption_policy: Option<String>,
	pub enable_service_links: Option<bool>,
	pub node_selector: Option<StringMap>,
	pub security_context: Option<Value>,
	pub os: Option<Value>,
	pub overhead: Option<Map<String, Value>>,
	pub dns_config: Option<DnsConfig>,
	pub tolerations: Option<Vec<Value>>,
	pub topology_spread_constraints: Option<Vec<Value>>,
	pub volumes: Option<Vec<Value>>,
	pub host_aliases: Option<Vec<Value>>,
	pub image_pull_secrets: Option<Vec<Value>>,
	pub readiness_gates: Option<Vec<Value>>,
	pub scheduling_gates: Option<Vec<Value>>,
	pub resource_claims: Option<Vec<Value>>,
	pub affinity: Option<AffinityConfig>,
	pub init_containers: Option<Vec<ContainerConfig>>,
	pub ephemeral_containers: Option<Vec<ContainerConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsConfig {
	pub nameservers: Option<Vec<String>>,
	pub searches: Option<Vec<String>>,
	pub options: Option<Vec<Value>>,
}

/// A standalone pod: metadata and pod spec fields share one flat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodConfig {
	#[serde(flatten)]
	pub metadata: MetadataConfig,
	#[serde(flatten)]
	pub spec: PodSpecConfig,
}

/// Pod template embedded in a workload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodTemplateConfig {
	pub metadata: Option<TemplateMetadataConfig>,
	#[serde(flatten)]
	pub spec: PodSpecConfig,
}

/// Affinity as the editor models it: at most one required and one preferred term per
/// axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AffinityConfig {
	pub node_affinity: Option<NodeAffinityConfig>,
	pub pod_affinity: Option<PodAffinityConfig>,
	pub pod_anti_affinity: Option<PodAffinityConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeAffinityConfig {
	pub required_during_scheduling: Option<NodeSelectorTerm>,
	pub preferred_during_scheduling: Option<PreferredNodeTermConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferredNodeTermConfig {
	pub weight: Option<i32>,
	#[serde(flatten)]
	pub term: NodeSelectorTerm,
}

/// Used for both pod affinity and pod anti-affinity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodAffinityConfig {
	pub required_during_scheduling: Option<PodAffinityTerm>,
	pub preferred_during_scheduling: Option<PreferredPodTermConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferredPodTermConfig {
	pub weight: Option<i32>,
	#[serde(flatten)]
	pub term: PodAffinityTerm,
}
