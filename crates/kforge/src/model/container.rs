use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One container row of the container editor.
///
/// `name` and `image` are the only fields a container needs; everything else is
/// emitted only when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerConfig {
	pub name: String,
	pub image: String,
	pub image_pull_policy: Option<String>,
	pub working_dir: Option<String>,
	pub ports: Option<Vec<ContainerPortConfig>>,
	pub env: Option<Vec<EnvVarConfig>>,
	pub env_from: Option<Vec<Value>>,
	pub command: Option<Vec<String>>,
	pub args: Option<Vec<String>>,
	pub lifecycle: Option<Value>,
	pub resources: Option<ResourceRequirementsConfig>,
	pub probes: Option<ProbesConfig>,
	pub security_context: Option<Value>,
	pub resize_policy: Option<Vec<Value>>,
	pub restart_policy: Option<String>,
	pub termination_message_path: Option<String>,
	pub termination_message_policy: Option<String>,
	pub stdin: Option<bool>,
	pub stdin_once: Option<bool>,
	pub tty: Option<bool>,
	pub volume_mounts: Option<Vec<Value>>,
	pub volume_devices: Option<Vec<Value>>,
}

impl ContainerConfig {
	pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			image: image.into(),
			..Self::default()
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerPortConfig {
	pub name: Option<String>,
	pub container_port: Option<i32>,
	pub host_port: Option<i32>,
	#[serde(rename = "hostIP")]
	pub host_ip: Option<String>,
	pub protocol: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnvVarConfig {
	pub name: String,
	pub value: Option<String>,
	pub value_from: Option<Value>,
}

/// Limits and requests keyed by resource name (`cpu`, `memory`, ...).
///
/// Quantities are kept as the editor produced them, strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceRequirementsConfig {
	pub limits: Option<Map<String, Value>>,
	pub requests: Option<Map<String, Value>>,
	pub claims: Option<Vec<Value>>,
}

/// The three container probes, grouped the way the editor shows them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbesConfig {
	pub liveness: Option<Value>,
	pub readiness: Option<Value>,
	pub startup: Option<Value>,
}
