//! Records for the non-workload kinds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode, MetadataConfig, StringMap};
use crate::{error::ManifestError, kind::ResourceKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
	pub metadata: MetadataConfig,
	pub spec: ServiceSpecConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceSpecConfig {
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub external_name: Option<String>,
	#[serde(rename = "clusterIP")]
	pub cluster_ip: Option<String>,
	#[serde(rename = "externalIPs")]
	pub external_ips: Option<Vec<String>>,
	pub external_traffic_policy: Option<String>,
	pub internal_traffic_policy: Option<String>,
	pub load_balancer_class: Option<String>,
	pub ports: Option<Vec<ServicePortConfig>>,
	pub selector: Option<StringMap>,
	pub publish_not_ready_addresses: Option<bool>,
	pub traffic_distribution: Option<String>,
	pub session_affinity: Option<String>,
	/// Flat in the editor; nested under `sessionAffinityConfig.clientIP` in the manifest.
	pub session_affinity_timeout_seconds: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePortConfig {
	pub name: Option<String>,
	pub port: Option<i32>,
	/// Port number or named container port.
	pub target_port: Option<Value>,
	pub protocol: Option<String>,
	pub app_protocol: Option<String>,
	pub node_port: Option<i32>,
}

/// HTTPRoute and GRPCRoute share one record; parent references are not editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
	pub metadata: MetadataConfig,
	pub spec: RouteSpecConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSpecConfig {
	pub hostnames: Option<Vec<String>>,
	pub rules: Option<Vec<RouteRuleConfig>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteRuleConfig {
	pub name: Option<String>,
	pub matches: Option<Vec<Value>>,
	pub filters: Option<Vec<RouteFilterConfig>>,
	pub backend_refs: Option<Vec<BackendRefConfig>>,
	pub timeouts: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteFilterConfig {
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub request_header_modifier: Option<Value>,
	pub response_header_modifier: Option<Value>,
	pub request_redirect: Option<Value>,
	#[serde(rename = "urlRewrite")]
	pub url_rewrite: Option<Value>,
	pub request_mirror: Option<RequestMirrorConfig>,
	pub extension_ref: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestMirrorConfig {
	pub backend_ref: Option<BackendRefConfig>,
	pub percent: Option<i32>,
	pub fraction: Option<Value>,
}

/// A route backend. The namespace is always the route's own namespace, so the record
/// has no field for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendRefConfig {
	pub group: Option<String>,
	pub kind: Option<String>,
	pub name: Option<String>,
	pub port: Option<i32>,
	pub weight: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigMapConfig {
	pub metadata: MetadataConfig,
	pub immutable: Option<bool>,
	pub data: Option<StringMap>,
	pub binary_data: Option<StringMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecretConfig {
	pub metadata: MetadataConfig,
	#[serde(rename = "type")]
	pub type_: Option<String>,
	pub immutable: Option<bool>,
	pub data: Option<StringMap>,
	pub string_data: Option<StringMap>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageClassConfig {
	pub metadata: MetadataConfig,
	pub provisioner: Option<String>,
	pub parameters: Option<StringMap>,
	pub reclaim_policy: Option<String>,
	pub volume_binding_mode: Option<String>,
	pub allow_volume_expansion: Option<bool>,
	pub mount_options: Option<Vec<String>>,
	pub allowed_topologies: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeClassConfig {
	pub metadata: MetadataConfig,
	pub handler: Option<String>,
	pub overhead: Option<Value>,
	pub scheduling: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeAttributesClassConfig {
	pub metadata: MetadataConfig,
	pub driver_name: Option<String>,
	pub parameters: Option<StringMap>,
}

/// Any kind without a dedicated record: `spec` is copied as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericResourceConfig {
	pub metadata: MetadataConfig,
	pub spec: Option<Value>,
}

/// Configuration for one non-workload resource, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceConfig {
	Service(ServiceConfig),
	HttpRoute(RouteConfig),
	GrpcRoute(RouteConfig),
	ConfigMap(ConfigMapConfig),
	Secret(SecretConfig),
	StorageClass(StorageClassConfig),
	RuntimeClass(RuntimeClassConfig),
	VolumeAttributesClass(VolumeAttributesClassConfig),
	Generic {
		kind: ResourceKind,
		config: GenericResourceConfig,
	},
}

impl ResourceConfig {
	/// Decode an untyped editor record for `kind`.
	pub fn from_value(kind: ResourceKind, value: Value) -> Result<Self, ManifestError> {
		Ok(match kind {
			ResourceKind::Service => ResourceConfig::Service(decode(&kind, value)?),
			ResourceKind::HttpRoute => ResourceConfig::HttpRoute(decode(&kind, value)?),
			ResourceKind::GrpcRoute => ResourceConfig::GrpcRoute(decode(&kind, value)?),
			ResourceKind::ConfigMap => ResourceConfig::ConfigMap(decode(&kind, value)?),
			ResourceKind::Secret => ResourceConfig::Secret(decode(&kind, value)?),
			ResourceKind::StorageClass => ResourceConfig::StorageClass(decode(&kind, value)?),
			ResourceKind::RuntimeClass => ResourceConfig::RuntimeClass(decode(&kind, value)?),
			ResourceKind::VolumeAttributesClass => {
				ResourceConfig::VolumeAttributesClass(decode(&kind, value)?)
			}
			kind => {
				let config = decode(&kind, value)?;
				ResourceConfig::Generic { kind, config }
			}
		})
	}

	pub fn kind(&self) -> ResourceKind {
		match self {
			ResourceConfig::Service(_) => ResourceKind::Service,
			ResourceConfig::HttpRoute(_) => ResourceKind::HttpRoute,
			ResourceConfig::GrpcRoute(_) => ResourceKind::GrpcRoute,
			ResourceConfig::ConfigMap(_) => ResourceKind::ConfigMap,
			ResourceConfig::Secret(_) => ResourceKind::Secret,
			ResourceConfig::StorageClass(_) => ResourceKind::StorageClass,
			ResourceConfig::RuntimeClass(_) => ResourceKind::RuntimeClass,
			ResourceConfig::VolumeAttributesClass(_) => ResourceKind::VolumeAttributesClass,
			ResourceConfig::Generic { kind, .. } => kind.clone(),
		}
	}

	pub fn metadata(&self) -> &MetadataConfig {
		match self {
			ResourceConfig::Service(c) => &c.metadata,
			ResourceConfig::HttpRoute(c) | ResourceConfig::GrpcRoute(c) => &c.metadata,
			ResourceConfig::ConfigMap(c) => &c.metadata,
			ResourceConfig::Secret(c) => &c.metadata,
			ResourceConfig::StorageClass(c) => &c.metadata,
			ResourceConfig::RuntimeClass(c) => &c.metadata,
			ResourceConfig::VolumeAttributesClass(c) => &c.metadata,
			ResourceConfig::Generic { config, .. } => &config.metadata,
		}
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use serde_json::json;

	use super::*;

	#[test]
	fn test_from_value_dispatches_on_kind() {
		let config = ResourceConfig::from_value(
			ResourceKind::HttpRoute,
			json!({ "spec": { "hostnames": ["example.com"] } }),
		)
		.unwrap();
		assert_eq!(config.kind(), ResourceKind::HttpRoute);
		let ResourceConfig::HttpRoute(route) = &config else {
			panic!("expected an HTTPRoute record, got {config:?}");
		};
		assert_eq!(route.spec.hostnames, Some(vec!["example.com".to_string()]));

		let config = ResourceConfig::from_value(
			ResourceKind::PersistentVolumeClaim,
			json!({ "spec": { "accessModes": ["ReadWriteOnce"] } }),
		)
		.unwrap();
		assert_eq!(config.kind(), ResourceKind::PersistentVolumeClaim);
	}

	#[test]
	fn test_null_is_an_empty_record() {
		let config = ResourceConfig::from_value(ResourceKind::ConfigMap, Value::Null).unwrap();
		assert_eq!(config, ResourceConfig::ConfigMap(ConfigMapConfig::default()));
	}

	#[test]
	fn test_structurally_invalid_record() {
		let err = ResourceConfig::from_value(
			ResourceKind::Service,
			json!({ "spec": { "ports": "80" } }),
		)
		.unwrap_err();
		assert_matches!(err, ManifestError::InvalidConfig { kind, .. } if kind == "Service");
	}
}
