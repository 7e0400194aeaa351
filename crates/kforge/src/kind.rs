//! Resource kinds known to the generator and their API versions.

use std::{convert::Infallible, fmt, str::FromStr};

/// A Kubernetes resource kind.
///
/// Kinds without a dedicated builder are still accepted as [`ResourceKind::Other`] and
/// are generated through the pass-through path with `apiVersion: v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	Pod,
	Deployment,
	ReplicaSet,
	StatefulSet,
	DaemonSet,
	Job,
	CronJob,
	Service,
	ConfigMap,
	Secret,
	PersistentVolume,
	PersistentVolumeClaim,
	LimitRange,
	HttpRoute,
	GrpcRoute,
	StorageClass,
	VolumeAttributesClass,
	RuntimeClass,
	Other(String),
}

impl ResourceKind {
	/// Every kind with a fixed entry in the API version table.
	pub const KNOWN: [ResourceKind; 18] = [
		ResourceKind::Pod,
		ResourceKind::Deployment,
		ResourceKind::ReplicaSet,
		ResourceKind::StatefulSet,
		ResourceKind::DaemonSet,
		ResourceKind::Job,
		ResourceKind::CronJob,
		ResourceKind::Service,
		ResourceKind::ConfigMap,
		ResourceKind::Secret,
		ResourceKind::PersistentVolume,
		ResourceKind::PersistentVolumeClaim,
		ResourceKind::LimitRange,
		ResourceKind::HttpRoute,
		ResourceKind::GrpcRoute,
		ResourceKind::StorageClass,
		ResourceKind::VolumeAttributesClass,
		ResourceKind::RuntimeClass,
	];

	/// The `kind` field as written in a manifest.
	pub fn as_str(&self) -> &str {
		match self {
			ResourceKind::Pod => "Pod",
			ResourceKind::Deployment => "Deployment",
			ResourceKind::ReplicaSet => "ReplicaSet",
			ResourceKind::StatefulSet => "StatefulSet",
			ResourceKind::DaemonSet => "DaemonSet",
			ResourceKind::Job => "Job",
			ResourceKind::CronJob => "CronJob",
			ResourceKind::Service => "Service",
			ResourceKind::ConfigMap => "ConfigMap",
			ResourceKind::Secret => "Secret",
			ResourceKind::PersistentVolume => "PersistentVolume",
			ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
			ResourceKind::LimitRange => "LimitRange",
			ResourceKind::HttpRoute => "HTTPRoute",
			ResourceKind::GrpcRoute => "GRPCRoute",
			ResourceKind::StorageClass => "StorageClass",
			ResourceKind::VolumeAttributesClass => "VolumeAttributesClass",
			ResourceKind::RuntimeClass => "RuntimeClass",
			ResourceKind::Other(kind) => kind,
		}
	}

	/// The `apiVersion` emitted for this kind. Unknown kinds fall back to `v1`.
	pub fn api_version(&self) -> &'static str {
		match self {
			ResourceKind::Deployment
			| ResourceKind::ReplicaSet
			| ResourceKind::StatefulSet
			| ResourceKind::DaemonSet => "apps/v1",
			ResourceKind::Job | ResourceKind::CronJob => "batch/v1",
			ResourceKind::HttpRoute => "gateway.networking.k8s.io/v1beta1",
			ResourceKind::GrpcRoute => "gateway.networking.k8s.io/v1",
			ResourceKind::StorageClass => "storage.k8s.io/v1",
			ResourceKind::VolumeAttributesClass => "storage.k8s.io/v1alpha1",
			ResourceKind::RuntimeClass => "node.k8s.io/v1",
			ResourceKind::Pod
			| ResourceKind::Service
			| ResourceKind::ConfigMap
			| ResourceKind::Secret
			| ResourceKind::PersistentVolume
			| ResourceKind::PersistentVolumeClaim
			| ResourceKind::LimitRange
			| ResourceKind::Other(_) => "v1",
		}
	}

	/// Whether objects of this kind live in a namespace.
	///
	/// Cluster-scoped kinds never get `metadata.namespace`.
	pub fn is_namespaced(&self) -> bool {
		!matches!(
			self,
			ResourceKind::PersistentVolume
				| ResourceKind::StorageClass
				| ResourceKind::VolumeAttributesClass
				| ResourceKind::RuntimeClass
		)
	}

	/// Whether this kind is generated from a pod template and a container list.
	pub fn is_workload(&self) -> bool {
		matches!(
			self,
			ResourceKind::Pod
				| ResourceKind::Deployment
				| ResourceKind::ReplicaSet
				| ResourceKind::StatefulSet
				| ResourceKind::DaemonSet
				| ResourceKind::Job
				| ResourceKind::CronJob
		)
	}
}

impl fmt::Display for ResourceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for ResourceKind {
	fn from(s: &str) -> Self {
		ResourceKind::KNOWN
			.into_iter()
			.find(|kind| kind.as_str() == s)
			.unwrap_or_else(|| ResourceKind::Other(s.to_string()))
	}
}

impl FromStr for ResourceKind {
	type Err = Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}
