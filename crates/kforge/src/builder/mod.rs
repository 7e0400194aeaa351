//! Builders turning configuration records into manifest trees.
//!
//! Builders only decide *whether* a field is written, by presence: a `Some` scalar is
//! always written (so `0` and `false` survive), a list only when it has elements.
//! They do not clean up values nested inside pass-through sub-trees; the entry points
//! run the whole tree through [`crate::prune::prune`] afterwards.

pub mod affinity;
pub mod container;
pub mod job;
pub mod pod;
pub mod resource;
pub mod stateful_set;
pub mod workload;

use serde_json::{Map, Value};

use crate::{
	error::{Result, ValidationError},
	kind::ResourceKind,
	model::{
		ContainerConfig, MetadataConfig, OwnerReferenceConfig, PodTemplateConfig, StringMap,
		TemplateMetadataConfig,
	},
};

/// An object under construction.
#[derive(Debug, Default)]
pub(crate) struct Fields(Map<String, Value>);

impl Fields {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Write `value` unconditionally.
	pub(crate) fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
		self.0.insert(key.to_string(), value.into());
		self
	}

	/// Write `value` if it is set.
	pub(crate) fn opt<T>(&mut self, key: &str, value: &Option<T>) -> &mut Self
	where
		T: Clone + Into<Value>,
	{
		if let Some(value) = value {
			self.set(key, value.clone());
		}
		self
	}

	/// Write a list if it is set and has at least one element.
	pub(crate) fn list<T>(&mut self, key: &str, value: &Option<Vec<T>>) -> &mut Self
	where
		T: Clone + Into<Value>,
	{
		match value {
			Some(items) if !items.is_empty() => self.set(key, items.clone()),
			_ => self,
		}
	}

	/// Write already-built list items if there are any.
	pub(crate) fn values(&mut self, key: &str, items: Vec<Value>) -> &mut Self {
		if items.is_empty() {
			return self;
		}
		self.set(key, items)
	}

	/// Write a string map (labels, annotations, selectors) if it has entries.
	pub(crate) fn dict(&mut self, key: &str, value: &Option<StringMap>) -> &mut Self {
		match value {
			Some(map) if !map.is_empty() => self.set(key, string_map(map)),
			_ => self,
		}
	}

	/// Write a free-form object if it has entries.
	pub(crate) fn entries(&mut self, key: &str, value: &Option<Map<String, Value>>) -> &mut Self {
		match value {
			Some(map) if !map.is_empty() => self.set(key, map.clone()),
			_ => self,
		}
	}

	/// Write a nested object if anything was written to it.
	pub(crate) fn object(&mut self, key: &str, fields: Fields) -> &mut Self {
		if fields.is_empty() {
			return self;
		}
		self.set(key, fields)
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub(crate) fn into_map(self) -> Map<String, Value> {
		self.0
	}
}

impl From<Fields> for Value {
	fn from(fields: Fields) -> Self {
		Value::Object(fields.0)
	}
}

fn string_map(map: &StringMap) -> Map<String, Value> {
	map.iter()
		.map(|(k, v)| (k.clone(), Value::String(v.clone())))
		.collect()
}

/// Start a manifest: `apiVersion`, `kind` and `metadata`.
///
/// The `namespace` argument wins over the one in the record. Cluster-scoped kinds
/// never get a namespace.
pub(crate) fn manifest_header(
	kind: &ResourceKind,
	name: &str,
	namespace: Option<&str>,
	meta: &MetadataConfig,
) -> Result<Fields> {
	if name.trim().is_empty() {
		return Err(ValidationError::MissingName {
			kind: kind.to_string(),
		}
		.into());
	}
	let namespace = if kind.is_namespaced() {
		resolve_namespace(namespace, meta)
	} else {
		None
	};

	let mut metadata = Fields::new();
	metadata.set("name", name);
	metadata.opt("namespace", &namespace.map(str::to_string));
	write_meta_fields(&mut metadata, meta);

	let mut manifest = Fields::new();
	manifest
		.set("apiVersion", kind.api_version())
		.set("kind", kind.as_str())
		.set("metadata", metadata);
	Ok(manifest)
}

pub(crate) fn resolve_namespace<'a>(
	namespace: Option<&'a str>,
	meta: &'a MetadataConfig,
) -> Option<&'a str> {
	namespace
		.filter(|ns| !ns.is_empty())
		.or(meta.namespace.as_deref())
		.filter(|ns| !ns.is_empty())
}

/// Labels, annotations, owner references, deletion grace period and finalizers.
pub(crate) fn write_meta_fields(metadata: &mut Fields, meta: &MetadataConfig) {
	metadata
		.dict("labels", &meta.labels)
		.dict("annotations", &meta.annotations)
		.values(
			"ownerReferences",
			meta.owner_references
				.iter()
				.flatten()
				.map(owner_reference)
				.collect(),
		)
		.opt(
			"deletionGracePeriodSeconds",
			&meta.deletion_grace_period_seconds,
		)
		.list("finalizers", &meta.finalizers);
}

fn owner_reference(owner: &OwnerReferenceConfig) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("apiVersion", &owner.api_version)
		.opt("kind", &owner.kind)
		.opt("name", &owner.name)
		.opt("uid", &owner.uid)
		.opt("controller", &owner.controller)
		.opt("blockOwnerDeletion", &owner.block_owner_deletion);
	fields.into()
}

pub(crate) fn template_metadata(meta: Option<&TemplateMetadataConfig>) -> Fields {
	let mut fields = Fields::new();
	if let Some(meta) = meta {
		fields
			.dict("labels", &meta.labels)
			.dict("annotations", &meta.annotations)
			.opt("namespace", &meta.namespace);
	}
	fields
}

/// `{metadata, spec}` of a pod template.
pub(crate) fn pod_template(
	template: &PodTemplateConfig,
	containers: &[ContainerConfig],
) -> Result<Value> {
	let mut fields = Fields::new();
	fields
		.set("metadata", template_metadata(template.metadata.as_ref()))
		.set("spec", pod::build_pod_spec(&template.spec, containers)?);
	Ok(fields.into())
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use serde_json::json;

	use super::*;
	use crate::error::ManifestError;

	#[test]
	fn test_header_prefers_argument_namespace() {
		let meta = MetadataConfig {
			namespace: Some("from-record".to_string()),
			..Default::default()
		};
		let header = manifest_header(&ResourceKind::Service, "web", Some("team-a"), &meta).unwrap();
		assert_eq!(
			Value::from(header),
			json!({
				"apiVersion": "v1",
				"kind": "Service",
				"metadata": { "name": "web", "namespace": "team-a" },
			})
		);

		let header = manifest_header(&ResourceKind::Service, "web", None, &meta).unwrap();
		assert_eq!(
			Value::from(header)["metadata"]["namespace"],
			json!("from-record")
		);
	}

	#[test]
	fn test_header_cluster_scoped_has_no_namespace() {
		let header = manifest_header(
			&ResourceKind::StorageClass,
			"fast",
			Some("team-a"),
			&MetadataConfig::default(),
		)
		.unwrap();
		assert_eq!(
			Value::from(header)["metadata"],
			json!({ "name": "fast" })
		);
	}

	#[test]
	fn test_header_requires_name() {
		let err = manifest_header(&ResourceKind::Pod, "  ", None, &MetadataConfig::default())
			.unwrap_err();
		assert_matches!(
			err,
			ManifestError::Validation(ValidationError::MissingName { kind }) if kind == "Pod"
		);
	}

	#[test]
	fn test_meta_fields() {
		let meta: MetadataConfig = serde_json::from_value(json!({
			"labels": { "app": "web" },
			"annotations": {},
			"ownerReferences": [
				{ "id": 1, "apiVersion": "apps/v1", "kind": "ReplicaSet", "name": "web-1", "uid": "abc", "controller": true },
			],
			"deletionGracePeriodSeconds": 0,
		}))
		.unwrap();
		let mut fields = Fields::new();
		write_meta_fields(&mut fields, &meta);
		assert_eq!(
			Value::from(fields),
			json!({
				"labels": { "app": "web" },
				"ownerReferences": [
					{ "apiVersion": "apps/v1", "kind": "ReplicaSet", "name": "web-1", "uid": "abc", "controller": true },
				],
				"deletionGracePeriodSeconds": 0,
			})
		);
	}
}
