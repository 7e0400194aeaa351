use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Labels, annotations, selectors and data maps, in the order they were entered.
pub type StringMap = IndexMap<String, String>;

/// Object metadata as edited in a resource form.
///
/// The resource name is not part of this record; it is passed to the entry points
/// separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataConfig {
	pub namespace: Option<String>,
	pub labels: Option<StringMap>,
	pub annotations: Option<StringMap>,
	pub owner_references: Option<Vec<OwnerReferenceConfig>>,
	pub deletion_grace_period_seconds: Option<i64>,
	pub finalizers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerReferenceConfig {
	pub api_version: Option<String>,
	pub kind: Option<String>,
	pub name: Option<String>,
	pub uid: Option<String>,
	pub controller: Option<bool>,
	pub block_owner_deletion: Option<bool>,
}

/// Metadata of an embedded template (pod template, job template).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateMetadataConfig {
	pub labels: Option<StringMap>,
	pub annotations: Option<StringMap>,
	pub namespace: Option<String>,
}
