//! Configuration records as produced by the resource editor.
//!
//! Every kind has its own record and every optional field is an `Option`, so the
//! builders decide inclusion by presence alone. Editor-only row keys (`id`) are not
//! modelled and are dropped during deserialization. Sub-trees the editor passes
//! through untouched are kept as [`serde_json::Value`] and cleaned later by
//! [`crate::prune::prune`].

mod container;
mod job;
mod meta;
mod pod;
mod resource;
mod workload;

pub use container::*;
pub use job::*;
pub use meta::*;
pub use pod::*;
pub use resource::*;
pub use workload::*;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{error::ManifestError, kind::ResourceKind};

/// Decode an editor record, treating `null` as an empty record.
pub(crate) fn decode<T: DeserializeOwned + Default>(
	kind: &ResourceKind,
	value: Value,
) -> Result<T, ManifestError> {
	if value.is_null() {
		return Ok(T::default());
	}
	serde_json::from_value(value).map_err(|source| ManifestError::InvalidConfig {
		kind: kind.to_string(),
		source,
	})
}
