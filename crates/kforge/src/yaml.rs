//! YAML emission for generated manifests.
//!
//! Manifests keep the key order the builders produced (`apiVersion`, `kind`,
//! `metadata`, then the kind-specific body), so unlike a Go-compatible exporter this
//! does not re-sort keys before serializing.

use serde_json::Value as JsonValue;
use tracing::instrument;

fn serializer_options() -> serde_saphyr::SerializerOptions {
	serde_saphyr::SerializerOptions {
		indent_step: 2,
		indent_array: Some(2),
		prefer_block_scalars: true,
		empty_map_as_braces: true,
		empty_array_as_brackets: true,
		quote_ambiguous_keys: true,
		quote_numeric_strings: true,
		..Default::default()
	}
}

/// Serialize a manifest tree to block-style YAML with 2-space indentation.
#[instrument(skip_all)]
pub fn to_yaml(value: &JsonValue) -> Result<String, serde_saphyr::ser_error::Error> {
	let mut output = String::new();
	serde_saphyr::to_fmt_writer_with_options(&mut output, value, serializer_options())?;
	Ok(output)
}
