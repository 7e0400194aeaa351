//! Error types returned by manifest generation.

use thiserror::Error;

/// A configuration record is missing a field that every manifest of its kind needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
	#[error("{kind} name must not be empty")]
	MissingName { kind: String },

	#[error("container #{index} has no name")]
	ContainerMissingName { index: usize },

	#[error("container `{container}` has no image")]
	ContainerMissingImage { container: String },
}

/// Errors that can occur while building or emitting a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
	#[error(transparent)]
	Validation(#[from] ValidationError),

	#[error("invalid {kind} configuration")]
	InvalidConfig {
		kind: String,
		#[source]
		source: serde_json::Error,
	},

	#[error("serializing manifest fragment")]
	Serialize(#[source] serde_json::Error),

	#[error("converting manifest to YAML")]
	Yaml(#[source] serde_saphyr::ser_error::Error),
}

pub type Result<T, E = ManifestError> = std::result::Result<T, E>;
