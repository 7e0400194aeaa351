//! Settings file support.
//!
//! Supports `.kforge.yaml` files that can be placed anywhere in the directory
//! hierarchy. kforge searches from the working directory upward to the filesystem root.

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use bon::Builder;
use serde::Deserialize;
use thiserror::Error;

/// The name of the settings file kforge looks for
pub const SETTINGS_FILE_NAME: &str = ".kforge.yaml";

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("failed to read settings file: {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to parse settings file: {}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml_with_quirks::Error,
	},
}

/// Root structure of `.kforge.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
	#[serde(default)]
	pub gateway: GatewayDefaults,
}

/// Gateway every generated route attaches to.
///
/// Route parent references are never taken from the resource configuration, they
/// always point here. Backends of a route without a namespace are placed in
/// `fallback_namespace`.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewayDefaults {
	#[builder(into, default = "platform-gateway".to_string())]
	pub parent_name: String,
	#[builder(into, default = "envoy-gateway-system".to_string())]
	pub parent_namespace: String,
	#[builder(into, default = "default".to_string())]
	pub fallback_namespace: String,
}

impl Default for GatewayDefaults {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Settings {
	/// Load settings by searching from the given directory upward
	pub fn load_from_directory(start_dir: &Path) -> Result<Option<Self>, SettingsError> {
		find_settings_file(start_dir)
			.map(|path| Self::load_from_file(&path))
			.transpose()
	}

	/// Load settings from a specific file path
	pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
		let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		// An empty file is a valid, empty settings document
		if content.trim().is_empty() {
			return Ok(Self::default());
		}
		serde_yaml_with_quirks::from_str(&content).map_err(|source| SettingsError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}
}

/// Search for a settings file starting from `start_dir` and walking up to the filesystem root
pub fn find_settings_file(start_dir: &Path) -> Option<PathBuf> {
	let mut current = start_dir.to_path_buf();

	// Canonicalize if possible to handle relative paths
	if let Ok(canonical) = current.canonicalize() {
		current = canonical;
	}

	loop {
		let settings_path = current.join(SETTINGS_FILE_NAME);
		if settings_path.is_file() {
			return Some(settings_path);
		}
		match current.parent() {
			Some(parent) if parent != current => current = parent.to_path_buf(),
			_ => return None,
		}
	}
}
