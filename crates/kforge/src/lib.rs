//! Kubernetes manifest generation from editor configuration records.
//!
//! A record is mapped to the manifest shape of its kind, pruned of everything unset
//! and emitted as YAML. See [`generate`] for the entry points.

pub(crate) mod builder;
pub mod error;
pub mod generate;
pub mod kind;
pub mod model;
pub mod prune;
pub mod settings;
pub mod yaml;

pub use builder::affinity::{translate_affinity, DEFAULT_WEIGHT};
pub use error::{ManifestError, Result, ValidationError};
pub use generate::{
	generate, generate_cron_job_yaml, generate_daemon_set_yaml, generate_deployment_yaml,
	generate_job_yaml, generate_pod_yaml, generate_replica_set_yaml, generate_resource_yaml,
	generate_stateful_set_yaml, ManifestRequest,
};
pub use kind::ResourceKind;
pub use settings::{GatewayDefaults, Settings, SettingsError};
