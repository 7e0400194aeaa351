//! Container spec builder.

use serde_json::Value;

use super::Fields;
use crate::{
	error::{Result, ValidationError},
	model::{ContainerConfig, ContainerPortConfig, EnvVarConfig, ResourceRequirementsConfig},
};

/// Map one container record to a container spec.
///
/// `name` and `image` are always written; every other field only when set. Image
/// references and port numbers are passed through unchecked.
pub fn build_container(container: &ContainerConfig) -> Value {
	let mut fields = Fields::new();
	fields
		.set("name", container.name.as_str())
		.set("image", container.image.as_str())
		.opt("imagePullPolicy", &container.image_pull_policy)
		.list("command", &container.command)
		.list("args", &container.args)
		.opt("workingDir", &container.working_dir)
		.values(
			"ports",
			container.ports.iter().flatten().map(container_port).collect(),
		)
		.values("env", container.env.iter().flatten().map(env_var).collect())
		.list("envFrom", &container.env_from);

	if let Some(resources) = &container.resources {
		fields.object("resources", resource_requirements(resources));
	}

	fields
		.list("resizePolicy", &container.resize_policy)
		.opt("restartPolicy", &container.restart_policy)
		.list("volumeMounts", &container.volume_mounts)
		.list("volumeDevices", &container.volume_devices);

	if let Some(probes) = &container.probes {
		fields
			.opt("livenessProbe", &probes.liveness)
			.opt("readinessProbe", &probes.readiness)
			.opt("startupProbe", &probes.startup);
	}

	fields
		.opt("lifecycle", &container.lifecycle)
		.opt("terminationMessagePath", &container.termination_message_path)
		.opt(
			"terminationMessagePolicy",
			&container.termination_message_policy,
		)
		.opt("securityContext", &container.security_context)
		.opt("stdin", &container.stdin)
		.opt("stdinOnce", &container.stdin_once)
		.opt("tty", &container.tty);
	fields.into()
}

/// Build a container list, rejecting containers without a name or an image.
pub fn build_containers(containers: &[ContainerConfig]) -> Result<Vec<Value>> {
	containers
		.iter()
		.enumerate()
		.map(|(index, container)| {
			if container.name.trim().is_empty() {
				return Err(ValidationError::ContainerMissingName { index }.into());
			}
			if container.image.trim().is_empty() {
				return Err(ValidationError::ContainerMissingImage {
					container: container.name.clone(),
				}
				.into());
			}
			Ok(build_container(container))
		})
		.collect()
}

fn container_port(port: &ContainerPortConfig) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("name", &port.name)
		.opt("containerPort", &port.container_port)
		.opt("hostPort", &port.host_port)
		.opt("hostIP", &port.host_ip)
		.opt("protocol", &port.protocol);
	fields.into()
}

fn env_var(env: &EnvVarConfig) -> Value {
	let mut fields = Fields::new();
	fields
		.set("name", env.name.as_str())
		.opt("value", &env.value)
		.opt("valueFrom", &env.value_from);
	fields.into()
}

fn resource_requirements(resources: &ResourceRequirementsConfig) -> Fields {
	let mut fields = Fields::new();
	fields
		.entries("limits", &resources.limits)
		.entries("requests", &resources.requests)
		.list("claims", &resources.claims);
	fields
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use serde_json::json;

	use super::*;
	use crate::{error::ManifestError, prune::prune};

	fn container(value: Value) -> ContainerConfig {
		serde_json::from_value(value).unwrap()
	}

	#[test]
	fn test_minimal_container() {
		let spec = build_container(&container(json!({
			"name": "web",
			"image": "nginx:latest",
			"env": [],
			"ports": [],
			"command": [],
		})));
		assert_eq!(spec, json!({ "name": "web", "image": "nginx:latest" }));
	}

	#[test]
	fn test_false_and_zero_survive() {
		let spec = build_container(&container(json!({
			"name": "c",
			"image": "i",
			"stdin": false,
			"tty": false,
			"ports": [{ "containerPort": 0 }],
		})));
		assert_eq!(
			spec,
			json!({
				"name": "c",
				"image": "i",
				"ports": [{ "containerPort": 0 }],
				"stdin": false,
				"tty": false,
			})
		);
	}

	#[test]
	fn test_full_container() {
		let spec = build_container(&container(json!({
			"id": "row-7",
			"name": "api",
			"image": "ghcr.io/acme/api:1.2.3",
			"imagePullPolicy": "IfNotPresent",
			"command": ["/bin/api"],
			"args": ["--port", "8080"],
			"ports": [{ "id": 1, "name": "http", "containerPort": 8080, "protocol": "TCP" }],
			"env": [
				{ "id": 1, "name": "LOG_LEVEL", "value": "debug" },
				{ "id": 2, "name": "TOKEN", "valueFrom": { "secretKeyRef": { "name": "api", "key": "token" } } },
			],
			"envFrom": [{ "configMapRef": { "name": "api-env" } }],
			"resources": {
				"limits": { "cpu": "500m", "memory": "256Mi" },
				"requests": {},
			},
			"probes": {
				"liveness": { "httpGet": { "path": "/healthz", "port": 8080 } },
			},
			"securityContext": { "runAsNonRoot": true },
			"restartPolicy": "Always",
		})));
		assert_eq!(
			spec,
			json!({
				"name": "api",
				"image": "ghcr.io/acme/api:1.2.3",
				"imagePullPolicy": "IfNotPresent",
				"command": ["/bin/api"],
				"args": ["--port", "8080"],
				"ports": [{ "name": "http", "containerPort": 8080, "protocol": "TCP" }],
				"env": [
					{ "name": "LOG_LEVEL", "value": "debug" },
					{ "name": "TOKEN", "valueFrom": { "secretKeyRef": { "name": "api", "key": "token" } } },
				],
				"envFrom": [{ "configMapRef": { "name": "api-env" } }],
				"resources": { "limits": { "cpu": "500m", "memory": "256Mi" } },
				"restartPolicy": "Always",
				"livenessProbe": { "httpGet": { "path": "/healthz", "port": 8080 } },
				"securityContext": { "runAsNonRoot": true },
			})
		);
	}

	#[test]
	fn test_empty_resources_are_omitted() {
		let spec = build_container(&container(json!({
			"name": "c",
			"image": "i",
			"resources": { "limits": {}, "requests": {}, "claims": [] },
		})));
		assert_eq!(spec, json!({ "name": "c", "image": "i" }));
	}

	#[test]
	fn test_blank_strings_are_left_for_the_pruner() {
		let spec = build_container(&container(json!({
			"name": "c",
			"image": "i",
			"workingDir": "",
		})));
		assert_eq!(spec["workingDir"], json!(""));
		assert_eq!(prune(spec), json!({ "name": "c", "image": "i" }));
	}

	#[test]
	fn test_missing_image_is_rejected() {
		let err = build_containers(&[
			ContainerConfig::new("web", "nginx"),
			ContainerConfig::new("sidecar", ""),
		])
		.unwrap_err();
		assert_matches!(
			err,
			ManifestError::Validation(ValidationError::ContainerMissingImage { container }) if container == "sidecar"
		);
	}

	#[test]
	fn test_missing_name_is_rejected() {
		let err = build_containers(&[ContainerConfig::new("", "nginx")]).unwrap_err();
		assert_matches!(
			err,
			ManifestError::Validation(ValidationError::ContainerMissingName { index: 0 })
		);
	}
}
