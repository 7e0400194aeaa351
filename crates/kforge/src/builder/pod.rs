//! Pod spec and standalone Pod manifests.

use serde_json::{Map, Value};
use tracing::instrument;

use super::{affinity::translate_affinity, container::build_containers, manifest_header, Fields};
use crate::{
	error::{ManifestError, Result},
	kind::ResourceKind,
	model::{ContainerConfig, DnsConfig, PodConfig, PodSpecConfig},
};

/// Build a pod spec. `containers` is always written, even when empty.
pub fn build_pod_spec(config: &PodSpecConfig, containers: &[ContainerConfig]) -> Result<Map<String, Value>> {
	let mut spec = Fields::new();
	spec.set("containers", build_containers(containers)?);
	if let Some(init) = &config.init_containers {
		spec.values("initContainers", build_containers(init)?);
	}
	if let Some(ephemeral) = &config.ephemeral_containers {
		spec.values("ephemeralContainers", build_containers(ephemeral)?);
	}

	spec.opt("nodeName", &config.node_name)
		.dict("nodeSelector", &config.node_selector)
		.opt("priority", &config.priority)
		.opt("priorityClassName", &config.priority_class_name)
		.opt("preemptionPolicy", &config.preemption_policy)
		.opt("serviceAccountName", &config.service_account_name)
		.opt(
			"automountServiceAccountToken",
			&config.automount_service_account_token,
		)
		.opt("hostname", &config.hostname)
		.opt("subdomain", &config.subdomain)
		.opt("setHostnameAsFQDN", &config.set_hostname_as_fqdn)
		.opt("dnsPolicy", &config.dns_policy)
		.opt("hostNetwork", &config.host_network)
		.opt("hostPID", &config.host_pid)
		.opt("hostIPC", &config.host_ipc)
		.opt("hostUsers", &config.host_users)
		.opt("shareProcessNamespace", &config.share_process_namespace)
		.opt("restartPolicy", &config.restart_policy)
		.opt(
			"terminationGracePeriodSeconds",
			&config.termination_grace_period_seconds,
		)
		.opt("activeDeadlineSeconds", &config.active_deadline_seconds)
		.opt("schedulerName", &config.scheduler_name)
		.opt("runtimeClassName", &config.runtime_class_name)
		.opt("enableServiceLinks", &config.enable_service_links)
		.opt("securityContext", &config.security_context)
		.opt("os", &config.os)
		.entries("overhead", &config.overhead);

	if let Some(dns) = &config.dns_config {
		spec.object("dnsConfig", dns_config(dns));
	}

	spec.list("tolerations", &config.tolerations)
		.list("topologySpreadConstraints", &config.topology_spread_constraints)
		.list("volumes", &config.volumes)
		.list("hostAliases", &config.host_aliases)
		.list("imagePullSecrets", &config.image_pull_secrets)
		.list("readinessGates", &config.readiness_gates)
		.list("schedulingGates", &config.scheduling_gates)
		.list("resourceClaims", &config.resource_claims);

	if let Some(affinity) = config.affinity.as_ref().and_then(translate_affinity) {
		spec.set(
			"affinity",
			serde_json::to_value(affinity).map_err(ManifestError::Serialize)?,
		);
	}
	Ok(spec.into_map())
}

fn dns_config(dns: &DnsConfig) -> Fields {
	let mut fields = Fields::new();
	fields
		.list("nameservers", &dns.nameservers)
		.list("searches", &dns.searches)
		.list("options", &dns.options);
	fields
}

/// A standalone Pod: metadata from the record, spec from the same record.
#[instrument(skip_all, fields(name = name))]
pub fn build_pod(
	name: &str,
	config: &PodConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<Value> {
	let mut manifest = manifest_header(&ResourceKind::Pod, name, namespace, &config.metadata)?;
	manifest.set("spec", build_pod_spec(&config.spec, containers)?);
	Ok(manifest.into())
}
