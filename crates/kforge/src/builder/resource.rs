//! Non-workload resources: Service, routes, ConfigMap, Secret, storage and runtime
//! classes, and a pass-through for every other kind.

use serde_json::Value;
use tracing::{debug, instrument};

use super::{manifest_header, resolve_namespace, Fields};
use crate::{
	error::Result,
	model::{
		BackendRefConfig, ConfigMapConfig, GenericResourceConfig, RequestMirrorConfig,
		ResourceConfig, RouteConfig, RouteFilterConfig, RouteRuleConfig, RuntimeClassConfig,
		SecretConfig, ServiceConfig, ServicePortConfig, StorageClassConfig,
		VolumeAttributesClassConfig,
	},
	settings::GatewayDefaults,
};

const CLIENT_IP_AFFINITY: &str = "ClientIP";

#[instrument(skip_all, fields(kind = %config.kind(), name = name))]
pub fn build_resource(
	name: &str,
	config: &ResourceConfig,
	namespace: Option<&str>,
	gateway: &GatewayDefaults,
) -> Result<Value> {
	let kind = config.kind();
	let mut manifest = manifest_header(&kind, name, namespace, config.metadata())?;
	match config {
		ResourceConfig::Service(service) => {
			manifest.set("spec", service_spec(service));
		}
		ResourceConfig::HttpRoute(route) | ResourceConfig::GrpcRoute(route) => {
			let backend_namespace = resolve_namespace(namespace, &route.metadata)
				.unwrap_or(gateway.fallback_namespace.as_str());
			manifest.set("spec", route_spec(route, backend_namespace, gateway));
		}
		ResourceConfig::ConfigMap(config_map) => write_config_map(&mut manifest, config_map),
		ResourceConfig::Secret(secret) => write_secret(&mut manifest, secret),
		ResourceConfig::StorageClass(class) => write_storage_class(&mut manifest, class),
		ResourceConfig::RuntimeClass(class) => write_runtime_class(&mut manifest, class),
		ResourceConfig::VolumeAttributesClass(class) => {
			write_volume_attributes_class(&mut manifest, class);
		}
		ResourceConfig::Generic { config, .. } => {
			debug!("no dedicated builder, copying spec");
			write_generic(&mut manifest, config);
		}
	}
	Ok(manifest.into())
}

fn service_spec(service: &ServiceConfig) -> Fields {
	let config = &service.spec;
	let mut spec = Fields::new();
	spec.opt("type", &config.type_)
		.opt("externalName", &config.external_name)
		.opt("clusterIP", &config.cluster_ip)
		.list("externalIPs", &config.external_ips)
		.opt("externalTrafficPolicy", &config.external_traffic_policy)
		.opt("internalTrafficPolicy", &config.internal_traffic_policy)
		.opt("loadBalancerClass", &config.load_balancer_class)
		.values(
			"ports",
			config.ports.iter().flatten().map(service_port).collect(),
		)
		.dict("selector", &config.selector)
		.opt("publishNotReadyAddresses", &config.publish_not_ready_addresses)
		.opt("trafficDistribution", &config.traffic_distribution)
		.opt("sessionAffinity", &config.session_affinity);

	if config.session_affinity.as_deref() == Some(CLIENT_IP_AFFINITY) {
		if let Some(timeout) = config.session_affinity_timeout_seconds {
			let mut client_ip = Fields::new();
			client_ip.set("timeoutSeconds", timeout);
			let mut affinity_config = Fields::new();
			affinity_config.set("clientIP", client_ip);
			spec.set("sessionAffinityConfig", affinity_config);
		}
	}
	spec
}

fn service_port(port: &ServicePortConfig) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("name", &port.name)
		.opt("port", &port.port)
		.opt("targetPort", &port.target_port)
		.opt("protocol", &port.protocol)
		.opt("appProtocol", &port.app_protocol)
		.opt("nodePort", &port.node_port);
	fields.into()
}

/// Parent references always come from `gateway`; backends always live in
/// `backend_namespace`.
fn route_spec(route: &RouteConfig, backend_namespace: &str, gateway: &GatewayDefaults) -> Fields {
	let mut parent = Fields::new();
	parent
		.set("name", gateway.parent_name.as_str())
		.set("namespace", gateway.parent_namespace.as_str());

	let mut spec = Fields::new();
	spec.set("parentRefs", vec![Value::from(parent)])
		.list("hostnames", &route.spec.hostnames)
		.values(
			"rules",
			route
				.spec
				.rules
				.iter()
				.flatten()
				.map(|rule| route_rule(rule, backend_namespace))
				.collect(),
		);
	spec
}

fn route_rule(rule: &RouteRuleConfig, backend_namespace: &str) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("name", &rule.name)
		.list("matches", &rule.matches)
		.values(
			"filters",
			rule.filters
				.iter()
				.flatten()
				.map(|filter| route_filter(filter, backend_namespace))
				.collect(),
		)
		.values(
			"backendRefs",
			rule.backend_refs
				.iter()
				.flatten()
				.map(|backend| backend_ref(backend, backend_namespace))
				.collect(),
		)
		.opt("timeouts", &rule.timeouts);
	fields.into()
}

fn route_filter(filter: &RouteFilterConfig, backend_namespace: &str) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("type", &filter.type_)
		.opt("requestHeaderModifier", &filter.request_header_modifier)
		.opt("responseHeaderModifier", &filter.response_header_modifier)
		.opt("requestRedirect", &filter.request_redirect)
		.opt("urlRewrite", &filter.url_rewrite);
	if let Some(mirror) = &filter.request_mirror {
		fields.set("requestMirror", request_mirror(mirror, backend_namespace));
	}
	fields.opt("extensionRef", &filter.extension_ref);
	fields.into()
}

fn request_mirror(mirror: &RequestMirrorConfig, backend_namespace: &str) -> Fields {
	let default_backend = BackendRefConfig::default();
	let backend = mirror.backend_ref.as_ref().unwrap_or(&default_backend);

	let mut fields = Fields::new();
	fields
		.set("backendRef", backend_ref(backend, backend_namespace))
		.opt("percent", &mirror.percent)
		.opt("fraction", &mirror.fraction);
	fields
}

fn backend_ref(backend: &BackendRefConfig, backend_namespace: &str) -> Value {
	let mut fields = Fields::new();
	fields
		.opt("group", &backend.group)
		.opt("kind", &backend.kind)
		.opt("name", &backend.name)
		.set("namespace", backend_namespace)
		.opt("port", &backend.port)
		.opt("weight", &backend.weight);
	fields.into()
}

fn write_config_map(manifest: &mut Fields, config: &ConfigMapConfig) {
	manifest
		.opt("immutable", &config.immutable)
		.dict("data", &config.data)
		.dict("binaryData", &config.binary_data);
}

fn write_secret(manifest: &mut Fields, config: &SecretConfig) {
	manifest
		.opt("type", &config.type_)
		.opt("immutable", &config.immutable)
		.dict("data", &config.data)
		.dict("stringData", &config.string_data);
}

fn write_storage_class(manifest: &mut Fields, config: &StorageClassConfig) {
	manifest
		.opt("provisioner", &config.provisioner)
		.dict("parameters", &config.parameters)
		.opt("reclaimPolicy", &config.reclaim_policy)
		.opt("volumeBindingMode", &config.volume_binding_mode)
		.opt("allowVolumeExpansion", &config.allow_volume_expansion)
		.list("mountOptions", &config.mount_options)
		.list("allowedTopologies", &config.allowed_topologies);
}

fn write_runtime_class(manifest: &mut Fields, config: &RuntimeClassConfig) {
	manifest
		.opt("handler", &config.handler)
		.opt("overhead", &config.overhead)
		.opt("scheduling", &config.scheduling);
}

fn write_volume_attributes_class(manifest: &mut Fields, config: &VolumeAttributesClassConfig) {
	manifest
		.opt("driverName", &config.driver_name)
		.dict("parameters", &config.parameters);
}

fn write_generic(manifest: &mut Fields, config: &GenericResourceConfig) {
	manifest.opt("spec", &config.spec);
}
