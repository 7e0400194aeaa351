//! Editor affinity to Kubernetes affinity.
//!
//! The editor allows one required and one preferred term per axis, Kubernetes always
//! takes lists. Every list produced here has exactly one element, and an axis whose
//! term is unusable is left out instead of being emitted empty: an empty
//! `nodeSelectorTerms` matches no node at all.

use k8s_openapi::api::core::v1::{
	Affinity, NodeAffinity, NodeSelector, NodeSelectorTerm, PodAffinity, PodAffinityTerm,
	PodAntiAffinity, PreferredSchedulingTerm, WeightedPodAffinityTerm,
};
use tracing::debug;

use crate::model::{AffinityConfig, NodeAffinityConfig, PodAffinityConfig};

/// Weight of a preferred term that has none set.
pub const DEFAULT_WEIGHT: i32 = 1;

/// Returns `None` when no axis produced content.
pub fn translate_affinity(config: &AffinityConfig) -> Option<Affinity> {
	let node_affinity = config.node_affinity.as_ref().and_then(node_affinity);
	let pod_affinity = config
		.pod_affinity
		.as_ref()
		.and_then(|axis| pod_terms(axis, "podAffinity"))
		.map(|(required, preferred)| PodAffinity {
			required_during_scheduling_ignored_during_execution: required,
			preferred_during_scheduling_ignored_during_execution: preferred,
		});
	let pod_anti_affinity = config
		.pod_anti_affinity
		.as_ref()
		.and_then(|axis| pod_terms(axis, "podAntiAffinity"))
		.map(|(required, preferred)| PodAntiAffinity {
			required_during_scheduling_ignored_during_execution: required,
			preferred_during_scheduling_ignored_during_execution: preferred,
		});

	if node_affinity.is_none() && pod_affinity.is_none() && pod_anti_affinity.is_none() {
		return None;
	}
	Some(Affinity {
		node_affinity,
		pod_affinity,
		pod_anti_affinity,
	})
}

fn has_requirements(term: &NodeSelectorTerm) -> bool {
	let non_empty = |list: &Option<Vec<_>>| list.as_ref().is_some_and(|l| !l.is_empty());
	non_empty(&term.match_expressions) || non_empty(&term.match_fields)
}

fn node_affinity(config: &NodeAffinityConfig) -> Option<NodeAffinity> {
	let required = config
		.required_during_scheduling
		.as_ref()
		.filter(|term| has_requirements(term))
		.map(|term| NodeSelector {
			node_selector_terms: vec![term.clone()],
		});
	let preferred = config
		.preferred_during_scheduling
		.as_ref()
		.filter(|preferred| has_requirements(&preferred.term))
		.map(|preferred| {
			vec![PreferredSchedulingTerm {
				weight: preferred.weight.unwrap_or(DEFAULT_WEIGHT),
				preference: preferred.term.clone(),
			}]
		});

	if required.is_none() && preferred.is_none() {
		debug!("nodeAffinity has no match expressions or fields, dropping");
		return None;
	}
	Some(NodeAffinity {
		required_during_scheduling_ignored_during_execution: required,
		preferred_during_scheduling_ignored_during_execution: preferred,
	})
}

type PodTerms = (
	Option<Vec<PodAffinityTerm>>,
	Option<Vec<WeightedPodAffinityTerm>>,
);

/// Terms of a pod affinity or anti-affinity axis, gated on `topologyKey`.
fn pod_terms(config: &PodAffinityConfig, axis: &str) -> Option<PodTerms> {
	let required = config
		.required_during_scheduling
		.as_ref()
		.filter(|term| !term.topology_key.is_empty())
		.map(|term| vec![term.clone()]);
	let preferred = config
		.preferred_during_scheduling
		.as_ref()
		.filter(|preferred| !preferred.term.topology_key.is_empty())
		.map(|preferred| {
			vec![WeightedPodAffinityTerm {
				weight: preferred.weight.unwrap_or(DEFAULT_WEIGHT),
				pod_affinity_term: preferred.term.clone(),
			}]
		});

	if required.is_none() && preferred.is_none() {
		debug!(axis, "no term with a topologyKey, dropping");
		return None;
	}
	Some((required, preferred))
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::{json, Value};

	use super::*;

	fn translate(value: Value) -> Option<Value> {
		let config: AffinityConfig = serde_json::from_value(value).unwrap();
		translate_affinity(&config).map(|affinity| serde_json::to_value(affinity).unwrap())
	}

	#[rstest]
	#[case::nothing(json!({}))]
	#[case::empty_axes(json!({ "nodeAffinity": {}, "podAffinity": {}, "podAntiAffinity": {} }))]
	#[case::empty_node_terms(json!({
		"nodeAffinity": {
			"requiredDuringScheduling": { "matchExpressions": [] },
			"preferredDuringScheduling": { "weight": 10, "matchFields": [] },
		},
	}))]
	#[case::blank_topology_key(json!({
		"podAffinity": {
			"requiredDuringScheduling": { "topologyKey": "" },
			"preferredDuringScheduling": { "weight": 5, "topologyKey": "" },
		},
		"podAntiAffinity": {
			"requiredDuringScheduling": {
				"topologyKey": "",
				"labelSelector": { "matchLabels": { "app": "web" } },
			},
		},
	}))]
	fn test_no_affinity(#[case] config: Value) {
		assert_eq!(translate(config), None);
	}

	#[test]
	fn test_node_affinity_single_terms() {
		let affinity = translate(json!({
			"nodeAffinity": {
				"requiredDuringScheduling": {
					"matchExpressions": [{ "key": "zone", "operator": "In", "values": ["a"] }],
				},
				"preferredDuringScheduling": {
					"matchExpressions": [{ "key": "disk", "operator": "In", "values": ["ssd"] }],
				},
			},
		}))
		.unwrap();
		assert_eq!(
			affinity,
			json!({
				"nodeAffinity": {
					"preferredDuringSchedulingIgnoredDuringExecution": [{
						"preference": {
							"matchExpressions": [{ "key": "disk", "operator": "In", "values": ["ssd"] }],
						},
						"weight": 1,
					}],
					"requiredDuringSchedulingIgnoredDuringExecution": {
						"nodeSelectorTerms": [{
							"matchExpressions": [{ "key": "zone", "operator": "In", "values": ["a"] }],
						}],
					},
				},
			})
		);
	}

	#[rstest]
	#[case::absent(json!({ "topologyKey": "kubernetes.io/hostname" }), 1)]
	#[case::zero(json!({ "weight": 0, "topologyKey": "kubernetes.io/hostname" }), 0)]
	#[case::explicit(json!({ "weight": 80, "topologyKey": "kubernetes.io/hostname" }), 80)]
	fn test_preferred_weight(#[case] term: Value, #[case] expected: i64) {
		let affinity = translate(json!({
			"podAntiAffinity": { "preferredDuringScheduling": term },
		}))
		.unwrap();
		let preferred =
			&affinity["podAntiAffinity"]["preferredDuringSchedulingIgnoredDuringExecution"];
		assert_eq!(preferred.as_array().map(Vec::len), Some(1));
		assert_eq!(preferred[0]["weight"], json!(expected));
		assert_eq!(
			preferred[0]["podAffinityTerm"]["topologyKey"],
			json!("kubernetes.io/hostname")
		);
	}

	#[test]
	fn test_axes_are_independent() {
		let affinity = translate(json!({
			"nodeAffinity": { "requiredDuringScheduling": { "matchFields": [] } },
			"podAffinity": {
				"requiredDuringScheduling": {
					"topologyKey": "topology.kubernetes.io/zone",
					"labelSelector": { "matchLabels": { "app": "cache" } },
				},
			},
		}))
		.unwrap();
		assert_eq!(
			affinity,
			json!({
				"podAffinity": {
					"requiredDuringSchedulingIgnoredDuringExecution": [{
						"labelSelector": { "matchLabels": { "app": "cache" } },
						"topologyKey": "topology.kubernetes.io/zone",
					}],
				},
			})
		);
	}
}
