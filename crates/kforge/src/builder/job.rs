//! Job and CronJob manifests.

use serde_json::Value;
use tracing::instrument;

use super::{manifest_header, pod_template, template_metadata, Fields};
use crate::{
	error::Result,
	kind::ResourceKind,
	model::{
		ContainerConfig, CronJobConfig, JobConfig, JobSpecConfig, PodFailurePolicyRuleConfig,
		PodTemplateConfig, SuccessPolicyRuleConfig,
	},
	prune::prune_object,
};

/// Job control fields, shared with CronJob job templates.
fn write_job_spec(spec: &mut Fields, config: &JobSpecConfig) {
	spec.opt("activeDeadlineSeconds", &config.active_deadline_seconds)
		.opt("backoffLimit", &config.backoff_limit)
		.opt("backoffLimitPerIndex", &config.backoff_limit_per_index)
		.opt("completionMode", &config.completion_mode)
		.opt("completions", &config.completions)
		.opt("manualSelector", &config.manual_selector)
		.opt("maxFailedIndexes", &config.max_failed_indexes)
		.opt("parallelism", &config.parallelism)
		.opt("podReplacementPolicy", &config.pod_replacement_policy)
		.opt("suspend", &config.suspend)
		.opt("ttlSecondsAfterFinished", &config.ttl_seconds_after_finished)
		.opt("selector", &config.selector);

	if let Some(policy) = &config.pod_failure_policy {
		let rules = policy.rules.iter().filter_map(pod_failure_rule).collect();
		let mut fields = Fields::new();
		fields.values("rules", rules);
		spec.object("podFailurePolicy", fields);
	}
	if let Some(policy) = &config.success_policy {
		let rules = policy.rules.iter().filter_map(success_rule).collect();
		let mut fields = Fields::new();
		fields.values("rules", rules);
		spec.object("successPolicy", fields);
	}
}

/// Rules are pruned one by one; a rule with nothing left is dropped.
fn pruned_rule(fields: Fields) -> Option<Value> {
	let rule = prune_object(fields.into_map());
	(!rule.is_empty()).then_some(Value::Object(rule))
}

fn pod_failure_rule(rule: &PodFailurePolicyRuleConfig) -> Option<Value> {
	let mut fields = Fields::new();
	fields.opt("action", &rule.action);
	if let Some(codes) = &rule.on_exit_codes {
		let mut on_exit_codes = Fields::new();
		on_exit_codes
			.opt("containerName", &codes.container_name)
			.opt("operator", &codes.operator)
			.list("values", &codes.values);
		fields.object("onExitCodes", on_exit_codes);
	}
	fields.values(
		"onPodConditions",
		rule.on_pod_conditions
			.iter()
			.flatten()
			.map(|condition| {
				let mut fields = Fields::new();
				fields
					.opt("type", &condition.type_)
					.opt("status", &condition.status);
				fields.into()
			})
			.collect(),
	);
	pruned_rule(fields)
}

fn success_rule(rule: &SuccessPolicyRuleConfig) -> Option<Value> {
	let mut fields = Fields::new();
	fields
		.opt("succeededCount", &rule.succeeded_count)
		.opt("succeededIndexes", &rule.succeeded_indexes);
	pruned_rule(fields)
}

#[instrument(skip_all, fields(name = name))]
pub fn build_job(
	name: &str,
	config: &JobConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<Value> {
	let mut manifest = manifest_header(&ResourceKind::Job, name, namespace, &config.metadata)?;
	let mut spec = Fields::new();
	write_job_spec(&mut spec, &config.spec);
	spec.set("template", pod_template(&config.template, containers)?);
	manifest.set("spec", spec);
	Ok(manifest.into())
}

/// The job template gets a pod template when the record has one or when containers
/// were supplied.
#[instrument(skip_all, fields(name = name))]
pub fn build_cron_job(
	name: &str,
	config: &CronJobConfig,
	containers: &[ContainerConfig],
	namespace: Option<&str>,
) -> Result<Value> {
	let mut manifest = manifest_header(&ResourceKind::CronJob, name, namespace, &config.metadata)?;

	let schedule = &config.spec;
	let mut spec = Fields::new();
	spec.opt("schedule", &schedule.schedule)
		.opt("timeZone", &schedule.time_zone)
		.opt("concurrencyPolicy", &schedule.concurrency_policy)
		.opt("startingDeadlineSeconds", &schedule.starting_deadline_seconds)
		.opt(
			"successfulJobsHistoryLimit",
			&schedule.successful_jobs_history_limit,
		)
		.opt("failedJobsHistoryLimit", &schedule.failed_jobs_history_limit)
		.opt("suspend", &schedule.suspend);

	let job_template = &config.job_template;
	let mut job_spec = Fields::new();
	write_job_spec(&mut job_spec, &job_template.spec);
	if job_template.template.is_some() || !containers.is_empty() {
		let default_template = PodTemplateConfig::default();
		let template = job_template.template.as_ref().unwrap_or(&default_template);
		job_spec.set("template", pod_template(template, containers)?);
	}

	let mut template = Fields::new();
	template
		.set("metadata", template_metadata(job_template.metadata.as_ref()))
		.set("spec", job_spec);
	spec.set("jobTemplate", template);

	manifest.set("spec", spec);
	Ok(manifest.into())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::prune::prune;

	#[test]
	fn test_job_rules_are_pruned_individually() {
		let config: JobConfig = serde_json::from_value(json!({
			"spec": {
				"backoffLimit": 0,
				"podFailurePolicy": {
					"rules": [
						{ "action": "", "onExitCodes": { "values": [] }, "onPodConditions": [] },
						{
							"action": "FailJob",
							"onExitCodes": { "containerName": "", "operator": "In", "values": [42] },
						},
					],
				},
				"successPolicy": { "rules": [{ "succeededIndexes": "" }] },
			},
		}))
		.unwrap();
		let manifest = prune(build_job("migrate", &config, &[ContainerConfig::new("m", "migrate")], None).unwrap());
		assert_eq!(
			manifest["spec"],
			json!({
				"backoffLimit": 0,
				"podFailurePolicy": {
					"rules": [{ "action": "FailJob", "onExitCodes": { "operator": "In", "values": [42] } }],
				},
				"template": { "spec": { "containers": [{ "name": "m", "image": "migrate" }] } },
			})
		);
	}

	#[test]
	fn test_job_pod_conditions() {
		let config: JobConfig = serde_json::from_value(json!({
			"spec": {
				"suspend": false,
				"podFailurePolicy": {
					"rules": [{ "action": "Ignore", "onPodConditions": [{ "id": 1, "type": "DisruptionTarget", "status": "True" }] }],
				},
				"successPolicy": { "rules": [{ "succeededCount": 1 }] },
			},
		}))
		.unwrap();
		let manifest = build_job("j", &config, &[], Some("batch")).unwrap();
		assert_eq!(manifest["apiVersion"], json!("batch/v1"));
		assert_eq!(manifest["spec"]["suspend"], json!(false));
		assert_eq!(
			manifest["spec"]["podFailurePolicy"]["rules"],
			json!([{ "action": "Ignore", "onPodConditions": [{ "type": "DisruptionTarget", "status": "True" }] }])
		);
		assert_eq!(
			manifest["spec"]["successPolicy"],
			json!({ "rules": [{ "succeededCount": 1 }] })
		);
	}

	#[test]
	fn test_cron_job() {
		let config: CronJobConfig = serde_json::from_value(json!({
			"spec": { "schedule": "*/5 * * * *", "suspend": false, "timeZone": "Etc/UTC" },
			"jobTemplate": {
				"metadata": { "labels": { "job": "report" } },
				"spec": { "backoffLimit": 2 },
				"template": { "restartPolicy": "OnFailure" },
			},
		}))
		.unwrap();
		let manifest = prune(
			build_cron_job("report", &config, &[ContainerConfig::new("r", "report:1")], None)
				.unwrap(),
		);
		assert_eq!(
			manifest,
			json!({
				"apiVersion": "batch/v1",
				"kind": "CronJob",
				"metadata": { "name": "report" },
				"spec": {
					"schedule": "*/5 * * * *",
					"timeZone": "Etc/UTC",
					"suspend": false,
					"jobTemplate": {
						"metadata": { "labels": { "job": "report" } },
						"spec": {
							"backoffLimit": 2,
							"template": {
								"spec": {
									"containers": [{ "name": "r", "image": "report:1" }],
									"restartPolicy": "OnFailure",
								},
							},
						},
					},
				},
			})
		);
	}

	#[test]
	fn test_cron_job_without_pod_template() {
		let config: CronJobConfig =
			serde_json::from_value(json!({ "spec": { "schedule": "@daily" } })).unwrap();
		let manifest = build_cron_job("nightly", &config, &[], None).unwrap();
		assert_eq!(manifest["spec"]["jobTemplate"]["spec"].get("template"), None);
	}
}
