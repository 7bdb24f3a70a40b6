use serde_json::{Value, json};
use target_resolver::model::{CloudProvider, Location, TargetSpec};
use target_resolver::resolver::DETERMINE_TARGET_STAGE_TYPE;
use target_resolver::stage::{Execution, StageNode};

/// An aws server group record, as the inventory returns it.
pub fn seed_aws_record(name: &str, region: &str) -> Value {
	json!({
		"name": name,
		"type": "aws",
		"cloudProvider": "aws",
		"region": region,
		"zones": [format!("{region}a"), format!("{region}b")],
		"disabled": false,
		"capacity": { "min": 1, "max": 3, "desired": 2 },
	})
}

/// The spec of `asg_name` in the `prod` aws account, over `regions`.
pub fn seed_asg_spec(asg_name: &str, regions: &[&str]) -> TargetSpec {
	TargetSpec::from_asg_name(asg_name)
		.with_credentials("prod")
		.with_cloud_provider(CloudProvider::aws())
		.with_locations(regions.iter().map(|region| Location::region(*region)).collect())
}

/// An execution where a determine target stage and `reference` share the `deploy` parent.
///
/// Stages: `deploy` (parent), `dtsg` (determine target, recording `target_references`),
/// then `reference`.
pub fn seed_sibling_execution(target_references: Value, reference: StageNode) -> Execution {
	Execution::new(
		"exec-01",
		vec![
			StageNode::new("deploy", "deploy").with_name("Deploy"),
			StageNode::new("dtsg", DETERMINE_TARGET_STAGE_TYPE)
				.with_parent("deploy")
				.with_context(json!({ "targetReferences": target_references })),
			reference.with_parent("deploy"),
		],
	)
}

/// Two aws records, in `us-east-1` and `us-west-2`.
pub fn seed_target_references() -> Value {
	json!([
		seed_aws_record("myapp-prod-v003", "us-east-1"),
		seed_aws_record("myapp-prod-v007", "us-west-2"),
	])
}
