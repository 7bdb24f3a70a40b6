use crate::model::{Location, TargetServerGroup};
use crate::stage::{Execution, StageNode};
use crate::{Error, Result};
use std::sync::RwLock;
use value_ext::{JsonValueExt, JsonValueExtError};

/// The stage type that records the targets it determined under `targetReferences`.
pub const DETERMINE_TARGET_STAGE_TYPE: &str = "determineTargetServerGroup";

/// The stage context categories, checked in this order.
const LOCATION_CATEGORIES: [&str; 3] = ["regions", "zones", "namespaces"];

/// Finds the target a stage should act on from what an earlier stage of the same
/// execution already determined.
#[derive(Debug, Clone)]
pub struct ExecutionHistorySearch {
	stage_type: String,
}

impl Default for ExecutionHistorySearch {
	fn default() -> Self {
		Self::new()
	}
}

/// Constructors
impl ExecutionHistorySearch {
	pub fn new() -> Self {
		Self {
			stage_type: DETERMINE_TARGET_STAGE_TYPE.to_string(),
		}
	}

	#[must_use]
	pub fn with_stage_type(mut self, stage_type: impl Into<String>) -> Self {
		self.stage_type = stage_type.into();
		self
	}
}

/// Getters
impl ExecutionHistorySearch {
	pub fn stage_type(&self) -> &str {
		&self.stage_type
	}
}

/// Search
impl ExecutionHistorySearch {
	/// Select the server group, recorded by the determine target stage related to `stage`,
	/// that lives in one of the locations `stage` declares.
	///
	/// The determine target stage is the first stage of the designated type that is a sibling
	/// of `stage` or its direct parent. Its records are matched against the `regions`, then
	/// `zones`, then `namespaces` of `stage`; the first category holding the location of
	/// some record wins.
	pub fn from_previous_stage(&self, execution: &Execution, stage: &StageNode) -> Result<TargetServerGroup> {
		let Some(dtsg_stage) = self.find_determine_target_stage(execution, stage) else {
			tracing::debug!(stage = %stage.label(), stage_type = %self.stage_type, "no determine target stage");
			return Err(Error::DetermineTargetStageNotFound {
				stage_id: stage.id.clone(),
			});
		};

		let candidates = target_references(dtsg_stage)?;

		let located = candidates
			.iter()
			.map(|candidate| candidate.location().map(|location| (candidate, location)))
			.collect::<Result<Vec<(&TargetServerGroup, Location)>>>()?;

		let mut locations: Vec<String> = Vec::new();
		for category in LOCATION_CATEGORIES {
			let values = stage.context_strings(category)?;

			let matched = located
				.iter()
				.find(|(_, location)| values.contains(&location.value))
				.map(|(candidate, _)| *candidate);

			if let Some(tsg) = matched {
				tracing::debug!(
					stage = %stage.label(),
					determine_target_stage = %dtsg_stage.label(),
					category,
					server_group = %tsg,
					"target found from previous stage"
				);
				return Ok(tsg.clone());
			}

			locations.extend(values);
		}

		tracing::debug!(stage = %stage.label(), ?locations, "no target reference in the stage locations");
		Err(Error::NoMatchingLocation {
			stage_id: stage.id.clone(),
			locations,
			candidates: candidates.iter().map(ToString::to_string).collect(),
		})
	}

	/// Same as `from_previous_stage`, over an execution shared with other tasks.
	///
	/// The read lock is held for the duration of the search.
	pub fn from_shared_execution(&self, execution: &RwLock<Execution>, stage_id: &str) -> Result<TargetServerGroup> {
		let execution = execution
			.read()
			.map_err(|err| Error::Internal(format!("execution lock poisoned: {err}")))?;

		let stage = execution.stage(stage_id).ok_or_else(|| Error::StageNotFound {
			execution_id: execution.id().to_string(),
			stage_id: stage_id.to_string(),
		})?;

		self.from_previous_stage(&execution, stage)
	}
}

/// Support
impl ExecutionHistorySearch {
	/// The first, in execution order, of the siblings and the parent of `stage` having
	/// the designated type.
	fn find_determine_target_stage<'a>(&self, execution: &'a Execution, stage: &'a StageNode) -> Option<&'a StageNode> {
		execution
			.siblings_of(stage)
			.chain(execution.parent_of(stage))
			.filter(|candidate| candidate.stage_type == self.stage_type && candidate.id != stage.id)
			.min_by_key(|candidate| execution.position(&candidate.id))
	}
}

fn target_references(stage: &StageNode) -> Result<Vec<TargetServerGroup>> {
	let references = match stage.context.x_get::<Option<Vec<TargetServerGroup>>>("targetReferences") {
		Ok(references) => references.unwrap_or_default(),
		Err(JsonValueExtError::PropertyNotFound(_)) => Vec::new(),
		Err(err) => return Err(err.into()),
	};

	if references.is_empty() {
		return Err(Error::TargetReferencesNotFound {
			stage_id: stage.id.clone(),
		});
	}

	Ok(references)
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;
	use serde_json::{Value, json};

	fn execution(reference_context: Value) -> Execution {
		Execution::new(
			"exec-1",
			vec![
				StageNode::new("root", "deploy"),
				StageNode::new("dtsg", DETERMINE_TARGET_STAGE_TYPE)
					.with_parent("root")
					.with_context(json!({
						"targetReferences": [
							{ "name": "myapp-v001", "type": "kubernetes", "namespace": "staging" },
							{ "name": "myapp-v002", "type": "aws", "region": "us-west-2" },
						]
					})),
				StageNode::new("op", "resizeServerGroup")
					.with_parent("root")
					.with_context(reference_context),
			],
		)
	}

	#[test]
	fn test_from_previous_stage_category_order_ok() -> Result<()> {
		// regions are checked before namespaces, whatever the record order
		let execution = execution(json!({ "regions": ["us-west-2"], "namespaces": ["staging"] }));
		let stage = execution.stage("op").ok_or("missing stage")?;

		let tsg = ExecutionHistorySearch::new().from_previous_stage(&execution, stage)?;
		assert_eq!(tsg.name(), Some("myapp-v002"));
		Ok(())
	}

	#[test]
	fn test_from_previous_stage_custom_stage_type_err() -> Result<()> {
		let execution = execution(json!({ "regions": ["us-west-2"] }));
		let stage = execution.stage("op").ok_or("missing stage")?;

		let res = ExecutionHistorySearch::new()
			.with_stage_type("findImage")
			.from_previous_stage(&execution, stage);
		assert!(matches!(res, Err(Error::DetermineTargetStageNotFound { .. })));
		Ok(())
	}

	#[test]
	fn test_from_previous_stage_first_in_execution_order_ok() -> Result<()> {
		// the parent comes before a later sibling of the same type
		let execution = Execution::new(
			"exec-1",
			vec![
				StageNode::new("parent-dtsg", DETERMINE_TARGET_STAGE_TYPE).with_context(json!({
					"targetReferences": [{ "name": "myapp-v010", "region": "us-east-1" }],
				})),
				StageNode::new("op", "resizeServerGroup")
					.with_parent("parent-dtsg")
					.with_name("Resize")
					.with_context(json!({ "regions": ["us-east-1"] })),
				StageNode::new("sibling-dtsg", DETERMINE_TARGET_STAGE_TYPE)
					.with_parent("parent-dtsg")
					.with_context(json!({
						"targetReferences": [{ "name": "myapp-v011", "region": "us-east-1" }],
					})),
			],
		);
		let stage = execution.stage("op").ok_or("missing stage")?;

		let tsg = ExecutionHistorySearch::new().from_previous_stage(&execution, stage)?;
		assert_eq!(tsg.name(), Some("myapp-v010"));
		assert_eq!(stage.label(), "Resize (op)");
		Ok(())
	}

	#[test]
	fn test_from_previous_stage_never_self() -> Result<()> {
		let execution = Execution::new(
			"exec-1",
			vec![StageNode::new("dtsg", DETERMINE_TARGET_STAGE_TYPE).with_context(json!({
				"regions": ["us-east-1"],
				"targetReferences": [{ "name": "myapp-v001", "region": "us-east-1" }],
			}))],
		);
		let stage = execution.stage("dtsg").ok_or("missing stage")?;

		let res = ExecutionHistorySearch::default().from_previous_stage(&execution, stage);
		assert!(matches!(res, Err(Error::DetermineTargetStageNotFound { .. })));
		Ok(())
	}
}

// endregion: --- Tests
