use crate::stage::StageNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A snapshot of a pipeline execution: its stages, in execution order, plus an id index.
///
/// The snapshot is immutable once built; searches over it are pure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ExecutionData", into = "ExecutionData")]
pub struct Execution {
	id: String,
	stages: Vec<StageNode>,
	index_by_id: HashMap<String, usize>,
}

/// Constructors
impl Execution {
	pub fn new(id: impl Into<String>, stages: Vec<StageNode>) -> Self {
		let index_by_id = stages.iter().enumerate().map(|(idx, s)| (s.id.clone(), idx)).collect();
		Self {
			id: id.into(),
			stages,
			index_by_id,
		}
	}
}

/// Getters
impl Execution {
	pub fn id(&self) -> &str {
		&self.id
	}

	/// All stages, in execution order.
	pub fn stages(&self) -> &[StageNode] {
		&self.stages
	}

	pub fn stage(&self, stage_id: &str) -> Option<&StageNode> {
		self.index_by_id.get(stage_id).and_then(|idx| self.stages.get(*idx))
	}

	/// The direct parent of `stage`, if it has one in this execution.
	pub fn parent_of(&self, stage: &StageNode) -> Option<&StageNode> {
		stage.parent_stage_id.as_deref().and_then(|parent_id| self.stage(parent_id))
	}

	/// The stages sharing `stage`'s parent (top-level stages are siblings of each other),
	/// excluding `stage` itself.
	pub fn siblings_of<'a>(&'a self, stage: &'a StageNode) -> impl Iterator<Item = &'a StageNode> + 'a {
		self.stages
			.iter()
			.filter(move |s| s.id != stage.id && s.parent_stage_id == stage.parent_stage_id)
	}

	/// The position of a stage in execution order.
	pub fn position(&self, stage_id: &str) -> Option<usize> {
		self.index_by_id.get(stage_id).copied()
	}
}

// region:    --- Serde Support

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecutionData {
	id: String,
	#[serde(default)]
	stages: Vec<StageNode>,
}

impl From<ExecutionData> for Execution {
	fn from(data: ExecutionData) -> Self {
		Execution::new(data.id, data.stages)
	}
}

impl From<Execution> for ExecutionData {
	fn from(execution: Execution) -> Self {
		ExecutionData {
			id: execution.id,
			stages: execution.stages,
		}
	}
}

// endregion: --- Serde Support

// region:    --- Tests


// endregion: --- Tests
