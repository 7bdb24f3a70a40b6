use crate::Result;
use crate::model::opt_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use value_ext::JsonValueExt;

/// One stage of an execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageNode {
	pub id: String,
	#[serde(default)]
	pub parent_stage_id: Option<String>,
	#[serde(rename = "type")]
	pub stage_type: String,
	#[serde(default)]
	pub name: Option<String>,
	/// The stage context, a JSON object.
	#[serde(default)]
	pub context: Value,
}

/// Constructors
impl StageNode {
	pub fn new(id: impl Into<String>, stage_type: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			stage_type: stage_type.into(),
			context: Value::Object(Default::default()),
			..Default::default()
		}
	}

	#[must_use]
	pub fn with_parent(mut self, parent_stage_id: impl Into<String>) -> Self {
		self.parent_stage_id = Some(parent_stage_id.into());
		self
	}

	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[must_use]
	pub fn with_context(mut self, context: Value) -> Self {
		self.context = context;
		self
	}
}

/// Context accessors
impl StageNode {
	/// A string context value. Absent, null, and empty values are `None`.
	pub fn context_str(&self, key: &str) -> Result<Option<String>> {
		Ok(opt_str(&self.context, key)?.filter(|v| !v.is_empty()))
	}

	/// A string sequence context value. Absent and null values are empty.
	pub fn context_strings(&self, key: &str) -> Result<Vec<String>> {
		match self.context.x_get::<Option<Vec<String>>>(key) {
			Ok(v) => Ok(v.unwrap_or_default()),
			Err(value_ext::JsonValueExtError::PropertyNotFound(_)) => Ok(Vec::new()),
			Err(err) => Err(err.into()),
		}
	}

	/// A short identity for diagnostics (`name (id)` or `id`).
	pub fn label(&self) -> String {
		match &self.name {
			Some(name) => format!("{name} ({})", self.id),
			None => self.id.clone(),
		}
	}
}

// region:    --- Tests


// endregion: --- Tests
