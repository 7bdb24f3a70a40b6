use crate::model::{Location, Target};
use crate::webc;
use derive_more::{Display, From};
use std::time::Duration;
use value_ext::JsonValueExtError;

/// Main Result type alias (with `target_resolver::Error`)
pub type Result<T> = core::result::Result<T, Error>;

/// Main target resolution error.
#[derive(Debug, From, Display)]
#[allow(missing_docs)]
pub enum Error {
	// -- Specification
	#[display("Invalid target specification: {reason}")]
	InvalidSpecification { reason: String },

	// -- Not found (legitimate terminal outcomes, see `Error::is_not_found`)
	#[display("Unable to locate {target} in {credentials}/{location}/{cluster}")]
	TargetNotFound {
		target: Target,
		credentials: String,
		location: Location,
		cluster: String,
	},

	#[display("Unable to locate server group {asg_name} in {credentials}/{location}/{cluster}")]
	ServerGroupNotFound {
		asg_name: String,
		credentials: String,
		location: Location,
		cluster: String,
	},

	#[display("No determine target stage found for stage {stage_id}")]
	DetermineTargetStageNotFound { stage_id: String },

	#[display("No target references found in stage {stage_id}")]
	TargetReferencesNotFound { stage_id: String },

	#[display(
		"No targets found for stage {stage_id} matching any location in {locations:?} in target server groups: {candidates:?}"
	)]
	NoMatchingLocation {
		stage_id: String,
		locations: Vec<String>,
		candidates: Vec<String>,
	},

	#[display("Stage {stage_id} not found in execution {execution_id}")]
	StageNotFound { execution_id: String, stage_id: String },

	// -- Inventory calls
	#[display("Inventory call for {shape} failed after {attempts} attempt(s): {webc_error}")]
	Transport {
		shape: &'static str,
		attempts: u32,
		webc_error: webc::Error,
	},

	#[display("Inventory call for {shape} failed: {webc_error}")]
	WebCall {
		shape: &'static str,
		webc_error: webc::Error,
	},

	#[display("Inventory call for {shape} gave up after {attempts} attempt(s) ({elapsed:?}, deadline {deadline:?})")]
	FetchDeadlineExceeded {
		shape: &'static str,
		attempts: u32,
		elapsed: Duration,
		deadline: Duration,
	},

	#[display("Failed to read {url} response as {shape}: {cause} (body: {body})")]
	Deserialization {
		url: String,
		body: String,
		shape: &'static str,
		cause: serde_json::Error,
	},

	// -- Internal
	#[from]
	#[display("Internal state error: {_0}")]
	Internal(String),

	// -- Externals
	#[from]
	#[display("{_0}")]
	JsonValueExt(JsonValueExtError),

	#[from]
	#[display("{_0}")]
	SerdeJson(serde_json::Error),
}

/// Classification
impl Error {
	/// True when the error means "no such target" rather than a system fault.
	/// Callers may treat these as a terminal outcome (e.g., skip a stage).
	#[must_use]
	pub const fn is_not_found(&self) -> bool {
		matches!(
			self,
			Self::TargetNotFound { .. }
				| Self::ServerGroupNotFound { .. }
				| Self::DetermineTargetStageNotFound { .. }
				| Self::TargetReferencesNotFound { .. }
				| Self::NoMatchingLocation { .. }
				| Self::StageNotFound { .. }
		)
	}

	pub(crate) fn invalid_spec(reason: impl Into<String>) -> Self {
		Self::InvalidSpecification { reason: reason.into() }
	}
}

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
