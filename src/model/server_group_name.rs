//! Parsing of the `app-stack-detail-vNNN` server group naming convention.

use serde::{Deserialize, Serialize};

/// The parts of a server group name following the `app[-stack[-detail]][-vNNN]` convention.
///
/// - `myapp-prod-v003` → app `myapp`, stack `prod`, cluster `myapp-prod`, sequence `3`
/// - `myapp` → app `myapp`, cluster `myapp`, no sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerGroupName {
	pub app: String,
	pub stack: Option<String>,
	pub detail: Option<String>,
	pub cluster: String,
	pub sequence: Option<u32>,
}

impl ServerGroupName {
	/// Parse a server group (or cluster) name. Returns `None` for an empty name.
	#[must_use]
	pub fn parse(name: &str) -> Option<Self> {
		let name = name.trim();
		if name.is_empty() {
			return None;
		}

		let (cluster, sequence) = split_sequence(name);

		let mut parts = cluster.splitn(3, '-');
		let app = parts.next().unwrap_or_default().to_string();
		let stack = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
		let detail = parts.next().filter(|s| !s.is_empty()).map(str::to_string);

		Some(Self {
			app,
			stack,
			detail,
			cluster: cluster.to_string(),
			sequence,
		})
	}
}

/// Split a trailing `-vNNN` push sequence (at least 3 digits) off the name.
fn split_sequence(name: &str) -> (&str, Option<u32>) {
	if let Some((cluster, last)) = name.rsplit_once('-')
		&& let Some(digits) = last.strip_prefix('v')
		&& digits.len() >= 3
		&& digits.bytes().all(|b| b.is_ascii_digit())
		&& !cluster.is_empty()
	{
		return (cluster, digits.parse().ok());
	}
	(name, None)
}

// region:    --- Tests


// endregion: --- Tests
