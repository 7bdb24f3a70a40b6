use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The cloud provider name a server group or stage belongs to (e.g., `aws`, `gce`, `kubernetes`).
///
/// Provider names are open-ended, so this is a cheap-to-clone name rather than a closed enum.
/// The provider drives the location rule (see `resolve_location`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CloudProvider {
	inner: Arc<str>,
}

impl CloudProvider {
	pub const AWS: &'static str = "aws";
	pub const GCE: &'static str = "gce";
}

/// Constructors
impl CloudProvider {
	#[must_use]
	pub fn from_static(name: &'static str) -> Self {
		Self { inner: Arc::from(name) }
	}

	pub fn from_owned(name: impl Into<Arc<str>>) -> Self {
		Self { inner: name.into() }
	}

	#[must_use]
	pub fn aws() -> Self {
		Self::from_static(Self::AWS)
	}

	#[must_use]
	pub fn gce() -> Self {
		Self::from_static(Self::GCE)
	}
}

/// Getters
impl CloudProvider {
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.inner
	}

	/// GCE server groups are addressed by zone.
	#[must_use]
	pub fn is_gce(&self) -> bool {
		&*self.inner == Self::GCE
	}
}

impl Default for CloudProvider {
	fn default() -> Self {
		Self::aws()
	}
}

impl fmt::Display for CloudProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.inner)
	}
}

impl From<&str> for CloudProvider {
	fn from(name: &str) -> Self {
		Self::from_owned(name)
	}
}

impl From<String> for CloudProvider {
	fn from(name: String) -> Self {
		Self::from_owned(name)
	}
}
