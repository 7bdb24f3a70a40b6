//! What to resolve: a `TargetSpec` names either an exact server group or a symbolic `Target`
//! of a cluster, with the credentials, provider, and locations to resolve it in.

use crate::model::{CloudProvider, Location, ServerGroupName};
use crate::stage::StageNode;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// region:    --- Target

/// A symbolic target within a cluster.
///
/// The `*Dynamic` variants are resolved when the stage runs. The others are the deprecated
/// static forms, resolved the same way by the inventory.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
	CurrentAsgDynamic,
	AncestorAsgDynamic,
	OldestAsgDynamic,
	CurrentAsg,
	AncestorAsg,
	OldestAsg,
}

impl Target {
	/// The wire name, as used in stage contexts and inventory queries.
	#[must_use]
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::CurrentAsgDynamic => "current_asg_dynamic",
			Self::AncestorAsgDynamic => "ancestor_asg_dynamic",
			Self::OldestAsgDynamic => "oldest_asg_dynamic",
			Self::CurrentAsg => "current_asg",
			Self::AncestorAsg => "ancestor_asg",
			Self::OldestAsg => "oldest_asg",
		}
	}

	#[must_use]
	pub const fn is_dynamic(&self) -> bool {
		matches!(self, Self::CurrentAsgDynamic | Self::AncestorAsgDynamic | Self::OldestAsgDynamic)
	}

	/// Parse a wire name (case insensitive).
	pub fn from_name(name: &str) -> Result<Self> {
		let target = match name.to_ascii_lowercase().as_str() {
			"current_asg_dynamic" => Self::CurrentAsgDynamic,
			"ancestor_asg_dynamic" => Self::AncestorAsgDynamic,
			"oldest_asg_dynamic" => Self::OldestAsgDynamic,
			"current_asg" => Self::CurrentAsg,
			"ancestor_asg" => Self::AncestorAsg,
			"oldest_asg" => Self::OldestAsg,
			other => return Err(Error::invalid_spec(format!("unknown target '{other}'"))),
		};
		Ok(target)
	}
}

impl fmt::Display for Target {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

// endregion: --- Target

// region:    --- TargetSpec

/// The normalized description of what to resolve.
///
/// Exactly one of `target` (with `cluster`) or `asg_name` is expected. When both are set,
/// `target` wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
	pub asg_name: Option<String>,
	pub target: Option<Target>,
	pub cluster: Option<String>,
	pub app: Option<String>,
	pub credentials: Option<String>,
	#[serde(default)]
	pub cloud_provider: CloudProvider,
	#[serde(default)]
	pub locations: Vec<Location>,
}

/// Constructors
impl TargetSpec {
	pub fn from_asg_name(asg_name: impl Into<String>) -> Self {
		Self {
			asg_name: Some(asg_name.into()),
			..Default::default()
		}
	}

	pub fn from_target(target: Target, cluster: impl Into<String>) -> Self {
		Self {
			target: Some(target),
			cluster: Some(cluster.into()),
			..Default::default()
		}
	}

	/// Build the spec a stage declares in its context.
	///
	/// Location precedence:
	/// - `zones` present: zones, unless `regions` is also present and the provider is not `gce`
	///   (then regions).
	/// - `zones` absent: `regions` followed by `namespaces`.
	pub fn from_stage(stage: &StageNode) -> Result<Self> {
		let cloud_provider = stage
			.context_str("cloudProvider")?
			.map(CloudProvider::from)
			.unwrap_or_default();

		let target = stage.context_str("target")?.map(|t| Target::from_name(&t)).transpose()?;

		let regions = stage.context_strings("regions")?;
		let zones = stage.context_strings("zones")?;
		let namespaces = stage.context_strings("namespaces")?;

		let locations: Vec<Location> = if !zones.is_empty() {
			if !regions.is_empty() && !cloud_provider.is_gce() {
				regions.into_iter().map(Location::region).collect()
			} else {
				zones.into_iter().map(Location::zone).collect()
			}
		} else {
			regions
				.into_iter()
				.map(Location::region)
				.chain(namespaces.into_iter().map(Location::namespace))
				.collect()
		};

		Ok(Self {
			asg_name: stage.context_str("asgName")?,
			target,
			cluster: stage.context_str("cluster")?,
			app: stage.context_str("app")?,
			credentials: stage.context_str("credentials")?,
			cloud_provider,
			locations: dedup_locations(locations),
		})
	}
}

/// Chainable Setters
impl TargetSpec {
	#[must_use]
	pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
		self.credentials = Some(credentials.into());
		self
	}

	#[must_use]
	pub fn with_app(mut self, app: impl Into<String>) -> Self {
		self.app = Some(app.into());
		self
	}

	#[must_use]
	pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
		self.cluster = Some(cluster.into());
		self
	}

	#[must_use]
	pub fn with_cloud_provider(mut self, cloud_provider: impl Into<CloudProvider>) -> Self {
		self.cloud_provider = cloud_provider.into();
		self
	}

	#[must_use]
	pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
		self.locations = dedup_locations(locations);
		self
	}
}

/// Getters (derived values)
impl TargetSpec {
	/// The explicit app, else the app parsed from `asg_name`, else from `cluster`.
	pub fn app(&self) -> Option<String> {
		if let Some(app) = self.app.as_ref().filter(|a| !a.is_empty()) {
			return Some(app.clone());
		}
		self.asg_name
			.as_deref()
			.or(self.cluster.as_deref())
			.and_then(ServerGroupName::parse)
			.map(|name| name.app)
	}

	/// The explicit cluster, else the cluster parsed from `asg_name`.
	pub fn cluster(&self) -> Option<String> {
		if let Some(cluster) = self.cluster.as_ref().filter(|c| !c.is_empty()) {
			return Some(cluster.clone());
		}
		self.asg_name
			.as_deref()
			.and_then(ServerGroupName::parse)
			.map(|name| name.cluster)
	}

	/// Nothing to resolve: no target, no exact name, and no location.
	pub fn is_empty(&self) -> bool {
		self.target.is_none() && self.asg_name.is_none() && self.locations.is_empty()
	}

	/// True when the stage resolves its target at run time (a dynamic `Target`).
	pub fn is_dynamically_bound(stage: &StageNode) -> Result<bool> {
		Ok(Self::from_stage(stage)?.target.is_some_and(|t| t.is_dynamic()))
	}
}

fn dedup_locations(locations: Vec<Location>) -> Vec<Location> {
	let mut deduped: Vec<Location> = Vec::with_capacity(locations.len());
	for location in locations {
		if !deduped.contains(&location) {
			deduped.push(location);
		}
	}
	deduped
}

// endregion: --- TargetSpec

// region:    --- Tests


// endregion: --- Tests
