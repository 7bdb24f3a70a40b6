use crate::model::CloudProvider;
use crate::{Error, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use value_ext::JsonValueExt;

/// The kind of place a server group lives in.
#[derive(Debug, Clone, Copy, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationType {
	Region,
	Zone,
	Namespace,
}

/// Where a server group lives: one type/value pair (e.g., `REGION` / `us-east-1`).
#[derive(Debug, Clone, Display, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[display("{value}")]
pub struct Location {
	#[serde(rename = "type")]
	pub location_type: LocationType,
	pub value: String,
}

/// Constructors
impl Location {
	pub fn new(location_type: LocationType, value: impl Into<String>) -> Self {
		Self {
			location_type,
			value: value.into(),
		}
	}

	pub fn region(value: impl Into<String>) -> Self {
		Self::new(LocationType::Region, value)
	}

	pub fn zone(value: impl Into<String>) -> Self {
		Self::new(LocationType::Zone, value)
	}

	pub fn namespace(value: impl Into<String>) -> Self {
		Self::new(LocationType::Namespace, value)
	}
}

/// From stage and provider values
impl Location {
	/// The location a stage declares in its own context (`zone`, `namespace`, `region`),
	/// the region falling back to the single key of `availabilityZones`.
	pub fn from_stage_context(context: &Value) -> Result<Self> {
		let cloud_provider = opt_str(context, "cloudProvider")?
			.filter(|name| !name.is_empty())
			.map(CloudProvider::from)
			.unwrap_or_default();

		let zone = opt_str(context, "zone")?;
		let namespace = opt_str(context, "namespace")?;
		let region = match opt_str(context, "region")? {
			Some(region) => Some(region),
			None => context
				.get("availabilityZones")
				.and_then(Value::as_object)
				.and_then(|zones_by_region| {
					if zones_by_region.len() == 1 {
						zones_by_region.keys().next().cloned()
					} else {
						None
					}
				}),
		};

		resolve_location(&cloud_provider, zone.as_deref(), namespace.as_deref(), region.as_deref())
	}

	/// The location carried by a generic provider-specific value (an object with
	/// `zone`, `namespace`, or `region` properties).
	pub fn from_cloud_provider_value(cloud_provider: &CloudProvider, value: &Value) -> Result<Self> {
		let zone = opt_str(value, "zone")?;
		let namespace = opt_str(value, "namespace")?;
		let region = opt_str(value, "region")?;

		resolve_location(cloud_provider, zone.as_deref(), namespace.as_deref(), region.as_deref())
	}
}

/// Derive the location of a server group from its raw attributes.
///
/// - `gce`: the zone is mandatory and the result is a `ZONE` (region/namespace are ignored).
/// - any other provider: `NAMESPACE` when present, else `REGION`.
///
/// Empty strings count as absent.
pub fn resolve_location(
	cloud_provider: &CloudProvider,
	zone: Option<&str>,
	namespace: Option<&str>,
	region: Option<&str>,
) -> Result<Location> {
	let zone = zone.filter(|v| !v.is_empty());
	let namespace = namespace.filter(|v| !v.is_empty());
	let region = region.filter(|v| !v.is_empty());

	if cloud_provider.is_gce() {
		return match zone {
			Some(zone) => Ok(Location::zone(zone)),
			None => Err(Error::invalid_spec(format!(
				"a zone is required to locate a {cloud_provider} server group"
			))),
		};
	}

	if let Some(namespace) = namespace {
		Ok(Location::namespace(namespace))
	} else if let Some(region) = region {
		Ok(Location::region(region))
	} else {
		Err(Error::invalid_spec(format!(
			"no known location type for {cloud_provider} (expected a namespace or a region)"
		)))
	}
}

pub(crate) fn opt_str(value: &Value, name: &str) -> Result<Option<String>> {
	match value.x_get::<Option<String>>(name) {
		Ok(v) => Ok(v),
		Err(value_ext::JsonValueExtError::PropertyNotFound(_)) => Ok(None),
		Err(err) => Err(err.into()),
	}
}

// region:    --- Tests


// endregion: --- Tests
