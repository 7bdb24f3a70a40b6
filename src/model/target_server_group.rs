//! The resolved server group record.

use crate::model::{CloudProvider, Location, LocationType, resolve_location};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use value_ext::JsonValueExt;

/// A server group as returned by the inventory service.
///
/// Providers attach different fields, so only the fields target resolution relies on are typed.
/// Everything else is kept, untouched, in a side table (`extra_field`).
///
/// The location is never stored; it is derived on demand (see `TargetServerGroup::location`).
#[serde_with::serde_as]
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetServerGroup {
	name: Option<String>,
	/// The provider type reported by the inventory (e.g., `aws`, `gce`).
	#[serde(rename = "type")]
	server_group_type: Option<String>,
	cloud_provider: Option<String>,
	region: Option<String>,
	zone: Option<String>,
	#[serde_as(deserialize_as = "serde_with::DefaultOnNull")]
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	zones: Vec<String>,
	namespace: Option<String>,

	#[serde(flatten)]
	extra: Map<String, Value>,
}

/// Constructors
impl TargetServerGroup {
	/// Wrap a raw server group record.
	pub fn from_value(record: Value) -> Result<Self> {
		Ok(serde_json::from_value(record)?)
	}
}

/// Getters
impl TargetServerGroup {
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn server_group_type(&self) -> Option<&str> {
		self.server_group_type.as_deref()
	}

	pub fn region(&self) -> Option<&str> {
		self.region.as_deref()
	}

	pub fn zone(&self) -> Option<&str> {
		self.zone.as_deref()
	}

	pub fn zones(&self) -> &[String] {
		&self.zones
	}

	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	/// `cloudProvider` when reported, else the server group `type`, else the default provider.
	pub fn cloud_provider(&self) -> CloudProvider {
		self.cloud_provider
			.as_deref()
			.or(self.server_group_type.as_deref())
			.filter(|p| !p.is_empty())
			.map(CloudProvider::from)
			.unwrap_or_default()
	}

	/// A provider-specific field not covered by the typed accessors.
	pub fn extra_field(&self, key: &str) -> Option<&Value> {
		self.extra.get(key)
	}

	/// Deserialize a provider-specific field (e.g., `"disabled"` or `"/capacity/desired"`).
	pub fn extra_field_as<T: serde::de::DeserializeOwned>(&self, name_or_pointer: &str) -> Option<T> {
		let (head, rest) = match name_or_pointer.strip_prefix('/') {
			Some(pointer) => pointer.split_once('/').map_or((pointer, None), |(h, r)| (h, Some(r))),
			None => (name_or_pointer, None),
		};
		let value = self.extra.get(head)?;
		match rest {
			Some(rest) => value.x_get::<T>(&format!("/{rest}")).ok(),
			None => serde_json::from_value(value.clone()).ok(),
		}
	}

	/// True when the inventory returned a record without any attribute.
	pub fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.server_group_type.is_none()
			&& self.cloud_provider.is_none()
			&& self.region.is_none()
			&& self.zone.is_none()
			&& self.zones.is_empty()
			&& self.namespace.is_none()
			&& self.extra.is_empty()
	}

	/// The location of this server group, derived from its raw attributes.
	pub fn location(&self) -> Result<Location> {
		resolve_location(
			&self.cloud_provider(),
			self.zone.as_deref(),
			self.namespace.as_deref(),
			self.region.as_deref(),
		)
	}

	/// True when this server group lives in `location_value`, as a region, one of its zones,
	/// or a namespace.
	pub fn is_in(&self, location_value: &str) -> bool {
		self.region.as_deref() == Some(location_value)
			|| self.zones.iter().any(|z| z == location_value)
			|| self.namespace.as_deref() == Some(location_value)
	}
}

/// Stage and operation payloads
impl TargetServerGroup {
	/// The raw record, as stored in a stage's `targetReferences`.
	pub fn to_target_reference(&self) -> Result<Value> {
		Ok(serde_json::to_value(self)?)
	}

	/// The flat payload downstream operations (e.g., load balancer registration) expect.
	pub fn to_operation_payload(&self, account: &str) -> Result<Value> {
		let name = self.name.clone().unwrap_or_default();
		let cloud_provider = self.cloud_provider();
		let provider = cloud_provider.as_str();

		let mut payload = json!({
			"credentials": account,
			"accountName": account,
			"serverGroupName": name,
			"asgName": name,
			"cloudProvider": provider,
			"providerType": provider,
		});

		let location = self.location()?;
		let (single, plural) = match location.location_type {
			LocationType::Namespace => ("namespace", "namespaces"),
			LocationType::Region => ("region", "regions"),
			LocationType::Zone => ("zone", "zones"),
		};
		payload.x_insert(single, &location.value)?;
		payload.x_insert(plural, vec![&location.value])?;

		Ok(payload)
	}
}

impl fmt::Display for TargetServerGroup {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TargetServerGroup({}", self.name.as_deref().unwrap_or("<unnamed>"))?;
		if let Some(region) = &self.region {
			write!(f, ", region: {region}")?;
		}
		if let Some(zone) = &self.zone {
			write!(f, ", zone: {zone}")?;
		}
		if !self.zones.is_empty() {
			write!(f, ", zones: {:?}", self.zones)?;
		}
		if let Some(namespace) = &self.namespace {
			write!(f, ", namespace: {namespace}")?;
		}
		f.write_str(")")
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>; // For tests.

	use super::*;
	use crate::Error;

	#[test]
	fn test_target_server_group_location_ok() -> Result<()> {
		let tsg = TargetServerGroup::from_value(json!({
			"name": "myapp-prod-v003",
			"type": "aws",
			"region": "us-east-1",
			"zones": ["us-east-1a", "us-east-1c"],
			"disabled": false,
		}))?;

		assert_eq!(tsg.location()?, Location::region("us-east-1"));
		assert!(tsg.is_in("us-east-1c"));
		assert!(!tsg.is_in("us-west-2"));
		assert_eq!(tsg.extra_field_as::<bool>("disabled"), Some(false));
		Ok(())
	}

	#[test]
	fn test_target_server_group_gce_needs_zone() -> Result<()> {
		let tsg = TargetServerGroup::from_value(json!({
			"name": "myapp-v001",
			"cloudProvider": "gce",
			"region": "us-central1",
		}))?;
		assert!(matches!(tsg.location(), Err(Error::InvalidSpecification { .. })));
		Ok(())
	}

	#[test]
	fn test_target_server_group_extra_pointer_ok() -> Result<()> {
		let tsg = TargetServerGroup::from_value(json!({
			"name": "myapp-v001",
			"region": "us-east-1",
			"capacity": { "min": 1, "max": 4, "desired": 2 },
		}))?;
		assert_eq!(tsg.extra_field_as::<u32>("/capacity/desired"), Some(2));
		assert_eq!(tsg.extra_field_as::<u32>("/capacity/nope"), None);
		assert!(tsg.extra_field("capacity").is_some());
		Ok(())
	}

	#[test]
	fn test_target_server_group_operation_payload_ok() -> Result<()> {
		let tsg = TargetServerGroup::from_value(json!({
			"name": "myapp-prod-v003",
			"type": "aws",
			"region": "us-east-1",
		}))?;

		let payload = tsg.to_operation_payload("prod")?;
		assert_eq!(
			payload,
			json!({
				"credentials": "prod",
				"accountName": "prod",
				"serverGroupName": "myapp-prod-v003",
				"asgName": "myapp-prod-v003",
				"cloudProvider": "aws",
				"providerType": "aws",
				"region": "us-east-1",
				"regions": ["us-east-1"],
			})
		);
		Ok(())
	}

	#[test]
	fn test_target_server_group_operation_payload_zone_and_namespace_ok() -> Result<()> {
		let gce = TargetServerGroup::from_value(json!({
			"name": "myapp-v001",
			"cloudProvider": "gce",
			"zone": "us-central1-f",
		}))?;
		let payload = gce.to_operation_payload("gce-prod")?;
		assert_eq!(payload.x_get::<String>("zone")?, "us-central1-f");
		assert_eq!(payload.x_get::<Vec<String>>("zones")?, vec!["us-central1-f".to_string()]);
		assert_eq!(payload.x_get::<String>("providerType")?, "gce");

		let k8s = TargetServerGroup::from_value(json!({
			"name": "replicaSet myapp-v002",
			"type": "kubernetes",
			"namespace": "default",
			"region": "default",
		}))?;
		let payload = k8s.to_operation_payload("k8s")?;
		assert_eq!(payload.x_get::<Vec<String>>("namespaces")?, vec!["default".to_string()]);
		assert!(payload.get("region").is_none());
		Ok(())
	}

	#[test]
	fn test_target_server_group_operation_payload_default_provider_ok() -> Result<()> {
		let tsg = TargetServerGroup::from_value(json!({
			"name": "myapp-v004",
			"region": "us-west-2",
		}))?;

		let payload = tsg.to_operation_payload("prod")?;
		assert_eq!(payload.x_get::<String>("cloudProvider")?, "aws");
		assert_eq!(payload.x_get::<String>("providerType")?, "aws");
		assert_eq!(payload.x_get::<String>("region")?, "us-west-2");
		Ok(())
	}

	#[test]
	fn test_target_server_group_reference_keeps_extras_ok() -> Result<()> {
		let raw = json!({
			"name": "myapp-v001",
			"region": "eu-west-1",
			"launchConfig": { "instanceType": "m5.large" },
		});
		let tsg = TargetServerGroup::from_value(raw.clone())?;
		assert_eq!(tsg.to_target_reference()?, raw);
		assert!(!tsg.is_empty());
		assert!(TargetServerGroup::from_value(json!({}))?.is_empty());
		assert!(TargetServerGroup::from_value(json!({ "zones": null }))?.is_empty());
		Ok(())
	}
}

// endregion: --- Tests
