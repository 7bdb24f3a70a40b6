use crate::model::{CloudProvider, Location, Target};
use crate::webc::{self, WebResponse};
use std::future::Future;

/// The inventory queries target resolution needs.
///
/// Each method performs exactly one remote call. Retry, 404 handling, and decoding are the
/// caller's business (see `resolver::RetryingFetcher`). A 404 must surface as a
/// `webc::Error` for which `is_not_found()` is true.
pub trait InventoryClient: Send + Sync {
	/// The server group a symbolic `Target` designates in one cluster location.
	/// Answers one server group record, or 404.
	fn get_target_server_group(
		&self,
		query: &TargetServerGroupQuery,
	) -> impl Future<Output = webc::Result<WebResponse>> + Send;

	/// The server groups named `asg_name` in a cluster. Answers a sequence of records.
	///
	/// NOTE: The resolver leaves `region` unset and filters by location locally, as the
	///       inventory does not filter zonal server groups by region yet. The remote side may
	///       therefore return more server groups than the location needs.
	fn get_server_groups(&self, query: &ServerGroupsQuery) -> impl Future<Output = webc::Result<WebResponse>> + Send;
}

// region:    --- Queries

#[derive(Debug, Clone, PartialEq)]
pub struct TargetServerGroupQuery {
	pub app: String,
	pub credentials: String,
	pub cluster: String,
	pub cloud_provider: CloudProvider,
	pub location: Location,
	pub target: Target,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerGroupsQuery {
	pub app: String,
	pub credentials: String,
	pub cluster: String,
	pub asg_name: String,
	pub region: Option<String>,
	pub cloud_provider: CloudProvider,
}

// endregion: --- Queries
