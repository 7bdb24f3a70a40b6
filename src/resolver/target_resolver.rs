use crate::inventory::{InventoryClient, ServerGroupsQuery, TargetServerGroupQuery, WebInventoryClient};
use crate::model::{CloudProvider, Location, Target, TargetServerGroup, TargetSpec};
use crate::resolver::{ResolverConfig, RetryingFetcher};
use crate::stage::StageNode;
use crate::{Error, Result};
use futures::future::try_join_all;

/// Resolves target specifications into concrete server groups, one per requested location.
#[derive(Debug, Clone)]
pub struct TargetResolver<C = WebInventoryClient> {
	client: C,
	fetcher: RetryingFetcher,
	config: ResolverConfig,
}

/// Constructors
impl<C: InventoryClient> TargetResolver<C> {
	pub fn new(client: C) -> Self {
		Self::with_config(client, ResolverConfig::default())
	}

	pub fn with_config(client: C, config: ResolverConfig) -> Self {
		Self {
			client,
			fetcher: RetryingFetcher::new(config.retry.clone()),
			config,
		}
	}
}

/// Getters
impl<C: InventoryClient> TargetResolver<C> {
	pub fn client(&self) -> &C {
		&self.client
	}

	pub fn config(&self) -> &ResolverConfig {
		&self.config
	}
}

/// Resolution
impl<C: InventoryClient> TargetResolver<C> {
	/// Resolve the targets a stage declares in its context.
	pub async fn resolve(&self, stage: &StageNode) -> Result<Vec<TargetServerGroup>> {
		let spec = TargetSpec::from_stage(stage)?;
		self.resolve_by_params(Some(&spec)).await
	}

	/// Resolve one `TargetServerGroup` per location of `spec`, in the order of `spec.locations`.
	///
	/// An absent or empty spec resolves to nothing, without any inventory call.
	pub async fn resolve_by_params(&self, spec: Option<&TargetSpec>) -> Result<Vec<TargetServerGroup>> {
		let Some(spec) = spec.filter(|spec| !spec.is_empty()) else {
			tracing::warn!("no target specification to resolve");
			return Ok(Vec::new());
		};

		if spec.locations.is_empty() {
			tracing::debug!("target specification has no location, nothing to resolve");
			return Ok(Vec::new());
		}

		let plan = ResolvePlan::from_spec(spec)?;

		if self.config.parallel_locations {
			try_join_all(spec.locations.iter().map(|location| self.resolve_location(&plan, location))).await
		} else {
			let mut resolved = Vec::with_capacity(spec.locations.len());
			for location in &spec.locations {
				resolved.push(self.resolve_location(&plan, location).await?);
			}
			Ok(resolved)
		}
	}
}

/// Support
impl<C: InventoryClient> TargetResolver<C> {
	async fn resolve_location(&self, plan: &ResolvePlan, location: &Location) -> Result<TargetServerGroup> {
		let tsg = match &plan.lookup {
			Lookup::Target { target, cluster } => self.resolve_by_target(plan, location, *target, cluster).await?,
			Lookup::ServerGroup { asg_name, cluster } => {
				self.resolve_by_server_group_name(plan, location, asg_name, cluster).await?
			}
		};

		tracing::debug!(location = %location, server_group = %tsg, "resolved target server group");
		Ok(tsg)
	}

	async fn resolve_by_target(
		&self,
		plan: &ResolvePlan,
		location: &Location,
		target: Target,
		cluster: &str,
	) -> Result<TargetServerGroup> {
		let query = TargetServerGroupQuery {
			app: plan.app.clone(),
			credentials: plan.credentials.clone(),
			cluster: cluster.to_string(),
			cloud_provider: plan.cloud_provider.clone(),
			location: location.clone(),
			target,
		};

		let fetched = self
			.fetcher
			.fetch::<Option<TargetServerGroup>, _, _>(|| self.client.get_target_server_group(&query))
			.await?;

		fetched
			.found()
			.flatten()
			.filter(|tsg| !tsg.is_empty())
			.ok_or_else(|| Error::TargetNotFound {
				target,
				credentials: plan.credentials.clone(),
				location: location.clone(),
				cluster: cluster.to_string(),
			})
	}

	/// NOTE: The query leaves the region blank (the inventory cannot filter zonal server groups
	///       by region yet), so the location match happens here, on region, zones, or namespace.
	async fn resolve_by_server_group_name(
		&self,
		plan: &ResolvePlan,
		location: &Location,
		asg_name: &str,
		cluster: &str,
	) -> Result<TargetServerGroup> {
		let query = ServerGroupsQuery {
			app: plan.app.clone(),
			credentials: plan.credentials.clone(),
			cluster: cluster.to_string(),
			asg_name: asg_name.to_string(),
			region: None,
			cloud_provider: plan.cloud_provider.clone(),
		};

		let server_groups = self
			.fetcher
			.fetch::<Option<Vec<TargetServerGroup>>, _, _>(|| self.client.get_server_groups(&query))
			.await?
			.found()
			.flatten()
			.unwrap_or_default();

		server_groups
			.into_iter()
			.find(|server_group| server_group.is_in(&location.value))
			.ok_or_else(|| Error::ServerGroupNotFound {
				asg_name: asg_name.to_string(),
				credentials: plan.credentials.clone(),
				location: location.clone(),
				cluster: cluster.to_string(),
			})
	}
}

// region:    --- ResolvePlan

/// The validated, location independent part of a resolution.
struct ResolvePlan {
	app: String,
	credentials: String,
	cloud_provider: CloudProvider,
	lookup: Lookup,
}

enum Lookup {
	Target { target: Target, cluster: String },
	ServerGroup { asg_name: String, cluster: String },
}

impl ResolvePlan {
	fn from_spec(spec: &TargetSpec) -> Result<Self> {
		let asg_name = spec.asg_name.as_deref().filter(|n| !n.is_empty());

		let lookup = match (spec.target, asg_name) {
			(Some(target), _) => {
				let cluster = spec
					.cluster()
					.ok_or_else(|| Error::invalid_spec(format!("target {target} requires a cluster")))?;
				Lookup::Target { target, cluster }
			}
			(None, Some(asg_name)) => {
				let cluster = spec
					.cluster()
					.ok_or_else(|| Error::invalid_spec(format!("no cluster for server group {asg_name}")))?;
				Lookup::ServerGroup {
					asg_name: asg_name.to_string(),
					cluster,
				}
			}
			(None, None) => {
				return Err(Error::invalid_spec(
					"a target specification needs either a target or an asgName",
				));
			}
		};

		let app = spec
			.app()
			.ok_or_else(|| Error::invalid_spec("no app given or derivable from the asgName or cluster"))?;

		let credentials = spec
			.credentials
			.clone()
			.filter(|c| !c.is_empty())
			.ok_or_else(|| Error::invalid_spec("no credentials"))?;

		Ok(Self {
			app,
			credentials,
			cloud_provider: spec.cloud_provider.clone(),
			lookup,
		})
	}
}

// endregion: --- ResolvePlan
