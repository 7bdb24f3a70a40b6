use crate::inventory::{Endpoint, InventoryClient, ServerGroupsQuery, TargetServerGroupQuery};
use crate::webc::{self, WebClient, WebResponse, join_url_segments};
use std::time::Duration;

/// `InventoryClient` over HTTP.
///
/// - target:        `GET {base}/applications/{app}/clusters/{credentials}/{cluster}/{cloudProvider}/{location}/serverGroups/target/{target}`
/// - server groups: `GET {base}/applications/{app}/clusters/{credentials}/{cluster}/{cloudProvider}/serverGroups/{asgName}[?region=]`
#[derive(Debug, Clone)]
pub struct WebInventoryClient {
	endpoint: Endpoint,
	web_client: WebClient,
	headers: Vec<(String, String)>,
}

/// Constructors
impl WebInventoryClient {
	pub fn new(endpoint: Endpoint) -> Self {
		Self {
			endpoint,
			web_client: WebClient::default(),
			headers: vec![("Accept".to_string(), "application/json".to_string())],
		}
	}

	/// Client for the endpoint in `INVENTORY_BASE_URL` (or the default local inventory).
	/// Fails when the configured url does not parse.
	pub fn from_env() -> crate::Result<Self> {
		let endpoint = Endpoint::from_env();
		join_url_segments(endpoint.base_url(), &[]).map_err(|webc_error| crate::Error::WebCall {
			shape: "WebInventoryClient",
			webc_error,
		})?;
		Ok(Self::new(endpoint))
	}

	pub fn builder() -> WebInventoryClientBuilder {
		WebInventoryClientBuilder::default()
	}
}

/// Getters
impl WebInventoryClient {
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}
}

/// Url builders
impl WebInventoryClient {
	pub fn target_server_group_url(&self, query: &TargetServerGroupQuery) -> webc::Result<reqwest::Url> {
		join_url_segments(
			self.endpoint.base_url(),
			&[
				"applications",
				query.app.as_str(),
				"clusters",
				query.credentials.as_str(),
				query.cluster.as_str(),
				query.cloud_provider.as_str(),
				query.location.value.as_str(),
				"serverGroups",
				"target",
				query.target.as_str(),
			],
		)
	}

	pub fn server_groups_url(&self, query: &ServerGroupsQuery) -> webc::Result<reqwest::Url> {
		let mut url = join_url_segments(
			self.endpoint.base_url(),
			&[
				"applications",
				query.app.as_str(),
				"clusters",
				query.credentials.as_str(),
				query.cluster.as_str(),
				query.cloud_provider.as_str(),
				"serverGroups",
				query.asg_name.as_str(),
			],
		)?;
		if let Some(region) = query.region.as_deref().filter(|r| !r.is_empty()) {
			url.query_pairs_mut().append_pair("region", region);
		}
		Ok(url)
	}
}

impl InventoryClient for WebInventoryClient {
	async fn get_target_server_group(&self, query: &TargetServerGroupQuery) -> webc::Result<WebResponse> {
		let url = self.target_server_group_url(query)?;
		self.web_client.do_get(url, &self.headers).await
	}

	async fn get_server_groups(&self, query: &ServerGroupsQuery) -> webc::Result<WebResponse> {
		let url = self.server_groups_url(query)?;
		self.web_client.do_get(url, &self.headers).await
	}
}

// region:    --- Builder

#[derive(Debug, Default)]
pub struct WebInventoryClientBuilder {
	endpoint: Option<Endpoint>,
	reqwest_client: Option<reqwest::Client>,
	request_timeout: Option<Duration>,
	headers: Vec<(String, String)>,
}

impl WebInventoryClientBuilder {
	#[must_use]
	pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
		self.endpoint = Some(endpoint);
		self
	}

	/// Use a caller-configured `reqwest::Client` (proxies, TLS, pools).
	/// Takes precedence over `with_request_timeout`.
	#[must_use]
	pub fn with_reqwest_client(mut self, reqwest_client: reqwest::Client) -> Self {
		self.reqwest_client = Some(reqwest_client);
		self
	}

	/// Bound every inventory request. Without it, a hung call is only bounded by the caller.
	#[must_use]
	pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = Some(timeout);
		self
	}

	#[must_use]
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}

	pub fn build(self) -> crate::Result<WebInventoryClient> {
		let web_client = match (self.reqwest_client, self.request_timeout) {
			(Some(reqwest_client), _) => WebClient::from_reqwest_client(reqwest_client),
			(None, Some(timeout)) => WebClient::with_request_timeout(timeout).map_err(|webc_error| {
				crate::Error::WebCall {
					shape: "WebInventoryClient",
					webc_error,
				}
			})?,
			(None, None) => WebClient::default(),
		};

		let mut client = WebInventoryClient::new(self.endpoint.unwrap_or_else(Endpoint::from_env));
		client.web_client = web_client;
		client.headers.extend(self.headers);
		Ok(client)
	}
}

// endregion: --- Builder
