use reqwest::StatusCode;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use target_resolver::inventory::{InventoryClient, ServerGroupsQuery, TargetServerGroupQuery};
use target_resolver::webc::{self, WebResponse};
use tokio::time::Instant;

/// What the mock inventory answers to one call.
#[derive(Debug, Clone)]
pub enum Reply {
	/// 200 with this JSON body.
	Record(Value),
	/// 404
	NotFound,
	/// 503 (transport-class, retried by the fetcher)
	Unavailable,
	/// 200 with a body that is not JSON.
	NotJson,
}

/// In-memory `InventoryClient` with scripted replies and recorded calls.
///
/// Routes are keyed like the remote paths they stand for:
/// - `target/{location}/{target}` for `get_target_server_group`
/// - `server_groups/{asg_name}` for `get_server_groups`
///
/// Each route serves its scripted replies in order, the last one repeating.
/// An unscripted route answers 404.
#[derive(Debug, Default)]
pub struct MockInventory {
	replies: Mutex<HashMap<String, VecDeque<Reply>>>,
	delays: HashMap<String, Duration>,
	calls: Mutex<Vec<String>>,
	call_instants: Mutex<Vec<Instant>>,
	target_queries: Mutex<Vec<TargetServerGroupQuery>>,
	server_groups_queries: Mutex<Vec<ServerGroupsQuery>>,
}

/// Builders
impl MockInventory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_replies(self, route: impl Into<String>, replies: impl IntoIterator<Item = Reply>) -> Self {
		if let Ok(mut all) = self.replies.lock() {
			all.insert(route.into(), replies.into_iter().collect());
		}
		self
	}

	pub fn with_reply(self, route: impl Into<String>, reply: Reply) -> Self {
		self.with_replies(route, [reply])
	}

	/// Delay every answer of `route` (paired with a paused tokio clock).
	pub fn with_delay(mut self, route: impl Into<String>, delay: Duration) -> Self {
		self.delays.insert(route.into(), delay);
		self
	}
}

/// Recorded calls
impl MockInventory {
	/// The routes called, in call order.
	pub fn calls(&self) -> Vec<String> {
		self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
	}

	pub fn call_count(&self) -> usize {
		self.calls().len()
	}

	/// The time between each call and the previous one.
	pub fn call_gaps(&self) -> Vec<Duration> {
		let instants = self.call_instants.lock().map(|i| i.clone()).unwrap_or_default();
		instants.windows(2).map(|pair| pair[1] - pair[0]).collect()
	}

	pub fn target_queries(&self) -> Vec<TargetServerGroupQuery> {
		self.target_queries.lock().map(|q| q.clone()).unwrap_or_default()
	}

	pub fn server_groups_queries(&self) -> Vec<ServerGroupsQuery> {
		self.server_groups_queries.lock().map(|q| q.clone()).unwrap_or_default()
	}
}

impl MockInventory {
	async fn answer(&self, route: String) -> webc::Result<WebResponse> {
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(route.clone());
		}
		if let Ok(mut instants) = self.call_instants.lock() {
			instants.push(Instant::now());
		}

		let reply = self.next_reply(&route);

		if let Some(delay) = self.delays.get(&route) {
			tokio::time::sleep(*delay).await;
		}

		let url = format!("http://inventory.test/{route}");
		match reply {
			Reply::Record(body) => Ok(WebResponse {
				status: StatusCode::OK,
				url,
				body,
			}),
			Reply::NotFound => Err(webc::Error::ResponseFailedStatus {
				status: StatusCode::NOT_FOUND,
				body: String::new(),
			}),
			Reply::Unavailable => Err(webc::Error::ResponseFailedStatus {
				status: StatusCode::SERVICE_UNAVAILABLE,
				body: "inventory unavailable".to_string(),
			}),
			Reply::NotJson => Err(webc::Error::ResponseFailedNotJson {
				body: "<html>oops</html>".to_string(),
				cause: "expected value at line 1 column 1".to_string(),
			}),
		}
	}

	fn next_reply(&self, route: &str) -> Reply {
		let Ok(mut all) = self.replies.lock() else {
			return Reply::Unavailable;
		};
		match all.get_mut(route) {
			Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Reply::NotFound),
			Some(queue) => queue.front().cloned().unwrap_or(Reply::NotFound),
			None => Reply::NotFound,
		}
	}
}

impl InventoryClient for MockInventory {
	async fn get_target_server_group(&self, query: &TargetServerGroupQuery) -> webc::Result<WebResponse> {
		if let Ok(mut queries) = self.target_queries.lock() {
			queries.push(query.clone());
		}
		self.answer(target_route(&query.location.value, query.target.as_str())).await
	}

	async fn get_server_groups(&self, query: &ServerGroupsQuery) -> webc::Result<WebResponse> {
		if let Ok(mut queries) = self.server_groups_queries.lock() {
			queries.push(query.clone());
		}
		self.answer(server_groups_route(&query.asg_name)).await
	}
}

pub fn target_route(location: &str, target: &str) -> String {
	format!("target/{location}/{target}")
}

pub fn server_groups_route(asg_name: &str) -> String {
	format!("server_groups/{asg_name}")
}
