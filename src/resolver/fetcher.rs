use crate::resolver::RetryConfig;
use crate::webc::{self, WebResponse};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio::time::{Instant, sleep};

/// The non-failure outcomes of a fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
	Found(T),
	/// The inventory answered 404.
	NotFound,
}

impl<T> Fetched<T> {
	pub fn found(self) -> Option<T> {
		match self {
			Self::Found(value) => Some(value),
			Self::NotFound => None,
		}
	}

	pub const fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound)
	}
}

/// Runs one inventory call with a bounded retry and decodes its response.
///
/// - 404: `Fetched::NotFound` right away (no retry, no wait).
/// - transport failure: wait `backoff` and retry, up to `max_attempts` in total,
///   then `Error::Transport`.
/// - any other failure: `Error::WebCall` right away.
/// - a 2xx body not matching `T`: `Error::Deserialization` right away.
///
/// The fetcher holds no mutable state, so one instance can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RetryingFetcher {
	config: RetryConfig,
}

/// Constructors
impl RetryingFetcher {
	pub fn new(config: RetryConfig) -> Self {
		Self { config }
	}
}

/// Getters
impl RetryingFetcher {
	pub fn config(&self) -> &RetryConfig {
		&self.config
	}
}

impl RetryingFetcher {
	/// Fetch a `T` with `fetch_op`, which performs exactly one remote call per invocation.
	pub async fn fetch<T, F, Fut>(&self, fetch_op: F) -> Result<Fetched<T>>
	where
		T: DeserializeOwned,
		F: Fn() -> Fut,
		Fut: Future<Output = webc::Result<WebResponse>>,
	{
		let shape = std::any::type_name::<T>();
		let max_attempts = self.config.max_attempts.max(1);
		let backoff = self.config.backoff;
		let started = Instant::now();
		let mut attempt: u32 = 0;

		loop {
			attempt += 1;

			let webc_error = match fetch_op().await {
				Ok(web_response) => return decode::<T>(shape, web_response).map(Fetched::Found),
				Err(webc_error) => webc_error,
			};

			if webc_error.is_not_found() {
				tracing::debug!(shape, attempt, "inventory answered not found");
				return Ok(Fetched::NotFound);
			}

			if !webc_error.is_transport() {
				return Err(Error::WebCall { shape, webc_error });
			}

			if attempt >= max_attempts {
				tracing::warn!(shape, attempt, error = %webc_error, "inventory call failed, no attempt left");
				return Err(Error::Transport {
					shape,
					attempts: attempt,
					webc_error,
				});
			}

			if let Some(deadline) = self.config.deadline {
				let elapsed = started.elapsed();
				if elapsed + backoff > deadline {
					return Err(Error::FetchDeadlineExceeded {
						shape,
						attempts: attempt,
						elapsed,
						deadline,
					});
				}
			}

			tracing::warn!(
				shape,
				attempt,
				max_attempts,
				backoff_ms = backoff.as_millis() as u64,
				error = %webc_error,
				"inventory call failed, retrying"
			);
			sleep(backoff).await;
		}
	}
}

fn decode<T: DeserializeOwned>(shape: &'static str, web_response: WebResponse) -> Result<T> {
	let WebResponse { url, body, .. } = web_response;
	T::deserialize(&body).map_err(|cause| Error::Deserialization {
		url,
		body: body.to_string(),
		shape,
		cause,
	})
}

// region:    --- Tests


// endregion: --- Tests
