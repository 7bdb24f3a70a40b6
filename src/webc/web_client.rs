use crate::webc::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// Simple reqwest client wrapper for the inventory GET queries.
/// Cloning is cheap (the inner `reqwest::Client` is reference counted).
#[derive(Debug, Default, Clone)]
pub struct WebClient {
	reqwest_client: Client,
}

/// Constructors
impl WebClient {
	pub fn from_reqwest_client(reqwest_client: Client) -> Self {
		Self { reqwest_client }
	}

	/// Build a client where every request is bounded by `timeout`.
	pub fn with_request_timeout(timeout: Duration) -> Result<Self> {
		let reqwest_client = Client::builder().timeout(timeout).build()?;
		Ok(Self { reqwest_client })
	}
}

/// Web method implementations
impl WebClient {
	/// One GET request. Non-2xx statuses become `Error::ResponseFailedStatus`
	/// (404 included, classification is up to the caller).
	pub async fn do_get(&self, url: Url, headers: &[(String, String)]) -> Result<WebResponse> {
		tracing::trace!(target: "target_resolver_webc", "GET {url}");

		let mut reqwest_builder = self.reqwest_client.get(url);
		for (k, v) in headers {
			reqwest_builder = reqwest_builder.header(k, v);
		}

		let reqwest_res = reqwest_builder.send().await?;

		WebResponse::from_reqwest_response(reqwest_res).await
	}
}

// region:    --- WebResponse

/// A successful (2xx) response with its JSON body.
#[derive(Debug, Clone)]
pub struct WebResponse {
	pub status: StatusCode,
	pub url: String,
	pub body: Value,
}

impl WebResponse {
	pub(crate) async fn from_reqwest_response(res: Response) -> Result<WebResponse> {
		let status = res.status();
		let url = res.url().to_string();

		if !status.is_success() {
			// The status is what matters here, a truncated error body is not.
			let body = res.text().await.unwrap_or_default();
			return Err(Error::ResponseFailedStatus { status, body });
		}

		let is_json = res
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|v| v.to_str().ok())
			.map(|ct| ct.starts_with("application/json"))
			.unwrap_or(true);

		// JSON decoding happens below, so any failure here is on the connection.
		let text = res
			.text()
			.await
			.map_err(|cause| Error::ResponseBodyFailed { status, cause })?;
		// An empty 2xx body carries no record.
		let body = if text.trim().is_empty() {
			Value::Null
		} else {
			serde_json::from_str::<Value>(&text).map_err(|err| Error::ResponseFailedNotJson {
				body: text.clone(),
				cause: if is_json {
					err.to_string()
				} else {
					format!("non-json content type ({err})")
				},
			})?
		};

		Ok(WebResponse { status, url, body })
	}
}

// endregion: --- WebResponse

// region:    --- Url Support

/// Append path segments to `base_url`, percent-encoding each segment.
pub fn join_url_segments(base_url: &str, segments: &[&str]) -> Result<Url> {
	let mut url = Url::parse(base_url).map_err(|err| Error::InvalidUrl {
		url: base_url.to_string(),
		cause: err.to_string(),
	})?;

	url.path_segments_mut()
		.map_err(|()| Error::InvalidUrl {
			url: base_url.to_string(),
			cause: "url cannot be a base".to_string(),
		})?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

// endregion: --- Url Support

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_join_url_segments_ok() -> Result<()> {
		let url = join_url_segments("http://localhost:7002/", &["applications", "myapp", "a b"])?;
		assert_eq!(url.as_str(), "http://localhost:7002/applications/myapp/a%20b");

		let url = join_url_segments("http://inventory.example/api", &["applications"])?;
		assert_eq!(url.as_str(), "http://inventory.example/api/applications");
		Ok(())
	}

	#[test]
	fn test_join_url_segments_invalid_err() {
		let res = join_url_segments("not a url", &["applications"]);
		assert!(matches!(res, Err(Error::InvalidUrl { .. })));
	}
}
