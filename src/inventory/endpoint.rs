use std::sync::Arc;

/// The base url of the inventory service.
/// It is designed to be efficiently clonable.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
	inner: Arc<str>,
}

impl Endpoint {
	/// Environment variable read by `Endpoint::from_env`.
	pub const BASE_URL_ENV_NAME: &'static str = "INVENTORY_BASE_URL";
	pub const DEFAULT_BASE_URL: &'static str = "http://localhost:7002/";
}

/// Constructors
impl Endpoint {
	#[must_use]
	pub fn from_static(url: &'static str) -> Self {
		Self { inner: Arc::from(url) }
	}

	pub fn from_owned(url: impl Into<Arc<str>>) -> Self {
		Self { inner: url.into() }
	}

	/// The url in `INVENTORY_BASE_URL`, or the default local inventory url.
	#[must_use]
	pub fn from_env() -> Self {
		Self::from_env_or(Self::BASE_URL_ENV_NAME, Self::DEFAULT_BASE_URL)
	}

	/// The url in the `env_name` environment variable, or `default_url` when unset or empty.
	#[must_use]
	pub fn from_env_or(env_name: &str, default_url: &'static str) -> Self {
		match std::env::var(env_name) {
			Ok(url) if !url.trim().is_empty() => Self::from_owned(url.trim()),
			_ => Self::from_static(default_url),
		}
	}
}

/// Getters
impl Endpoint {
	#[must_use]
	pub fn base_url(&self) -> &str {
		&self.inner
	}
}

impl Default for Endpoint {
	fn default() -> Self {
		Self::from_static(Self::DEFAULT_BASE_URL)
	}
}
