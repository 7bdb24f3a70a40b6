use crate::resolver::RetryConfig;

/// Settings of a `TargetResolver`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
	/// Retry settings applied to every inventory call.
	pub retry: RetryConfig,

	/// Resolve the locations of one spec concurrently.
	/// Results keep the order of the requested locations either way.
	pub parallel_locations: bool,
}

/// Chainable Setters
impl ResolverConfig {
	#[must_use]
	pub fn with_retry(mut self, retry: RetryConfig) -> Self {
		self.retry = retry;
		self
	}

	#[must_use]
	pub const fn with_parallel_locations(mut self, value: bool) -> Self {
		self.parallel_locations = value;
		self
	}
}
