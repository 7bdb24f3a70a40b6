use std::time::Duration;

/// Retry settings for one inventory call.
///
/// Defaults: 5 attempts in total, a fixed 150 ms wait between attempts, no deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
	/// Total attempts, the first one included. Values below 1 count as 1.
	pub max_attempts: u32,

	/// Fixed wait between two attempts.
	pub backoff: Duration,

	/// When set, no new attempt starts once waiting for it would cross this duration
	/// (measured from the first attempt). An attempt in flight is never interrupted.
	pub deadline: Option<Duration>,
}

impl RetryConfig {
	pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
	pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(150);
}

impl Default for RetryConfig {
	fn default() -> Self {
		Self {
			max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
			backoff: Self::DEFAULT_BACKOFF,
			deadline: None,
		}
	}
}

/// Chainable Setters
impl RetryConfig {
	#[must_use]
	pub const fn with_max_attempts(mut self, value: u32) -> Self {
		self.max_attempts = value;
		self
	}

	#[must_use]
	pub const fn with_backoff(mut self, value: Duration) -> Self {
		self.backoff = value;
		self
	}

	#[must_use]
	pub const fn with_deadline(mut self, value: Duration) -> Self {
		self.deadline = Some(value);
		self
	}
}
