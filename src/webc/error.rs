use derive_more::{Display, From};
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[display("Response failed with status {status}: {body}")]
	ResponseFailedStatus { status: StatusCode, body: String },

	/// The connection failed while the body of a response was being read.
	#[display("Response body read failed (status {status}): {cause}")]
	ResponseBodyFailed { status: StatusCode, cause: reqwest::Error },

	#[display("Response body is not JSON ({cause}): {body}")]
	ResponseFailedNotJson { body: String, cause: String },

	#[display("Invalid url '{url}': {cause}")]
	InvalidUrl { url: String, cause: String },

	// -- Externals
	#[from]
	#[display("{_0}")]
	Reqwest(reqwest::Error),
}

/// Classification
impl Error {
	/// The remote side answered "no such resource".
	#[must_use]
	pub fn is_not_found(&self) -> bool {
		match self {
			Self::ResponseFailedStatus { status, .. } => *status == StatusCode::NOT_FOUND,
			Self::Reqwest(err) => err.status() == Some(StatusCode::NOT_FOUND),
			_ => false,
		}
	}

	/// Network-class failure that may succeed on a later attempt.
	///
	/// Any non-2xx status other than 404, and any connection, timeout, request-send, or
	/// body-read failure, is transport-class. Malformed bodies and invalid urls are not.
	#[must_use]
	pub fn is_transport(&self) -> bool {
		match self {
			Self::ResponseFailedStatus { .. } => !self.is_not_found(),
			Self::ResponseBodyFailed { .. } => true,
			Self::ResponseFailedNotJson { .. } | Self::InvalidUrl { .. } => false,
			Self::Reqwest(err) => {
				if err.is_timeout() || err.is_connect() {
					true
				} else if err.is_builder() || err.is_decode() || err.is_redirect() {
					false
				} else if err.is_status() {
					!self.is_not_found()
				} else {
					err.is_request() || err.is_body()
				}
			}
		}
	}
}

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
