//! Some support utilities for the tests
//! Note: Must be imported in each test file

#![allow(unused)] // For test support

// region:    --- Modules

mod mock_inventory;
mod seeders;

pub use mock_inventory::*;
pub use seeders::*;

pub type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

// endregion: --- Modules

// region:    --- Tracing

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize tracing to the test output (visible with `--nocapture`).
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
	let _ = FmtSubscriber::builder()
		.with_env_filter(
			EnvFilter::from_default_env()
				.add_directive("target_resolver=debug".parse().expect("Invalid tracing directive")),
		)
		.with_test_writer()
		.try_init();
}

// endregion: --- Tracing
