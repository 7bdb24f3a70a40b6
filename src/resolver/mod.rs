//! Resolution of target specifications into concrete server groups.
//!
//! - `TargetResolver` queries the inventory, one server group per requested location.
//! - `RetryingFetcher` wraps each inventory call with a bounded retry.
//! - `ExecutionHistorySearch` reuses the targets a previous stage of the execution resolved.

// region:    --- Modules

mod fetcher;
mod history;
mod resolver_config;
mod retry_config;
mod target_resolver;

pub use fetcher::*;
pub use history::*;
pub use resolver_config::*;
pub use retry_config::*;
pub use target_resolver::*;

// endregion: --- Modules
