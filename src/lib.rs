//! Dynamic deployment target resolution.
//!
//! Turns a declared target (an exact server group name, or a symbolic target such as
//! `current_asg_dynamic` for a cluster) into one concrete [`model::TargetServerGroup`] per
//! requested [`model::Location`], by querying an inventory service through an
//! [`inventory::InventoryClient`], or by reusing the targets a previous
//! "determine target" stage of the same [`stage::Execution`] already resolved.
//!
//! ```no_run
//! use target_resolver::inventory::WebInventoryClient;
//! use target_resolver::model::{CloudProvider, Location, TargetSpec};
//! use target_resolver::resolver::TargetResolver;
//!
//! # async fn run() -> target_resolver::Result<()> {
//! let resolver = TargetResolver::new(WebInventoryClient::from_env()?);
//! let spec = TargetSpec::from_asg_name("myapp-prod-v003")
//! 	.with_credentials("prod")
//! 	.with_cloud_provider(CloudProvider::aws())
//! 	.with_locations(vec![Location::region("us-east-1")]);
//! let targets = resolver.resolve_by_params(Some(&spec)).await?;
//! # Ok(())
//! # }
//! ```

// region:    --- Modules

mod error;

pub use error::{Error, Result};

pub mod inventory;
pub mod model;
pub mod resolver;
pub mod stage;
pub mod webc;

// endregion: --- Modules
