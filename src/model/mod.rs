//! The model module contains the value types of target resolution:
//! where a server group lives (`Location`), what to resolve (`TargetSpec`, `Target`),
//! and what was resolved (`TargetServerGroup`).

// region:    --- Modules

mod cloud_provider;
mod location;
mod server_group_name;
mod target_server_group;
mod target_spec;

// -- Flatten
pub use cloud_provider::*;
pub use location::*;
pub use server_group_name::*;
pub use target_server_group::*;
pub use target_spec::*;

// endregion: --- Modules
