//! The inventory module holds the boundary to the remote inventory service:
//! the `InventoryClient` trait (one remote call per query, no retry) and its HTTP implementation.

// region:    --- Modules

mod endpoint;
mod inventory_client;
mod web_inventory_client;

pub use endpoint::*;
pub use inventory_client::*;
pub use web_inventory_client::*;

// endregion: --- Modules
