//! The `webc` module is the thin web layer over `reqwest`.
//! It turns HTTP exchanges into `WebResponse` values or a classified `webc::Error`.

// region:    --- Modules

mod error;
mod web_client;

pub use self::error::{Error, Result};
pub use web_client::*;

// endregion: --- Modules
