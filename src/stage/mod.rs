//! Read-only view of a pipeline execution: its stages, their parent links and contexts.
//!
//! The orchestration engine owns and mutates executions; this crate only searches
//! a snapshot of one (or holds a read lock on it, see `resolver::ExecutionHistorySearch`).

// region:    --- Modules

mod execution;
mod stage_node;

pub use execution::*;
pub use stage_node::*;

// endregion: --- Modules
