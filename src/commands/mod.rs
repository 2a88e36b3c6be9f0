//! Commands Layer
//!
//! Handlers that bridge the UI to the services, one per user gesture.

mod checklist_cmd;
mod stats_cmd;

pub use checklist_cmd::*;
pub use stats_cmd::*;
