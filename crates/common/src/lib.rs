//! Shared runtime helpers for the booking workspace: logging setup and
//! data directory checks used by the binary and the storage layer.

pub mod env;
pub mod utils;
