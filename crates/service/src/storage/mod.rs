//! Storage abstractions for service layer
//!
//! File persistence for the booking store: the whole map is read once and
//! written back on demand as a single JSON document.

pub mod json_map_store;
