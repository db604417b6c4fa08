//! File-backed implementations of the service traits.

pub mod booking_store;
