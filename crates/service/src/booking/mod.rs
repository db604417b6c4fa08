//! Booking operations as seen by callers (facade, HTTP layer, CLI).

pub mod repository;

pub use repository::{BookingRepository, StoreStats};
