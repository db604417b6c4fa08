//! Service layer of the booking store.
//! - `file::booking_store` is the engine: an in-memory map of users, events
//!   and tickets loaded from and saved to one JSON file.
//! - `booking::BookingRepository` is the seam callers program against.
//! - Errors are typed (`errors::ServiceError`); booking conflicts are not errors.

pub mod errors;
pub mod pagination;
pub mod ids;
pub mod storage;
pub mod booking;
pub mod file;

pub use booking::{BookingRepository, StoreStats};
pub use errors::ServiceError;
pub use file::booking_store::FileBookingStore;
pub use pagination::Pagination;
