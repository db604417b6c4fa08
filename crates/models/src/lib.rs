//! Domain model of the booking store: users, events and tickets, the storage
//! key scheme and the canonical JSON codec.

pub mod codec;
pub mod entity;
pub mod errors;
pub mod event;
pub mod key;
pub mod ticket;
pub mod user;

pub use entity::{Entity, Record};
pub use errors::ModelError;
pub use event::Event;
pub use key::EntityKind;
pub use ticket::{Category, Ticket};
pub use user::User;
