use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::key::EntityKind;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Bar,
    #[default]
    Standard,
    Premium,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Bar => "BAR",
            Category::Standard => "STANDARD",
            Category::Premium => "PREMIUM",
        };
        f.write_str(s)
    }
}

/// A booked place. `(event_id, place)` is unique among stored tickets;
/// `event_id` and `user_id` are plain references, not checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub category: Category,
    pub place: i32,
}

impl Ticket {
    pub fn new(id: i64, event_id: i64, user_id: i64, category: Category, place: i32) -> Self {
        Self { id, event_id, user_id, category, place }
    }

    pub fn occupies(&self, event_id: i64, place: i32) -> bool {
        self.event_id == event_id && self.place == place
    }
}

impl From<&Ticket> for EntityKind {
    fn from(_: &Ticket) -> Self { EntityKind::Ticket }
}

impl Record for Ticket {
    const KIND: EntityKind = EntityKind::Ticket;

    fn id(&self) -> i64 { self.id }

    fn set_id(&mut self, id: i64) { self.id = id; }

    fn into_entity(self) -> Entity { Entity::Ticket(self) }

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Ticket(t) => Some(t),
            _ => None,
        }
    }
}
