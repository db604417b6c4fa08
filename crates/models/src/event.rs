use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::key::EntityKind;

/// A bookable event. `date` is kept at millisecond precision, which is what
/// the storage format can represent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

impl Event {
    pub fn new(id: i64, title: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self { id, title: title.into(), date: truncate_to_millis(date) }
    }

    /// Calendar day (UTC) the event takes place on.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

fn truncate_to_millis(date: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(date.timestamp_millis()).unwrap_or(date)
}

impl From<&Event> for EntityKind {
    fn from(_: &Event) -> Self { EntityKind::Event }
}

impl Record for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> i64 { self.id }

    fn set_id(&mut self, id: i64) { self.id = id; }

    fn into_entity(self) -> Entity { Entity::Event(self) }

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::Event(e) => Some(e),
            _ => None,
        }
    }

    fn normalize(&mut self) {
        self.date = truncate_to_millis(self.date);
    }
}
