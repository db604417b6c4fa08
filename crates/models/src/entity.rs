use serde::{de::DeserializeOwned, Serialize};

use crate::key::{make_key, EntityKind};
use crate::{Event, Ticket, User};

/// Any value the store can hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    User(User),
    Event(Event),
    Ticket(Ticket),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::User(_) => EntityKind::User,
            Entity::Event(_) => EntityKind::Event,
            Entity::Ticket(_) => EntityKind::Ticket,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Entity::User(u) => u.id,
            Entity::Event(e) => e.id,
            Entity::Ticket(t) => t.id,
        }
    }

    pub fn key(&self) -> String {
        make_key(self.kind(), self.id())
    }
}

impl From<&Entity> for EntityKind {
    fn from(entity: &Entity) -> Self { entity.kind() }
}

impl From<User> for Entity {
    fn from(u: User) -> Self { Entity::User(u) }
}

impl From<Event> for Entity {
    fn from(e: Event) -> Self { Entity::Event(e) }
}

impl From<Ticket> for Entity {
    fn from(t: Ticket) -> Self { Entity::Ticket(t) }
}

/// Typed access to one entity kind, used by the store's generic CRUD paths.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    fn into_entity(self) -> Entity;

    fn from_entity(entity: &Entity) -> Option<&Self>;

    /// Bring the record to the form the storage format can represent. Called
    /// on every write into the store.
    fn normalize(&mut self) {}

    fn key(&self) -> String {
        make_key(Self::KIND, self.id())
    }
}
