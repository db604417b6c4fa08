use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Record};
use crate::key::EntityKind;

/// A registered user; `email` is unique across the store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id, name: name.into(), email: email.into() }
    }
}

impl From<&User> for EntityKind {
    fn from(_: &User) -> Self { EntityKind::User }
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> i64 { self.id }

    fn set_id(&mut self, id: i64) { self.id = id; }

    fn into_entity(self) -> Entity { Entity::User(self) }

    fn from_entity(entity: &Entity) -> Option<&Self> {
        match entity {
            Entity::User(u) => Some(u),
            _ => None,
        }
    }
}
