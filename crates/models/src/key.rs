//! Storage keys: `"<kind>:<id>"`, e.g. `event:12345`.

use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

pub const KEY_SEPARATOR: char = ':';

/// The three entity kinds the store knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    User,
    Event,
    Ticket,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::User, EntityKind::Event, EntityKind::Ticket];

    /// Lowercase token used as key prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Event => "event",
            EntityKind::Ticket => "ticket",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::InvalidArgument(format!("unknown entity kind `{s}`")))
    }
}

/// Build the key for `kind` (an [`EntityKind`] or a reference to an entity) and `id`.
pub fn make_key<K: Into<EntityKind>>(kind: K, id: i64) -> String {
    format!("{}{}{}", kind.into().as_str(), KEY_SEPARATOR, id)
}

/// Like [`make_key`] but with the kind given by name; unknown names are rejected.
pub fn make_key_named(kind_name: &str, id: i64) -> Result<String, ModelError> {
    let kind: EntityKind = kind_name.parse()?;
    Ok(make_key(kind, id))
}

/// Everything before the first `:`; the whole key when there is none.
pub fn parse_kind(key: &str) -> &str {
    key.split_once(KEY_SEPARATOR).map(|(kind, _)| kind).unwrap_or(key)
}

/// Everything after the first `:`, as an integer.
pub fn parse_id(key: &str) -> Result<i64, ModelError> {
    let (_, raw) = key
        .split_once(KEY_SEPARATOR)
        .ok_or_else(|| ModelError::InvalidArgument(format!("key `{key}` has no `{KEY_SEPARATOR}`")))?;
    raw.parse::<i64>()
        .map_err(|e| ModelError::InvalidArgument(format!("key `{key}` has a non-numeric id: {e}")))
}

pub fn split_key(key: &str) -> Result<(EntityKind, i64), ModelError> {
    let kind = parse_kind(key).parse::<EntityKind>()?;
    let id = parse_id(key)?;
    Ok((kind, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Event, Ticket, User};
    use chrono::Utc;

    #[test]
    fn keys_from_entities() {
        let event = Event::new(12345, "Cinema", Utc::now());
        assert_eq!(make_key(&event, event.id), "event:12345");

        let user = User::new(12345, "Vasya", "vasya@gmail.com");
        assert_eq!(make_key(&user, user.id), "user:12345");

        let ticket = Ticket { id: 12345, ..Ticket::default() };
        assert_eq!(make_key(&ticket, ticket.id), "ticket:12345");
    }

    #[test]
    fn keys_from_kind_descriptors() {
        assert_eq!(make_key(EntityKind::Event, 12345), "event:12345");
        assert_eq!(make_key_named("Event", 12345).ok().as_deref(), Some("event:12345"));
        assert_eq!(make_key_named("ticket", 7).ok().as_deref(), Some("ticket:7"));
    }

    #[test]
    fn unknown_kind_is_invalid_argument() {
        assert!(matches!(make_key_named("String", 12345), Err(ModelError::InvalidArgument(_))));
        assert!(matches!("".parse::<EntityKind>(), Err(ModelError::InvalidArgument(_))));
    }

    #[test]
    fn parse_splits_on_first_separator() {
        assert_eq!(parse_kind("event:12345"), "event");
        assert_eq!(parse_id("event:12345"), Ok(12345));
        assert_eq!(parse_kind("noseparator"), "noseparator");
        assert!(parse_id("noseparator").is_err());
        assert!(parse_id("event:12:34").is_err());
        assert!(parse_id("event:abc").is_err());
        assert_eq!(split_key("user:-3"), Ok((EntityKind::User, -3)));
        assert!(split_key("order:1").is_err());
    }

    #[test]
    fn round_trip_for_all_kinds() {
        for kind in EntityKind::ALL {
            for id in [1_i64, 42, 12345, i64::MAX] {
                let key = make_key(kind, id);
                assert_eq!(parse_kind(&key), kind.as_str());
                assert_eq!(split_key(&key), Ok((kind, id)));
            }
        }
    }
}
