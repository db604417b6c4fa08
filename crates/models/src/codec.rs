//! Canonical JSON for stored entities.
//!
//! Field order follows the struct declarations (`id` first), dates are epoch
//! milliseconds and categories their upper-case name, so encoding the same
//! entity twice yields identical bytes.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::entity::{Entity, Record};
use crate::errors::ModelError;
use crate::key::{parse_kind, EntityKind};
use crate::{Event, Ticket, User};

pub fn encode(entity: &Entity) -> Result<String, ModelError> {
    match entity {
        Entity::User(u) => encode_record(u),
        Entity::Event(e) => encode_record(e),
        Entity::Ticket(t) => encode_record(t),
    }
}

pub fn encode_record<T: Record>(record: &T) -> Result<String, ModelError> {
    serde_json::to_string(record)
        .map_err(|e| ModelError::MalformedRecord(format!("cannot encode {} {}: {e}", T::KIND, record.id())))
}

pub fn decode(kind: EntityKind, json: &str) -> Result<Entity, ModelError> {
    let entity = match kind {
        EntityKind::User => Entity::User(decode_as::<User>(kind, json)?),
        EntityKind::Event => Entity::Event(decode_as::<Event>(kind, json)?),
        EntityKind::Ticket => Entity::Ticket(decode_as::<Ticket>(kind, json)?),
    };
    Ok(entity)
}

fn decode_as<T: DeserializeOwned>(kind: EntityKind, json: &str) -> Result<T, ModelError> {
    serde_json::from_str(json).map_err(|e| ModelError::MalformedRecord(format!("{kind}: {e}")))
}

/// Decode a raw `key -> json` image.
///
/// Entries whose key names an unknown kind are skipped. An entry stored under
/// a key that disagrees with its own id is moved to the entity's key; two
/// entries ending up under the same key fail the batch.
pub fn decode_batch<I>(raw: I) -> Result<HashMap<String, Entity>, ModelError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut out = HashMap::new();
    for (key, json) in raw {
        let kind = match parse_kind(&key).parse::<EntityKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!(%key, "skipping entry with unrecognized kind");
                continue;
            }
        };
        let entity = decode(kind, &json)
            .map_err(|e| ModelError::MalformedRecord(format!("entry `{key}`: {e}")))?;
        let own_key = entity.key();
        if own_key != key {
            warn!(%key, %own_key, "stored key disagrees with entity id; re-keying");
        }
        if out.contains_key(&own_key) {
            return Err(ModelError::MalformedRecord(format!(
                "entry `{key}` collides with another entry already stored as `{own_key}`"
            )));
        }
        out.insert(own_key, entity);
    }
    Ok(out)
}
