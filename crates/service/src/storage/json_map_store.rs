use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use models::{codec, Entity};
use serde_json::Value;
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;

/// JSON file holding the whole store image.
///
/// On disk the file is one object: member names are storage keys and member
/// values are JSON strings containing each entity's own encoded JSON, e.g.
/// `{"user:1": "{\"id\":1,\"name\":\"Ann\",\"email\":\"ann@x\"}"}`.
#[derive(Clone, Debug)]
pub struct JsonMapFile {
    file_path: PathBuf,
}

impl JsonMapFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the raw `key -> encoded entity` image.
    ///
    /// A missing or blank file is an empty image. Members holding an inline
    /// object instead of a string are accepted and re-serialized.
    pub async fn load(&self) -> Result<HashMap<String, String>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "storage file absent");
                return Ok(HashMap::new());
            }
            Err(e) => return Err(ServiceError::io(&self.file_path, e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }

        let members: serde_json::Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::io(&self.file_path, e))?;
        members
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(json) => Ok((key, json)),
                obj @ Value::Object(_) => Ok((key, obj.to_string())),
                other => Err(ServiceError::io(
                    &self.file_path,
                    format!("member `{key}` is neither a string nor an object: {other}"),
                )),
            })
            .collect()
    }

    /// Encode every entity and overwrite the file. Keys are written sorted.
    pub async fn save(&self, entities: &HashMap<String, Entity>) -> Result<usize, ServiceError> {
        let mut image = BTreeMap::new();
        for (key, entity) in entities {
            image.insert(key.as_str(), codec::encode(entity)?);
        }
        let data = serde_json::to_vec(&image).map_err(|e| ServiceError::io(&self.file_path, e))?;

        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| ServiceError::io(parent, e))?;
        }
        fs::write(&self.file_path, data).await.map_err(|e| ServiceError::io(&self.file_path, e))?;
        Ok(image.len())
    }
}
