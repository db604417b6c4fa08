use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// How the store picks ids for new users, events and tickets.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Uniform draw from `1..=i64::MAX`, retried on collision.
    #[default]
    Random,
    /// Counter seeded one past the highest id present at load.
    Sequential,
}

impl std::str::FromStr for IdStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(IdStrategy::Random),
            "sequential" => Ok(IdStrategy::Sequential),
            other => Err(anyhow!("unknown id strategy `{other}` (expected random|sequential)")),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default)]
    pub save_on_shutdown: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: default_storage_path(), id_strategy: IdStrategy::default(), save_on_shutdown: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { worker_threads: Some(2) }
    }
}

fn default_storage_path() -> String { "data/storage.json".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`), falling back to defaults when the
    /// file is missing, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.storage.normalize_from_env()?;
        self.storage.validate()?;
        self.runtime.normalize();
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl StorageConfig {
    /// `BOOKING_STORAGE_PATH` and `BOOKING_ID_STRATEGY` win over the file.
    pub fn normalize_from_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("BOOKING_STORAGE_PATH") {
            if !path.trim().is_empty() {
                self.path = path;
            }
        }
        if let Ok(strategy) = std::env::var("BOOKING_ID_STRATEGY") {
            self.id_strategy = strategy.parse()?;
        }
        self.path = self.path.trim().to_string();
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.is_empty() {
            return Err(anyhow!("storage.path is empty; set it in config.toml or BOOKING_STORAGE_PATH"));
        }
        if !self.path.to_lowercase().ends_with(".json") {
            return Err(anyhow!("storage.path must point to a .json file"));
        }
        Ok(())
    }
}

impl RuntimeConfig {
    fn normalize(&mut self) {
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(2),
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() -> Result<()> {
        let cfg = load_from_str("")?;
        assert_eq!(cfg.storage.path, "data/storage.json");
        assert_eq!(cfg.storage.id_strategy, IdStrategy::Random);
        assert!(!cfg.storage.save_on_shutdown);
        Ok(())
    }

    #[test]
    fn parses_storage_section() -> Result<()> {
        let cfg = load_from_str(
            r#"
            [storage]
            path = "var/booking.json"
            id_strategy = "sequential"
            save_on_shutdown = true

            [runtime]
            worker_threads = 0
            "#,
        )?;
        assert_eq!(cfg.storage.path, "var/booking.json");
        assert_eq!(cfg.storage.id_strategy, IdStrategy::Sequential);
        assert!(cfg.storage.save_on_shutdown);

        let mut cfg = cfg;
        cfg.runtime.normalize();
        assert_eq!(cfg.runtime.worker_threads, Some(2));
        Ok(())
    }

    #[test]
    fn rejects_unknown_strategy_and_bad_path() {
        assert!("weird".parse::<IdStrategy>().is_err());
        assert_eq!("Sequential".parse::<IdStrategy>().ok(), Some(IdStrategy::Sequential));

        let bad = StorageConfig { path: "data/storage.txt".into(), ..StorageConfig::default() };
        assert!(bad.validate().is_err());
        let empty = StorageConfig { path: String::new(), ..StorageConfig::default() };
        assert!(empty.validate().is_err());
        assert!(StorageConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = load_from_file("/nonexistent/booking-config.toml").err();
        assert!(err.as_ref().map(is_not_found).unwrap_or(false));
    }
}
