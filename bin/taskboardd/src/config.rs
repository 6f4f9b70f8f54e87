use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Server configuration, loaded from a TOML file:
///
/// ```toml
/// [storage]
/// data_dir = "/var/lib/taskboard"
/// ```
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Directory holding all persistent data.
    pub data_dir: String,

    /// Optional explicit path for the database file; defaults to
    /// `{data_dir}/data.redb`.
    #[serde(default)]
    pub db_path: Option<String>,
}

impl ServerConfig {
    /// Resolve a context name to `/etc/taskboard/<name>.toml`; anything
    /// containing a `/` or `.` is treated as a direct path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/taskboard/{name_or_path}.toml"))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_name_resolves_under_etc() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/taskboard/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
    }

    #[test]
    fn parses_minimal_config() {
        let config: ServerConfig =
            toml::from_str("[storage]\ndata_dir = \"/tmp/tb\"\n").unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/tb");
        assert!(config.storage.db_path.is_none());
    }
}
