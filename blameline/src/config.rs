//! TOML-file configuration store.
//!
//! The config file holds the blame settings under their dotted keys plus a
//! few host-only keys:
//!
//! ```toml
//! "git.blame.decorations" = "line"
//! base_url = "https://github.com/owner/repo/"
//! theme = "dark"
//! ```
//!
//! A missing or unparsable file reads as empty. Config errors are soft
//! failures logged as warnings; they never stop the annotator.

use std::path::{Path, PathBuf};

use blameline_core::settings::DECORATIONS_KEY;
use blameline_core::{ConfigStore, DecorationMode, Error, Settings};
use url::Url;

/// Returns the path to the blameline config file.
///
/// Prefers `$XDG_CONFIG_HOME/blameline/config.toml`; falls back to
/// `~/.config/blameline/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("blameline").join("config.toml")
}

/// Settings persisted in a TOML file.
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    table: toml::Table,
}

impl TomlConfigStore {
    /// Reads the config at `path`. Never fails; see the module docs.
    pub fn load(path: PathBuf) -> Self {
        let table = match std::fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str::<toml::Table>(&raw) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "config parse error");
                    toml::Table::new()
                }
            },
            Err(_) => toml::Table::new(),
        };
        Self { path, table }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Code-host base URL for commit links, from the `base_url` key.
    pub fn base_url(&self) -> Option<Url> {
        let raw = self.table.get("base_url")?.as_str()?;
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(base_url = raw, error = %e, "ignoring invalid base_url");
                None
            }
        }
    }

    /// Theme name from the `theme` key.
    pub fn theme(&self) -> Option<&str> {
        self.table.get("theme")?.as_str()
    }

    fn write(&self) -> std::io::Result<()> {
        let raw = toml::to_string(&self.table)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, raw)
    }
}

impl ConfigStore for TomlConfigStore {
    fn settings(&self) -> Settings {
        match toml::Value::Table(self.table.clone()).try_into() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "invalid blame settings");
                Settings::default()
            }
        }
    }

    fn update(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let config_error = |message: String| Error::ConfigUpdate { key: key.to_owned(), message };
        if key != DECORATIONS_KEY {
            return Err(config_error("unknown setting".to_owned()));
        }
        let mode: DecorationMode = value.parse().map_err(config_error)?;

        let previous = self
            .table
            .insert(key.to_owned(), toml::Value::String(mode.as_str().to_owned()));
        if let Err(e) = self.write() {
            match previous {
                Some(v) => self.table.insert(key.to_owned(), v),
                None => self.table.remove(key),
            };
            return Err(config_error(format!("{}: {e}", self.path.display())));
        }
        Ok(())
    }
}
