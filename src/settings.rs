use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Source identifier stamped on every record; also the default input
    /// file inside `data_dir`.
    pub source_file_name: Option<String>,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

/// Defaults, then `faq_loader.toml` if present, then `FAQ_*` variables.
pub fn load() -> Result<Settings> {
    Config::builder()
        .set_default("data_dir", "../data")?
        .set_default("db_path", "data/faq.sqlite")?
        .add_source(File::with_name("faq_loader").required(false))
        .add_source(Environment::with_prefix("FAQ"))
        .build()
        .context("Failed to load settings")?
        .try_deserialize()
        .context("Invalid settings")
}

impl Settings {
    /// Document read when no input file is given.
    pub fn default_input(&self) -> Option<PathBuf> {
        self.source_file_name
            .as_ref()
            .map(|name| self.data_dir.join(name))
    }

    /// Identifier for records of `path`: explicit override, then the
    /// configured name, then the file name itself.
    pub fn source_for(&self, path: &Path, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_string)
            .or_else(|| self.source_file_name.clone())
            .unwrap_or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
    }
}
