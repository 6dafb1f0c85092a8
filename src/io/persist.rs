//! Saving and loading headers and adapters
//!
//! Anything serde-serialisable can be written as JSON, YAML or TOML. The
//! format follows the file extension unless given explicitly. Files are
//! written through a temporary file in the same directory and renamed into
//! place, so a failed save never truncates an existing file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Serialisation formats for persisted objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFormat {
    Json,
    Yaml,
    Toml,
}

impl PersistFormat {
    /// Chooses a format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(PersistFormat::Json),
            Some("yaml") | Some("yml") => Ok(PersistFormat::Yaml),
            Some("toml") => Ok(PersistFormat::Toml),
            other => Err(Error::Format(format!(
                "cannot infer a format from extension {:?} of {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            PersistFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            PersistFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            PersistFormat::Toml => Ok(toml::to_string(value)?),
        }
    }

    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T> {
        match self {
            PersistFormat::Json => Ok(serde_json::from_str(text)?),
            PersistFormat::Yaml => Ok(serde_yaml::from_str(text)?),
            PersistFormat::Toml => Ok(toml::from_str(text)?),
        }
    }
}

/// Saves `value` to `path` in the format given by the extension
pub fn save<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    save_as(value, path, PersistFormat::from_path(path)?)
}

/// Saves `value` to `path` in `format`, replacing the file atomically
pub fn save_as<T: Serialize, P: AsRef<Path>>(
    value: &T,
    path: P,
    format: PersistFormat,
) -> Result<()> {
    let path = path.as_ref();
    let text = format.render(value)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(Error::Io)?;
    tmp.write_all(text.as_bytes()).map_err(Error::Io)?;
    tmp.as_file().sync_all().map_err(Error::Io)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::debug!("saved {:?} to {}", format, path.display());
    Ok(())
}

/// Loads a value from `path` in the format given by the extension
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    load_as(path, PersistFormat::from_path(path)?)
}

pub fn load_as<T: DeserializeOwned, P: AsRef<Path>>(path: P, format: PersistFormat) -> Result<T> {
    let text = fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
    format.parse(&text)
}
