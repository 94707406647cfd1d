use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use super::selected::SelectedCreature;
use crate::error::{Error, Result};

/// Where the encounter lives between sessions.
pub trait EncounterStore {
    /// Missing state loads as an empty encounter.
    fn load(&self) -> Result<Vec<SelectedCreature>>;
    fn save(&self, creatures: &[SelectedCreature]) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Format::Yaml)
            }
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn serialize(&self, creatures: &[SelectedCreature]) -> Result<String> {
        Ok(match self {
            Format::Json => serde_json::to_string_pretty(creatures)?,
            Format::Yaml => serde_yml::to_string(creatures)?,
        })
    }

    pub fn deserialize(&self, text: &str) -> Result<Vec<SelectedCreature>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(match self {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yml::from_str(text)?,
        })
    }
}

/// Keeps the serialized encounter in memory, the way a browser keeps it in local storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl EncounterStore for MemoryStore {
    fn load(&self) -> Result<Vec<SelectedCreature>> {
        match self.raw() {
            Some(json) => Format::Json.deserialize(&json),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, creatures: &[SelectedCreature]) -> Result<()> {
        let json = Format::Json.serialize(creatures)?;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: Format,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = Format::from_path(&path)?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl EncounterStore for FileStore {
    fn load(&self) -> Result<Vec<SelectedCreature>> {
        if !self.path.exists() {
            info!(
                "Didn't find encounter file {}, starting empty.",
                self.path.display()
            );
            return Ok(Vec::new());
        }
        info!("Loading encounter from {}", self.path.display());
        let text = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        self.format.deserialize(&text)
    }

    fn save(&self, creatures: &[SelectedCreature]) -> Result<()> {
        debug!("Writing encounter to file {}", self.path.display());
        let text = self.format.serialize(creatures)?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}
