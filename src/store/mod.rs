//! Durable key-value storage: the player profile and engine checkpoints.
//!
//! ## Profile
//!
//! Two flat keys:
//! `highScore` (non-negative integer as decimal text) and `theme`
//! (`light` | `dark`). The engine core touches only the high score; the
//! theme is carried for the surrounding application and preserved across
//! writes.
//!
//! Loading never fails: a missing file, unreadable JSON, or a non-numeric
//! high score each degrade to the per-field default. Writes go through a
//! temp file in the target directory and an atomic rename.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

const KEY_HIGH_SCORE: &str = "highScore";
const KEY_THEME: &str = "theme";

/// Display theme carried alongside the high score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    /// Light mode; the default.
    #[default]
    Light,
    /// Dark mode.
    Dark,
}

impl Theme {
    /// The stored text form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse the stored text form; anything unrecognized is the default.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

/// The persisted player profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    /// Best final score across all rounds. Defaults to 0.
    pub high_score: u32,
    /// Display theme. Defaults to light.
    pub theme: Theme,
}

/// Durable profile storage.
///
/// `load` is total: corrupt or absent state degrades per-field to the
/// defaults rather than failing.
pub trait ProfileStore {
    /// Read the profile, defaulting any unreadable field.
    fn load(&self) -> Profile;

    /// Write the profile.
    fn save(&self, profile: &Profile) -> Result<(), StoreError>;
}

/// Profile store error.
#[derive(Debug)]
pub enum StoreError {
    /// Filesystem failure.
    Io(std::io::Error),
    /// JSON encoding failure.
    Encode(serde_json::Error),
    /// Checkpoint encoding or decoding failure.
    Checkpoint(bincode::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "io error: {e}"),
            StoreError::Encode(e) => write!(f, "encode error: {e}"),
            StoreError::Checkpoint(e) => write!(f, "checkpoint error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Encode(e) => Some(e),
            StoreError::Checkpoint(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Encode(e)
    }
}

impl From<bincode::Error> for StoreError {
    fn from(e: bincode::Error) -> Self {
        StoreError::Checkpoint(e)
    }
}

/// Profile store backed by a flat JSON file of string values.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the given path. Nothing is read or written until
    /// `load`/`save`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn high_score_from(value: &Value) -> u32 {
        match value.get(KEY_HIGH_SCORE) {
            Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
            Some(Value::Number(n)) => n.as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(0)),
            _ => 0,
        }
    }

    fn theme_from(value: &Value) -> Theme {
        match value.get(KEY_THEME) {
            Some(Value::String(text)) => Theme::parse(text),
            _ => Theme::default(),
        }
    }
}

impl ProfileStore for FileStore {
    fn load(&self) -> Profile {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return Profile::default();
        };
        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            return Profile::default();
        };

        Profile {
            high_score: Self::high_score_from(&value),
            theme: Self::theme_from(&value),
        }
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let value = serde_json::json!({
            KEY_HIGH_SCORE: profile.high_score.to_string(),
            KEY_THEME: profile.theme.as_str(),
        });
        let text = serde_json::to_string_pretty(&value)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(text.as_bytes())?;
        temp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

/// In-memory profile store for tests and embedding.
///
/// Clones share the same underlying profile, so a test can hand one clone
/// to the engine and observe writes through another.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    profile: Arc<Mutex<Profile>>,
}

impl MemoryStore {
    /// Create a store holding the default profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given profile.
    #[must_use]
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Arc::new(Mutex::new(profile)),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Profile {
        self.profile.lock().map(|p| *p).unwrap_or_default()
    }

    fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        if let Ok(mut slot) = self.profile.lock() {
            *slot = *profile;
        }
        Ok(())
    }
}

/// Write a checkpoint atomically: bincode into a temp file, then rename.
pub fn save_checkpoint<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    let writer = BufWriter::new(&temp);
    bincode::serialize_into(writer, value)?;
    temp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Read a checkpoint written by `save_checkpoint`.
pub fn load_checkpoint<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}
