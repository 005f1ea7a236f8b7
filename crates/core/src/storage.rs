//! Where each platform keeps app-private files.
use crate::assets::data_dir_path;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File system error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Storage directory unavailable: {0}")]
    Unavailable(String),
}

/// Host platforms the app ships on.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
    #[default]
    Desktop,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match &self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Desktop => "desktop",
        }
    }
}

/// Resolves the directory the model manager installs models into.
///
/// Resolution is read only, no directory is created.
pub trait StorageDirectory {
    fn resolve(&self) -> Result<PathBuf, StorageError>;
}

/// A directory supplied by the host, e.g. Android's `Context.getFilesDir()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedDirectory {
    path: PathBuf,
}

impl FixedDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageDirectory for FixedDirectory {
    fn resolve(&self) -> Result<PathBuf, StorageError> {
        // Only UTF-8 paths can carry a `~`, others are used verbatim
        let expanded = match self.path.to_str() {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
            None => self.path.clone(),
        };
        Ok(expanded.absolutize()?.into_owned())
    }
}

/// The user's documents directory, which is what iOS apps store models in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentsDirectory;

impl StorageDirectory for DocumentsDirectory {
    fn resolve(&self) -> Result<PathBuf, StorageError> {
        dirs::document_dir()
            .ok_or_else(|| StorageError::Unavailable("no documents directory".to_string()))
    }
}

/// The per-user application data directory on desktop hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataDirectory;

impl StorageDirectory for DataDirectory {
    fn resolve(&self) -> Result<PathBuf, StorageError> {
        Ok(data_dir_path())
    }
}

impl<D: StorageDirectory + ?Sized> StorageDirectory for Box<D> {
    fn resolve(&self) -> Result<PathBuf, StorageError> {
        (**self).resolve()
    }
}
