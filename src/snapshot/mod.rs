//! Contact snapshot sources.
//!
//! A source hands the engine the full, ordered set of contacts for one
//! analysis pass. Order is preserved as read: company ties in the report
//! are broken by it.

use crate::models::Contact;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid contact snapshot {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Supplies the contacts to analyze.
pub trait ContactSource {
    /// Short description used in logs and report metadata.
    fn describe(&self) -> String;

    /// Load the complete snapshot.
    fn load(&self) -> Result<Vec<Contact>, SnapshotError>;
}

/// `{ "contacts": [ ... ] }`, as returned by the contacts API.
#[derive(Deserialize)]
struct Envelope {
    contacts: Vec<Contact>,
}

/// Reads contacts from a JSON export on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContactSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<Contact>, SnapshotError> {
        if !self.path.exists() {
            return Err(SnapshotError::NotFound(self.path.clone()));
        }

        info!("Reading contact snapshot: {}", self.path.display());

        let content = fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;

        let contacts = parse_snapshot(&content).map_err(|source| SnapshotError::Json {
            path: self.path.clone(),
            source,
        })?;

        debug!("Loaded {} contacts", contacts.len());
        Ok(contacts)
    }
}

/// Parse either a bare array of contacts or a `{ "contacts": [...] }` envelope.
///
/// The shape is picked from the first non-whitespace character so that a bad
/// record reports its own field, line and column.
pub fn parse_snapshot(content: &str) -> Result<Vec<Contact>, serde_json::Error> {
    if content.trim_start().starts_with('{') {
        serde_json::from_str::<Envelope>(content).map(|envelope| envelope.contacts)
    } else {
        serde_json::from_str::<Vec<Contact>>(content)
    }
}
