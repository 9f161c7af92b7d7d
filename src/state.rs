//! Process-wide state: the validated reference table and the single
//! persisted report artifact.
//!
//! The last rendered document is explicit injected state rather than an
//! implicit global. Concurrent submissions race on the one artifact with
//! last-writer-wins semantics; that is an accepted limitation.

use std::path::PathBuf;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::report::{ReferenceError, ReferenceTable};

/// Metadata for the most recently persisted report PDF.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub test_count: usize,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("reference table invalid: {0}")]
    Reference(#[from] ReferenceError),
    #[error("state lock poisoned")]
    LockPoisoned,
    #[error("failed to persist report to {}: {source}", path.display())]
    PersistReport {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Shared application state, constructed once at startup.
pub struct AppState {
    reference: ReferenceTable,
    report_path: PathBuf,
    document: RwLock<Option<StoredDocument>>,
}

impl AppState {
    /// Build state with the built-in reference table. Fails if the table's
    /// configuration-integrity check fails.
    pub fn new(report_path: PathBuf) -> Result<Self, StateError> {
        Ok(Self {
            reference: ReferenceTable::builtin()?,
            report_path,
            document: RwLock::new(None),
        })
    }

    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    /// Persist rendered PDF bytes to the fixed report path, overwriting any
    /// previous report, and record it as the latest document.
    pub fn store_document(
        &self,
        bytes: &[u8],
        test_count: usize,
    ) -> Result<StoredDocument, StateError> {
        if let Some(parent) = self.report_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StateError::PersistReport {
                path: self.report_path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.report_path, bytes).map_err(|source| StateError::PersistReport {
            path: self.report_path.clone(),
            source,
        })?;

        let document = StoredDocument {
            path: self.report_path.clone(),
            generated_at: Utc::now(),
            test_count,
        };

        *self
            .document
            .write()
            .map_err(|_| StateError::LockPoisoned)? = Some(document.clone());

        Ok(document)
    }

    /// The most recently persisted document, if any submission has
    /// succeeded in this process lifetime.
    pub fn latest_document(&self) -> Result<Option<StoredDocument>, StateError> {
        Ok(self
            .document
            .read()
            .map_err(|_| StateError::LockPoisoned)?
            .clone())
    }
}
