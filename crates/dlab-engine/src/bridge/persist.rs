//! Persistence seam for vessel readouts.
//!
//! The remote store stamps records on arrival, so nothing here carries a
//! timestamp. Saving is best-effort: callers log failures and move on.

use thiserror::Error;

use crate::api::summary::Summary;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to persist vessel {vessel_id}: {reason}")]
pub struct PersistError {
    pub vessel_id: String,
    pub reason: String,
}

impl PersistError {
    pub fn new(vessel_id: &str, reason: impl Into<String>) -> Self {
        Self {
            vessel_id: vessel_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Something that can store a vessel readout keyed by vessel id.
pub trait Persister {
    fn save(&mut self, vessel_id: &str, summary: &Summary) -> Result<(), PersistError>;
}

/// Keeps every saved readout in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryPersister {
    records: Vec<(String, Summary)>,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[(String, Summary)] {
        &self.records
    }

    /// Most recent readout saved for a vessel.
    pub fn latest(&self, vessel_id: &str) -> Option<&Summary> {
        self.records
            .iter()
            .rev()
            .find(|(id, _)| id == vessel_id)
            .map(|(_, s)| s)
    }
}

impl Persister for MemoryPersister {
    fn save(&mut self, vessel_id: &str, summary: &Summary) -> Result<(), PersistError> {
        self.records.push((vessel_id.to_string(), summary.clone()));
        Ok(())
    }
}
