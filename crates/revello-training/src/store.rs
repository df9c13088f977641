//! Keyed persistence of generation snapshots.
//!
//! The trainer only needs two operations: load everything persisted so
//! far, and save one generation's record under its index, keeping prior
//! records intact. [`GenerationStore`] captures exactly that contract;
//! the file-backed JSON implementation lives with the CLI, and
//! [`MemoryStore`] serves tests and throwaway runs.

use std::collections::BTreeMap;
use std::error::Error;

use revello_evaluator::Genome;
use serde::{Deserialize, Serialize};

/// Snapshot of one generation: the full population after the variation
/// stages and the parents that survived selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub population: Vec<Genome>,
    pub selected: Vec<Genome>,
}

/// Every persisted generation, keyed by generation index. The largest key
/// is the resume point.
pub type Archive = BTreeMap<u32, GenerationRecord>;

/// Failure raised by a generation store implementation.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("generation store failure: {source}")]
pub struct StoreError {
    source: Box<dyn Error + Send + Sync>,
}

impl StoreError {
    pub fn new<E>(source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            source: source.into(),
        }
    }
}

/// Keyed persistence for generation records.
pub trait GenerationStore {
    /// Loads the whole archive; an empty archive means a fresh run.
    fn load(&mut self) -> Result<Archive, StoreError>;

    /// Persists `record` at `generation`, overwriting that key only.
    fn save(&mut self, generation: u32, record: &GenerationRecord) -> Result<(), StoreError>;
}

/// Archive held in memory; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    archive: Archive,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn archive(&self) -> &Archive {
        &self.archive
    }
}

impl GenerationStore for MemoryStore {
    fn load(&mut self) -> Result<Archive, StoreError> {
        Ok(self.archive.clone())
    }

    fn save(&mut self, generation: u32, record: &GenerationRecord) -> Result<(), StoreError> {
        self.archive.insert(generation, record.clone());
        Ok(())
    }
}
