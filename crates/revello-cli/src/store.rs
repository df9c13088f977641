use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::PathBuf,
};

use revello_training::store::{Archive, GenerationRecord, GenerationStore, StoreError};

/// File-backed generation store: one JSON object mapping generation index
/// to `{population, selected}`, rewritten in full on every save so the
/// file on disk is always a complete archive.
#[derive(Debug)]
pub struct JsonGenerationStore {
    path: PathBuf,
    archive: Archive,
    loaded: bool,
}

impl JsonGenerationStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            archive: Archive::new(),
            loaded: false,
        }
    }
}

impl GenerationStore for JsonGenerationStore {
    fn load(&mut self) -> Result<Archive, StoreError> {
        if self.path.exists() {
            let file = File::open(&self.path).map_err(StoreError::new)?;
            self.archive = serde_json::from_reader(BufReader::new(file)).map_err(StoreError::new)?;
        } else {
            // A missing file is a fresh run, not an error.
            self.archive = Archive::new();
        }
        self.loaded = true;
        Ok(self.archive.clone())
    }

    fn save(&mut self, generation: u32, record: &GenerationRecord) -> Result<(), StoreError> {
        if !self.loaded {
            self.load()?;
        }
        self.archive.insert(generation, record.clone());

        let file = File::create(&self.path).map_err(StoreError::new)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.archive).map_err(StoreError::new)?;
        writer.flush().map_err(StoreError::new)?;
        Ok(())
    }
}
