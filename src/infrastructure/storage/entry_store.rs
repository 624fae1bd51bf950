use crate::domain::model::FoodEntry;
use crate::domain::ports::EntryStore;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Food log persisted as JSON lines, one entry per line.
pub struct JsonlEntryStore {
    path: PathBuf,
}

impl JsonlEntryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EntryStore for JsonlEntryStore {
    fn load(&self) -> io::Result<Vec<FoodEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = fs::File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let entry: FoodEntry = serde_json::from_str(trimmed)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
            entries.push(entry);
        }
        Ok(entries)
    }

    fn save_all(&self, entries: &[FoodEntry]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&self.path)?;
        for entry in entries {
            let line = serde_json::to_string(entry)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
