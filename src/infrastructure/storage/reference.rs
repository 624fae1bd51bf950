use crate::domain::model::FoodRecord;
use crate::domain::ports::ReferenceStore;
use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Reference food dataset stored as a JSON array of records.
pub struct JsonReferenceStore {
    path: PathBuf,
}

impl JsonReferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReferenceStore for JsonReferenceStore {
    fn load(&self) -> io::Result<Vec<FoodRecord>> {
        let file = fs::File::open(&self.path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
