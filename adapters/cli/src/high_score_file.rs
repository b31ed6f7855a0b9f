use std::{
    fs, io,
    path::{Path, PathBuf},
};

use island_survival_simulation::{HighScoreError, HighScoreStore};
use serde::{Deserialize, Serialize};

const RECORD_VERSION: u32 = 1;

/// On-disk representation of the best score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    version: u32,
    high_score: u32,
}

/// High-score store persisted as a small JSON document.
///
/// A missing file reads as zero; the file is only created on the first save.
#[derive(Clone, Debug)]
pub(crate) struct JsonHighScoreFile {
    path: PathBuf,
}

impl JsonHighScoreFile {
    /// Creates a store backed by the file at `path`.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonHighScoreFile {
    fn load(&mut self) -> Result<u32, HighScoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(error) => return Err(error.into()),
        };
        decode(&contents)
    }

    fn save(&mut self, score: u32) -> Result<(), HighScoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, encode(score)?)?;
        Ok(())
    }
}

fn encode(score: u32) -> Result<String, HighScoreError> {
    let record = HighScoreRecord {
        version: RECORD_VERSION,
        high_score: score,
    };
    serde_json::to_string_pretty(&record).map_err(|error| HighScoreError::Malformed {
        reason: error.to_string(),
    })
}

fn decode(contents: &str) -> Result<u32, HighScoreError> {
    if contents.trim().is_empty() {
        return Ok(0);
    }

    let record: HighScoreRecord =
        serde_json::from_str(contents).map_err(|error| HighScoreError::Malformed {
            reason: error.to_string(),
        })?;
    if record.version != RECORD_VERSION {
        return Err(HighScoreError::Malformed {
            reason: format!("record version {} is not supported", record.version),
        });
    }

    Ok(record.high_score)
}
