//! Detailed grade ledger (`detailed_grades.json`)
//!
//! The ledger is owned by this application and maps each student directory
//! name to the per-criterion scores last saved for that student:
//!
//! ```json
//! { "Yamada Taro(1234567)": { "Q1": 7, "Q2_A": 5, "Q2_B": 0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indexmap::IndexMap;

use crate::error::{Result, SaitenError};
use crate::scoring::ScoreSet;
use crate::store::io::write_atomic;
use crate::trace_time;

/// In-memory view of one assignment's ledger file
#[derive(Debug, Clone, PartialEq)]
pub struct GradeLedger {
    path: PathBuf,
    entries: IndexMap<String, ScoreSet>,
}

impl GradeLedger {
    /// Load the ledger at `path`.
    ///
    /// A missing file is an empty ledger. A file that exists but is not an
    /// object of objects of non-negative integers is `CorruptLedger`; it is
    /// never reset to empty.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("ledger missing, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                entries: IndexMap::new(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| SaitenError::CorruptLedger {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let entries: IndexMap<String, ScoreSet> =
            serde_json::from_str(&content).map_err(|e| SaitenError::CorruptLedger {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(students = entries.len(), "ledger loaded");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Replace `student`'s entry in the ledger at `path` and write it back.
    ///
    /// The entry is overwritten, not merged. Other students are untouched.
    pub fn save(path: &Path, student: &str, scores: &ScoreSet) -> Result<()> {
        let start = Instant::now();
        let mut ledger = Self::load(path)?;
        ledger.insert(student, scores.clone());
        ledger.write()?;
        trace_time!(start, "ledger_save", student = student);
        tracing::debug!(student, criteria = scores.len(), "ledger_saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scores saved for `student`, if any
    pub fn get(&self, student: &str) -> Option<&ScoreSet> {
        self.entries.get(student)
    }

    pub fn insert(&mut self, student: &str, scores: ScoreSet) {
        self.entries.insert(student.to_string(), scores);
    }

    /// Students with a saved entry, in file order
    pub fn students(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn graded_count(&self) -> usize {
        self.entries.len()
    }

    /// Write the whole ledger back to its file
    pub fn write(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.entries)?;
        content.push('\n');
        write_atomic(&self.path, content.as_bytes())
    }
}
