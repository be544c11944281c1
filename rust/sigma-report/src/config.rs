//! Export configuration, passed explicitly to the pipeline.

use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::paginate::DEFAULT_TARGET_SIZE;

/// Environment variable overriding the default records per sheet.
pub const RECORDS_PER_SHEET_VAR: &str = "RECORDS_PER_SHEET";

/// Default shard file stem; files are named `<stem>_<index>.csv`.
pub const DEFAULT_FILE_STEM: &str = "Sigma2MatchesCountMod10";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Approximate lines per shard file, header included.
    pub records_per_sheet: usize,
    /// Directory receiving the shard files.
    pub output_dir: PathBuf,
    pub file_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            records_per_sheet: DEFAULT_TARGET_SIZE,
            output_dir: PathBuf::from("."),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_records_per_sheet(mut self, records_per_sheet: usize) -> Self {
        self.records_per_sheet = records_per_sheet;
        self
    }

    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    /// Records per sheet from `RECORDS_PER_SHEET`, or the default when unset
    /// or unparsable.
    pub fn records_per_sheet_from_env() -> usize {
        parse_records_per_sheet(std::env::var(RECORDS_PER_SHEET_VAR).ok().as_deref())
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.records_per_sheet == 0 {
            return Err(ReportError::InvalidConfig(
                "records per sheet must be positive".to_string(),
            ));
        }
        if self.file_stem.is_empty() || self.file_stem.contains(['/', '\\']) {
            return Err(ReportError::InvalidConfig(format!(
                "file stem '{}' must be a non-empty file name",
                self.file_stem
            )));
        }
        Ok(())
    }

    /// Path of shard `index` (1-based).
    pub fn shard_path(&self, index: usize) -> PathBuf {
        shard_path(&self.output_dir, &self.file_stem, index)
    }
}

pub(crate) fn shard_path(dir: &Path, file_stem: &str, index: usize) -> PathBuf {
    dir.join(format!("{}_{}.csv", file_stem, index))
}

fn parse_records_per_sheet(raw: Option<&str>) -> usize {
    match raw.map(|s| s.trim().parse::<usize>()) {
        None => DEFAULT_TARGET_SIZE,
        Some(Ok(n)) if n > 0 => n,
        Some(_) => {
            log::warn!(
                "Ignoring {}={:?}, using {}",
                RECORDS_PER_SHEET_VAR,
                raw.unwrap_or_default(),
                DEFAULT_TARGET_SIZE
            );
            DEFAULT_TARGET_SIZE
        }
    }
}
