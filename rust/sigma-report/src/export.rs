//! The export pipeline: paginate rows and write one CSV file per shard.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::error::ReportError;
use crate::paginate::paginate;
use crate::row::ReportRow;
use crate::writer::{DirectorySinks, ShardWriter};

/// Outcome of a completed export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub shards: usize,
    pub rows: usize,
    pub files: Vec<PathBuf>,
    pub records_per_sheet: usize,
}

impl ExportSummary {
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Write `rows`, already sorted by square root, into shard files under
/// `config.output_dir`, creating the directory if needed.
pub fn export<I>(rows: I, config: &ExportConfig) -> Result<ExportSummary, ReportError>
where
    I: IntoIterator<Item = ReportRow>,
{
    config.validate()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let sinks = DirectorySinks::new(&config.output_dir, config.file_stem.clone());
    let mut writer = ShardWriter::new(sinks);
    let stats = writer.write_shards(paginate(rows, config.records_per_sheet))?;

    Ok(ExportSummary {
        shards: stats.shards,
        rows: stats.rows,
        files: writer.into_sinks().into_paths(),
        records_per_sheet: config.records_per_sheet,
    })
}
