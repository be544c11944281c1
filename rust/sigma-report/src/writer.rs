//! Materializes shards as header-prefixed CSV sinks.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::shard_path;
use crate::error::ReportError;
use crate::paginate::Shard;
use crate::row::HEADER;

/// Rows echoed to the debug log at the start of a run.
const ECHO_FIRST_ROWS: usize = 100;
/// Progress is logged every this many rows after that.
const PROGRESS_EVERY: usize = 10_000;

/// Opens and closes one sink per shard, identified only by the shard index.
pub trait ShardSink {
    type Writer: Write;

    fn open(&mut self, index: usize) -> io::Result<Self::Writer>;

    /// Flush and release a writer returned by [`ShardSink::open`].
    fn close(&mut self, index: usize, writer: Self::Writer) -> io::Result<()>;
}

/// Shard files `<stem>_<index>.csv` inside a directory.
#[derive(Debug, Clone)]
pub struct DirectorySinks {
    dir: PathBuf,
    file_stem: String,
    written: Vec<PathBuf>,
}

impl DirectorySinks {
    pub fn new(dir: impl AsRef<Path>, file_stem: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file_stem: file_stem.into(),
            written: Vec::new(),
        }
    }

    /// Files closed so far, in shard order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.written
    }
}

impl ShardSink for DirectorySinks {
    type Writer = BufWriter<File>;

    fn open(&mut self, index: usize) -> io::Result<Self::Writer> {
        let path = shard_path(&self.dir, &self.file_stem, index);
        log::debug!("Creating {}", path.display());
        Ok(BufWriter::new(File::create(path)?))
    }

    fn close(&mut self, index: usize, writer: Self::Writer) -> io::Result<()> {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        self.written
            .push(shard_path(&self.dir, &self.file_stem, index));
        Ok(())
    }
}

/// In-memory sinks, one UTF-8 string per closed shard.
#[derive(Debug, Clone, Default)]
pub struct MemorySinks {
    pub shards: Vec<String>,
}

impl ShardSink for MemorySinks {
    type Writer = Vec<u8>;

    fn open(&mut self, _index: usize) -> io::Result<Self::Writer> {
        Ok(Vec::new())
    }

    fn close(&mut self, _index: usize, writer: Self::Writer) -> io::Result<()> {
        let text = String::from_utf8(writer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.shards.push(text);
        Ok(())
    }
}

/// Totals for a completed write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub shards: usize,
    pub rows: usize,
}

/// Writes each shard to its own sink: header line, then one line per row.
pub struct ShardWriter<S: ShardSink> {
    sinks: S,
}

impl<S: ShardSink> ShardWriter<S> {
    pub fn new(sinks: S) -> Self {
        Self { sinks }
    }

    /// Drain `shards` in order. The first I/O failure aborts the run; a shard
    /// being written at that point is left incomplete.
    pub fn write_shards<R, I>(&mut self, shards: I) -> Result<WriteStats, ReportError>
    where
        R: Display,
        I: IntoIterator<Item = Shard<R>>,
    {
        let mut stats = WriteStats::default();

        for shard in shards {
            log::info!("Opening shard {} ({} rows)", shard.index, shard.len());
            let mut out = self.sinks.open(shard.index)?;
            writeln!(out, "{}", HEADER)?;

            for row in &shard.rows {
                writeln!(out, "{}", row)?;
                stats.rows += 1;
                if stats.rows < ECHO_FIRST_ROWS || stats.rows % PROGRESS_EVERY == 0 {
                    log::debug!("{} rows written; shard {}: {}", stats.rows, shard.index, row);
                }
            }

            self.sinks.close(shard.index, out)?;
            stats.shards += 1;
        }

        log::info!("{} rows written to {} shards", stats.rows, stats.shards);
        Ok(stats)
    }

    pub fn sinks(&self) -> &S {
        &self.sinks
    }

    pub fn into_sinks(self) -> S {
        self.sinks
    }
}
