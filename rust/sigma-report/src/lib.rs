//! sigma-report: paginated CSV reports of pairs sharing a product-of-four
//! square root, annotated with σ₂ of the diagonal pair.
//!
//! Rows grouped by square root are split into shard files of roughly fixed
//! size; a group is never split across two files.

pub mod config;
pub mod error;
pub mod export;
pub mod paginate;
pub mod pairs;
pub mod row;
pub mod writer;

pub use config::ExportConfig;
pub use error::ReportError;
pub use export::{export, ExportSummary};
pub use paginate::{paginate, GroupedPaginator, Grouped, Shard, DEFAULT_TARGET_SIZE};
pub use pairs::{combine, generate_pairs, parse_pairs, read_pairs, PairRecord};
pub use row::{ReportRow, HEADER};
pub use writer::{DirectorySinks, MemorySinks, ShardSink, ShardWriter, WriteStats};
