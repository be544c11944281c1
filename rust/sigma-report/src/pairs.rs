//! Pair records and their expansion into report rows.
//!
//! Only one ordering of each unordered pair is stored. Combining adds the
//! mirrored `(increment, base)` row for every off-diagonal pair, counts the
//! pairs per square root, and attaches σ₂ of the diagonal `(s, s)` pair.

use num_bigint::BigInt;
use std::collections::BTreeMap;
use std::path::Path;

use divisor_sigma::pof4::{diagonal_range_supported, matching_pairs, square_root_of, MAX_DIAGONAL};
use divisor_sigma::sigma2_of_squares;

use crate::error::ReportError;
use crate::row::{ReportRow, RootSummary};

/// A stored `(base, increment)` pair and the square root it generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairRecord {
    pub square_root: u128,
    pub base: u64,
    pub increment: u64,
}

impl PairRecord {
    /// `None` when the pair's root does not fit in `u128`.
    pub fn new(base: u64, increment: u64) -> Option<Self> {
        Some(Self {
            square_root: square_root_of(base, increment)?,
            base,
            increment,
        })
    }

    pub fn is_diagonal(&self) -> bool {
        self.base == self.increment
    }

    fn mirrored(&self) -> Self {
        Self {
            square_root: self.square_root,
            base: self.increment,
            increment: self.base,
        }
    }
}

/// Pair records for every diagonal `s` in `[start, end)`: the diagonal
/// itself followed by each matching off-diagonal pair.
///
/// Diagonals must stay below [`MAX_DIAGONAL`].
pub fn generate_pairs(start: u64, end: u64) -> Result<Vec<PairRecord>, ReportError> {
    check_diagonal_range(start, end)?;

    let mut records = Vec::new();
    for s in start.max(1)..end {
        records.extend(PairRecord::new(s, s));
        records.extend(
            matching_pairs(s)
                .into_iter()
                .filter_map(|(n, k)| PairRecord::new(n, k)),
        );
        if s % 250 == 0 {
            log::debug!("Generated pairs through diagonal {}", s);
        }
    }
    log::info!("Generated {} pair records for [{}, {})", records.len(), start, end);
    Ok(records)
}

/// Reject diagonal ranges reaching [`MAX_DIAGONAL`] or beyond.
pub fn check_diagonal_range(start: u64, end: u64) -> Result<(), ReportError> {
    if diagonal_range_supported(start, end) {
        Ok(())
    } else {
        Err(ReportError::InvalidConfig(format!(
            "diagonal range {}..{} exceeds the supported maximum {}",
            start, end, MAX_DIAGONAL
        )))
    }
}

/// Parse `square_root,base,increment` lines. Blank lines and `#` comments
/// are skipped. The square root must equal the root of its pair.
pub fn parse_pairs(text: &str) -> Result<Vec<PairRecord>, ReportError> {
    let mut records = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_error = |reason: String| ReportError::Parse { line: i + 1, reason };
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(parse_error(format!("expected 3 fields, found {}", fields.len())));
        }

        let square_root: u128 = fields[0]
            .parse()
            .map_err(|_| parse_error(format!("bad square root '{}'", fields[0])))?;
        let base: u64 = fields[1]
            .parse()
            .map_err(|_| parse_error(format!("bad base '{}'", fields[1])))?;
        let increment: u64 = fields[2]
            .parse()
            .map_err(|_| parse_error(format!("bad increment '{}'", fields[2])))?;
        if square_root == 0 {
            return Err(parse_error("square root must be positive".to_string()));
        }
        match square_root_of(base, increment) {
            Some(expected) if expected == square_root => {}
            Some(expected) => {
                return Err(parse_error(format!(
                    "square root {} does not match pair ({}, {}), expected {}",
                    square_root, base, increment, expected
                )));
            }
            None => {
                return Err(parse_error(format!(
                    "pair ({}, {}) is too large",
                    base, increment
                )));
            }
        }

        records.push(PairRecord {
            square_root,
            base,
            increment,
        });
    }

    Ok(records)
}

pub fn read_pairs(path: impl AsRef<Path>) -> Result<Vec<PairRecord>, ReportError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pairs(&text)
}

/// Expand stored pairs into report rows sorted by `(square_root, base)`.
///
/// Square roots without a diagonal record have no σ₂ and are dropped.
pub fn combine(records: &[PairRecord]) -> Vec<ReportRow> {
    let mut combined: Vec<PairRecord> = Vec::with_capacity(records.len() * 2);
    for record in records {
        combined.push(*record);
        if !record.is_diagonal() {
            combined.push(record.mirrored());
        }
    }

    let mut counts: BTreeMap<u128, u64> = BTreeMap::new();
    for record in &combined {
        *counts.entry(record.square_root).or_insert(0) += 1;
    }

    let mut diagonals: BTreeMap<u128, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_diagonal()) {
        diagonals.entry(record.square_root).or_insert(record.base);
    }

    let inputs: Vec<BigInt> = diagonals.values().map(|&s| BigInt::from(s)).collect();
    let summaries: BTreeMap<u128, RootSummary> = diagonals
        .keys()
        .zip(sigma2_of_squares(&inputs))
        .map(|(&root, sigma2)| (root, RootSummary::new(root, sigma2, counts[&root])))
        .collect();

    let mut dropped = 0usize;
    let mut rows: Vec<ReportRow> = combined
        .iter()
        .filter_map(|record| match summaries.get(&record.square_root) {
            Some(summary) => Some(ReportRow::new(
                record.square_root,
                record.base,
                record.increment,
                summary,
            )),
            None => {
                dropped += 1;
                None
            }
        })
        .collect();
    if dropped > 0 {
        log::warn!("Dropped {} pair rows whose square root has no diagonal", dropped);
    }

    rows.sort_by(|a, b| (a.square_root, a.base).cmp(&(b.square_root, b.base)));
    rows
}
