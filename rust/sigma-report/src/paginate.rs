//! Group-preserving pagination of an ordered row stream into shards.
//!
//! Rows arrive sorted by a grouping key. A running count starts at 1 for the
//! header line; once it reaches the target and the next row opens a new group,
//! the current shard is closed and the count restarts at 2 (header plus that
//! row). The target is soft: a shard grows past it until its last group ends,
//! so a single oversized group produces an oversized shard.
//!
//! Only the shard being filled is buffered, and the input is consumed once.

use crate::row::ReportRow;

/// Default approximate lines per shard, header included.
pub const DEFAULT_TARGET_SIZE: usize = 100_000;

/// A row with a grouping key. Rows sharing a key must be contiguous in the
/// paginated stream, and keys must not decrease.
pub trait Grouped {
    type Key: Ord + Clone;

    fn group_key(&self) -> Self::Key;
}

impl Grouped for ReportRow {
    type Key = u128;

    fn group_key(&self) -> u128 {
        self.square_root
    }
}

/// A contiguous run of rows destined for one output sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard<R> {
    /// 1-based, contiguous across the sequence.
    pub index: usize,
    pub rows: Vec<R>,
}

impl<R> Shard<R> {
    fn new(index: usize) -> Self {
        Self {
            index,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Lazy shard iterator returned by [`paginate`].
pub struct GroupedPaginator<I>
where
    I: Iterator,
    I::Item: Grouped,
{
    rows: I,
    target_size: usize,
    records_processed: usize,
    last_key: Option<<I::Item as Grouped>::Key>,
    /// Row that closed the previous shard; it opens the next one.
    pending: Option<I::Item>,
    next_index: usize,
    finished: bool,
}

/// Split `rows` into shards of roughly `target_size` lines without ever
/// splitting a group.
///
/// Empty input yields one empty shard so callers still emit a header-only file.
///
/// # Panics
///
/// Panics if `target_size` is zero.
pub fn paginate<I>(rows: I, target_size: usize) -> GroupedPaginator<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Grouped,
{
    assert!(target_size > 0, "target_size must be positive");
    GroupedPaginator {
        rows: rows.into_iter(),
        target_size,
        records_processed: 1,
        last_key: None,
        pending: None,
        next_index: 1,
        finished: false,
    }
}

impl<I> Iterator for GroupedPaginator<I>
where
    I: Iterator,
    I::Item: Grouped,
{
    type Item = Shard<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut shard = Shard::new(self.next_index);
        if let Some(row) = self.pending.take() {
            shard.rows.push(row);
        }

        loop {
            let Some(row) = self.rows.next() else {
                self.finished = true;
                self.next_index += 1;
                return Some(shard);
            };

            let key = row.group_key();
            let starts_group = self.last_key.as_ref() != Some(&key);
            debug_assert!(
                self.last_key.as_ref().map_or(true, |last| *last <= key),
                "rows must be sorted by group key"
            );

            if self.records_processed >= self.target_size && starts_group && !shard.is_empty() {
                self.records_processed = 2;
                self.last_key = Some(key);
                self.pending = Some(row);
                self.next_index += 1;
                return Some(shard);
            }

            shard.rows.push(row);
            self.records_processed += 1;
            self.last_key = Some(key);
        }
    }
}
