//! End-to-end export tests and pagination invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use sigma_report::{
    combine, export, generate_pairs, paginate, ExportConfig, Grouped, MemorySinks, ReportRow,
    ShardWriter, HEADER,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    key: u64,
    seq: usize,
}

impl Grouped for Row {
    type Key = u64;

    fn group_key(&self) -> u64 {
        self.key
    }
}

fn grouped_rows(sizes: &[usize]) -> Vec<Row> {
    let mut rows = Vec::new();
    for (key, &size) in sizes.iter().enumerate() {
        for _ in 0..size {
            rows.push(Row {
                key: key as u64,
                seq: rows.len(),
            });
        }
    }
    rows
}

/// Shared checks: no key in two shards, contiguous 1-based indices, and the
/// concatenation of shards reproduces the input.
fn assert_shard_invariants(rows: &[Row], target: usize) {
    let shards: Vec<_> = paginate(rows.to_vec(), target).collect();

    let indices: Vec<usize> = shards.iter().map(|s| s.index).collect();
    assert_eq!(indices, (1..=shards.len()).collect::<Vec<_>>());

    let mut seen_keys = HashSet::new();
    for shard in &shards {
        let keys: HashSet<u64> = shard.rows.iter().map(|r| r.key).collect();
        for key in keys {
            assert!(seen_keys.insert(key), "key {} split across shards", key);
        }
    }

    let flattened: Vec<Row> = shards.into_iter().flat_map(|s| s.rows).collect();
    assert_eq!(flattened, rows);
}

#[test]
fn test_huge_group_is_not_split() {
    let rows = grouped_rows(&[3, 2, 100_000, 1]);
    let shards: Vec<_> = paginate(rows.clone(), 10).collect();

    let holding_big: Vec<_> = shards
        .iter()
        .filter(|s| s.rows.iter().any(|r| r.key == 2))
        .collect();
    assert_eq!(holding_big.len(), 1);
    assert!(holding_big[0].len() >= 100_000);

    let total: usize = shards.iter().map(|s| s.len()).sum();
    assert_eq!(total, rows.len());
    assert_shard_invariants(&rows, 10);
}

#[test]
fn test_pagination_is_deterministic() {
    let rows = grouped_rows(&[5, 1, 7, 3, 3, 9, 2, 2, 2, 11]);
    let first: Vec<Vec<usize>> = paginate(rows.clone(), 6)
        .map(|s| s.rows.iter().map(|r| r.seq).collect())
        .collect();
    let second: Vec<Vec<usize>> = paginate(rows, 6)
        .map(|s| s.rows.iter().map(|r| r.seq).collect())
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_report_rows_paginate_by_square_root() {
    let rows: Vec<ReportRow> = combine(&generate_pairs(1, 200).unwrap());
    let mut writer = ShardWriter::new(MemorySinks::default());
    let stats = writer.write_shards(paginate(rows.clone(), 25)).unwrap();
    assert_eq!(stats.rows, rows.len());

    let shards = writer.into_sinks().shards;
    assert_eq!(shards.len(), stats.shards);

    let mut lines_out = Vec::new();
    let mut roots_seen = HashSet::new();
    for text in &shards {
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER));
        let roots: HashSet<&str> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap())
            .collect();
        for root in roots {
            assert!(roots_seen.insert(root.to_string()), "root {} split", root);
        }
        lines_out.extend(lines.map(str::to_string));
    }

    let expected: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
    assert_eq!(lines_out, expected);
}

#[test]
fn test_export_writes_files_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("sheets");
    let config = ExportConfig::new(&out).with_records_per_sheet(10);

    let rows = combine(&generate_pairs(1, 40).unwrap());
    let row_count = rows.len();
    let summary = export(rows, &config).unwrap();

    assert_eq!(summary.rows, row_count);
    assert_eq!(summary.files.len(), summary.shards);
    for (i, path) in summary.files.iter().enumerate() {
        assert_eq!(path, &config.shard_path(i + 1));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with(HEADER));
    }

    let first = std::fs::read_to_string(&summary.files[0]).unwrap();
    let second_line = first.lines().nth(1).unwrap();
    assert_eq!(second_line, "5,1,1,1,1,1,1,\"5^1\"");

    let json_path = dir.path().join("summary.json");
    summary.save_json(&json_path).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["rows"], row_count);
    assert_eq!(json["records_per_sheet"], 10);
}

#[test]
fn test_export_empty_input_writes_header_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::new(dir.path()).with_file_stem("empty");

    let summary = export(Vec::<ReportRow>::new(), &config).unwrap();
    assert_eq!(summary.shards, 1);
    assert_eq!(summary.rows, 0);
    let text = std::fs::read_to_string(dir.path().join("empty_1.csv")).unwrap();
    assert_eq!(text, format!("{}\n", HEADER));
}

#[test]
fn test_export_rejects_zero_records_per_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let config = ExportConfig::new(dir.path()).with_records_per_sheet(0);
    assert!(export(Vec::<ReportRow>::new(), &config).is_err());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn pagination_preserves_groups_and_order(
        sizes in proptest::collection::vec(1usize..30, 0..60),
        target in 1usize..50,
    ) {
        let rows = grouped_rows(&sizes);
        assert_shard_invariants(&rows, target);
    }

    #[test]
    fn shards_close_only_at_target(
        sizes in proptest::collection::vec(1usize..10, 1..60),
        target in 2usize..40,
    ) {
        let rows = grouped_rows(&sizes);
        let shards: Vec<_> = paginate(rows, target).collect();
        // Every shard but the last carries at least target - 1 rows.
        for shard in &shards[..shards.len() - 1] {
            prop_assert!(shard.len() + 1 >= target, "shard {} too small", shard.index);
        }
    }
}
