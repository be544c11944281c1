//! Square roots of a product of four terms in arithmetic progression.
//!
//! For start `n` and increment `k`,
//!
//! ```text
//! n·(n+k)·(n+2k)·(n+3k) + k⁴ = (n·k + (n+k)²)²
//! ```
//!
//! so the square root is available without any root extraction (OEIS A062938
//! is the `k = 1` case). The root is symmetric in `n` and `k`, and distinct
//! pairs can share a root with a diagonal pair `(s, s)`.

use num_integer::Roots;

/// Largest diagonal accepted by [`matching_pairs`]; keeps `25·s²` inside `u128`.
pub const MAX_DIAGONAL: u64 = 1 << 61;

/// `n·k + (n+k)²`, the exact square root of `n(n+k)(n+2k)(n+3k) + k⁴`.
///
/// `None` when the root does not fit in `u128`, i.e. once `n + k ≥ 2^64`.
pub fn square_root_of(n: u64, k: u64) -> Option<u128> {
    let (n, k) = (n as u128, k as u128);
    let sum = n.checked_add(k)?;
    sum.checked_mul(sum)?.checked_add(n * k)
}

/// Whether every diagonal in `[start, end)` is accepted by [`matching_pairs`].
pub fn diagonal_range_supported(start: u64, end: u64) -> bool {
    start >= end || end <= MAX_DIAGONAL
}

/// All pairs `(n, k)` with `n < s < k` whose root equals the root of `(s, s)`.
///
/// For each `n` the root equation `k² + 3nk + n² = r` is solved exactly:
/// `k` is integral iff `5n² + 4r` is a perfect square of the right parity.
/// Pairs come back ordered by ascending `n`; only one ordering of each pair
/// is returned.
///
/// # Panics
///
/// Panics if `s` is not below [`MAX_DIAGONAL`].
pub fn matching_pairs(s: u64) -> Vec<(u64, u64)> {
    assert!(s < MAX_DIAGONAL, "diagonal {} too large", s);

    let s_wide = s as u128;
    let r = 5 * s_wide * s_wide;
    (1..s)
        .filter_map(|n| {
            let n_wide = n as u128;
            let disc = 5 * n_wide * n_wide + 4 * r;
            let root = disc.sqrt();
            if root * root != disc {
                return None;
            }
            let twice_k = root - 3 * n_wide;
            if twice_k % 2 != 0 {
                return None;
            }
            let k = (twice_k / 2) as u64;
            debug_assert!(k > s);
            Some((n, k))
        })
        .collect()
}
