//! Exact σ₂(n²) for arbitrary-precision integers.
//!
//! [`factorize`] decomposes `|n|` by trial division and [`sigma2_of_square`]
//! folds the per-prime geometric sums into σ₂(n²). [`pof4`] holds the
//! product-of-four root identity whose diagonal roots feed the report export.

pub mod factorize;
pub mod pof4;
pub mod sigma;

pub use factorize::{factorize, Factorization};
pub use sigma::{sigma2_mod, sigma2_of_square, sigma2_of_squares};

use num_bigint::BigInt;

/// Input that does not parse as an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not an integer")]
pub struct ParseIntegerError {
    pub input: String,
}

/// Parse a decimal integer of any size, ignoring surrounding whitespace.
pub fn parse_integer(input: &str) -> Result<BigInt, ParseIntegerError> {
    input.trim().parse::<BigInt>().map_err(|_| ParseIntegerError {
        input: input.trim().to_string(),
    })
}
