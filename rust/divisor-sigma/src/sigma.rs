//! σ₂ of a perfect square from its prime factorization.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive, Zero};
use rayon::prelude::*;

use crate::factorize::factorize;

/// σ₂(n²), the sum of the squares of all divisors of n².
///
/// `n = 0` yields 0 by definition and `|n| = 1` yields 1. Otherwise each
/// prime `p^e` of `n` contributes `(p^{2(2e+1)} - 1) / (p² - 1)` and the
/// terms are multiplied, σ₂ being multiplicative.
pub fn sigma2_of_square(n: &BigInt) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    factorize(n)
        .iter()
        .fold(BigUint::one(), |acc, (p, e)| acc * prime_power_term(p, 2 * e))
}

/// σ₂(p^a) = 1 + p² + p⁴ + … + p^{2a}, as the closed geometric sum.
fn prime_power_term(p: &BigUint, a: u32) -> BigUint {
    let p_squared = p * p;
    let numerator = p_squared.pow(a + 1) - 1u32;
    let denominator = &p_squared - 1u32;
    debug_assert!((&numerator % &denominator).is_zero());
    numerator / denominator
}

/// σ₂(n²) mod `modulus`.
pub fn sigma2_mod(n: &BigInt, modulus: u32) -> u32 {
    assert!(modulus > 0, "modulus must be positive");
    (sigma2_of_square(n) % modulus)
        .to_u32()
        .unwrap_or_default()
}

/// Evaluate σ₂(n²) for every input in parallel, preserving input order.
pub fn sigma2_of_squares(inputs: &[BigInt]) -> Vec<BigUint> {
    log::debug!("Evaluating sigma_2 for {} inputs", inputs.len());
    inputs.par_iter().map(sigma2_of_square).collect()
}
