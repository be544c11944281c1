//! Prime-power factorization by trial division.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// Separator between `p^e` terms in the textual form of a factorization.
pub const TERM_SEPARATOR: &str = "  x  ";

/// Prime factorization `|n| = ∏ p^e`, keyed by ascending prime.
///
/// Empty exactly when `|n| = 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Factorization {
    factors: BTreeMap<BigUint, u32>,
}

impl Factorization {
    /// Iterate `(prime, multiplicity)` pairs in ascending prime order.
    pub fn iter(&self) -> impl Iterator<Item = (&BigUint, u32)> + '_ {
        self.factors.iter().map(|(p, &e)| (p, e))
    }

    /// Number of distinct primes.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Multiplicity of `p`, zero when `p` does not divide the factored number.
    pub fn multiplicity(&self, p: &BigUint) -> u32 {
        self.factors.get(p).copied().unwrap_or(0)
    }

    /// Multiply the factorization back out.
    pub fn product(&self) -> BigUint {
        self.iter()
            .fold(BigUint::one(), |acc, (p, e)| acc * p.pow(e))
    }

    fn record(&mut self, p: BigUint) {
        *self.factors.entry(p).or_insert(0) += 1;
    }
}

/// Renders as `2^2  x  5^1`; the empty factorization renders as an empty string.
impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (p, e)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(TERM_SEPARATOR)?;
            }
            write!(f, "{}^{}", p, e)?;
        }
        Ok(())
    }
}

/// Factor `|n|` by trial division.
///
/// Twos are stripped first, then odd candidates from 3 are tried up to
/// `isqrt(remaining) + 1`, the bound being recomputed whenever `remaining`
/// shrinks. A cofactor left above 1 is prime.
///
/// Runs in O(√n) for prime `n`, so only suitable for exploratory inputs.
///
/// # Panics
///
/// Panics if `n` is zero; callers special-case it.
pub fn factorize(n: &BigInt) -> Factorization {
    assert!(!n.is_zero(), "cannot factorize zero");

    let one = BigUint::one();
    let mut factors = Factorization::default();
    let mut remaining = n.magnitude().clone();

    while remaining.is_even() {
        factors.record(BigUint::from(2u32));
        remaining >>= 1u32;
    }

    let mut candidate = BigUint::from(3u32);
    let mut limit = remaining.sqrt() + 1u32;
    while candidate <= limit && remaining > one {
        while (&remaining % &candidate).is_zero() {
            factors.record(candidate.clone());
            remaining /= &candidate;
            limit = remaining.sqrt() + 1u32;
        }
        candidate += 2u32;
    }

    if remaining > one {
        factors.record(remaining);
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn pairs(f: &Factorization) -> Vec<(u64, u32)> {
        f.iter()
            .map(|(p, e)| (p.to_u64_digits().first().copied().unwrap_or(0), e))
            .collect()
    }

    #[test]
    fn test_factorize_small_composites() {
        assert_eq!(pairs(&factorize(&big(60))), vec![(2, 2), (3, 1), (5, 1)]);
        assert_eq!(pairs(&factorize(&big(605))), vec![(5, 1), (11, 2)]);
        assert_eq!(pairs(&factorize(&big(1024))), vec![(2, 10)]);
        assert_eq!(pairs(&factorize(&big(9))), vec![(3, 2)]);
    }

    #[test]
    fn test_factorize_primes() {
        assert_eq!(pairs(&factorize(&big(2))), vec![(2, 1)]);
        assert_eq!(pairs(&factorize(&big(3))), vec![(3, 1)]);
        assert_eq!(pairs(&factorize(&big(104729))), vec![(104729, 1)]);
    }

    #[test]
    fn test_factorize_one_is_empty() {
        assert!(factorize(&big(1)).is_empty());
        assert!(factorize(&big(-1)).is_empty());
        assert_eq!(factorize(&big(1)).product(), BigUint::one());
    }

    #[test]
    fn test_factorize_ignores_sign() {
        assert_eq!(factorize(&big(-84)), factorize(&big(84)));
    }

    #[test]
    fn test_factorize_large_cofactor() {
        // Prime cofactors left over once the bound drops below them.
        for (square, prime) in [(9i64, 1_000_003i64), (4, 998_244_353)] {
            let n = big(square * prime);
            let f = factorize(&n);
            assert_eq!(f.len(), 2, "n = {}", n);
            assert_eq!(f.multiplicity(big(prime).magnitude()), 1);
            assert_eq!(&f.product(), n.magnitude());
        }
        let f = factorize(&big(9 * 1_000_003));
        assert_eq!(f.multiplicity(&BigUint::from(3u32)), 2);
    }

    #[test]
    fn test_product_round_trips() {
        for n in 1..2_000i64 {
            assert_eq!(factorize(&big(n)).product(), BigUint::from(n as u64), "n = {}", n);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(factorize(&big(180)).to_string(), "2^2  x  3^2  x  5^1");
        assert_eq!(factorize(&big(125)).to_string(), "5^3");
        assert_eq!(factorize(&big(1)).to_string(), "");
    }

    #[test]
    #[should_panic(expected = "cannot factorize zero")]
    fn test_factorize_zero_panics() {
        factorize(&big(0));
    }
}
