//! Report rows and their CSV line form.

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;
use std::fmt;

use divisor_sigma::factorize;

/// First line of every shard file.
pub const HEADER: &str = "\"square root\",\"base\",\"increment\",\"σ₂([base=increment]²)\",\"count\",\"σ₂() mod 100\",\"σ₂() mod 10\",\"factors of square root\"";

/// One line of the report: a `(base, increment)` pair sharing `square_root`
/// with the diagonal pair whose σ₂ is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Grouping key; rows with equal roots stay in one shard.
    pub square_root: u128,
    pub base: u64,
    pub increment: u64,
    /// σ₂(s²) for the diagonal `s = base = increment` of this root.
    pub sigma2: BigUint,
    /// Number of pairs sharing this root, both orderings included.
    pub count: u64,
    pub sigma2_mod100: u32,
    pub sigma2_mod10: u32,
    /// Factorization text of the square root, e.g. `5^1  x  11^2`.
    pub factorization: String,
}

/// Per-root columns shared by every row of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSummary {
    pub sigma2: BigUint,
    pub count: u64,
    pub factorization: String,
}

impl RootSummary {
    pub fn new(square_root: u128, sigma2: BigUint, count: u64) -> Self {
        let factorization = if square_root == 0 {
            String::new()
        } else {
            factorize(&BigInt::from(square_root)).to_string()
        };
        Self {
            sigma2,
            count,
            factorization,
        }
    }
}

impl ReportRow {
    pub fn new(square_root: u128, base: u64, increment: u64, summary: &RootSummary) -> Self {
        let sigma2_mod100 = (&summary.sigma2 % 100u32).to_u32().unwrap_or_default();
        Self {
            square_root,
            base,
            increment,
            sigma2: summary.sigma2.clone(),
            count: summary.count,
            sigma2_mod100,
            sigma2_mod10: sigma2_mod100 % 10,
            factorization: summary.factorization.clone(),
        }
    }
}

/// `squareRoot,base,increment,sigma2,count,mod100,mod10,"factorization"`.
/// Only the factorization is quoted; nothing is escaped.
impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},\"{}\"",
            self.square_root,
            self.base,
            self.increment,
            self.sigma2,
            self.count,
            self.sigma2_mod100,
            self.sigma2_mod10,
            self.factorization
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_columns() {
        assert_eq!(HEADER.split(',').count(), 8);
        assert!(HEADER.starts_with("\"square root\""));
        assert!(HEADER.ends_with("\"factors of square root\""));
    }

    #[test]
    fn test_row_line() {
        let summary = RootSummary::new(180, BigUint::from(1911u32), 1);
        let row = ReportRow::new(180, 6, 6, &summary);
        assert_eq!(row.sigma2_mod100, 11);
        assert_eq!(row.sigma2_mod10, 1);
        assert_eq!(row.to_string(), "180,6,6,1911,1,11,1,\"2^2  x  3^2  x  5^1\"");
    }

    #[test]
    fn test_row_shares_summary() {
        let summary = RootSummary::new(605, BigUint::from(14_763u32), 3);
        let a = ReportRow::new(605, 4, 19, &summary);
        let b = ReportRow::new(605, 19, 4, &summary);
        assert_eq!(a.factorization, "5^1  x  11^2");
        assert_eq!(a.sigma2, b.sigma2);
        assert_eq!(a.to_string(), "605,4,19,14763,3,63,3,\"5^1  x  11^2\"");
    }

    #[test]
    fn test_square_root_one_has_empty_factorization() {
        let summary = RootSummary::new(1, BigUint::from(1u32), 1);
        assert_eq!(ReportRow::new(1, 0, 0, &summary).to_string(), "1,0,0,1,1,1,1,\"\"");
    }
}
