//! Split predicates.
//!
//! [SplitFn] is implemented for closures and for [SplitPredicate],
//! the serializable form used by dataset configurations.
use serde::{Deserialize, Serialize};

/// membership test over a hashed identifier.
pub trait SplitFn {
    fn contains(&self, value: u128) -> bool;
}

impl<F> SplitFn for F
where
    F: Fn(u128) -> bool,
{
    #[inline]
    fn contains(&self, value: u128) -> bool {
        self(value)
    }
}

/// Predicates usable in configurations.
///
/// Partitions built from a set of predicates are only disjoint and exhaustive
/// if the predicates are; this is not checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SplitPredicate {
    /// `v % modulus == remainder`
    ModEq { modulus: u64, remainder: u64 },
    /// `v % modulus > threshold`
    ModGt { modulus: u64, threshold: u64 },
    /// `v % modulus != remainder`
    ModNe { modulus: u64, remainder: u64 },
    /// every value.
    All,
}

impl SplitFn for SplitPredicate {
    fn contains(&self, value: u128) -> bool {
        match *self {
            SplitPredicate::ModEq { modulus, remainder } => {
                value % u128::from(modulus) == u128::from(remainder)
            }
            SplitPredicate::ModGt { modulus, threshold } => {
                value % u128::from(modulus) > u128::from(threshold)
            }
            SplitPredicate::ModNe { modulus, remainder } => {
                value % u128::from(modulus) != u128::from(remainder)
            }
            SplitPredicate::All => true,
        }
    }
}
