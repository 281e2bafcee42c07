/*! Deterministic splitting

Records are assigned to partitions by hashing their identifier (md5, read as a 128-bit big-endian integer)
and testing the resulting value against a per-partition predicate.

Assignment only depends on the identifier, so it is stable across runs, file orderings and re-shardings.
!*/
mod hash;
mod predicate;
mod scheme;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use hash::{hash_text, hash_value, split_assign};
pub use predicate::{SplitFn, SplitPredicate};
pub use scheme::{SplitPreset, SplitRule, SplitScheme};

/// A named, disjoint subset of a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Validation,
    Test,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Train => "train",
            Partition::Validation => "validation",
            Partition::Test => "test",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
