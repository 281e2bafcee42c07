//! Split schemes: which upstream partitions feed which output partitions, and through which predicate.
use serde::{Deserialize, Serialize};

use super::{Partition, SplitPredicate};

/// Output partition built from the files of `sources`, keeping records matching `predicate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRule {
    pub partition: Partition,
    pub sources: Vec<Partition>,
    pub predicate: SplitPredicate,
}

impl SplitRule {
    pub fn new(partition: Partition, sources: Vec<Partition>, predicate: SplitPredicate) -> Self {
        Self {
            partition,
            sources,
            predicate,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitScheme {
    pub rules: Vec<SplitRule>,
}

/// Named split schemes shared by configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPreset {
    /// ~0.1% of the train files held out for validation.
    RawCorpus,
    /// 80/10/10 over the train files.
    DownstreamTask,
    /// 90/10 train/validation over the train files, test taken whole from the upstream test (or dev) files.
    Holdout,
}

impl SplitPreset {
    pub fn scheme(&self) -> SplitScheme {
        use Partition::*;
        let rules = match self {
            SplitPreset::RawCorpus => vec![
                SplitRule::new(
                    Train,
                    vec![Train],
                    SplitPredicate::ModGt {
                        modulus: 1000,
                        threshold: 0,
                    },
                ),
                SplitRule::new(
                    Validation,
                    vec![Train],
                    SplitPredicate::ModEq {
                        modulus: 1000,
                        remainder: 0,
                    },
                ),
            ],
            SplitPreset::DownstreamTask => vec![
                SplitRule::new(
                    Train,
                    vec![Train],
                    SplitPredicate::ModGt {
                        modulus: 10,
                        threshold: 1,
                    },
                ),
                SplitRule::new(
                    Validation,
                    vec![Train],
                    SplitPredicate::ModEq {
                        modulus: 10,
                        remainder: 0,
                    },
                ),
                SplitRule::new(
                    Test,
                    vec![Train],
                    SplitPredicate::ModEq {
                        modulus: 10,
                        remainder: 1,
                    },
                ),
            ],
            SplitPreset::Holdout => vec![
                SplitRule::new(
                    Train,
                    vec![Train],
                    SplitPredicate::ModNe {
                        modulus: 10,
                        remainder: 0,
                    },
                ),
                SplitRule::new(
                    Validation,
                    vec![Train],
                    SplitPredicate::ModEq {
                        modulus: 10,
                        remainder: 0,
                    },
                ),
                SplitRule::new(Test, vec![Test], SplitPredicate::All),
            ],
        };

        SplitScheme { rules }
    }
}

impl From<SplitPreset> for SplitScheme {
    fn from(preset: SplitPreset) -> Self {
        preset.scheme()
    }
}
