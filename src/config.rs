/*! Dataset configurations

A configuration names a corpus variant: where its files are, how to parse them and how to split the result.
Configurations are plain data, see [crate::registry] for the declared ones.
!*/
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::corpora::ParserKind;
use crate::error::Error;
use crate::split::{Partition, SplitPreset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corpus {
    Aihub,
    Klue,
    Korquad,
    Nikl,
    KorCorpora,
}

impl Corpus {
    pub const ALL: [Corpus; 5] = [
        Corpus::Aihub,
        Corpus::Klue,
        Corpus::Korquad,
        Corpus::Nikl,
        Corpus::KorCorpora,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Corpus::Aihub => "aihub",
            Corpus::Klue => "klue",
            Corpus::Korquad => "korquad",
            Corpus::Nikl => "nikl",
            Corpus::KorCorpora => "kor_corpora",
        }
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corpus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Corpus::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| Error::UnknownConfig(s.to_string()))
    }
}

/// Patterns (or urls) by upstream partition.
pub type FileMap = BTreeMap<Partition, Vec<String>>;

/// Where the files of a configuration come from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    /// Files downloaded by hand under `<manual dir>/<root>`, matched by glob patterns.
    Manual { root: String, patterns: FileMap },
    /// Files fetched into the cache directory.
    Remote { urls: FileMap },
}

/// Files needed by a parser besides the ones being parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Extra {
    /// Corpus files looked up by file stem, as glob patterns relative to the manual dir.
    Documents { patterns: Vec<String> },
    /// A single remote file, such as an ontology.
    Auxiliary { url: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub corpus: Corpus,
    pub name: String,
    pub data: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Extra>,
    pub parser: ParserKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitPreset>,
    pub homepage: String,
}

impl DatasetConfig {
    /// Configuration of manually downloaded files.
    pub fn manual(
        corpus: Corpus,
        name: &str,
        root: &str,
        patterns: &[(Partition, &[&str])],
        parser: ParserKind,
    ) -> Self {
        Self {
            corpus,
            name: name.to_string(),
            data: DataSource::Manual {
                root: root.to_string(),
                patterns: file_map(patterns),
            },
            extra: None,
            parser,
            split: None,
            homepage: String::new(),
        }
    }

    /// Configuration of remote files.
    pub fn remote(
        corpus: Corpus,
        name: &str,
        urls: &[(Partition, &[&str])],
        parser: ParserKind,
    ) -> Self {
        Self {
            corpus,
            name: name.to_string(),
            data: DataSource::Remote {
                urls: file_map(urls),
            },
            extra: None,
            parser,
            split: None,
            homepage: String::new(),
        }
    }

    pub fn with_split(mut self, split: SplitPreset) -> Self {
        self.split = Some(split);
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = Some(extra);
        self
    }

    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_homepage(mut self, homepage: &str) -> Self {
        self.homepage = homepage.to_string();
        self
    }

    /// `<corpus>/<name>`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.corpus, self.name)
    }

    /// Upstream partitions declared by the data source.
    pub fn partitions(&self) -> Vec<Partition> {
        match &self.data {
            DataSource::Manual { patterns, .. } => patterns.keys().copied().collect(),
            DataSource::Remote { urls } => urls.keys().copied().collect(),
        }
    }

    /// Partitions that generation produces.
    pub fn output_partitions(&self) -> Vec<Partition> {
        match self.split {
            Some(preset) => preset.scheme().rules.iter().map(|r| r.partition).collect(),
            None => self.partitions(),
        }
    }
}

fn file_map(entries: &[(Partition, &[&str])]) -> FileMap {
    entries
        .iter()
        .map(|(partition, files)| (*partition, files.iter().map(|f| f.to_string()).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpora::kor_corpora;

    fn nsmc() -> DatasetConfig {
        DatasetConfig::remote(
            Corpus::KorCorpora,
            "nsmc.split",
            &[
                (Partition::Train, &["https://example.org/ratings_train.txt"]),
                (Partition::Test, &["https://example.org/ratings_test.txt"]),
            ],
            ParserKind::KorCorpora(kor_corpora::Format::Nsmc),
        )
        .with_split(SplitPreset::Holdout)
    }

    #[test]
    fn corpus_names() {
        for corpus in Corpus::ALL {
            assert_eq!(corpus.as_str().parse::<Corpus>().unwrap(), corpus);
        }
        assert!("squad".parse::<Corpus>().is_err());
    }

    #[test]
    fn partitions() {
        let config = nsmc();
        assert_eq!(config.partitions(), vec![Partition::Train, Partition::Test]);
        assert_eq!(
            config.output_partitions(),
            vec![Partition::Train, Partition::Validation, Partition::Test]
        );
        assert_eq!(config.full_name(), "kor_corpora/nsmc.split");
    }

    #[test]
    fn serialized_form() {
        let value = serde_json::to_value(nsmc()).unwrap();
        assert_eq!(value["data"]["kind"], "remote");
        assert_eq!(
            value["data"]["urls"]["test"][0],
            "https://example.org/ratings_test.txt"
        );
        assert_eq!(value["parser"]["format"], "nsmc");
        assert_eq!(value["split"], "holdout");
        assert!(value.get("extra").is_none());

        let back: DatasetConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, nsmc());
    }
}
