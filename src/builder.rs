/*! Dataset generation

Turns a [DatasetConfig] into partitions:

1. source files are resolved, either by globbing the manual directory or by downloading (and extracting) them,
2. split generators are built, one per output partition,
3. each generator is run through a [Deduplicator] and written as JSON Lines.

Partitions are independent from each other (each has its own seen-set), and are generated concurrently.
!*/
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{DataSource, DatasetConfig, Extra};
use crate::corpora::{ParseContext, Record, RecordIter};
use crate::download::Downloader;
use crate::error::Error;
use crate::io::writer::JsonlWriter;
use crate::processing::checksum::gen_checksum_file;
use crate::processing::{Deduplicator, FailurePolicy, GenerationStats};
use crate::split::{Partition, SplitPredicate};

/// Resolved input of a configuration.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Files of each upstream partition, sorted.
    pub files: BTreeMap<Partition, Vec<PathBuf>>,
    pub context: ParseContext,
}

/// Files and predicate of a single output partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitGenerator {
    pub partition: Partition,
    pub files: Vec<PathBuf>,
    pub predicate: Option<SplitPredicate>,
}

/// Written alongside the partitions.
#[derive(Debug, Serialize)]
pub struct DatasetInfo<'a> {
    pub config: &'a DatasetConfig,
    pub splits: BTreeMap<Partition, SplitInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SplitInfo {
    pub file: String,
    #[serde(flatten)]
    pub stats: GenerationStats,
}

pub struct Builder<'a> {
    config: &'a DatasetConfig,
    manual_dir: PathBuf,
    policy: FailurePolicy,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a DatasetConfig, manual_dir: PathBuf) -> Self {
        Self {
            config,
            manual_dir,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &DatasetConfig {
        self.config
    }

    /// Resolve (and download if needed) the files of every declared partition, and the extra files.
    pub async fn prepare(&self, downloader: &Downloader) -> Result<Sources, Error> {
        let subdir = self.config.corpus.as_str();
        let mut sources = Sources::default();

        match &self.config.data {
            DataSource::Manual { root, patterns } => {
                let root = self.manual_dir.join(root);
                for (partition, patterns) in patterns {
                    let files = self.glob_all(&root, patterns)?;
                    debug!(
                        "[{}] {}: {} files",
                        self.config.full_name(),
                        partition,
                        files.len()
                    );
                    sources.files.insert(*partition, files);
                }
            }
            DataSource::Remote { urls } => {
                for (partition, urls) in urls {
                    let files = downloader.fetch_and_extract(urls, subdir).await?;
                    if files.is_empty() {
                        return Err(Error::Custom(format!(
                            "[{}] {}: no file left after extraction",
                            self.config.full_name(),
                            partition
                        )));
                    }
                    debug!(
                        "[{}] {}: {} files",
                        self.config.full_name(),
                        partition,
                        files.len()
                    );
                    sources.files.insert(*partition, files);
                }
            }
        }

        match &self.config.extra {
            Some(Extra::Documents { patterns }) => {
                let documents = self.glob_all(&self.manual_dir, patterns)?;
                debug!(
                    "[{}] {} document files",
                    self.config.full_name(),
                    documents.len()
                );
                sources.context = sources.context.with_documents(documents);
            }
            Some(Extra::Auxiliary { url }) => {
                let path = downloader.fetch(url, subdir).await?;
                sources.context = sources.context.with_auxiliary(path);
            }
            None => (),
        }

        Ok(sources)
    }

    /// Glob `patterns` under `root`. Fails if nothing matches.
    fn glob_all(&self, root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, Error> {
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let mut files = Vec::new();
        for pattern in patterns {
            for entry in glob::glob(&format!("{}/{}", escaped_root, pattern))? {
                files.push(entry?);
            }
        }
        files.sort();
        files.dedup();

        if files.is_empty() {
            return Err(Error::MissingFiles {
                config: self.config.full_name(),
                location: root.to_path_buf(),
            });
        }
        Ok(files)
    }

    /// One generator per declared partition, or one per split rule when the configuration has a split preset.
    pub fn split_generators(&self, sources: &Sources) -> Vec<SplitGenerator> {
        match self.config.split {
            None => sources
                .files
                .iter()
                .map(|(partition, files)| SplitGenerator {
                    partition: *partition,
                    files: files.clone(),
                    predicate: None,
                })
                .collect(),
            Some(preset) => preset
                .scheme()
                .rules
                .into_iter()
                .map(|rule| SplitGenerator {
                    partition: rule.partition,
                    files: rule
                        .sources
                        .iter()
                        .filter_map(|source| sources.files.get(source))
                        .flatten()
                        .cloned()
                        .collect(),
                    predicate: Some(rule.predicate),
                })
                .collect(),
        }
    }

    /// Deduplicated `(identifier, record)` stream of a generator.
    pub fn generate(
        &self,
        generator: &SplitGenerator,
        context: &ParseContext,
    ) -> Deduplicator<impl FnMut(&Path) -> Result<RecordIter, Error>, RecordIter> {
        let parser = self.config.parser;
        let context = context.clone();
        let name = format!("{}/{}", self.config.full_name(), generator.partition);
        let dedup = Deduplicator::new(name, generator.files.clone(), move |path: &Path| {
            parser.parse(path, &context)
        })
        .with_policy(self.policy);

        match &generator.predicate {
            Some(predicate) => dedup.with_predicate(*predicate),
            None => dedup,
        }
    }

    /// Generate every partition into `<dst>/<corpus>/<config>/`.
    ///
    /// Returns the output directory.
    pub fn write(&self, sources: &Sources, dst: &Path, gzip: bool) -> Result<PathBuf, Error> {
        let out_dir = dst
            .join(self.config.corpus.as_str())
            .join(&self.config.name);
        std::fs::create_dir_all(&out_dir)?;

        let generators = self.split_generators(sources);
        let splits = generators
            .par_iter()
            .map(|generator| -> Result<(Partition, SplitInfo), Error> {
                let info = self.write_partition(generator, &sources.context, &out_dir, gzip)?;
                Ok((generator.partition, info))
            })
            .collect::<Result<BTreeMap<_, _>, Error>>()?;

        let info = DatasetInfo {
            config: self.config,
            splits,
        };
        let info_file = std::fs::File::create(out_dir.join("dataset_info.json"))?;
        serde_json::to_writer_pretty(info_file, &info)?;

        gen_checksum_file(&out_dir, &self.config.name)?;
        Ok(out_dir)
    }

    fn write_partition(
        &self,
        generator: &SplitGenerator,
        context: &ParseContext,
        out_dir: &Path,
        gzip: bool,
    ) -> Result<SplitInfo, Error> {
        info!(
            "[{}] generating {} from {} files",
            self.config.full_name(),
            generator.partition,
            generator.files.len()
        );
        let mut writer = JsonlWriter::new(out_dir, generator.partition, gzip)?;
        let mut records = self.generate(generator, context);
        for item in &mut records {
            let (key, record): (String, Record) = item?;
            writer.write(&key, &record)?;
        }

        let stats = records.stats().clone();
        let path = writer.finish()?;
        info!(
            "[{}] {}: {} records, {} duplicates, {} filtered, {} failed files",
            self.config.full_name(),
            generator.partition,
            stats.emitted,
            stats.duplicates,
            stats.filtered,
            stats.failed_files
        );

        Ok(SplitInfo {
            file: path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            stats,
        })
    }
}
