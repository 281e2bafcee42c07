/*! Deduplication

Wraps a list of source files and a per-file parser into a single stream of `(identifier, record)` pairs,
where each identifier is emitted at most once.

Identifiers are tracked through their md5 value (see [crate::split::hash_value]), and the seen-set only lives
as long as the [Deduplicator] itself.
!*/
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::split::{hash_value, SplitFn};

/// What to do when a source file fails to open or parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// log the error, skip the rest of the file and go on with the next one.
    #[default]
    BestEffort,
    /// yield the error and stop.
    Strict,
}

/// Counters of a single generation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub emitted: u64,
    pub duplicates: u64,
    pub filtered: u64,
    pub failed_files: u64,
}

/// Deduplicating iterator over the records of a list of files.
///
/// `parse` turns a path into an iterator of `(identifier, record)` results.
/// An error from `parse` itself or from the returned iterator is a per-file failure,
/// handled according to the [FailurePolicy].
pub struct Deduplicator<F, I> {
    name: String,
    files: std::vec::IntoIter<PathBuf>,
    parse: F,
    current: Option<(PathBuf, I)>,
    predicate: Option<Box<dyn SplitFn>>,
    seen: HashSet<u128>,
    policy: FailurePolicy,
    stats: GenerationStats,
    done: bool,
}

impl<F, I, R> Deduplicator<F, I>
where
    F: FnMut(&Path) -> Result<I, Error>,
    I: Iterator<Item = Result<(String, R), Error>>,
{
    /// `name` is only used for logging.
    pub fn new(name: impl Into<String>, files: Vec<PathBuf>, parse: F) -> Self {
        Self {
            name: name.into(),
            files: files.into_iter(),
            parse,
            current: None,
            predicate: None,
            seen: HashSet::new(),
            policy: FailurePolicy::default(),
            stats: GenerationStats::default(),
            done: false,
        }
    }

    /// Only keep records whose identifier satisfies `predicate`.
    pub fn with_predicate<P>(mut self, predicate: P) -> Self
    where
        P: SplitFn + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Handles a per-file failure. Returns the error if it has to be yielded.
    fn fail(&mut self, path: &Path, e: Error) -> Option<Error> {
        self.stats.failed_files += 1;
        self.current = None;
        match self.policy {
            FailurePolicy::BestEffort => {
                error!("[{}] skipping rest of {:?}: {}", self.name, path, e);
                None
            }
            FailurePolicy::Strict => {
                error!("[{}] failed on {:?}: {}", self.name, path, e);
                self.done = true;
                Some(e)
            }
        }
    }

    /// Opens the next file, skipping (or yielding, in strict mode) the ones that fail to open.
    /// Returns false when there is no file left.
    fn open_next(&mut self) -> Result<bool, Error> {
        while let Some(path) = self.files.next() {
            debug!("[{}] reading {:?}", self.name, path);
            match (self.parse)(&path) {
                Ok(records) => {
                    self.current = Some((path, records));
                    return Ok(true);
                }
                Err(e) => {
                    if let Some(e) = self.fail(&path, e) {
                        return Err(e);
                    }
                }
            }
        }
        Ok(false)
    }

    fn accept(&mut self, identifier: &str) -> bool {
        if let Some(predicate) = &self.predicate {
            if !predicate.contains(hash_value(identifier)) {
                self.stats.filtered += 1;
                return false;
            }
        }

        if self.seen.insert(hash_value(identifier)) {
            self.stats.emitted += 1;
            true
        } else {
            self.stats.duplicates += 1;
            false
        }
    }
}

impl<F, I, R> Iterator for Deduplicator<F, I>
where
    F: FnMut(&Path) -> Result<I, Error>,
    I: Iterator<Item = Result<(String, R), Error>>,
{
    type Item = Result<(String, R), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if self.current.is_none() {
                match self.open_next() {
                    Ok(true) => (),
                    Ok(false) => {
                        info!(
                            "[{}] done: {} emitted, {} duplicates, {} filtered, {} failed files",
                            self.name,
                            self.stats.emitted,
                            self.stats.duplicates,
                            self.stats.filtered,
                            self.stats.failed_files
                        );
                        self.done = true;
                        return None;
                    }
                    Err(e) => return Some(Err(e)),
                }
            }

            let (path, records) = self.current.as_mut()?;
            match records.next() {
                Some(Ok((identifier, record))) => {
                    if self.accept(&identifier) {
                        return Some(Ok((identifier, record)));
                    }
                }
                Some(Err(e)) => {
                    let path = path.clone();
                    if let Some(e) = self.fail(&path, e) {
                        return Some(Err(e));
                    }
                }
                None => self.current = None,
            }
        }
    }
}
