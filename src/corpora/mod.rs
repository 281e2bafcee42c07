/*! Corpus parsers

One module per corpus family. Each exposes a `Format` tag naming its file layouts, a `Record` enum of
normalized records, and a `parse` function turning one file into a [RecordIter].

[ParserKind] is the tag stored in dataset configurations and dispatches to the right module.

Identifiers are the corpus identifiers when records have one.
Records without one are identified by their index in the file, prefixed by the file stem
when a configuration can match several files.
!*/
pub mod aihub;
pub mod klue;
pub mod kor_corpora;
pub mod korquad;
pub mod nikl;
pub mod text;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A normalized record of any corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Aihub(aihub::Record),
    Klue(klue::Record),
    Korquad(korquad::Record),
    Nikl(nikl::Record),
    KorCorpora(kor_corpora::Record),
}

/// Lazy stream of `(identifier, record)` pairs of a single file.
pub type RecordIter = Box<dyn Iterator<Item = Result<(String, Record), Error>>>;

/// Files a parser may need besides the one being parsed.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    /// Additional corpus files, by file stem.
    pub documents: HashMap<String, PathBuf>,
    /// Auxiliary file (e.g. an ontology).
    pub auxiliary: Option<PathBuf>,
}

impl ParseContext {
    pub fn with_documents<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in paths {
            self.documents.insert(file_stem(&path), path);
        }
        self
    }

    pub fn with_auxiliary(mut self, path: PathBuf) -> Self {
        self.auxiliary = Some(path);
        self
    }

    /// Document file whose stem is the first `.` separated component of `id`.
    pub fn document_of(&self, id: &str) -> Option<&Path> {
        let key = id.split('.').next().unwrap_or_default();
        self.documents.get(key).map(PathBuf::as_path)
    }
}

/// Parser tag, as stored in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "corpus", content = "format", rename_all = "snake_case")]
pub enum ParserKind {
    Aihub(aihub::Format),
    Klue(klue::Format),
    Korquad(korquad::Format),
    Nikl(nikl::Format),
    KorCorpora(kor_corpora::Format),
}

impl ParserKind {
    pub fn parse(&self, path: &Path, ctx: &ParseContext) -> Result<RecordIter, Error> {
        match self {
            ParserKind::Aihub(format) => aihub::parse(*format, path),
            ParserKind::Klue(format) => klue::parse(*format, path, ctx),
            ParserKind::Korquad(format) => korquad::parse(*format, path),
            ParserKind::Nikl(format) => nikl::parse(*format, path, ctx),
            ParserKind::KorCorpora(format) => kor_corpora::parse(*format, path),
        }
    }
}

/// File name without its last extension.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<file stem>.<idx>`
pub(crate) fn indexed_id(stem: &str, idx: usize) -> String {
    format!("{}.{}", stem, idx)
}

/// Boxes a per-corpus iterator into a [RecordIter].
pub(crate) fn boxed<I, R>(records: I) -> RecordIter
where
    I: Iterator<Item = Result<(String, R), Error>> + 'static,
    R: Into<Record>,
{
    Box::new(records.map(|r| r.map(|(id, record)| (id, record.into()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parser_kind_tags() {
        let kind = ParserKind::Nikl(nikl::Format::NewspaperPage);
        let s = serde_json::to_string(&kind).unwrap();
        assert_eq!(s, r#"{"corpus":"nikl","format":"newspaper_page"}"#);
        let back: ParserKind = serde_json::from_str(&s).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn document_lookup_by_stem() {
        let ctx = ParseContext::default().with_documents(vec![
            PathBuf::from("/data/NIKL/v1.0/NEWSPAPER/NWRW1800000021.json"),
            PathBuf::from("/data/NIKL/v1.0/SPOKEN/SARW1800000001.json"),
        ]);
        assert_eq!(
            ctx.document_of("NWRW1800000021.1.2"),
            Some(Path::new("/data/NIKL/v1.0/NEWSPAPER/NWRW1800000021.json"))
        );
        assert_eq!(ctx.document_of("NWRW1900000001.1"), None);
    }

    #[test]
    fn ids() {
        assert_eq!(file_stem(Path::new("a/b/train_01.json")), "train_01");
        assert_eq!(indexed_id("train_01", 3), "train_01.3");
    }
}
