/*! NIKL (National Institute of Korean Language) corpora

Most corpora are JSON files holding a `document` array. Summarization and paraphrase files hold a `data` array
and refer to documents of the newspaper (and spoken) corpora, which are looked up through [ParseContext::documents].

CoLA is a TSV file with a header.
!*/
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::text::{join_page, str_or, terminate};
use super::{boxed, ParseContext, RecordIter};
use crate::error::Error;
use crate::io::reader::json::{read_json, take_array};
use crate::io::reader::tsv;
use crate::split::hash_text;

/// Default of absent speaker and setting metadata.
const NA: &str = "NA";

/// Key of the principal residence in speaker metadata, as spelled in the corpus files.
const PRINCIPAL_RESIDENCE_KEY: &str = "pricipal_residence";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// newspaper documents, paragraph by paragraph.
    Newspaper,
    /// newspaper documents, paragraphs joined.
    NewspaperPage,
    /// written/web documents, paragraph by paragraph.
    Written,
    /// written/web documents, paragraphs joined.
    WrittenPage,
    /// one record per paragraph.
    ParagraphPage,
    Spoken,
    Messenger,
    /// context/next utterance pairs of spoken or messenger conversations.
    Utterance,
    /// annotated sentences (MP, LS, NE, DP).
    Sentence,
    /// both summary and topic sentences.
    Summarization,
    SummarizationSummary,
    SummarizationTopic,
    Paraphrase,
    Cola,
    /// coreference, mentions rebased on the joined text.
    Coreference,
    /// coreference documents as is.
    CoreferenceFull,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Newspaper {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub original_topic: String,
    pub paragraph: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewspaperPage {
    pub id: String,
    pub title: String,
    pub topic: String,
    pub original_topic: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Written {
    pub id: String,
    pub title: String,
    pub paragraph: Vec<Paragraph>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Speaker {
    pub id: String,
    pub age: String,
    pub occupation: String,
    pub sex: String,
    pub birthplace: String,
    pub principal_residence: String,
    pub current_residence: String,
    pub education: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    pub relation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intimacy: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_frequency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationMetadata {
    pub topic: String,
    pub speaker: Vec<Speaker>,
    pub setting: Setting,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub form: String,
    pub speaker_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub id: String,
    pub metadata: ConversationMetadata,
    pub utterance: Vec<Utterance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtterancePair {
    pub id: String,
    pub context: Vec<Utterance>,
    pub next_utterance: Utterance,
}

/// Annotated sentence. Annotation layers (`word`, `morpheme`, `WSD`, `NE`, `DP`...) are kept as found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    pub form: String,
    #[serde(flatten)]
    pub annotations: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub document_id: String,
    pub article: String,
    pub highlights: String,
    pub summary_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParaphraseForm {
    #[serde(default)]
    pub form: String,
    #[serde(default)]
    pub generation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paraphrase {
    pub sentence_id: String,
    pub sentence_form: String,
    pub paraphrases: Vec<ParaphraseForm>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cola {
    pub idx: u64,
    pub sentence: String,
    /// 0: unacceptable, 1: acceptable
    pub label: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
    pub form: String,
    pub begin: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionGroup {
    pub mention: Vec<Mention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coreference {
    pub id: String,
    pub text: String,
    #[serde(rename = "CR")]
    pub cr: Vec<MentionGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Newspaper(Newspaper),
    NewspaperPage(NewspaperPage),
    Written(Written),
    Page(Page),
    Conversation(Conversation),
    UtterancePair(UtterancePair),
    Sentence(Sentence),
    Summary(Summary),
    Paraphrase(Paraphrase),
    Cola(Cola),
    Coreference(Coreference),
    Full(Value),
}

impl From<Record> for super::Record {
    fn from(r: Record) -> Self {
        super::Record::Nikl(r)
    }
}

// raw layout of the corpus files

#[derive(Debug, Clone, Default, Deserialize)]
struct RawParagraph {
    #[serde(default)]
    id: String,
    #[serde(default)]
    form: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawUtterance {
    #[serde(default)]
    id: String,
    #[serde(default)]
    form: String,
    #[serde(default)]
    speaker_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawDocument {
    id: String,
    #[serde(default)]
    metadata: Map<String, Value>,
    #[serde(default)]
    paragraph: Vec<RawParagraph>,
    #[serde(default)]
    utterance: Vec<RawUtterance>,
}

impl RawDocument {
    fn meta(&self, key: &str) -> String {
        str_or(&self.metadata, key, "")
    }

    fn paragraphs(&self) -> Vec<Paragraph> {
        self.paragraph
            .iter()
            .filter(|p| !p.form.trim().is_empty())
            .map(|p| Paragraph {
                form: p.form.clone(),
            })
            .collect()
    }

    fn page(&self) -> String {
        join_page(self.paragraph.iter().map(|p| p.form.as_str()))
    }

    fn speakers(&self) -> Vec<Map<String, Value>> {
        match self.metadata.get("speaker") {
            Some(Value::Array(speakers)) => speakers
                .iter()
                .filter_map(|s| s.as_object().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn raw_document(value: Value) -> Result<RawDocument, Error> {
    Ok(serde_json::from_value(value)?)
}

/// Items of the array at `key` of a JSON file.
fn items(path: &Path, key: &'static str) -> Result<std::vec::IntoIter<Value>, Error> {
    let mut root: Value = read_json(path)?;
    Ok(take_array(&mut root, key, path)?.into_iter())
}

pub fn parse(format: Format, path: &Path, ctx: &ParseContext) -> Result<RecordIter, Error> {
    let records = match format {
        Format::Cola => return parse_cola(path),
        Format::Newspaper => boxed(items(path, "document")?.map(newspaper)),
        Format::NewspaperPage => boxed(items(path, "document")?.map(newspaper_page)),
        Format::Written => boxed(items(path, "document")?.map(written)),
        Format::WrittenPage => boxed(items(path, "document")?.map(written_page)),
        Format::ParagraphPage => boxed(items(path, "document")?.flat_map(paragraph_pages)),
        Format::Spoken => boxed(items(path, "document")?.map(|v| conversation(v, false))),
        Format::Messenger => boxed(items(path, "document")?.map(|v| conversation(v, true))),
        Format::Utterance => boxed(items(path, "document")?.flat_map(utterances)),
        Format::Sentence => boxed(items(path, "document")?.flat_map(sentences)),
        Format::Summarization => summaries(items(path, "data")?, ctx, &SUMMARY_TYPES),
        Format::SummarizationSummary => {
            summaries(items(path, "data")?, ctx, &SUMMARY_TYPES[..1])
        }
        Format::SummarizationTopic => summaries(items(path, "data")?, ctx, &SUMMARY_TYPES[1..]),
        Format::Paraphrase => paraphrases(items(path, "data")?, ctx),
        Format::Coreference => boxed(items(path, "document")?.map(coreference)),
        Format::CoreferenceFull => boxed(items(path, "document")?.map(full_document)),
    };

    Ok(records)
}

type Item = Result<(String, Record), Error>;

fn newspaper(value: Value) -> Item {
    let doc = raw_document(value)?;
    let record = Newspaper {
        id: doc.id.clone(),
        title: doc.meta("title"),
        topic: doc.meta("topic"),
        original_topic: doc.meta("original_topic"),
        paragraph: doc.paragraphs(),
    };
    Ok((doc.id, Record::Newspaper(record)))
}

fn newspaper_page(value: Value) -> Item {
    let doc = raw_document(value)?;
    let record = NewspaperPage {
        id: doc.id.clone(),
        title: doc.meta("title"),
        topic: doc.meta("topic"),
        original_topic: doc.meta("original_topic"),
        text: doc.page(),
    };
    Ok((doc.id, Record::NewspaperPage(record)))
}

fn written(value: Value) -> Item {
    let doc = raw_document(value)?;
    let record = Written {
        id: doc.id.clone(),
        title: doc.meta("title"),
        paragraph: doc.paragraphs(),
    };
    Ok((doc.id, Record::Written(record)))
}

fn written_page(value: Value) -> Item {
    let doc = raw_document(value)?;
    let record = Page {
        id: doc.id.clone(),
        title: doc.meta("title"),
        text: doc.page(),
    };
    Ok((doc.id, Record::Page(record)))
}

fn paragraph_pages(value: Value) -> Vec<Item> {
    let doc = match raw_document(value) {
        Ok(doc) => doc,
        Err(e) => return vec![Err(e)],
    };
    let title = doc.meta("title");
    doc.paragraph
        .into_iter()
        .map(|p| {
            let record = Page {
                id: p.id.clone(),
                title: title.clone(),
                text: p.form.trim().to_string(),
            };
            Ok((p.id, Record::Page(record)))
        })
        .collect()
}

fn utterances(value: Value) -> Vec<Item> {
    let doc = match raw_document(value) {
        Ok(doc) => doc,
        Err(e) => return vec![Err(e)],
    };
    if doc.speakers().len() >= 3 {
        debug!("skipping {}: more than two speakers", doc.id);
        return Vec::new();
    }
    utterance_pairs(&doc)
        .into_iter()
        .map(|pair| Ok((pair.id.clone(), Record::UtterancePair(pair))))
        .collect()
}

fn full_document(value: Value) -> Item {
    let id = value
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::missing("id", "coreference document"))?
        .to_string();
    Ok((id, Record::Full(value)))
}

fn speaker(raw: &Map<String, Value>) -> Speaker {
    Speaker {
        id: str_or(raw, "id", ""),
        age: str_or(raw, "age", NA),
        occupation: str_or(raw, "occupation", NA),
        sex: str_or(raw, "sex", NA),
        birthplace: str_or(raw, "birthplace", NA),
        principal_residence: str_or(raw, PRINCIPAL_RESIDENCE_KEY, NA),
        current_residence: str_or(raw, "current_residence", NA),
        education: str_or(raw, "education", NA),
    }
}

fn setting(raw: Option<&Value>, messenger: bool) -> Setting {
    let empty = Map::new();
    let raw = raw.and_then(Value::as_object).unwrap_or(&empty);
    Setting {
        relation: str_or(raw, "relation", NA),
        intimacy: messenger.then(|| {
            raw.get("intimacy")
                .cloned()
                .unwrap_or_else(|| Value::String(NA.to_string()))
        }),
        contact_frequency: messenger.then(|| str_or(raw, "contact_frequency", NA)),
    }
}

fn conversation(value: Value, messenger: bool) -> Item {
    let doc = raw_document(value)?;
    let metadata = ConversationMetadata {
        topic: str_or(&doc.metadata, "topic", NA),
        speaker: doc.speakers().iter().map(speaker).collect(),
        setting: setting(doc.metadata.get("setting"), messenger),
    };
    let utterance = doc
        .utterance
        .iter()
        .filter(|u| !u.form.trim().is_empty())
        .map(|u| Utterance {
            form: u.form.clone(),
            speaker_id: u.speaker_id.clone(),
        })
        .collect();

    let record = Conversation {
        id: doc.id.clone(),
        metadata,
        utterance,
    };
    Ok((doc.id, Record::Conversation(record)))
}

/// Merges consecutive utterances of the same speaker.
///
/// Each merged utterance ends with punctuation, blank utterances are dropped.
fn merge_utterances(utterances: &[RawUtterance]) -> Vec<Utterance> {
    let mut merged: Vec<Utterance> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    for u in utterances {
        let form = match terminate(&u.form) {
            Some(form) => form,
            None => continue,
        };
        match &mut current {
            Some((speaker, forms)) if *speaker == u.speaker_id => forms.push(form),
            _ => {
                if let Some((speaker_id, forms)) = current.take() {
                    merged.push(Utterance {
                        form: forms.join(" "),
                        speaker_id,
                    });
                }
                current = Some((u.speaker_id.clone(), vec![form]));
            }
        }
    }

    if let Some((speaker_id, forms)) = current {
        merged.push(Utterance {
            form: forms.join(" "),
            speaker_id,
        });
    }

    merged
}

fn utterance_pairs(doc: &RawDocument) -> Vec<UtterancePair> {
    let merged = merge_utterances(&doc.utterance);
    (1..merged.len())
        .map(|idx| UtterancePair {
            id: format!("{}.{}", doc.id, idx),
            context: merged[..idx].to_vec(),
            next_utterance: merged[idx].clone(),
        })
        .collect()
}

fn sentences(mut value: Value) -> Vec<Item> {
    let sentences = match value.get_mut("sentence").map(Value::take) {
        Some(Value::Array(sentences)) => sentences,
        Some(_) | None => return vec![Err(Error::missing("sentence", "document"))],
    };

    sentences
        .into_iter()
        .filter_map(|s| match serde_json::from_value::<Sentence>(s) {
            Ok(s) if s.form.is_empty() => None,
            Ok(s) => Some(Ok((s.id.clone(), Record::Sentence(s)))),
            Err(e) => Some(Err(e.into())),
        })
        .collect()
}

const SUMMARY_TYPES: [&str; 2] = ["summary_sentences", "topic_sentences"];

/// Documents of the last referenced document file.
#[derive(Debug, Default)]
struct DocumentCache {
    path: Option<PathBuf>,
    documents: HashMap<String, RawDocument>,
    /// paragraph and utterance forms, by id.
    sentences: HashMap<String, String>,
}

impl DocumentCache {
    fn load(&mut self, path: &Path) -> Result<(), Error> {
        if self.path.as_deref() == Some(path) {
            return Ok(());
        }

        debug!("loading documents of {:?}", path);
        let mut root: Value = read_json(path)?;
        let mut documents = HashMap::new();
        let mut sentences = HashMap::new();
        for doc in take_array(&mut root, "document", path)? {
            let doc = raw_document(doc)?;
            for p in &doc.paragraph {
                sentences.insert(p.id.clone(), p.form.clone());
            }
            for u in &doc.utterance {
                sentences.insert(u.id.clone(), u.form.clone());
            }
            documents.insert(doc.id.clone(), doc);
        }

        self.documents = documents;
        self.sentences = sentences;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Joined page of document `id`, looked up in the file named after its first component.
    fn page(&mut self, ctx: &ParseContext, id: &str) -> Result<Option<String>, Error> {
        let path = match ctx.document_of(id) {
            Some(path) => path,
            None => return Ok(None),
        };
        self.load(path)?;
        Ok(self.documents.get(id).map(RawDocument::page))
    }

    /// Form of the paragraph or utterance containing sentence `sentence_id`.
    fn sentence(&mut self, ctx: &ParseContext, sentence_id: &str) -> Result<Option<String>, Error> {
        let path = match ctx.document_of(sentence_id) {
            Some(path) => path,
            None => return Ok(None),
        };
        self.load(path)?;
        let parent = match sentence_id.rsplit_once('.') {
            Some((parent, _)) => parent,
            None => sentence_id,
        };
        Ok(self.sentences.get(parent).cloned())
    }
}

fn summaries<I>(items: I, ctx: &ParseContext, summary_types: &'static [&'static str]) -> RecordIter
where
    I: Iterator<Item = Value> + 'static,
{
    let ctx = ctx.clone();
    let mut cache = DocumentCache::default();
    boxed(items.flat_map(move |obj| -> Vec<Item> {
        let document_id = match obj.get("document_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => return vec![Err(Error::missing("document_id", "summary"))],
        };
        let article = match cache.page(&ctx, &document_id) {
            Ok(Some(article)) => article,
            Ok(None) => {
                debug!("no article for {}", document_id);
                return Vec::new();
            }
            Err(e) => return vec![Err(e)],
        };

        summary_types
            .iter()
            .map(|summary_type| {
                let highlights = obj
                    .get(*summary_type)
                    .and_then(Value::as_array)
                    .map(|sentences| {
                        sentences
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::trim)
                            .join(" ")
                    })
                    .unwrap_or_default();
                let id = hash_text(&format!("{}{}", document_id, summary_type));
                let record = Summary {
                    document_id: document_id.clone(),
                    article: article.clone(),
                    highlights,
                    summary_type: summary_type.to_string(),
                };
                Ok((id, Record::Summary(record)))
            })
            .collect()
    }))
}

fn paraphrases<I>(items: I, ctx: &ParseContext) -> RecordIter
where
    I: Iterator<Item = Value> + 'static,
{
    let ctx = ctx.clone();
    let mut cache = DocumentCache::default();
    boxed(items.filter_map(move |obj| -> Option<Item> {
        let sentence_id = match obj.get("sentence_id").and_then(Value::as_str) {
            Some(id) => id.to_string(),
            None => return Some(Err(Error::missing("sentence_id", "paraphrase"))),
        };
        let sentence_form = match cache.sentence(&ctx, &sentence_id) {
            Ok(Some(form)) => form,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };
        let paraphrases = match obj.get("paraphrases").cloned() {
            Some(p) => match serde_json::from_value::<Vec<ParaphraseForm>>(p) {
                Ok(p) => p,
                Err(e) => return Some(Err(e.into())),
            },
            None => Vec::new(),
        };

        let record = Paraphrase {
            sentence_id: sentence_id.clone(),
            sentence_form,
            paraphrases,
        };
        Some(Ok((sentence_id, Record::Paraphrase(record))))
    }))
}

#[derive(Debug, Deserialize)]
struct ColaRow {
    sentence: String,
    acceptability_label: u8,
}

fn parse_cola(path: &Path) -> Result<RecordIter, Error> {
    let rows = tsv::rows::<ColaRow>(path)?;
    Ok(boxed(rows.enumerate().map(|(idx, row)| -> Item {
        let row = row?;
        if row.acceptability_label > 1 {
            return Err(Error::Custom(format!(
                "row {}: invalid acceptability label {}",
                idx, row.acceptability_label
            )));
        }
        let record = Cola {
            idx: idx as u64,
            sentence: row.sentence,
            label: row.acceptability_label,
        };
        Ok((idx.to_string(), Record::Cola(record)))
    })))
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    id: String,
    form: String,
}

#[derive(Debug, Deserialize)]
struct RawMention {
    sentence_id: String,
    form: String,
    begin: i64,
    end: i64,
}

#[derive(Debug, Deserialize)]
struct RawMentionGroup {
    #[serde(default)]
    mention: Vec<RawMention>,
}

#[derive(Debug, Deserialize)]
struct RawCorefDocument {
    id: String,
    #[serde(default)]
    sentence: Vec<RawSentence>,
    #[serde(rename = "CR", default)]
    cr: Vec<RawMentionGroup>,
}

/// Joins sentences with a space, and moves mention offsets from sentences to the joined text.
///
/// Offsets are in characters.
fn coreference(value: Value) -> Item {
    let doc: RawCorefDocument = serde_json::from_value(value)?;

    let mut offsets = HashMap::new();
    let mut offset = 0i64;
    for s in &doc.sentence {
        offsets.insert(s.id.as_str(), offset);
        offset += s.form.chars().count() as i64 + 1;
    }

    let cr = doc
        .cr
        .iter()
        .map(|group| -> Result<MentionGroup, Error> {
            let mention = group
                .mention
                .iter()
                .map(|m| -> Result<Mention, Error> {
                    let base = offsets.get(m.sentence_id.as_str()).ok_or_else(|| {
                        Error::Custom(format!(
                            "{}: mention refers to unknown sentence {}",
                            doc.id, m.sentence_id
                        ))
                    })?;
                    Ok(Mention {
                        form: m.form.clone(),
                        begin: m.begin + base,
                        end: m.end + base,
                    })
                })
                .collect::<Result<Vec<_>, Error>>()?;
            Ok(MentionGroup { mention })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let text = doc
        .sentence
        .iter()
        .map(|s| s.form.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let record = Coreference {
        id: doc.id.clone(),
        text,
        cr,
    };
    Ok((doc.id, Record::Coreference(record)))
}
