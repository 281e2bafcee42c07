/*! KLUE benchmark

Most tasks are JSON arrays of examples identified by their `guid`.
NER and DP are CoNLL-like TSV files read through [BlockReader].
!*/
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{boxed, ParseContext, RecordIter};
use crate::error::Error;
use crate::io::reader::json::{read_json, take_array};
use crate::io::reader::{Block, BlockReader};

/// Topic classification (YNAT) classes.
pub const TC_CLASSES: [&str; 8] = [
    "정치",
    "경제",
    "사회",
    "생활문화",
    "세계",
    "IT과학",
    "스포츠",
    "해당없음",
];

pub const NLI_CLASSES: [&str; 3] = ["entailment", "contradiction", "neutral"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Tc,
    TcFull,
    Sts,
    StsFull,
    Nli,
    NliFull,
    Ner,
    Re,
    Dp,
    Mrc,
    Dst,
    DstGen,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tc {
    pub guid: String,
    pub title: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sts {
    pub guid: String,
    pub sentence1: String,
    pub sentence2: String,
    pub label: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nli {
    pub guid: String,
    pub premise: String,
    pub hypothesis: String,
    pub gold_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub form: String,
    pub begin: usize,
    pub end: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ner {
    pub guid: String,
    pub char: Vec<String>,
    pub ne_tag: Vec<String>,
    pub text: String,
    #[serde(rename = "NE")]
    pub ne: Vec<Entity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DpWord {
    pub word_id: String,
    pub word_form: String,
    pub lemma: String,
    #[serde(rename = "POS")]
    pub pos: String,
    pub head: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dp {
    pub guid: String,
    pub form: String,
    #[serde(rename = "DP")]
    pub dp: Vec<DpWord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Answers {
    pub answer_start: Vec<i64>,
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mrc {
    pub title: String,
    pub context: String,
    pub question: String,
    pub guid: String,
    pub plausible_answers: Answers,
    pub answers: Answers,
    pub is_impossible: bool,
    pub question_type: i64,
    pub source: String,
    pub news_category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub text: String,
    #[serde(default)]
    pub state: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dst {
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub dialogue: Vec<Turn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotValue {
    #[serde(rename = "domain-slot")]
    pub domain_slot: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenTurn {
    pub role: String,
    pub text: String,
    pub state: Vec<SlotValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DstGen {
    pub guid: String,
    pub domains: Vec<String>,
    pub dialogue: Vec<GenTurn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Tc(Tc),
    Sts(Sts),
    Nli(Nli),
    Ner(Ner),
    Dp(Dp),
    Mrc(Mrc),
    Dst(Dst),
    DstGen(DstGen),
    Full(Value),
}

impl From<Record> for super::Record {
    fn from(r: Record) -> Self {
        super::Record::Klue(r)
    }
}

type Item = Result<(String, Record), Error>;

pub fn parse(format: Format, path: &Path, ctx: &ParseContext) -> Result<RecordIter, Error> {
    let records = match format {
        Format::Ner => boxed(BlockReader::from_path(path)?.map(|b| -> Item {
            let record = ner(b?);
            Ok((record.guid.clone(), Record::Ner(record)))
        })),
        Format::Dp => boxed(BlockReader::from_path(path)?.map(|b| -> Item {
            let record = dp(b?)?;
            Ok((record.guid.clone(), Record::Dp(record)))
        })),
        Format::Mrc => {
            let mut root: Value = read_json(path)?;
            let articles = take_array(&mut root, "data", path)?;
            boxed(articles.into_iter().flat_map(mrc))
        }
        Format::DstGen => {
            let ontology_path = ctx
                .auxiliary
                .as_deref()
                .ok_or_else(|| Error::Custom("dst.gen needs the WoS ontology".to_string()))?;
            let ontology: Map<String, Value> = read_json(ontology_path)?;
            let slots: Vec<String> = ontology.keys().cloned().collect();
            boxed(examples(path)?.map(move |v| -> Item {
                let dialogue: Dst = serde_json::from_value(v)?;
                let record = expand_states(dialogue, &slots);
                Ok((record.guid.clone(), Record::DstGen(record)))
            }))
        }
        _ => boxed(examples(path)?.map(move |v| example(format, v))),
    };

    Ok(records)
}

/// Items of a file holding a single array.
fn examples(path: &Path) -> Result<std::vec::IntoIter<Value>, Error> {
    match read_json(path)? {
        Value::Array(items) => Ok(items.into_iter()),
        _ => Err(Error::Custom(format!("{:?}: expected an array", path))),
    }
}

fn guid(example: &Value) -> Result<String, Error> {
    example
        .get("guid")
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| Error::missing("guid", "example"))
}

fn check_label(label: &str, classes: &[&str]) -> Result<(), Error> {
    if classes.contains(&label) {
        Ok(())
    } else {
        Err(Error::Custom(format!("unknown label {:?}", label)))
    }
}

/// Normalizes a JSON example.
fn example(format: Format, mut v: Value) -> Item {
    let guid = guid(&v)?;
    let record = match format {
        Format::Tc => {
            let tc: Tc = serde_json::from_value(v)?;
            check_label(&tc.label, &TC_CLASSES)?;
            Record::Tc(tc)
        }
        Format::Sts => {
            let sts = Sts {
                guid: guid.clone(),
                sentence1: str_at(&v, "sentence1"),
                sentence2: str_at(&v, "sentence2"),
                label: sts_label(&v)?,
            };
            Record::Sts(sts)
        }
        Format::StsFull => {
            let label = sts_label(&v)?;
            if let Some(obj) = v.as_object_mut() {
                obj.insert("label".to_string(), Value::from(label));
            }
            Record::Full(v)
        }
        Format::Nli => {
            let nli: Nli = serde_json::from_value(v)?;
            check_label(&nli.gold_label, &NLI_CLASSES)?;
            Record::Nli(nli)
        }
        Format::NliFull => {
            if let Some(obj) = v.as_object_mut() {
                if !obj.contains_key("source") {
                    if let Some(genre) = obj.remove("genre") {
                        obj.insert("source".to_string(), genre);
                    }
                }
            }
            Record::Full(v)
        }
        Format::Re => {
            for key in ["subject_entity", "object_entity"] {
                let end = v
                    .get(key)
                    .and_then(|e| e.get("end_idx"))
                    .and_then(Value::as_i64)
                    .ok_or_else(|| Error::missing("end_idx", key))?;
                v[key]["end_idx"] = Value::from(end + 1);
            }
            Record::Full(v)
        }
        Format::Dst => Record::Dst(serde_json::from_value(v)?),
        _ => Record::Full(v),
    };

    Ok((guid, record))
}

fn str_at(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn sts_label(v: &Value) -> Result<f64, Error> {
    v.get("labels")
        .and_then(|l| l.get("label"))
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::missing("labels.label", "sts example"))
}

/// Folds BIO tags into entity spans.
///
/// An `I-` tag with no open entity starts one. Offsets are character positions.
pub fn fold_entities(chars: &[String], tags: &[String]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut open: Option<(usize, String, String)> = None;

    let mut close = |open: &mut Option<(usize, String, String)>| {
        if let Some((begin, label, form)) = open.take() {
            let end = begin + form.chars().count();
            entities.push(Entity {
                form,
                begin,
                end,
                label,
            });
        }
    };

    for (idx, (c, tag)) in chars.iter().zip(tags).enumerate() {
        let label = tag.rsplit('-').next().unwrap_or_default();
        if tag.starts_with('B') {
            close(&mut open);
            open = Some((idx, label.to_string(), c.clone()));
        } else if tag.starts_with('I') {
            match &mut open {
                Some((_, _, form)) => form.push_str(c),
                None => open = Some((idx, label.to_string(), c.clone())),
            }
        } else {
            close(&mut open);
        }
    }
    close(&mut open);

    entities
}

fn ner(block: Block) -> Ner {
    let guid = block.guid().to_string();
    let (chars, tags): (Vec<String>, Vec<String>) = block
        .rows
        .into_iter()
        .map(|mut row| {
            let tag = row.get(1).map(|t| t.trim_end().to_string()).unwrap_or_default();
            row.truncate(1);
            (row.pop().unwrap_or_default(), tag)
        })
        .unzip();

    Ner {
        guid,
        text: chars.concat(),
        ne: fold_entities(&chars, &tags),
        char: chars,
        ne_tag: tags,
    }
}

fn dp(block: Block) -> Result<Dp, Error> {
    let guid = block.guid().to_string();
    let words = block
        .rows
        .into_iter()
        .map(|row| {
            let mut row = row.into_iter();
            let mut next = || row.next();
            match (next(), next(), next(), next(), next(), next()) {
                (
                    Some(word_id),
                    Some(word_form),
                    Some(lemma),
                    Some(pos),
                    Some(head),
                    Some(label),
                ) => Ok(DpWord {
                    word_id,
                    word_form,
                    lemma,
                    pos,
                    head,
                    label: label.trim_end().to_string(),
                }),
                _ => Err(Error::Custom(format!(
                    "{}: dependency row with missing columns",
                    guid
                ))),
            }
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let form = words
        .iter()
        .map(|w| w.word_form.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(Dp {
        guid,
        form,
        dp: words,
    })
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    answer_start: i64,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RawQa {
    guid: String,
    question: String,
    #[serde(default)]
    plausible_answers: Vec<RawAnswer>,
    #[serde(default)]
    answers: Vec<RawAnswer>,
    #[serde(default)]
    is_impossible: bool,
    #[serde(default = "default_question_type")]
    question_type: i64,
}

fn default_question_type() -> i64 {
    -1
}

#[derive(Debug, Deserialize)]
struct RawParagraph {
    context: String,
    qas: Vec<RawQa>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    news_category: Option<String>,
    paragraphs: Vec<RawParagraph>,
}

fn answers(raw: Vec<RawAnswer>) -> Answers {
    let (answer_start, text) = raw.into_iter().map(|a| (a.answer_start, a.text)).unzip();
    Answers { answer_start, text }
}

/// One record per question of an article.
fn mrc(article: Value) -> Vec<Item> {
    let article: RawArticle = match serde_json::from_value(article) {
        Ok(article) => article,
        Err(e) => return vec![Err(e.into())],
    };
    let title = article.title.unwrap_or_default();
    let source = article.source.unwrap_or_default();
    let news_category = article.news_category.unwrap_or_default();

    let mut records = Vec::new();
    for paragraph in article.paragraphs {
        for qa in paragraph.qas {
            let record = Mrc {
                title: title.clone(),
                context: paragraph.context.clone(),
                question: qa.question,
                guid: qa.guid.clone(),
                plausible_answers: answers(qa.plausible_answers),
                answers: answers(qa.answers),
                is_impossible: qa.is_impossible,
                question_type: qa.question_type,
                source: source.clone(),
                news_category: news_category.clone(),
            };
            records.push(Ok((qa.guid, Record::Mrc(record))));
        }
    }
    records
}

/// Expands each turn state to all ontology slots, `none` when unset.
///
/// States are `<domain>-<slot>-<value>` strings; the value follows the last `-`.
pub fn expand_states(dialogue: Dst, slots: &[String]) -> DstGen {
    let dialogue_turns = dialogue
        .dialogue
        .into_iter()
        .map(|turn| {
            let values: Map<String, Value> = turn
                .state
                .iter()
                .map(|s| match s.rsplit_once('-') {
                    Some((slot, value)) => (slot.to_string(), Value::from(value)),
                    None => (String::new(), Value::from(s.as_str())),
                })
                .collect();
            let state = slots
                .iter()
                .map(|slot| SlotValue {
                    domain_slot: slot.clone(),
                    value: values
                        .get(slot)
                        .and_then(Value::as_str)
                        .unwrap_or("none")
                        .to_string(),
                })
                .collect();
            GenTurn {
                role: turn.role,
                text: turn.text,
                state,
            }
        })
        .collect();

    DstGen {
        guid: dialogue.guid,
        domains: dialogue.domains,
        dialogue: dialogue_turns,
    }
}
