/*! AIHub corpora

JSON corpora are read whole. XLSX corpora are read from their first worksheet:
dialog workbooks have a single header row, parallel corpus workbooks have data rows
recognized by a number in their id column.
!*/
use std::path::Path;

use calamine::Data;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::text::{as_object, str_or};
use super::{boxed, file_stem, indexed_id, RecordIter};
use crate::error::Error;
use crate::io::reader::json::{one_or_many, read_json, take_array};
use crate::io::reader::xlsx::{self, integer, number, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Mrc,
    BookMrc,
    SpecialtyPaper,
    SpecialtyStatute,
    /// patent files with a numbered name (`특허_01.json`).
    SpecialtyPatentN,
    /// patent files named `특허_z*.json`.
    SpecialtyPatentA,
    SpecialtyLeadingCase,
    SpecialtyKoEn,
    KoreanSns,
    KoreanDialog,
    KoreanDialogSummary,
    TranslationKoEn,
    ParallelInformal,
    ParallelConversational,
    ParallelNews,
    ParallelCulture,
    /// ordinance and local government website workbooks.
    ParallelOrdinance,
    TranslationKoJa,
    TranslationKoZh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub answer_start: i64,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrcQa {
    pub id: String,
    pub question: String,
    pub answerable: bool,
    pub answers: Vec<Answer>,
    pub classtype: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MrcParagraph {
    pub context: String,
    pub qas: Vec<MrcQa>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mrc {
    pub idx: u64,
    pub title: String,
    pub paragraphs: Vec<MrcParagraph>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookQa {
    pub id: String,
    pub question: String,
    pub answers: Vec<Answer>,
    pub is_impossible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookParagraph {
    pub context: String,
    pub qas: Vec<BookQa>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookMrc {
    pub time: String,
    pub title: String,
    pub agency: String,
    pub year: String,
    pub content_id: String,
    pub kdc: String,
    pub paragraphs: Vec<BookParagraph>,
}

/// Text, or a number written as text. Null is read as an empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Named entity span of the specialty corpora.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub begin: i64,
    pub end: i64,
}

/// Single sentence paper document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyPaper {
    #[serde(default)]
    pub idx: u64,
    pub doc_type: String,
    pub doc_id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reg_no: String,
    pub issued_by: String,
    pub author: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipc: String,
    pub attr: String,
    #[serde(deserialize_with = "lenient_string")]
    pub claim_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sentno: String,
    pub text: String,
    #[serde(rename = "NE")]
    pub ne: Vec<NamedEntity>,
}

/// Single sentence patent document, same layout as papers without an issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyPatentA {
    #[serde(default)]
    pub idx: u64,
    pub doc_type: String,
    pub doc_id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reg_no: String,
    pub author: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipc: String,
    pub attr: String,
    #[serde(deserialize_with = "lenient_string")]
    pub claim_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sentno: String,
    pub text: String,
    #[serde(rename = "NE")]
    pub ne: Vec<NamedEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteSentence {
    pub attr: String,
    pub text: String,
    #[serde(rename = "NE")]
    pub ne: Vec<NamedEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyStatute {
    #[serde(default)]
    pub idx: u64,
    pub doc_type: String,
    pub doc_id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reg_no: String,
    pub sentno: i64,
    pub sentence: Vec<StatuteSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtySentence {
    pub text: String,
    #[serde(rename = "NE")]
    pub ne: Vec<NamedEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyPatentN {
    #[serde(default)]
    pub idx: u64,
    pub doc_type: String,
    pub doc_id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reg_no: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ipc: String,
    pub attr: String,
    pub sentno: i64,
    /// absent from description sentences.
    #[serde(default, deserialize_with = "lenient_string")]
    pub claim_no: String,
    pub sentence: Vec<SpecialtySentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyLeadingCase {
    #[serde(default)]
    pub idx: u64,
    pub doc_type: String,
    pub doc_id: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub reg_no: String,
    pub issued_by: String,
    pub sentno: i64,
    pub sentence: Vec<SpecialtySentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyKoEn {
    #[serde(default)]
    pub idx: u64,
    #[serde(deserialize_with = "lenient_string")]
    pub sid: String,
    #[serde(rename(deserialize = "분야"), default)]
    pub domain: String,
    #[serde(rename(deserialize = "한국어"), default)]
    pub korean: String,
    #[serde(rename(deserialize = "영어"), default)]
    pub english: String,
    #[serde(rename(deserialize = "한국어_어절수"), default)]
    pub ko_num_of_phrases: i64,
    #[serde(rename(deserialize = "영어_단어수"), default)]
    pub en_num_of_words: i64,
    #[serde(rename(deserialize = "길이_분류"), default)]
    pub length_classification: i64,
    #[serde(rename(deserialize = "난이도"), default)]
    pub difficulty: String,
    #[serde(rename(deserialize = "수행기관"), default)]
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueInfo {
    #[serde(default)]
    pub number_of_participants: i64,
    #[serde(default)]
    pub number_of_utterances: i64,
    #[serde(default)]
    pub number_of_turns: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub topic: String,
    #[serde(rename = "dialogueID")]
    pub dialogue_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub residential_province: String,
    #[serde(default)]
    pub gender: String,
    #[serde(rename = "participantID", default)]
    pub participant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogHeader {
    pub dialogue_info: DialogueInfo,
    #[serde(default)]
    pub participants_info: Vec<Participant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogUtterance {
    #[serde(default)]
    pub utterance: String,
    #[serde(rename = "utteranceID", default)]
    pub utterance_id: String,
    #[serde(rename = "participantID", default)]
    pub participant_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "turnID", default)]
    pub turn_id: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sns {
    pub header: DialogHeader,
    #[serde(default)]
    pub body: Vec<DialogUtterance>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBody {
    #[serde(default)]
    pub dialogue: Vec<DialogUtterance>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSummary {
    pub header: DialogHeader,
    pub body: SummaryBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KoreanDialog {
    pub idx: u64,
    pub speaker: String,
    pub sentence: String,
    pub domain_id: String,
    pub domain: String,
    pub category: String,
    pub speaker_id: String,
    pub sentence_id: String,
    pub main: String,
    pub sub: String,
    pub qa: String,
    pub qacnct: String,
    pub mq: String,
    pub sq: String,
    pub ua: String,
    pub sa: String,
    pub object_name: String,
    pub glossary: String,
    pub knowledge_base: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationKoEn {
    pub sn: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub data_set: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub ko: String,
    #[serde(default)]
    pub mt: String,
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub source_language: String,
    #[serde(default)]
    pub target_language: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelInformal {
    pub idx: u64,
    pub sid: i64,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelConversational {
    pub idx: u64,
    pub main_category: String,
    pub sub_category: String,
    pub situation: String,
    #[serde(rename = "setNr")]
    pub set_nr: i64,
    pub talker: String,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelNews {
    pub idx: u64,
    pub id: i64,
    pub date: String,
    pub auto_class1: String,
    pub auto_class2: String,
    pub auto_class3: String,
    pub url: String,
    pub press: String,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelCulture {
    pub idx: u64,
    pub id: i64,
    pub keyword: String,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParallelOrdinance {
    pub idx: u64,
    pub id: i64,
    pub local_government: String,
    pub original: String,
    pub translated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKoJa {
    #[serde(rename(deserialize = "관리번호"))]
    pub sid: String,
    #[serde(rename(deserialize = "분야"), default)]
    pub domain: String,
    #[serde(rename(deserialize = "한국어"), default)]
    pub korean: String,
    #[serde(rename(deserialize = "일본어"), default)]
    pub japanese: String,
    #[serde(rename(deserialize = "한국어_어절수"), default)]
    pub ko_num_of_phrases: i64,
    #[serde(rename(deserialize = "일본어_글자수"), default)]
    pub ja_num_of_words: i64,
    #[serde(rename(deserialize = "길이_분류"), default)]
    pub length_classification: String,
    #[serde(rename(deserialize = "출처"), default)]
    pub source: String,
    #[serde(rename(deserialize = "수행기관"), default)]
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationKoZh {
    #[serde(rename(deserialize = "관리번호"))]
    pub sid: String,
    #[serde(rename(deserialize = "분야"), default)]
    pub domain: String,
    #[serde(rename(deserialize = "한국어"), default)]
    pub korean: String,
    #[serde(rename(deserialize = "중국어"), default)]
    pub chinese: String,
    #[serde(rename(deserialize = "한국어_어절수"), default)]
    pub ko_num_of_phrases: i64,
    #[serde(rename(deserialize = "중국어_글자수"), default)]
    pub zh_num_of_words: i64,
    #[serde(rename(deserialize = "길이_분류"), default)]
    pub length_classification: String,
    #[serde(rename(deserialize = "출처"), default)]
    pub source: String,
    #[serde(rename(deserialize = "수행기관"), default)]
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Mrc(Mrc),
    BookMrc(BookMrc),
    SpecialtyPaper(SpecialtyPaper),
    SpecialtyStatute(SpecialtyStatute),
    SpecialtyPatentN(SpecialtyPatentN),
    SpecialtyPatentA(SpecialtyPatentA),
    SpecialtyLeadingCase(SpecialtyLeadingCase),
    SpecialtyKoEn(SpecialtyKoEn),
    Sns(Sns),
    DialogSummary(DialogSummary),
    KoreanDialog(KoreanDialog),
    TranslationKoEn(TranslationKoEn),
    ParallelInformal(ParallelInformal),
    ParallelConversational(ParallelConversational),
    ParallelNews(ParallelNews),
    ParallelCulture(ParallelCulture),
    ParallelOrdinance(ParallelOrdinance),
    TranslationKoJa(TranslationKoJa),
    TranslationKoZh(TranslationKoZh),
}

impl From<Record> for super::Record {
    fn from(r: Record) -> Self {
        super::Record::Aihub(r)
    }
}

type Item = Result<(String, Record), Error>;

pub fn parse(format: Format, path: &Path) -> Result<RecordIter, Error> {
    let stem = file_stem(path);
    let records = match format {
        Format::Mrc => boxed(data(path)?.enumerate().map(|(idx, v)| mrc(idx, v))),
        Format::BookMrc => boxed(
            data(path)?
                .enumerate()
                .map(move |(idx, v)| book_mrc(indexed_id(&stem, idx), v)),
        ),
        Format::SpecialtyPaper => specialty(path, stem, |mut doc: SpecialtyPaper, idx| {
            doc.idx = idx;
            Record::SpecialtyPaper(doc)
        })?,
        Format::SpecialtyStatute => specialty(path, stem, |mut doc: SpecialtyStatute, idx| {
            doc.idx = idx;
            Record::SpecialtyStatute(doc)
        })?,
        Format::SpecialtyPatentN => specialty(path, stem, |mut doc: SpecialtyPatentN, idx| {
            doc.idx = idx;
            Record::SpecialtyPatentN(doc)
        })?,
        Format::SpecialtyPatentA => specialty(path, stem, |mut doc: SpecialtyPatentA, idx| {
            doc.idx = idx;
            Record::SpecialtyPatentA(doc)
        })?,
        Format::SpecialtyLeadingCase => specialty(path, stem, |mut doc: SpecialtyLeadingCase, idx| {
            doc.idx = idx;
            Record::SpecialtyLeadingCase(doc)
        })?,
        Format::SpecialtyKoEn => boxed(root_array(path)?.enumerate().map(|(idx, v)| -> Item {
            let mut record: SpecialtyKoEn = serde_json::from_value(v)?;
            record.idx = idx as u64;
            Ok((record.sid.clone(), Record::SpecialtyKoEn(record)))
        })),
        Format::KoreanSns => boxed(data(path)?.map(|v| -> Item {
            let record: Sns = serde_json::from_value(v)?;
            Ok((record.header.dialogue_info.dialogue_id.clone(), Record::Sns(record)))
        })),
        Format::KoreanDialogSummary => boxed(data(path)?.map(|v| -> Item {
            let record: DialogSummary = serde_json::from_value(v)?;
            Ok((
                record.header.dialogue_info.dialogue_id.clone(),
                Record::DialogSummary(record),
            ))
        })),
        Format::TranslationKoEn => boxed(data(path)?.map(|v| -> Item {
            let record: TranslationKoEn = serde_json::from_value(v)?;
            Ok((record.sn.clone(), Record::TranslationKoEn(record)))
        })),
        Format::TranslationKoJa => boxed(root_array(path)?.map(|v| -> Item {
            let record: TranslationKoJa = serde_json::from_value(v)?;
            Ok((record.sid.clone(), Record::TranslationKoJa(record)))
        })),
        Format::TranslationKoZh => boxed(root_array(path)?.map(|v| -> Item {
            let record: TranslationKoZh = serde_json::from_value(v)?;
            Ok((record.sid.clone(), Record::TranslationKoZh(record)))
        })),
        Format::KoreanDialog => {
            let rows = xlsx::read_rows(path)?;
            boxed(
                rows.into_iter()
                    .skip(1)
                    .filter(|row| row.iter().any(|cell| *cell != Data::Empty))
                    .enumerate()
                    .map(move |(idx, row)| -> Item {
                        let record = korean_dialog(idx, &row);
                        Ok((indexed_id(&stem, idx), Record::KoreanDialog(record)))
                    }),
            )
        }
        Format::ParallelInformal
        | Format::ParallelConversational
        | Format::ParallelNews
        | Format::ParallelCulture
        | Format::ParallelOrdinance => {
            let rows = xlsx::read_rows(path)?;
            boxed(
                parallel_rows(format, rows)
                    .into_iter()
                    .enumerate()
                    .map(move |(idx, record)| -> Item { Ok((indexed_id(&stem, idx), record)) }),
            )
        }
    };

    Ok(records)
}

/// Items of the `data` array.
fn data(path: &Path) -> Result<std::vec::IntoIter<Value>, Error> {
    let mut root: Value = read_json(path)?;
    Ok(take_array(&mut root, "data", path)?.into_iter())
}

/// Specialty corpus documents of the `data` array, identified by file stem and position.
fn specialty<T, F>(path: &Path, stem: String, record: F) -> Result<RecordIter, Error>
where
    T: DeserializeOwned,
    F: Fn(T, u64) -> Record + 'static,
{
    Ok(boxed(data(path)?.enumerate().map(move |(idx, v)| -> Item {
        let doc: T = serde_json::from_value(v)?;
        Ok((indexed_id(&stem, idx), record(doc, idx as u64)))
    })))
}

/// Items of a file holding a single array.
fn root_array(path: &Path) -> Result<std::vec::IntoIter<Value>, Error> {
    match read_json(path)? {
        Value::Array(items) => Ok(items.into_iter()),
        _ => Err(Error::Custom(format!("{:?}: expected an array", path))),
    }
}

fn field(obj: &mut Map<String, Value>, key: &str) -> Value {
    obj.remove(key).unwrap_or(Value::Null)
}

fn answers(value: Value) -> Result<Vec<Answer>, Error> {
    one_or_many(value)
        .into_iter()
        .map(|a| serde_json::from_value(a).map_err(Error::from))
        .collect()
}

fn mrc_qa(mut qa: Value) -> Result<MrcQa, Error> {
    let obj = qa
        .as_object_mut()
        .ok_or_else(|| Error::Custom("qa: expected an object".to_string()))?;
    let answerable = obj.contains_key("answers");
    let answers = answers(field(obj, "answers"))?;
    Ok(MrcQa {
        id: str_or(obj, "id", ""),
        question: str_or(obj, "question", ""),
        answerable,
        answers,
        classtype: str_or(obj, "classtype", ""),
    })
}

fn mrc(idx: usize, mut doc: Value) -> Item {
    let context = format!("document {}", idx);
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| Error::Custom(format!("{}: expected an object", context)))?;
    let title = str_or(obj, "title", "");
    let paragraphs = one_or_many(field(obj, "paragraphs"))
        .into_iter()
        .map(|mut p| -> Result<MrcParagraph, Error> {
            let context = str_or(as_object(&p, "paragraph")?, "context", "");
            let qas = match p.as_object_mut() {
                Some(p) => one_or_many(field(p, "qas"))
                    .into_iter()
                    .map(mrc_qa)
                    .collect::<Result<Vec<_>, Error>>()?,
                None => Vec::new(),
            };
            Ok(MrcParagraph { context, qas })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let record = Mrc {
        idx: idx as u64,
        title,
        paragraphs,
    };
    Ok((idx.to_string(), Record::Mrc(record)))
}

fn book_qa(mut qa: Value) -> Result<BookQa, Error> {
    let obj = qa
        .as_object_mut()
        .ok_or_else(|| Error::Custom("qa: expected an object".to_string()))?;
    let answers = answers(field(obj, "answers"))?;
    Ok(BookQa {
        id: str_or(obj, "id", ""),
        question: str_or(obj, "question", ""),
        answers,
        is_impossible: obj
            .get("is_impossible")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn book_mrc(id: String, mut doc: Value) -> Item {
    let obj = doc
        .as_object_mut()
        .ok_or_else(|| Error::Custom(format!("{}: expected an object", id)))?;
    let paragraphs = one_or_many(field(obj, "paragraphs"))
        .into_iter()
        .map(|mut p| -> Result<BookParagraph, Error> {
            let context = str_or(as_object(&p, "paragraph")?, "context", "");
            let qas = match p.as_object_mut() {
                Some(p) => one_or_many(field(p, "qas"))
                    .into_iter()
                    .map(book_qa)
                    .collect::<Result<Vec<_>, Error>>()?,
                None => Vec::new(),
            };
            Ok(BookParagraph { context, qas })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let record = BookMrc {
        time: str_or(obj, "time", ""),
        title: str_or(obj, "title", ""),
        agency: str_or(obj, "agency", ""),
        year: str_or(obj, "year", ""),
        content_id: str_or(obj, "content_id", ""),
        kdc: str_or(obj, "KDC", ""),
        paragraphs,
    };
    Ok((id, Record::BookMrc(record)))
}

fn korean_dialog(idx: usize, row: &[Data]) -> KoreanDialog {
    KoreanDialog {
        idx: idx as u64,
        speaker: text(row, 0),
        sentence: text(row, 1),
        domain_id: text(row, 2),
        domain: text(row, 3),
        category: text(row, 4),
        speaker_id: text(row, 5),
        sentence_id: text(row, 6),
        main: text(row, 7),
        sub: text(row, 8),
        qa: text(row, 9),
        qacnct: text(row, 10),
        mq: text(row, 11),
        sq: text(row, 12),
        ua: text(row, 13),
        sa: text(row, 14),
        object_name: text(row, 15),
        glossary: text(row, 16),
        knowledge_base: text(row, 17),
    }
}

/// Data rows of a parallel corpus workbook.
///
/// Rows without a number in their id column (titles, headers, notes) are skipped,
/// and `idx` counts data rows only.
fn parallel_rows(format: Format, rows: Vec<Vec<Data>>) -> Vec<Record> {
    let id_col = match format {
        Format::ParallelConversational => 3,
        _ => 0,
    };

    rows.iter()
        .filter(|row| number(row, id_col).is_some())
        .enumerate()
        .map(|(idx, row)| {
            let idx = idx as u64;
            let id = integer(row, id_col).unwrap_or_default();
            match format {
                Format::ParallelInformal => Record::ParallelInformal(ParallelInformal {
                    idx,
                    sid: id,
                    original: text(row, 1),
                    translated: text(row, 2),
                }),
                Format::ParallelConversational => {
                    Record::ParallelConversational(ParallelConversational {
                        idx,
                        main_category: text(row, 0),
                        sub_category: text(row, 1),
                        situation: text(row, 2),
                        set_nr: id,
                        talker: text(row, 4),
                        original: text(row, 5),
                        translated: text(row, 6),
                    })
                }
                Format::ParallelNews => Record::ParallelNews(ParallelNews {
                    idx,
                    id,
                    date: text(row, 1),
                    auto_class1: text(row, 2),
                    auto_class2: text(row, 3),
                    auto_class3: text(row, 4),
                    url: text(row, 5),
                    press: text(row, 6),
                    original: text(row, 7),
                    translated: text(row, 8),
                }),
                Format::ParallelCulture => Record::ParallelCulture(ParallelCulture {
                    idx,
                    id,
                    keyword: text(row, 1),
                    original: text(row, 2),
                    translated: text(row, 3),
                }),
                _ => Record::ParallelOrdinance(ParallelOrdinance {
                    idx,
                    id,
                    local_government: text(row, 1),
                    original: text(row, 2),
                    translated: text(row, 3),
                }),
            }
        })
        .collect()
}
