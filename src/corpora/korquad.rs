/*! KorQuAD 1.0 and 2.1

Both versions are flattened to one SQuAD-like record per question, in order of first appearance.
!*/
use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{boxed, RecordIter};
use crate::error::Error;
use crate::io::reader::json::{read_json, take_array};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    V1,
    V2,
    /// 2.1, with contexts and answers taken from the raw html.
    V2Html,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Answers {
    pub text: Vec<String>,
    pub answer_start: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquadLike {
    pub title: String,
    pub context: String,
    pub question: String,
    pub id: String,
    pub answers: Answers,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    SquadLike(SquadLike),
}

impl From<Record> for super::Record {
    fn from(r: Record) -> Self {
        super::Record::Korquad(r)
    }
}

/// Keys of a 2.1 article holding the context and the answer.
struct Keys {
    context: &'static str,
    answer_start: &'static str,
    text: &'static str,
}

const V2_KEYS: Keys = Keys {
    context: "context",
    answer_start: "answer_start",
    text: "text",
};

const V2_HTML_KEYS: Keys = Keys {
    context: "raw_html",
    answer_start: "html_answer_start",
    text: "html_answer_text",
};

/// Questions by id, keeping the order of first appearance.
#[derive(Debug, Default)]
struct Questions {
    index: HashMap<String, usize>,
    records: Vec<SquadLike>,
}

impl Questions {
    /// Appends answers to an existing question, or inserts it.
    fn merge(&mut self, record: SquadLike) {
        match self.index.get(&record.id) {
            Some(&idx) => {
                let answers = &mut self.records[idx].answers;
                answers.text.extend(record.answers.text);
                answers.answer_start.extend(record.answers.answer_start);
            }
            None => self.insert(record),
        }
    }

    /// Replaces an existing question in place, or inserts it.
    fn replace(&mut self, record: SquadLike) {
        match self.index.get(&record.id) {
            Some(&idx) => self.records[idx] = record,
            None => self.insert(record),
        }
    }

    fn insert(&mut self, record: SquadLike) {
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
    }
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    text: String,
    answer_start: i64,
}

#[derive(Debug, Deserialize)]
struct RawQa {
    id: String,
    question: String,
    #[serde(default)]
    answers: Vec<RawAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawParagraph {
    context: String,
    qas: Vec<RawQa>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: String,
    paragraphs: Vec<RawParagraph>,
}

pub fn parse(format: Format, path: &Path) -> Result<RecordIter, Error> {
    let mut root: Value = read_json(path)?;
    let articles = take_array(&mut root, "data", path)?;
    let questions = match format {
        Format::V1 => v1(articles)?,
        Format::V2 => v2(articles, &V2_KEYS)?,
        Format::V2Html => v2(articles, &V2_HTML_KEYS)?,
    };

    Ok(boxed(questions.records.into_iter().map(|r| {
        Ok::<_, Error>((r.id.clone(), Record::SquadLike(r)))
    })))
}

fn v1(articles: Vec<Value>) -> Result<Questions, Error> {
    let mut questions = Questions::default();
    for article in articles {
        let article: RawArticle = serde_json::from_value(article)?;
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                let (text, answer_start) = qa
                    .answers
                    .into_iter()
                    .map(|a| (a.text, a.answer_start))
                    .unzip();
                questions.merge(SquadLike {
                    title: article.title.clone(),
                    context: paragraph.context.clone(),
                    question: qa.question,
                    id: qa.id,
                    answers: Answers { text, answer_start },
                });
            }
        }
    }
    Ok(questions)
}

fn v2(articles: Vec<Value>, keys: &Keys) -> Result<Questions, Error> {
    let mut questions = Questions::default();
    for article in articles {
        let title = article
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let context = article
            .get(keys.context)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing(keys.context, format!("article {:?}", title)))?
            .to_string();
        let qas = match article.get("qas") {
            Some(Value::Array(qas)) => qas,
            _ => return Err(Error::missing("qas", format!("article {:?}", title))),
        };

        for qa in qas {
            let id = qa
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::missing("id", format!("article {:?}", title)))?;
            let question = qa.get("question").and_then(Value::as_str).unwrap_or_default();
            let answer = qa
                .get("answer")
                .ok_or_else(|| Error::missing("answer", format!("question {}", id)))?;
            let answer_start = answer
                .get(keys.answer_start)
                .and_then(Value::as_i64)
                .ok_or_else(|| Error::missing(keys.answer_start, format!("question {}", id)))?;
            let text = answer
                .get(keys.text)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::missing(keys.text, format!("question {}", id)))?;

            questions.replace(SquadLike {
                title: title.clone(),
                context: context.clone(),
                question: question.trim().to_string(),
                id: id.to_string(),
                answers: Answers {
                    text: vec![text.to_string()],
                    answer_start: vec![answer_start],
                },
            });
        }
    }
    Ok(questions)
}
