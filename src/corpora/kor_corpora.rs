//! Korean benchmark files: NSMC, the question pair dataset, KorNLI, KorSTS and the Korean hate speech dataset.
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{boxed, file_stem, indexed_id, RecordIter};
use crate::error::Error;
use crate::io::reader::tsv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Nsmc,
    Qpair,
    Kornli,
    Korsts,
    Khsd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nsmc {
    pub id: String,
    #[serde(default)]
    pub document: String,
    /// 0: negative, 1: positive
    pub label: u8,
}

/// Row of the question pair CSV files. The test file names its id column `test_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qpair {
    #[serde(default, alias = "test_id")]
    pub id: String,
    pub question1: String,
    pub question2: String,
    /// label as found upstream, 0 or 1
    pub is_duplicate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kornli {
    pub sentence1: String,
    pub sentence2: String,
    pub gold_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Korsts {
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub id: String,
    pub score: f64,
    pub sentence1: String,
    pub sentence2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Khsd {
    pub comments: String,
    pub contain_gender_bias: bool,
    pub bias: String,
    pub hate: String,
}

#[derive(Debug, Deserialize)]
struct RawKhsd {
    comments: String,
    contain_gender_bias: String,
    bias: String,
    hate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Nsmc(Nsmc),
    Qpair(Qpair),
    Kornli(Kornli),
    Korsts(Korsts),
    Khsd(Khsd),
}

impl From<Record> for super::Record {
    fn from(r: Record) -> Self {
        super::Record::KorCorpora(r)
    }
}

const NLI_LABELS: [&str; 3] = ["entailment", "contradiction", "neutral"];

type Item = Result<(String, Record), Error>;

pub fn parse(format: Format, path: &Path) -> Result<RecordIter, Error> {
    let stem = file_stem(path);
    let records = match format {
        Format::Nsmc => boxed(tsv::rows::<Nsmc>(path)?.map(|row| -> Item {
            let row = row?;
            if row.label > 1 {
                return Err(Error::Custom(format!("{}: invalid label {}", row.id, row.label)));
            }
            Ok((row.id.clone(), Record::Nsmc(row)))
        })),
        Format::Qpair => boxed(tsv::csv_rows::<Qpair>(path)?.enumerate().map(
            move |(idx, row)| -> Item {
                let row = row?;
                if row.is_duplicate > 1 {
                    return Err(Error::Custom(format!(
                        "{}: invalid is_duplicate {}",
                        indexed_id(&stem, idx),
                        row.is_duplicate
                    )));
                }
                Ok((indexed_id(&stem, idx), Record::Qpair(row)))
            },
        )),
        Format::Kornli => boxed(tsv::rows::<Kornli>(path)?.enumerate().map(
            move |(idx, row)| -> Item {
                let row = row?;
                if !NLI_LABELS.contains(&row.gold_label.as_str()) {
                    return Err(Error::Custom(format!(
                        "{}: unknown label {:?}",
                        indexed_id(&stem, idx),
                        row.gold_label
                    )));
                }
                Ok((indexed_id(&stem, idx), Record::Kornli(row)))
            },
        )),
        Format::Korsts => boxed(tsv::rows::<Korsts>(path)?.enumerate().map(
            move |(idx, row)| -> Item { Ok((indexed_id(&stem, idx), Record::Korsts(row?))) },
        )),
        Format::Khsd => boxed(tsv::rows::<RawKhsd>(path)?.enumerate().map(
            move |(idx, row)| -> Item {
                let row = row?;
                let contain_gender_bias = parse_bool(&row.contain_gender_bias).ok_or_else(|| {
                    Error::Custom(format!(
                        "{}: invalid contain_gender_bias {:?}",
                        indexed_id(&stem, idx),
                        row.contain_gender_bias
                    ))
                })?;
                let record = Khsd {
                    comments: row.comments,
                    contain_gender_bias,
                    bias: row.bias,
                    hate: row.hate,
                };
                Ok((indexed_id(&stem, idx), Record::Khsd(record)))
            },
        )),
    };

    Ok(records)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(
        format: Format,
        name: &str,
        content: &str,
    ) -> Vec<Result<(String, super::super::Record), Error>> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        parse(format, &path).unwrap().collect()
    }

    #[test]
    fn nsmc_ids() {
        let records = records(
            Format::Nsmc,
            "ratings_test.txt",
            "id\tdocument\tlabel\n6270596\t굳 ㅋ\t1\n9274899\t\t0\n",
        );
        let (id, record) = records[1].as_ref().unwrap();
        assert_eq!(id, "9274899");
        assert_eq!(
            serde_json::to_value(record).unwrap(),
            json!({"id": "9274899", "document": "", "label": 0})
        );
    }

    #[test]
    fn qpair_rows() {
        let train = records(
            Format::Qpair,
            "kor_pair_train.csv",
            "id,question1,question2,is_duplicate\n\
             1,\"1000일 만난 여자친구와 이별\",\"10년 연예의끝\",1\n\
             2,\"10년 연애, 이제 그만\",\"10년 연애 끝\",0\n\
             3,질문,질문,2\n",
        );
        assert_eq!(train.len(), 3);
        let (id, record) = train[1].as_ref().unwrap();
        assert_eq!(id, "kor_pair_train.1");
        assert_eq!(
            serde_json::to_value(record).unwrap(),
            json!({
                "id": "2",
                "question1": "10년 연애, 이제 그만",
                "question2": "10년 연애 끝",
                "is_duplicate": 0
            })
        );
        assert!(train[2].is_err());

        let test = records(
            Format::Qpair,
            "kor_Pair_test.csv",
            "test_id,question1,question2,is_duplicate\n7,가,나,0\n",
        );
        let (id, record) = test[0].as_ref().unwrap();
        assert_eq!(id, "kor_Pair_test.0");
        assert_eq!(serde_json::to_value(record).unwrap()["id"], "7");
    }

    #[test]
    fn kornli_labels() {
        let records = records(
            Format::Kornli,
            "xnli.dev.ko.tsv",
            "sentence1\tsentence2\tgold_label\n전제\t가설\tneutral\n전제\t가설\tunknown\n",
        );
        let (id, _) = records[0].as_ref().unwrap();
        assert_eq!(id, "xnli.dev.ko.0");
        assert!(records[1].is_err());
    }

    #[test]
    fn korsts_rows() {
        let records = records(
            Format::Korsts,
            "sts-dev.tsv",
            "genre\tfilename\tyear\tid\tscore\tsentence1\tsentence2\nmain-captions\tMSRvid\t2012test\t0000\t5.000\t한 남자가 기타를 치고 있다.\t남자가 기타를 치고 있다.\n",
        );
        let (id, record) = records[0].as_ref().unwrap();
        assert_eq!(id, "sts-dev.0");
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value["score"], 5.0);
        assert_eq!(value["year"], "2012test");
        assert_eq!(value["id"], "0000");
    }

    #[test]
    fn khsd_bools() {
        let records = records(
            Format::Khsd,
            "dev.tsv",
            "comments\tcontain_gender_bias\tbias\thate\n댓글\tTrue\tgender\thate\n댓글 둘\tFalse\tnone\tnone\n댓글 셋\tmaybe\tnone\tnone\n",
        );
        let (_, record) = records[0].as_ref().unwrap();
        assert_eq!(
            serde_json::to_value(record).unwrap(),
            json!({"comments": "댓글", "contain_gender_bias": true, "bias": "gender", "hate": "hate"})
        );
        assert!(records[1].is_ok());
        assert!(records[2].is_err());
    }
}
