use std::collections::HashSet;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use korean_corpora::builder::Builder;
use korean_corpora::config::Corpus;
use korean_corpora::download::Downloader;
use korean_corpora::error::Error;
use korean_corpora::registry;
use serde_json::{json, Value};

fn write_file(path: PathBuf, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn lines(path: &Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).unwrap();
    content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn cola_file(rows: &[(&str, u8)]) -> String {
    let mut content = String::from("source\tacceptability_label\tsource_annotation\tsentence\n");
    for (sentence, label) in rows {
        content.push_str(&format!("T00001\t{}\t\t{}\n", label, sentence));
    }
    content
}

fn newspaper(id: &str, paragraphs: &[&str]) -> Value {
    let paragraph: Vec<_> = paragraphs
        .iter()
        .enumerate()
        .map(|(i, form)| json!({"id": format!("{}.1.{}", id, i + 1), "form": form}))
        .collect();
    json!({
        "id": id,
        "document": [{
            "id": format!("{}.1", id),
            "metadata": {"title": "제목", "topic": "사회", "original_topic": "사회>사건"},
            "paragraph": paragraph
        }]
    })
}

#[test_log::test(tokio::test)]
async fn cola() {
    let manual = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let root = manual.path().join("NIKL/v1.0/CoLA");
    write_file(
        root.join("NIKL_CoLA_in_domain_train.tsv"),
        &cola_file(&[("문장이다.", 1), ("문장 이다 이.", 0), ("또 문장.", 1)]),
    );
    write_file(root.join("NIKL_CoLA_in_domain_dev.tsv"), &cola_file(&[("검증.", 1)]));
    write_file(
        root.join("NIKL_CoLA_out_of_domain_dev.tsv"),
        &cola_file(&[("시험.", 0), ("시험 둘.", 1)]),
    );

    let config = registry::get(Corpus::Nikl, "cola.v1.0").unwrap();
    let builder = Builder::new(config, manual.path().to_path_buf());
    let sources = builder
        .prepare(&Downloader::new(manual.path().join("cache")))
        .await
        .unwrap();
    let out_dir = builder.write(&sources, dst.path(), false).unwrap();
    assert_eq!(out_dir, dst.path().join("nikl").join("cola.v1.0"));

    let train = lines(&out_dir.join("train.jsonl"));
    assert_eq!(train.len(), 3);
    assert_eq!(
        train[1],
        json!({"key": "1", "example": {"idx": 1, "sentence": "문장 이다 이.", "label": 0}})
    );
    assert_eq!(lines(&out_dir.join("validation.jsonl")).len(), 1);
    assert_eq!(lines(&out_dir.join("test.jsonl")).len(), 2);

    let info: Value =
        serde_json::from_str(&std::fs::read_to_string(out_dir.join("dataset_info.json")).unwrap())
            .unwrap();
    assert_eq!(info["config"]["name"], "cola.v1.0");
    assert_eq!(info["splits"]["train"]["emitted"], 3);
    assert_eq!(info["splits"]["test"]["file"], "test.jsonl");

    let checksums = std::fs::read_to_string(out_dir.join("cola.v1.0_sha384.txt")).unwrap();
    let files: Vec<_> = checksums
        .lines()
        .map(|l| l.split(' ').nth(1).unwrap())
        .collect();
    assert_eq!(
        files,
        vec!["dataset_info.json", "test.jsonl", "train.jsonl", "validation.jsonl"]
    );
}

#[tokio::test]
async fn summarization_split() {
    let manual = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let nikl = manual.path().join("NIKL/v1.0");

    let mut data = Vec::new();
    for i in 0..30 {
        let id = format!("NWRW18000000{:02}", i);
        write_file(
            nikl.join("NEWSPAPER").join(format!("{}.json", id)),
            &newspaper(&id, &["첫 문단", "둘째 문단"]).to_string(),
        );
        data.push(json!({
            "document_id": format!("{}.1", id),
            "summary_sentences": ["요약"],
            "topic_sentences": ["주제"]
        }));
    }
    write_file(
        nikl.join("SUMMARIZATION/NIKL_SC.json"),
        &json!({ "data": data }).to_string(),
    );

    let config = registry::get(Corpus::Nikl, "summarization.v1.0.split").unwrap();
    let builder = Builder::new(config, manual.path().to_path_buf());
    let sources = builder
        .prepare(&Downloader::new(manual.path().join("cache")))
        .await
        .unwrap();
    let out_dir = builder.write(&sources, dst.path(), false).unwrap();

    let mut seen = HashSet::new();
    for partition in ["train", "validation", "test"] {
        for line in lines(&out_dir.join(format!("{}.jsonl", partition))) {
            assert_eq!(line["example"]["article"], "첫 문단. 둘째 문단.");
            assert!(seen.insert(line["key"].as_str().unwrap().to_string()));
        }
    }
    // summary and topic records for each article
    assert_eq!(seen.len(), 60);
}

#[tokio::test]
async fn gzipped_pages() {
    let manual = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let news = manual.path().join("NIKL/v1.0/NEWSPAPER");
    write_file(
        news.join("NWRW1800000001.json"),
        &newspaper("NWRW1800000001", &["한 문단"]).to_string(),
    );

    let config = registry::get(Corpus::Nikl, "newspaper.v1.0.page.split").unwrap();
    let builder = Builder::new(config, manual.path().to_path_buf());
    let sources = builder
        .prepare(&Downloader::new(manual.path().join("cache")))
        .await
        .unwrap();
    let out_dir = builder.write(&sources, dst.path(), true).unwrap();

    let mut total = 0;
    for partition in ["train", "validation"] {
        let file = std::fs::File::open(out_dir.join(format!("{}.jsonl.gz", partition))).unwrap();
        for line in BufReader::new(GzDecoder::new(file)).lines() {
            let line: Value = serde_json::from_str(&line.unwrap()).unwrap();
            assert_eq!(line["key"], "NWRW1800000001.1");
            assert_eq!(line["example"]["text"], "한 문단.");
            total += 1;
        }
    }
    assert_eq!(total, 1);
}

#[tokio::test]
async fn missing_manual_download() {
    let manual = tempfile::tempdir().unwrap();
    let config = registry::get(Corpus::Nikl, "mp.v1.0").unwrap();
    let builder = Builder::new(config, manual.path().to_path_buf());

    match builder
        .prepare(&Downloader::new(manual.path().join("cache")))
        .await
    {
        Err(Error::MissingFiles { config, location }) => {
            assert_eq!(config, "nikl/mp.v1.0");
            assert_eq!(location, manual.path().join("NIKL/v1.0/MP"));
        }
        other => panic!("unexpected {:?}", other),
    }
}
