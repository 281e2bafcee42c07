use std::fs::File;
use std::io::Write;
use std::path::Path;

use korean_corpora::builder::Builder;
use korean_corpora::config::{Corpus, DataSource};
use korean_corpora::download::Downloader;
use korean_corpora::processing::checksum::sha256_file;
use korean_corpora::registry;
use korean_corpora::split::Partition;
use serde_json::{json, Value};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

fn article(id: &str) -> Value {
    json!({
        "title": "제목",
        "context": format!("<p>{}</p>", id),
        "raw_html": format!("<html><p>{}</p></html>", id),
        "url": "https://ko.wikipedia.org",
        "qas": [{
            "id": id,
            "question": "질문?",
            "answer": {
                "text": id, "answer_start": 3,
                "html_answer_text": id, "html_answer_start": 9
            }
        }]
    })
}

/// Puts `url`'s archive in the cache, as a previous download would have.
fn cache_archive(cache: &Path, url: &str, question_id: &str) {
    let name = url.rsplit('/').next().unwrap();
    let path = cache.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let content = json!({"version": "KorQuAD_2.1", "data": [article(question_id)]});
    zip.start_file(name.replace(".zip", ".json"), options).unwrap();
    zip.write_all(content.to_string().as_bytes()).unwrap();
    zip.finish().unwrap();

    let digest = sha256_file(&path).unwrap();
    std::fs::write(cache.join(format!("{}.sha256", name)), digest).unwrap();
}

#[test_log::test(tokio::test)]
async fn v2_1_from_archives() {
    let cache = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    let corpus_cache = cache.path().join("korquad");
    std::fs::create_dir_all(&corpus_cache).unwrap();

    let config = registry::get(Corpus::Korquad, "v2.1").unwrap();
    let urls = match &config.data {
        DataSource::Remote { urls } => urls.clone(),
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(urls[&Partition::Train].len(), 13);
    assert_eq!(urls[&Partition::Validation].len(), 2);
    let last_train = &urls[&Partition::Train][12];
    assert!(last_train.ends_with("KorQuAD_2.1/train/KorQuAD_2.1_train_12.zip"));
    let last_dev = &urls[&Partition::Validation][1];
    assert!(last_dev.ends_with("KorQuAD_2.1/dev/KorQuAD_2.1_dev_01.zip"));

    for (partition, urls) in &urls {
        for (idx, url) in urls.iter().enumerate() {
            cache_archive(&corpus_cache, url, &format!("{}-{}", partition, idx));
        }
    }

    let builder = Builder::new(config, cache.path().join("manual"));
    let sources = builder
        .prepare(&Downloader::new(cache.path().to_path_buf()))
        .await
        .unwrap();
    assert_eq!(
        sources.files[&Partition::Validation][0],
        corpus_cache
            .join("KorQuAD_2.1_dev_00")
            .join("KorQuAD_2.1_dev_00.json")
    );

    let out_dir = builder.write(&sources, dst.path(), false).unwrap();
    let train = std::fs::read_to_string(out_dir.join("train.jsonl")).unwrap();
    assert_eq!(train.lines().count(), 13);
    let validation: Vec<Value> = std::fs::read_to_string(out_dir.join("validation.jsonl"))
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(validation.len(), 2);
    assert_eq!(validation[1]["key"], "validation-1");
    assert_eq!(
        validation[1]["example"]["answers"],
        json!({"text": ["validation-1"], "answer_start": [3]})
    );
}
