//! JSON Lines writer for a single partition.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::{write::GzEncoder, Compression};
use log::debug;
use serde::Serialize;

use crate::error::Error;
use crate::split::Partition;

enum Sink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            Sink::Gzip(w) => w.flush(),
        }
    }
}

#[derive(Serialize)]
struct Line<'a, R> {
    key: &'a str,
    example: &'a R,
}

/// Writes `<dst>/<partition>.jsonl` (or `.jsonl.gz`).
///
/// [JsonlWriter::finish] has to be called to get a complete gzip stream.
pub struct JsonlWriter {
    sink: Sink,
    path: PathBuf,
    nb_lines: u64,
}

impl JsonlWriter {
    pub fn new(dst: &Path, partition: Partition, gzip: bool) -> Result<Self, Error> {
        let filename = if gzip {
            format!("{}.jsonl.gz", partition)
        } else {
            format!("{}.jsonl", partition)
        };
        let path = dst.join(filename);
        debug!("creating {:?}", path);

        let file = BufWriter::new(File::create(&path)?);
        let sink = if gzip {
            Sink::Gzip(GzEncoder::new(file, Compression::default()))
        } else {
            Sink::Plain(file)
        };

        Ok(Self {
            sink,
            path,
            nb_lines: 0,
        })
    }

    pub fn write<R>(&mut self, key: &str, example: &R) -> Result<(), Error>
    where
        R: Serialize,
    {
        serde_json::to_writer(&mut self.sink, &Line { key, example })?;
        self.sink.write_all(b"\n")?;
        self.nb_lines += 1;
        Ok(())
    }

    pub fn nb_lines(&self) -> u64 {
        self.nb_lines
    }

    /// Flush and close the file, returning its path.
    pub fn finish(self) -> Result<PathBuf, Error> {
        match self.sink {
            Sink::Plain(mut w) => w.flush()?,
            Sink::Gzip(w) => w.finish()?.flush()?,
        }
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Read};

    use flate2::read::GzDecoder;
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn plain_lines() {
        let dst = tempfile::tempdir().unwrap();
        let mut w = JsonlWriter::new(dst.path(), Partition::Validation, false).unwrap();
        w.write("1", &json!({"v": "a"})).unwrap();
        w.write("2", &json!({"v": "b"})).unwrap();
        assert_eq!(w.nb_lines(), 2);
        let path = w.finish().unwrap();
        assert_eq!(path, dst.path().join("validation.jsonl"));

        let lines: Vec<Value> = BufReader::new(File::open(&path).unwrap())
            .lines()
            .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                json!({"key": "1", "example": {"v": "a"}}),
                json!({"key": "2", "example": {"v": "b"}})
            ]
        );
    }

    #[test]
    fn gzip_lines() {
        let dst = tempfile::tempdir().unwrap();
        let mut w = JsonlWriter::new(dst.path(), Partition::Train, true).unwrap();
        w.write("문서", &json!({"text": "안녕하세요."})).unwrap();
        let path = w.finish().unwrap();
        assert_eq!(path, dst.path().join("train.jsonl.gz"));

        let mut content = String::new();
        GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(
            content,
            "{\"key\":\"문서\",\"example\":{\"text\":\"안녕하세요.\"}}\n"
        );
    }
}
