//! Delimited files with a header row.
//!
//! In tab separated files quotes are not special, the corpora carry them unescaped inside fields.
//! Comma separated files are regular quoted CSV.
use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Error;

fn reader(path: &Path, delimiter: u8, quoting: bool) -> Result<csv::Reader<File>, Error> {
    let f = File::open(path)?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .quoting(quoting)
        .has_headers(true)
        .flexible(true)
        .from_reader(f))
}

/// Lazily deserialize rows of `path` into `T`, matching fields by header name.
pub fn rows<T>(path: &Path) -> Result<impl Iterator<Item = Result<T, Error>>, Error>
where
    T: DeserializeOwned,
{
    Ok(reader(path, b'\t', false)?
        .into_deserialize::<T>()
        .map(|row| row.map_err(Error::from)))
}

/// Same as [rows], for quoted comma separated files.
pub fn csv_rows<T>(path: &Path) -> Result<impl Iterator<Item = Result<T, Error>>, Error>
where
    T: DeserializeOwned,
{
    Ok(reader(path, b',', true)?
        .into_deserialize::<T>()
        .map(|row| row.map_err(Error::from)))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        sentence: String,
        label: u8,
    }

    #[test]
    fn deserialize_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.tsv");
        std::fs::write(
            &path,
            "label\tsentence\n1\t\"따옴표\" 문장이다.\n0\t문장 이다\n",
        )
        .unwrap();

        let rows: Vec<Row> = rows(&path).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(
            rows,
            vec![
                Row {
                    sentence: "\"따옴표\" 문장이다.".to_string(),
                    label: 1
                },
                Row {
                    sentence: "문장 이다".to_string(),
                    label: 0
                },
            ]
        );
    }

    #[test]
    fn quoted_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, "sentence,label\n\"쉼표, 있는 문장\",1\n").unwrap();

        let rows: Vec<Row> = csv_rows(&path).unwrap().map(|r| r.unwrap()).collect();
        assert_eq!(rows[0].sentence, "쉼표, 있는 문장");
        assert_eq!(rows[0].label, 1);
    }

    #[test]
    fn bad_row_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.tsv");
        std::fs::write(&path, "label\tsentence\n1\tok\nnope\tbad\n").unwrap();

        let rows: Vec<Result<Row, Error>> = rows(&path).unwrap().collect();
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
    }
}
