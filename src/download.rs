/*! Remote files

Remote files are downloaded into `<cache dir>/<corpus>/<file name>`, along with a `<file name>.sha256` sidecar.
A cached file is only reused if its digest still matches its sidecar.

Zip archives are extracted into `<cache dir>/<corpus>/<archive stem>/`.
!*/
use std::fs::File;
use std::path::{Path, PathBuf};

use bytes::Buf;
use futures::future::join_all;
use glob::Pattern;
use log::{debug, info, warn};
use reqwest::Url;
use zip::ZipArchive;

use crate::error::Error;
use crate::processing::checksum::sha256_file;

/// A single remote file.
pub struct Download<'a> {
    src: Url,
    client: &'a reqwest::Client,
}

impl<'a> Download<'a> {
    pub fn new(src: Url, client: &'a reqwest::Client) -> Self {
        Self { src, client }
    }

    /// Last path segment of the url.
    pub fn file_name(&self) -> Result<String, Error> {
        self.src
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|name| !name.is_empty())
            .map(String::from)
            .ok_or_else(|| Error::Custom(format!("no file name in url {}", self.src)))
    }

    pub async fn save_to(&self, dst: &Path) -> Result<(), Error> {
        let resp = self
            .client
            .get(self.src.clone())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let mut file = File::create(dst)?;

        std::io::copy(&mut resp.reader(), &mut file)?;

        Ok(())
    }
}

/// Downloads files into a cache directory.
pub struct Downloader {
    cache_dir: PathBuf,
    client: reqwest::Client,
}

impl Downloader {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            client: reqwest::Client::new(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Fetch `url` into `<cache dir>/<subdir>`, unless a valid cached copy exists.
    pub async fn fetch(&self, url: &str, subdir: &str) -> Result<PathBuf, Error> {
        let download = Download::new(Url::parse(url)?, &self.client);
        let dir = self.cache_dir.join(subdir);
        std::fs::create_dir_all(&dir)?;
        let dst = dir.join(download.file_name()?);

        if is_cached(&dst)? {
            debug!("using cached {:?}", dst);
            return Ok(dst);
        }

        info!("downloading {}", url);
        download.save_to(&dst).await?;
        let digest = sha256_file(&dst)?;
        std::fs::write(sidecar(&dst), &digest)?;
        debug!("{:?}: sha256 {}", dst, digest);

        Ok(dst)
    }

    /// Fetch `urls` concurrently. Results are in the order of `urls`.
    pub async fn fetch_all(&self, urls: &[String], subdir: &str) -> Vec<Result<PathBuf, Error>> {
        join_all(urls.iter().map(|url| self.fetch(url, subdir))).await
    }

    /// Fetch `urls`, replacing each zip archive by the json files it holds.
    pub async fn fetch_and_extract(
        &self,
        urls: &[String],
        subdir: &str,
    ) -> Result<Vec<PathBuf>, Error> {
        let mut files = Vec::new();
        for path in self.fetch_all(urls, subdir).await {
            let path = path?;
            if is_zip(&path) {
                files.extend(extract_json(&path)?);
            } else {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Written in an extraction directory once extraction is complete.
const EXTRACTED_FROM: &str = ".extracted.sha256";

fn is_zip(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("zip"))
}

/// Extract `archive` into a directory named after its stem, and list the `*.json` files at its top.
///
/// The directory is reused as long as it was fully extracted from an archive with the same digest.
pub fn extract_json(archive: &Path) -> Result<Vec<PathBuf>, Error> {
    let dir = archive.with_extension("");
    let marker = dir.join(EXTRACTED_FROM);
    let digest = sha256_file(archive)?;

    let up_to_date = std::fs::read_to_string(&marker)
        .map(|previous| previous.trim() == digest)
        .unwrap_or(false);
    if up_to_date {
        debug!("using extracted {:?}", dir);
    } else {
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        info!("extracting {:?}", archive);
        std::fs::create_dir_all(&dir)?;
        let mut zip = ZipArchive::new(File::open(archive)?)?;
        zip.extract(&dir)?;
        std::fs::write(&marker, &digest)?;
    }

    let pattern = format!("{}/*.json", Pattern::escape(&dir.to_string_lossy()));
    let mut files = glob::glob(&pattern)?.collect::<Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

fn sidecar(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

/// True if `path` exists and matches its sidecar digest.
fn is_cached(path: &Path) -> Result<bool, Error> {
    let sidecar = sidecar(path);
    if !path.exists() || !sidecar.exists() {
        return Ok(false);
    }

    let expected = std::fs::read_to_string(&sidecar)?;
    let actual = sha256_file(path)?;
    if expected.trim() == actual {
        Ok(true)
    } else {
        warn!(
            "{}",
            Error::Checksum {
                path: path.to_path_buf(),
                expected: expected.trim().to_string(),
                actual,
            }
        );
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn file_names() {
        let client = reqwest::Client::new();
        let url = "https://raw.githubusercontent.com/e9t/nsmc/master/ratings_test.txt";
        let download = Download::new(Url::parse(url).unwrap(), &client);
        assert_eq!(download.file_name().unwrap(), "ratings_test.txt");

        let download = Download::new(Url::parse("https://example.org/").unwrap(), &client);
        assert!(download.file_name().is_err());
    }

    #[test]
    fn cache_requires_matching_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings_test.txt");
        std::fs::write(&path, "hello").unwrap();
        assert!(!is_cached(&path).unwrap());

        std::fs::write(
            sidecar(&path),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\n",
        )
        .unwrap();
        assert!(is_cached(&path).unwrap());

        std::fs::write(&path, "hello, world").unwrap();
        assert!(!is_cached(&path).unwrap());
    }

    #[tokio::test]
    async fn cached_files_are_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_dir = dir.path().join("kor_corpora");
        std::fs::create_dir_all(&corpus_dir).unwrap();
        let path = corpus_dir.join("ratings_test.txt");
        std::fs::write(&path, "hello").unwrap();
        std::fs::write(sidecar(&path), sha256_file(&path).unwrap()).unwrap();

        // unroutable host: only the cache can answer.
        let downloader = Downloader::new(dir.path().to_path_buf());
        let fetched = downloader
            .fetch_all(
                &[
                    "http://invalid.invalid/ratings_test.txt".to_string(),
                    "not a url".to_string(),
                ],
                "kor_corpora",
            )
            .await;
        assert_eq!(fetched[0].as_ref().unwrap(), &path);
        assert!(matches!(fetched[1], Err(Error::Url(_))));
    }

    #[test]
    fn extraction_lists_top_level_json() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("KorQuAD_2.1_dev_00.zip");
        write_zip(
            &archive,
            &[
                ("korquad2.1_dev_01.json", "{\"data\": []}"),
                ("korquad2.1_dev_00.json", "{\"data\": []}"),
                ("README.txt", "readme"),
                ("nested/other.json", "{}"),
            ],
        );

        let extracted = dir.path().join("KorQuAD_2.1_dev_00");
        let files = extract_json(&archive).unwrap();
        assert_eq!(
            files,
            vec![
                extracted.join("korquad2.1_dev_00.json"),
                extracted.join("korquad2.1_dev_01.json"),
            ]
        );

        // same archive: the directory is reused as is.
        std::fs::write(&files[0], "edited").unwrap();
        assert_eq!(extract_json(&archive).unwrap(), files);
        assert_eq!(std::fs::read_to_string(&files[0]).unwrap(), "edited");

        // new archive: extracted again from scratch.
        write_zip(&archive, &[("korquad2.1_dev_02.json", "{\"data\": []}")]);
        let files = extract_json(&archive).unwrap();
        assert_eq!(files, vec![extracted.join("korquad2.1_dev_02.json")]);
    }

    #[test]
    fn broken_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("broken.zip");
        std::fs::write(&archive, "not a zip").unwrap();
        assert!(matches!(extract_json(&archive), Err(Error::Zip(_))));

        // nothing marks the directory as extracted.
        assert!(!dir.path().join("broken").join(EXTRACTED_FROM).exists());
    }

    #[tokio::test]
    async fn cached_archives_are_extracted() {
        let dir = tempfile::tempdir().unwrap();
        let corpus_dir = dir.path().join("korquad");
        std::fs::create_dir_all(&corpus_dir).unwrap();
        let archive = corpus_dir.join("KorQuAD_2.1_train_00.zip");
        write_zip(&archive, &[("korquad2.1_train_00.json", "{\"data\": []}")]);
        std::fs::write(sidecar(&archive), sha256_file(&archive).unwrap()).unwrap();
        let plain = corpus_dir.join("plain.json");
        std::fs::write(&plain, "{}").unwrap();
        std::fs::write(sidecar(&plain), sha256_file(&plain).unwrap()).unwrap();

        let downloader = Downloader::new(dir.path().to_path_buf());
        let files = downloader
            .fetch_and_extract(
                &[
                    "http://invalid.invalid/KorQuAD_2.1_train_00.zip".to_string(),
                    "http://invalid.invalid/plain.json".to_string(),
                ],
                "korquad",
            )
            .await
            .unwrap();
        assert_eq!(
            files,
            vec![
                corpus_dir
                    .join("KorQuAD_2.1_train_00")
                    .join("korquad2.1_train_00.json"),
                plain,
            ]
        );
    }
}
