//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use crate::config::Corpus;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "korean-corpora",
    about = "Korean NLP corpora loading and splitting."
)]
/// Holds every command that is callable by the `korean-corpora` command.
pub enum KoreanCorpora {
    #[structopt(about = "List dataset configurations")]
    List(List),
    #[structopt(about = "Print a dataset configuration as JSON")]
    Info(Info),
    #[structopt(about = "Download the remote files of a configuration")]
    Download(Download),
    #[structopt(about = "Generate the partitions of a configuration")]
    Generate(Generate),
}

#[derive(Debug, StructOpt)]
pub struct List {
    #[structopt(help = "only list configurations of this corpus (aihub, klue, korquad, nikl, kor_corpora)")]
    pub corpus: Option<Corpus>,
}

#[derive(Debug, StructOpt)]
pub struct Info {
    #[structopt(help = "corpus (aihub, klue, korquad, nikl, kor_corpora)")]
    pub corpus: Corpus,
    #[structopt(help = "configuration name")]
    pub config: String,
}

#[derive(Debug, StructOpt)]
pub struct Download {
    #[structopt(help = "corpus (aihub, klue, korquad, nikl, kor_corpora)")]
    pub corpus: Corpus,
    #[structopt(help = "configuration name")]
    pub config: String,
    #[structopt(
        parse(from_os_str),
        long = "cache-dir",
        default_value = "cache",
        help = "download location"
    )]
    pub cache_dir: PathBuf,
}

#[derive(Debug, StructOpt)]
pub struct Generate {
    #[structopt(help = "corpus (aihub, klue, korquad, nikl, kor_corpora)")]
    pub corpus: Corpus,
    #[structopt(help = "configuration name")]
    pub config: String,
    #[structopt(parse(from_os_str), help = "destination folder")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "manual-dir",
        default_value = "manual",
        help = "location of manually downloaded corpora"
    )]
    pub manual_dir: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "cache-dir",
        default_value = "cache",
        help = "download location"
    )]
    pub cache_dir: PathBuf,
    #[structopt(long = "strict", help = "stop on the first unreadable file")]
    pub strict: bool,
    #[structopt(long = "gzip", help = "gzip partitions")]
    pub gzip: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_args() {
        let opt = KoreanCorpora::from_iter_safe(vec![
            "korean-corpora",
            "generate",
            "nikl",
            "cola.v1.0",
            "out",
            "--manual-dir",
            "/data",
            "--strict",
        ])
        .unwrap();

        match opt {
            KoreanCorpora::Generate(g) => {
                assert_eq!(g.corpus, Corpus::Nikl);
                assert_eq!(g.config, "cola.v1.0");
                assert_eq!(g.dst, PathBuf::from("out"));
                assert_eq!(g.manual_dir, PathBuf::from("/data"));
                assert_eq!(g.cache_dir, PathBuf::from("cache"));
                assert!(g.strict);
                assert!(!g.gzip);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unknown_corpus() {
        let args = vec!["korean-corpora", "info", "squad", "v1.0"];
        assert!(KoreanCorpora::from_iter_safe(args).is_err());
    }

    #[test]
    fn optional_corpus() {
        match KoreanCorpora::from_iter_safe(vec!["korean-corpora", "list"]).unwrap() {
            KoreanCorpora::List(l) => assert_eq!(l.corpus, None),
            other => panic!("unexpected {:?}", other),
        }
    }
}
