//! # korean-corpora
//!
//! Loaders for Korean NLP corpora, with deterministic hash-based splits.
//!
//! ## Getting started
//!
//! ```sh
//! korean-corpora 1.0.0
//! Korean NLP corpora loading and splitting.
//!
//! USAGE:
//!     korean-corpora <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     download    Download the remote files of a configuration
//!     generate    Generate the partitions of a configuration
//!     help        Prints this message or the help of the given subcommand(s)
//!     info        Print a dataset configuration as JSON
//!     list        List dataset configurations
//! ```
//!
use korean_corpora::builder::Builder;
use korean_corpora::config::{DataSource, Extra};
use korean_corpora::download::Downloader;
use korean_corpora::processing::FailurePolicy;
use korean_corpora::{cli, error, registry};
use structopt::StructOpt;

#[macro_use]
extern crate log;

#[tokio::main]
async fn main() -> Result<(), error::Error> {
    env_logger::init();

    let opt = cli::KoreanCorpora::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::KoreanCorpora::List(l) => {
            for config in registry::list(l.corpus) {
                println!("{}", config.full_name());
            }
        }

        cli::KoreanCorpora::Info(i) => {
            let config = registry::get(i.corpus, &i.config)?;
            println!("{}", serde_json::to_string_pretty(config)?);
        }

        cli::KoreanCorpora::Download(d) => {
            let config = registry::get(d.corpus, &d.config)?;
            let mut urls: Vec<String> = match &config.data {
                DataSource::Remote { urls } => urls.values().flatten().cloned().collect(),
                DataSource::Manual { root, .. } => {
                    warn!(
                        "[{}] has to be downloaded manually, and extracted under <manual dir>/{}",
                        config.full_name(),
                        root
                    );
                    Vec::new()
                }
            };
            if let Some(Extra::Auxiliary { url }) = &config.extra {
                urls.push(url.clone());
            }

            let dl = Downloader::new(d.cache_dir);
            let results = dl.fetch_all(&urls, config.corpus.as_str()).await;

            // write eventual download errors
            let mut nb_errors = 0;
            for (url, result) in urls.iter().zip(results) {
                match result {
                    Ok(path) => info!("[{}] {} -> {:?}", config.full_name(), url, path),
                    Err(e) => {
                        error!("Error during download of {}:\n {}", url, e);
                        nb_errors += 1;
                    }
                }
            }
            if nb_errors > 0 {
                return Err(error::Error::Custom(format!(
                    "{}/{} downloads failed",
                    nb_errors,
                    urls.len()
                )));
            }
        }

        cli::KoreanCorpora::Generate(g) => {
            let config = registry::get(g.corpus, &g.config)?;
            let policy = if g.strict {
                FailurePolicy::Strict
            } else {
                FailurePolicy::BestEffort
            };
            let builder = Builder::new(config, g.manual_dir).with_policy(policy);
            let dl = Downloader::new(g.cache_dir);

            let sources = builder.prepare(&dl).await?;
            let out_dir = builder.write(&sources, &g.dst, g.gzip)?;
            info!("[{}] written to {:?}", config.full_name(), out_dir);
        }
    };
    Ok(())
}
