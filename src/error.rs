//! Error enum
use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Serde(serde_json::Error),
    Csv(csv::Error),
    Glob(glob::GlobError),
    GlobPattern(glob::PatternError),
    Xlsx(calamine::XlsxError),
    Zip(zip::result::ZipError),
    Reqwest(reqwest::Error),
    Url(url::ParseError),
    /// A field the normalization of a record cannot default.
    MissingField {
        field: &'static str,
        context: String,
    },
    UnknownConfig(String),
    /// No file matched a pattern of a configuration.
    MissingFiles {
        config: String,
        location: PathBuf,
    },
    Checksum {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    Custom(String),
}

impl Error {
    pub(crate) fn missing(field: &'static str, context: impl Into<String>) -> Self {
        Self::MissingField {
            field,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Serde(e) => write!(f, "json error: {}", e),
            Error::Csv(e) => write!(f, "tsv error: {}", e),
            Error::Glob(e) => write!(f, "glob error: {}", e),
            Error::GlobPattern(e) => write!(f, "invalid glob pattern: {}", e),
            Error::Xlsx(e) => write!(f, "xlsx error: {}", e),
            Error::Zip(e) => write!(f, "zip error: {}", e),
            Error::Reqwest(e) => write!(f, "http error: {}", e),
            Error::Url(e) => write!(f, "invalid url: {}", e),
            Error::MissingField { field, context } => {
                write!(f, "missing field `{}` in {}", field, context)
            }
            Error::UnknownConfig(name) => write!(f, "unknown dataset config: {}", name),
            Error::MissingFiles { config, location } => write!(
                f,
                "for {}, you must manually download and extract the dataset under {:?}",
                config, location
            ),
            Error::Checksum {
                path,
                expected,
                actual,
            } => write!(
                f,
                "checksum mismatch for {:?}: expected {}, got {}",
                path, expected, actual
            ),
            Error::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<glob::GlobError> for Error {
    fn from(e: glob::GlobError) -> Error {
        Error::Glob(e)
    }
}

impl From<glob::PatternError> for Error {
    fn from(e: glob::PatternError) -> Error {
        Error::GlobPattern(e)
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(e: calamine::XlsxError) -> Error {
        Error::Xlsx(e)
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Error {
        Error::Zip(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        Error::Reqwest(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Error {
        Error::Url(e)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
