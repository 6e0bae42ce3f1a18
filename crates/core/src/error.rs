use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    ConfigParse(String),
    IoError(std::io::Error),
    Frontmatter { path: PathBuf, message: String },
    InvalidDate { path: PathBuf, value: String },
    UnknownCollection(String),
    Feed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigParse(msg) => write!(f, "Configuration parse error: {}", msg),
            Error::IoError(err) => write!(f, "IO error: {}", err),
            Error::Frontmatter { path, message } => {
                write!(f, "Invalid frontmatter in {}: {}", path.display(), message)
            }
            Error::InvalidDate { path, value } => write!(
                f,
                "Invalid date '{}' in {} (expected YYYY-MM-DD or RFC 3339)",
                value,
                path.display()
            ),
            Error::UnknownCollection(name) => write!(f, "Unknown collection: {}", name),
            Error::Feed(msg) => write!(f, "Feed error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
