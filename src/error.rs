#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no entry found for \"{0}\"")]
    WordNotFound(String),
    #[error("\"{word}\" has no {language} section")]
    LanguageNotFound { word: String, language: String },
    #[error("no part-of-speech heading in the {language} section of \"{word}\"")]
    NoSenseFound { word: String, language: String },
    #[error("dictionary request failed: {0}")]
    RequestFailed(reqwest::Error),
    #[error("unexpected dictionary response: {0}")]
    BadResponse(String),
    #[error("invalid dictionary endpoint: {0}")]
    InvalidEndpoint(url::ParseError),
    #[error("error serializing output: {0}")]
    SerdeFailed(serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(error)
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidEndpoint(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::SerdeFailed(error)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
