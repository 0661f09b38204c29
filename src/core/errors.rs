use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Vocabulary is empty: {0}")]
    EmptyVocabulary(String),

    #[error("FlashcardError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for FlashcardError {
    fn from(error: std::io::Error) -> Self {
        FlashcardError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for FlashcardError {
    fn from(error: reqwest::Error) -> Self {
        FlashcardError::Reqwest(Box::new(error))
    }
}
