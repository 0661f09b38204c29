use std::{
    fmt,
    fs,
    path::PathBuf,
};

use super::{
    http::{
        fetch_json,
        http_client,
    },
    FlashcardError,
    TermRecord,
    TermStore,
};

pub const DEFAULT_VOCABULARY: &str = "vocabulary.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularySource {
    Url(String),
    File(PathBuf),
}

impl VocabularySource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            VocabularySource::Url(location.to_string())
        } else {
            VocabularySource::File(PathBuf::from(location))
        }
    }
}

impl Default for VocabularySource {
    fn default() -> Self {
        VocabularySource::File(PathBuf::from(DEFAULT_VOCABULARY))
    }
}

impl fmt::Display for VocabularySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularySource::Url(url) => write!(f, "{}", url),
            VocabularySource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedVocabulary {
    pub store: TermStore,
    pub source: VocabularySource,
    pub used_fallback: bool,
}

/// Terms used when the vocabulary source cannot be read.
pub fn fallback_records() -> Vec<TermRecord> {
    vec![
        TermRecord::new("Claim to be a US citizen", "To say you are a US citizen"),
        TermRecord::new("Claim", "To say something without proof"),
        TermRecord::new(
            "Physical or developmental disability",
            "Anything about your body or mind that makes it difficult to do things like blindness",
        ),
        TermRecord::new(
            "Mental impairment",
            "When someone's brain works differently making some tasks challenging",
        ),
    ]
}

pub fn parse_records(json: &str) -> Result<Vec<TermRecord>, FlashcardError> {
    let records: Vec<TermRecord> = serde_json::from_str(json)?;
    Ok(records)
}

pub fn fetch_records(source: &VocabularySource) -> Result<Vec<TermRecord>, FlashcardError> {
    let records = match source {
        VocabularySource::Url(url) => {
            let client = http_client()?;
            fetch_json::<Vec<TermRecord>>(&client, url)?
        }
        VocabularySource::File(path) => parse_records(&fs::read_to_string(path)?)?,
    };

    if records.is_empty() {
        return Err(FlashcardError::EmptyVocabulary(source.to_string()));
    }
    Ok(records)
}

/// Loads the term store, substituting [`fallback_records`] on any failure.
pub fn load_vocabulary(source: VocabularySource) -> LoadedVocabulary {
    match fetch_records(&source) {
        Ok(records) => {
            log::info!("Loaded {} terms from {}", records.len(), source);
            LoadedVocabulary { store: TermStore::from_records(records), source, used_fallback: false }
        }
        Err(e) => {
            log::error!("Error loading vocabulary from {}: {}", source, e);
            LoadedVocabulary {
                store: TermStore::from_records(fallback_records()),
                source,
                used_fallback: true,
            }
        }
    }
}
