use std::time::Duration;

use reqwest::Url;

mod dictionary;
mod dictionary_api;
pub mod projection;
pub mod word_source;

pub use dictionary::{DefinitionEntry, PartOfSpeech, Phonetic, WordDefinition, WordMeaning};
pub use projection::{project, pronunciation, DisplayMeaning, DisplaySet, Pronunciation};
pub use word_source::{WordList, WordListError, WordSource};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("no definition found for '{word}'")]
    NotFound { word: String },
    #[error("failed to reach the dictionary: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("the dictionary did not answer in time")]
    Timeout,
    #[error("the dictionary answered with status {0}")]
    Status(u16),
    #[error("failed to read the dictionary response: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("invalid dictionary url '{0}'")]
    InvalidUrl(String),
    #[error("failed to build the http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl DictionaryError {
    /// True when the lookup succeeded but the word has no entry. Every other
    /// variant means the lookup itself failed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DictionaryError::NotFound { .. })
    }
}

#[derive(Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new() -> Result<Self, DictionaryError> {
        Self::builder().build()
    }

    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get_definition(&self, word: &str) -> Result<DefinitionEntry, DictionaryError> {
        dictionary_api::get_definition(&self.client, &self.base_url, word).await
    }
}

#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    base_url: String,
    timeout: Duration,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self {
            base_url: dictionary_api::DICTIONARY_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl DictionaryBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Dictionary, DictionaryError> {
        let base_url =
            Url::parse(&self.base_url).map_err(|_| DictionaryError::InvalidUrl(self.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(DictionaryError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(DictionaryError::Client)?;
        Ok(Dictionary { client, base_url })
    }
}
