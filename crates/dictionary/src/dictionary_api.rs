use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::dictionary::{DefinitionEntry, Phonetic, WordDefinition, WordMeaning};
use crate::DictionaryError;

pub(crate) const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Deserialize)]
struct RawEntry {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<RawPhonetic>,
    origin: Option<String>,
    #[serde(default)]
    meanings: Vec<RawMeaning>,
}

#[derive(Debug, Deserialize)]
struct RawPhonetic {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<RawDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    definition: String,
    example: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

// the api sends "" for missing audio and text
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<RawEntry> for DefinitionEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            word: raw.word,
            phonetic: non_empty(raw.phonetic),
            phonetics: raw
                .phonetics
                .into_iter()
                .map(|phonetic| Phonetic {
                    text: non_empty(phonetic.text),
                    audio: non_empty(phonetic.audio),
                })
                .collect(),
            origin: non_empty(raw.origin),
            meanings: raw.meanings.into_iter().map(WordMeaning::from).collect(),
        }
    }
}

impl From<RawMeaning> for WordMeaning {
    fn from(raw: RawMeaning) -> Self {
        Self {
            part_of_speech: raw.part_of_speech.as_str().into(),
            definitions: raw
                .definitions
                .into_iter()
                .map(|definition| WordDefinition {
                    definition: definition.definition,
                    example: non_empty(definition.example),
                    synonyms: definition.synonyms,
                    antonyms: definition.antonyms,
                })
                .collect(),
            synonyms: raw.synonyms,
            antonyms: raw.antonyms,
        }
    }
}

pub(crate) fn entry_url(base: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}

fn transport_error(error: reqwest::Error) -> DictionaryError {
    if error.is_timeout() {
        DictionaryError::Timeout
    } else {
        DictionaryError::Fetch(error)
    }
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base: &Url,
    word: &str,
) -> Result<DefinitionEntry, DictionaryError> {
    let url = entry_url(base, word)?;
    tracing::debug!(%url, "requesting definition");
    let res = client.get(url).send().await.map_err(transport_error)?;
    let status = res.status();
    // the api answers unknown words with a 404 and an explanation object
    if status == StatusCode::NOT_FOUND {
        return Err(DictionaryError::NotFound {
            word: word.to_owned(),
        });
    }
    if !status.is_success() {
        return Err(DictionaryError::Status(status.as_u16()));
    }
    let entries = res.json::<Vec<RawEntry>>().await.map_err(|error| {
        if error.is_timeout() {
            DictionaryError::Timeout
        } else {
            DictionaryError::Deserialize(error)
        }
    })?;
    entries
        .into_iter()
        .next()
        .map(DefinitionEntry::from)
        .ok_or_else(|| DictionaryError::NotFound {
            word: word.to_owned(),
        })
}
