//! Capped views of a [`DefinitionEntry`] for display on a card.

use crate::dictionary::{DefinitionEntry, PartOfSpeech, Phonetic, WordDefinition};

pub const MAX_PARTS_OF_SPEECH: usize = 2;
pub const MAX_DEFINITIONS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMeaning {
    pub part_of_speech: PartOfSpeech,
    pub definitions: Vec<WordDefinition>,
}

pub type DisplaySet = Vec<DisplayMeaning>;

/// Keeps the first [`MAX_PARTS_OF_SPEECH`] distinct parts of speech in the
/// order they first appear, each with its first [`MAX_DEFINITIONS`]
/// definitions. A later meaning that repeats a part of speech is skipped.
pub fn project(entry: &DefinitionEntry) -> DisplaySet {
    let mut display = DisplaySet::with_capacity(MAX_PARTS_OF_SPEECH);
    for meaning in &entry.meanings {
        if display.len() >= MAX_PARTS_OF_SPEECH {
            break;
        }
        if display
            .iter()
            .any(|shown| shown.part_of_speech == meaning.part_of_speech)
        {
            continue;
        }
        display.push(DisplayMeaning {
            part_of_speech: meaning.part_of_speech.clone(),
            definitions: meaning
                .definitions
                .iter()
                .take(MAX_DEFINITIONS)
                .cloned()
                .collect(),
        });
    }
    display
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pronunciation {
    pub text: Option<String>,
    pub audio: Option<String>,
}

/// Picks the phonetic text and audio shown with a word. The second phonetic
/// is preferred over the first; text falls back to the entry-level phonetic.
pub fn pronunciation(entry: &DefinitionEntry) -> Pronunciation {
    let pick = |field: fn(&Phonetic) -> Option<&String>| {
        entry
            .phonetics
            .get(1)
            .and_then(field)
            .or_else(|| entry.phonetics.first().and_then(field))
            .cloned()
    };
    Pronunciation {
        text: pick(|phonetic| phonetic.text.as_ref()).or_else(|| entry.phonetic.clone()),
        audio: pick(|phonetic| phonetic.audio.as_ref()),
    }
}
