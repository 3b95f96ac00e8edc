use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BUILTIN_WORDS: &str = include_str!("../words.txt");

/// Supplies random words to look up.
pub trait WordSource: Send {
    /// Returns a random, non-empty, lowercase word.
    fn next_word(&mut self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to read word list '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("the word list contains no words")]
    Empty,
}

/// Picks uniformly from a fixed list of words, never the same word twice in
/// a row unless the list has a single word.
pub struct WordList {
    words: Vec<String>,
    last: Option<usize>,
    rng: StdRng,
}

impl WordList {
    pub fn builtin() -> Self {
        // the embedded list is never empty
        Self {
            words: parse_words(BUILTIN_WORDS),
            last: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, WordListError> {
        let content = fs::read_to_string(path).map_err(|source| WordListError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::new(parse_words(&content), StdRng::from_entropy())
    }

    pub fn seeded(words: Vec<String>, seed: u64) -> Result<Self, WordListError> {
        let words = words
            .iter()
            .flat_map(|word| parse_words(word))
            .collect::<Vec<String>>();
        Self::new(words, StdRng::seed_from_u64(seed))
    }

    fn new(words: Vec<String>, rng: StdRng) -> Result<Self, WordListError> {
        if words.is_empty() {
            return Err(WordListError::Empty);
        }
        Ok(Self {
            words,
            last: None,
            rng,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordSource for WordList {
    fn next_word(&mut self) -> String {
        let mut index = self.rng.gen_range(0..self.words.len());
        if self.words.len() > 1 && Some(index) == self.last {
            index = (index + self.rng.gen_range(1..self.words.len())) % self.words.len();
        }
        self.last = Some(index);
        self.words[index].clone()
    }
}

/// One word per line; blank lines and `#` comments are ignored.
fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}
