use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{Error, Result};

pub const PAD: u32 = 0;
pub const START: u32 = 1;
pub const UNK: u32 = 2;
pub const UNUSED: u32 = 3;

/// Corpus-derived ids are shifted past the four sentinel tokens.
const SENTINEL_OFFSET: u32 = 3;

/// Immutable word-to-id mapping built once from the IMDB word index.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    index: HashMap<String, u32>,
}

impl Vocabulary {
    /// Reads a `{"word": rank}` JSON file (the Keras IMDB word index dump).
    pub fn from_word_index_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            Error::Vocabulary(format!(
                "Failed to open word index {}: {}",
                path.display(),
                e
            ))
        })?;
        let raw: HashMap<String, u32> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_word_index(raw))
    }

    pub fn from_word_index(raw: HashMap<String, u32>) -> Self {
        let mut index: HashMap<String, u32> = raw
            .into_iter()
            .map(|(word, id)| (word, id + SENTINEL_OFFSET))
            .collect();

        index.insert("<PAD>".to_string(), PAD);
        index.insert("<START>".to_string(), START);
        index.insert("<UNK>".to_string(), UNK);
        index.insert("<UNUSED>".to_string(), UNUSED);

        Self { index }
    }

    pub fn id_of(&self, word: &str) -> Option<u32> {
        self.index.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
