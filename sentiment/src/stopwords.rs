use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bst_map::BstSet;
use bst_map::bst_set::Iter;
use tracing::{debug, info};

use crate::error::CorpusError;

/// Words that carry no sentiment and are ignored when scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwords {
    words: BstSet<String>,
}

impl Stopwords {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one stopword per line from `path`.
    ///
    /// # Errors
    ///
    /// [`CorpusError::Open`] or [`CorpusError::Read`] on I/O failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading stopwords");
        let file = File::open(path).map_err(|source| CorpusError::Open {
            path: path.to_owned(),
            source,
        })?;
        let stopwords = Self::from_reader(BufReader::new(file), path)?;
        debug!(count = stopwords.len(), "stopwords loaded");
        Ok(stopwords)
    }

    /// Reads one stopword per line; surrounding whitespace is trimmed and blank lines ignored.
    ///
    /// # Errors
    ///
    /// [`CorpusError::Read`] if reading fails.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, CorpusError> {
        let mut stopwords = Self::new();
        for line in reader.lines() {
            let line = line.map_err(|source| CorpusError::Read {
                path: path.to_owned(),
                source,
            })?;
            stopwords.insert(&line);
        }
        Ok(stopwords)
    }

    /// Adds a stopword, returning whether it was new. Blank input is ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        let word = word.trim();
        !word.is_empty() && self.words.insert(word.to_owned())
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the stopwords in ascending order.
    pub fn iter(&self) -> Iter<'_, String> {
        self.words.iter()
    }
}

impl<'a> FromIterator<&'a str> for Stopwords {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut stopwords = Self::new();
        for word in iter {
            stopwords.insert(word);
        }
        stopwords
    }
}

impl<'a> IntoIterator for &'a Stopwords {
    type Item = &'a String;
    type IntoIter = Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
