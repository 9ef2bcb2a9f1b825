use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use bst_map::BstMap;
use bst_map::bst_map::TraversalKeys;
use tracing::{debug, info, warn};

use crate::error::CorpusError;
use crate::stopwords::Stopwords;

/// One parsed training line: a review score followed by the words of the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredLine<'a> {
    pub score: i64,
    pub words: Vec<&'a str>,
}

/// Parses a `<score> <word> <word> ...` line.
///
/// `line_no` is only used for error reporting. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// [`CorpusError::MissingScore`] if the line starts with a word, and
/// [`CorpusError::InvalidScore`] if the leading token looks numeric but does not fit an `i64`.
///
/// # Examples
///
/// ```
/// use sentiment::parse_line;
///
/// let line = parse_line(1, "4 a gripping  thriller").unwrap().unwrap();
/// assert_eq!(line.score, 4);
/// assert_eq!(line.words, ["a", "gripping", "thriller"]);
/// assert!(parse_line(2, "   ").unwrap().is_none());
/// assert!(parse_line(3, "gripping 4").is_err());
/// ```
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScoredLine<'_>>, CorpusError> {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };
    match first.parse::<i64>() {
        Ok(score) => Ok(Some(ScoredLine {
            score,
            words: tokens.collect(),
        })),
        Err(_) if looks_numeric(first) => Err(CorpusError::InvalidScore {
            line: line_no,
            token: first.to_owned(),
        }),
        Err(_) => Err(CorpusError::MissingScore { line: line_no }),
    }
}

fn looks_numeric(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    digits.starts_with(|c: char| c.is_ascii_digit())
}

/// Word frequencies and total review scores learned from a training file.
///
/// Both maps always hold the same set of words.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    freqs: BstMap<String, u64>,
    scores: BstMap<String, i64>,
    skipped: usize,
}

impl Corpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` and ingests every review in it.
    ///
    /// # Errors
    ///
    /// [`CorpusError::Open`] or [`CorpusError::Read`] on I/O failure. Malformed lines are
    /// logged and skipped, never returned.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading reviews");
        let file = File::open(path).map_err(|source| CorpusError::Open {
            path: path.to_owned(),
            source,
        })?;

        let mut corpus = Self::new();
        let reviews = corpus.ingest(BufReader::new(file), path)?;
        debug!(
            reviews,
            words = corpus.len(),
            height = corpus.height(),
            skipped = corpus.skipped,
            "reviews loaded"
        );
        Ok(corpus)
    }

    /// Folds every line of `reader` into the corpus and returns how many reviews were recorded.
    ///
    /// `path` names the source in errors and logs.
    ///
    /// # Errors
    ///
    /// [`CorpusError::Read`] if reading fails midway; the lines before it stay recorded.
    pub fn ingest<R: BufRead>(&mut self, reader: R, path: &Path) -> Result<usize, CorpusError> {
        let mut reviews = 0;
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| CorpusError::Read {
                path: path.to_owned(),
                source,
            })?;
            match parse_line(index + 1, &line) {
                Ok(Some(scored)) => {
                    self.record(&scored);
                    reviews += 1;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping review line");
                    self.skipped += 1;
                }
            }
        }
        Ok(reviews)
    }

    /// Counts every word of `line` once more and adds the line's score to its total.
    pub fn record(&mut self, line: &ScoredLine<'_>) {
        for &word in &line.words {
            match self.freqs.get_mut(word) {
                Some(freq) => {
                    *freq = freq.saturating_add(1);
                    if let Some(total) = self.scores.get_mut(word) {
                        *total = total.saturating_add(line.score);
                    }
                }
                None => {
                    self.freqs.insert(word.to_owned(), 1);
                    self.scores.insert(word.to_owned(), line.score);
                }
            }
        }
    }

    /// Removes every stopword from the corpus and returns how many words were dropped.
    pub fn remove_stopwords(&mut self, stopwords: &Stopwords) -> usize {
        let mut removed = 0;
        for word in stopwords.iter() {
            if self.freqs.remove(word.as_str()).is_some() {
                removed += 1;
            }
            self.scores.remove(word.as_str());
        }
        debug!(removed, remaining = self.len(), "stopwords removed");
        removed
    }

    /// Number of distinct words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    /// Height of the frequency tree, `-1` when empty.
    #[must_use]
    pub fn height(&self) -> isize {
        self.freqs.height()
    }

    /// Training lines skipped because they were malformed.
    #[must_use]
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.freqs.contains_key(word)
    }

    #[must_use]
    pub fn frequency(&self, word: &str) -> Option<u64> {
        self.freqs.get(word).copied()
    }

    #[must_use]
    pub fn total_score(&self, word: &str) -> Option<i64> {
        self.scores.get(word).copied()
    }

    /// Mean score of the reviews `word` appeared in.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average(&self, word: &str) -> Option<f64> {
        let freq = self.frequency(word)?;
        let total = self.total_score(word)?;
        Some(total as f64 / freq as f64)
    }

    /// The word-frequency map.
    #[must_use]
    pub fn frequencies(&self) -> &BstMap<String, u64> {
        &self.freqs
    }

    /// The word-total-score map.
    #[must_use]
    pub fn scores(&self) -> &BstMap<String, i64> {
        &self.scores
    }

    /// Writes the word count and tree height.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Number of words is: {}", self.len())?;
        writeln!(out, "Height of the tree is: {}", self.height())
    }

    /// Writes the three traversals of the frequency tree and a per-word table.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_trees<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_keys(out, "Preorder:  ", self.freqs.preorder_keys())?;
        write_keys(out, "Inorder:   ", self.freqs.inorder_keys())?;
        write_keys(out, "Postorder: ", self.freqs.postorder_keys())?;
        for (word, freq) in &self.freqs {
            let total = self.total_score(word).unwrap_or_default();
            writeln!(out, "Word: {word}, frequency: {freq}, total score: {total}")?;
        }
        Ok(())
    }
}

fn write_keys<W: Write>(out: &mut W, label: &str, keys: TraversalKeys<'_, String, u64>) -> io::Result<()> {
    write!(out, "{label}[")?;
    for (i, key) in keys.enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{key}")?;
    }
    writeln!(out, "]")
}
