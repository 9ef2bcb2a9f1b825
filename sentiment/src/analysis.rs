use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::corpus::Corpus;
use crate::stopwords::Stopwords;

/// What the corpus knows about one word of a review.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WordVerdict<'a> {
    /// Seen in training; `average` is its mean review score.
    Scored { word: &'a str, average: f64 },
    /// Not in the corpus, but listed as a stopword.
    Stopword(&'a str),
    /// Neither in the corpus nor a stopword.
    Unseen(&'a str),
}

impl fmt::Display for WordVerdict<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // `Debug` keeps the `.0` on whole numbers.
            Self::Scored { word, average } => write!(f, "The average sentiment of {word} is {average:?}"),
            Self::Stopword(word) => write!(f, "Skipping {word} (stopword)"),
            Self::Unseen(word) => write!(f, "Skipping {word} never seen before"),
        }
    }
}

/// Per-word verdicts for one review, in the order the words appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewReport<'a> {
    verdicts: Vec<WordVerdict<'a>>,
}

impl ReviewReport<'_> {
    #[must_use]
    pub fn verdicts(&self) -> &[WordVerdict<'_>] {
        &self.verdicts
    }

    /// Number of words that contributed to the score.
    #[must_use]
    pub fn known_words(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|verdict| matches!(verdict, WordVerdict::Scored { .. }))
            .count()
    }

    /// Mean of the per-word averages, or `None` if no word was known.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        let (sum, count) = self.verdicts.iter().fold((0.0, 0_u32), |(sum, count), verdict| match verdict {
            WordVerdict::Scored { average, .. } => (sum + average, count + 1),
            WordVerdict::Stopword(_) | WordVerdict::Unseen(_) => (sum, count),
        });
        (count > 0).then(|| sum / f64::from(count))
    }

    /// Writes one line per word, then the overall score.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for verdict in &self.verdicts {
            writeln!(out, "{verdict}")?;
        }
        match self.score() {
            Some(score) => writeln!(out, "Sentiment score for this review is {score:?}"),
            None => writeln!(out, "No known words in this review"),
        }
    }
}

/// Scores `review` against the corpus.
///
/// Words are split on whitespace and matched case-sensitively.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sentiment::{Corpus, Stopwords, analyze_review};
///
/// let mut corpus = Corpus::new();
/// corpus.ingest("4 great fun\n0 dull fun\n".as_bytes(), Path::new("reviews")).unwrap();
/// let stopwords = Stopwords::new();
///
/// let report = analyze_review("great fun", &corpus, &stopwords);
/// assert_eq!(report.score(), Some(3.0));
/// assert_eq!(analyze_review("unknown", &corpus, &stopwords).score(), None);
/// ```
#[must_use]
pub fn analyze_review<'a>(review: &'a str, corpus: &Corpus, stopwords: &Stopwords) -> ReviewReport<'a> {
    let verdicts = review
        .split_whitespace()
        .map(|word| match corpus.average(word) {
            Some(average) => WordVerdict::Scored { word, average },
            None if stopwords.contains(word) => WordVerdict::Stopword(word),
            None => WordVerdict::Unseen(word),
        })
        .collect();
    let report = ReviewReport { verdicts };
    debug!(words = report.verdicts.len(), known = report.known_words(), "review analyzed");
    report
}

/// Prints `message`, then reads one line without its line terminator.
///
/// Returns `None` at end of input.
///
/// # Errors
///
/// Propagates read and write failures.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

/// Prompts for reviews and scores each one until `quit` or end of input.
///
/// Returns the number of reviews analyzed.
///
/// # Errors
///
/// Propagates read and write failures.
pub fn run_interactive<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    corpus: &Corpus,
    stopwords: &Stopwords,
) -> io::Result<usize> {
    let mut analyzed = 0;
    loop {
        writeln!(out)?;
        let Some(review) = prompt(input, out, "Enter a new review to analyze: ")? else {
            break;
        };
        if review.trim() == "quit" {
            break;
        }
        analyze_review(&review, corpus, stopwords).write_to(out)?;
        analyzed += 1;
    }
    Ok(analyzed)
}
