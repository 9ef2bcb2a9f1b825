use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading review or stopword files.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot open {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The first token looks numeric but is not a valid score.
    #[error("line {line}: invalid score {token:?}")]
    InvalidScore { line: usize, token: String },

    /// The line starts with a word instead of a score.
    #[error("line {line}: missing score")]
    MissingScore { line: usize },
}

impl CorpusError {
    /// Whether the error only concerns one line and the rest of the file is still usable.
    #[must_use]
    pub fn is_line_error(&self) -> bool {
        matches!(self, Self::InvalidScore { .. } | Self::MissingScore { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = CorpusError::InvalidScore {
            line: 3,
            token: "9x".to_owned(),
        };
        assert_eq!(err.to_string(), "line 3: invalid score \"9x\"");
        assert!(err.is_line_error());

        let err = CorpusError::Open {
            path: PathBuf::from("reviews.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.to_string(), "cannot open reviews.txt");
        assert!(!err.is_line_error());
        assert!(std::error::Error::source(&err).is_some());
    }
}
