use crate::errors::{Result, TraghettoError};

/// Reserved marker used simultaneously as a pseudo-word and a pseudo-tag to
/// delimit sentences in labeled corpora.
pub const BOUNDARY: &str = "###";

/// The literal corpus line marking a sentence boundary.
const BOUNDARY_LINE: &str = "###/###";

/// A single parsed line of a labeled corpus.
///
/// A corpus is a sequence of `word/tag` lines partitioned into sentences by
/// [`Boundary`](CorpusLine::Boundary) lines. Words are matched
/// case-insensitively, so they are lowercased when parsed; tags are
/// case-sensitive and trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusLine {
    /// The literal line `###/###`, marking a sentence boundary.
    Boundary,

    /// A `word/tag` entry.
    Token {
        /// The word, lowercased.
        word: String,

        /// The tag, trimmed.
        tag: String,
    },
}

impl CorpusLine {
    /// Parses one corpus line.
    ///
    /// # Arguments
    ///
    /// * `line` - A line in the `word/tag` format, or the boundary line
    ///   `###/###`.
    ///
    /// # Errors
    ///
    /// [`TraghettoError::InvalidFormat`] will be returned if the line lacks
    /// the `/` separator or one of the two fields is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use traghetto::CorpusLine;
    ///
    /// let line = CorpusLine::parse("The/D").unwrap();
    /// assert_eq!(
    ///     CorpusLine::Token {
    ///         word: "the".to_string(),
    ///         tag: "D".to_string(),
    ///     },
    ///     line
    /// );
    /// ```
    pub fn parse(line: &str) -> Result<Self> {
        if line == BOUNDARY_LINE {
            return Ok(Self::Boundary);
        }
        let (word, tag) = line.split_once('/').ok_or_else(|| {
            TraghettoError::invalid_format(format!("missing `/` separator: {line}"))
        })?;
        let tag = tag.trim();
        if word.is_empty() {
            return Err(TraghettoError::invalid_format(format!(
                "empty word field: {line}"
            )));
        }
        if tag.is_empty() {
            return Err(TraghettoError::invalid_format(format!(
                "empty tag field: {line}"
            )));
        }
        Ok(Self::Token {
            word: word.to_lowercase(),
            tag: tag.to_string(),
        })
    }
}
