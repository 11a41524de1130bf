use std::collections::BTreeMap;
use std::io::BufRead;

use hashbrown::HashMap;

use crate::corpus::{CorpusLine, BOUNDARY};
use crate::errors::Result;

/// Frequency tables accumulated from a labeled training corpus.
///
/// Lines are consumed in order. Every line counts one tag occurrence, one
/// emission of its word under its tag (in both directions), and one
/// transition out of the previous line's tag. A boundary line counts the
/// sentinel pair `###`/`###` the same way, so the closing tag of each
/// sentence gets an explicit transition into the boundary and the next
/// sentence starts its transitions from the boundary again.
///
/// Tables never store zero entries; absence means a count of zero. The two
/// emission views stay consistent: for every counted pair,
/// `tag_to_word_count[tag][word] == word_to_tag_count[word][tag]`.
///
/// # Examples
///
/// ```
/// use traghetto::CorpusCounter;
///
/// let counter = CorpusCounter::from_reader("the/D\ndog/N\n###/###\n".as_bytes()).unwrap();
/// assert_eq!(1, counter.tag_transition_count("D", "N"));
/// assert_eq!(1, counter.word_emission_count("D", "the"));
/// ```
#[derive(Debug)]
pub struct CorpusCounter {
    tag_count: HashMap<String, u32>,
    tag_to_word_count: HashMap<String, BTreeMap<String, u32>>,
    word_to_tag_count: HashMap<String, BTreeMap<String, u32>>,
    tag_to_tag_count: HashMap<String, BTreeMap<String, u32>>,
    prev_tag: String,
}

impl CorpusCounter {
    /// Creates an empty counter. The previous tag starts out as the
    /// boundary sentinel, so the first data line counts a transition out of
    /// the boundary.
    pub fn new() -> Self {
        Self {
            tag_count: HashMap::new(),
            tag_to_word_count: HashMap::new(),
            word_to_tag_count: HashMap::new(),
            tag_to_tag_count: HashMap::new(),
            prev_tag: BOUNDARY.to_string(),
        }
    }

    /// Streams a whole corpus from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`TraghettoError::InvalidFormat`] on the first malformed
    /// line, or [`TraghettoError::IOError`] if reading fails. In both cases
    /// the partially filled counter is discarded.
    ///
    /// [`TraghettoError::InvalidFormat`]: crate::TraghettoError::InvalidFormat
    /// [`TraghettoError::IOError`]: crate::TraghettoError::IOError
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: BufRead,
    {
        let mut counter = Self::new();
        for line in rdr.lines() {
            counter.push_line(&line?)?;
        }
        Ok(counter)
    }

    /// Parses one corpus line and counts it.
    ///
    /// # Errors
    ///
    /// [`TraghettoError::InvalidFormat`] will be returned if the line does
    /// not follow the corpus format.
    ///
    /// [`TraghettoError::InvalidFormat`]: crate::TraghettoError::InvalidFormat
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        let entry = CorpusLine::parse(line)?;
        self.push(&entry);
        Ok(())
    }

    /// Counts an already-parsed corpus line.
    pub fn push(&mut self, entry: &CorpusLine) {
        let (word, tag) = match entry {
            CorpusLine::Boundary => (BOUNDARY, BOUNDARY),
            CorpusLine::Token { word, tag } => (word.as_str(), tag.as_str()),
        };
        *self.tag_count.entry(tag.to_string()).or_insert(0) += 1;
        *self
            .tag_to_word_count
            .entry(tag.to_string())
            .or_default()
            .entry(word.to_string())
            .or_insert(0) += 1;
        *self
            .word_to_tag_count
            .entry(word.to_string())
            .or_default()
            .entry(tag.to_string())
            .or_insert(0) += 1;
        *self
            .tag_to_tag_count
            .entry(self.prev_tag.clone())
            .or_default()
            .entry(tag.to_string())
            .or_insert(0) += 1;
        self.prev_tag = tag.to_string();
    }

    /// Occurrence counts per tag.
    pub fn tag_count(&self) -> &HashMap<String, u32> {
        &self.tag_count
    }

    /// Word counts under each tag.
    pub fn tag_to_word_count(&self) -> &HashMap<String, BTreeMap<String, u32>> {
        &self.tag_to_word_count
    }

    /// Tag counts under each word, the inverse emission view.
    pub fn word_to_tag_count(&self) -> &HashMap<String, BTreeMap<String, u32>> {
        &self.word_to_tag_count
    }

    /// Adjacent-tag transition counts.
    pub fn tag_to_tag_count(&self) -> &HashMap<String, BTreeMap<String, u32>> {
        &self.tag_to_tag_count
    }

    /// How often `tag` occurred, zero if never.
    pub fn count_of_tag(&self, tag: &str) -> u32 {
        self.tag_count.get(tag).copied().unwrap_or(0)
    }

    /// How often `tag` followed `prev_tag`, zero if never.
    pub fn tag_transition_count(&self, prev_tag: &str, tag: &str) -> u32 {
        self.tag_to_tag_count
            .get(prev_tag)
            .and_then(|row| row.get(tag))
            .copied()
            .unwrap_or(0)
    }

    /// How often `word` occurred under `tag`, zero if never.
    pub fn word_emission_count(&self, tag: &str, word: &str) -> u32 {
        self.tag_to_word_count
            .get(tag)
            .and_then(|row| row.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// The tags `word` was observed under, with their counts, in
    /// lexicographic tag order. `None` if the word never occurred.
    pub fn tags_for_word(&self, word: &str) -> Option<&BTreeMap<String, u32>> {
        self.word_to_tag_count.get(word)
    }
}

impl Default for CorpusCounter {
    fn default() -> Self {
        Self::new()
    }
}
