use std::collections::BTreeMap;
use std::io::BufRead;

use crate::corpus::{CorpusLine, BOUNDARY};
use crate::errors::{Result, TraghettoError};
use crate::model::Model;

/// Whether `candidate` should replace the running maximum. Ties keep the
/// incumbent, so scanning in lexicographic order makes the smallest tag win.
/// NaN never displaces a real score, and a NaN incumbent is displaced by any
/// real score.
fn improves(incumbent: Option<f64>, candidate: f64) -> bool {
    match incumbent {
        None => true,
        Some(best) => candidate > best || (best.is_nan() && !candidate.is_nan()),
    }
}

/// Tag decoder over a trained [`Model`].
///
/// Decoding is a Viterbi-style forward pass: the memo maps every tag of the
/// previous position to the best partial-path probability ending there, and
/// is replaced wholesale at each position. It is cleared and re-seeded with
/// the boundary self-loop probability at the start of decoding and on every
/// boundary line, so no state survives across sentences.
///
/// # Examples
///
/// ```
/// use traghetto::{CorpusCounter, Model, Predictor};
///
/// let counter = CorpusCounter::from_reader("the/D\ndog/N\nran/V\n###/###\n".as_bytes()).unwrap();
/// let model = Model::new(counter);
/// let mut predictor = Predictor::new(&model);
/// assert_eq!("D", predictor.predict("the", "###"));
/// ```
pub struct Predictor<'a> {
    model: &'a Model,
    memo: BTreeMap<String, f64>,
}

impl<'a> Predictor<'a> {
    /// Creates a predictor borrowing `model` read-only, with a freshly
    /// seeded memo.
    pub fn new(model: &'a Model) -> Self {
        let mut predictor = Self {
            model,
            memo: BTreeMap::new(),
        };
        predictor.reset();
        predictor
    }

    /// Clears the memo and seeds it with the boundary self-loop, i.e.
    /// `transition(###, ###) × emission(###, ###)`. The seed may be zero or
    /// NaN for degenerate models; both are tolerated downstream.
    pub fn reset(&mut self) {
        self.memo.clear();
        let seed = self.model.transition_probability(BOUNDARY, BOUNDARY)
            * self.model.emission_probability(BOUNDARY, BOUNDARY);
        self.memo.insert(BOUNDARY.to_string(), seed);
    }

    /// Predicts the most probable tag for `word` following `prev_word`,
    /// advancing the memo by one position. Both words are lowercased before
    /// lookup.
    ///
    /// A word seen in training is scored over its candidate tags with the
    /// dynamic-programming recurrence. An unknown word is routed through
    /// the transition-chasing heuristic instead: the prediction is the tag
    /// reached by the highest-probability transition out of any training
    /// tag of `prev_word`, ignoring the unseen word's emission entirely.
    pub fn predict(&mut self, word: &str, prev_word: &str) -> String {
        let word = word.to_lowercase();
        let prev_word = prev_word.to_lowercase();
        let model = self.model;
        match model.tags_for_word(&word) {
            Some(candidates) => self.predict_known(&word, candidates),
            None => self.predict_unknown(&prev_word),
        }
    }

    /// One step of the recurrence: for every candidate tag, the best score
    /// over all previous-position entries, times the emission probability.
    /// Every candidate's score is recorded in the next memo, not only the
    /// winner's.
    fn predict_known(&mut self, word: &str, candidates: &BTreeMap<String, u32>) -> String {
        let model = self.model;
        let mut next = BTreeMap::new();
        let mut best: Option<(&String, f64)> = None;
        for tag in candidates.keys() {
            let reached = self
                .memo
                .iter()
                .map(|(prev_tag, &prob)| prob * model.transition_probability(prev_tag, tag))
                .fold(0.0, f64::max);
            let score = reached * model.emission_probability(tag, word);
            next.insert(tag.clone(), score);
            if improves(best.map(|(_, s)| s), score) {
                best = Some((tag, score));
            }
        }
        self.memo = next;
        best.map(|(tag, _)| tag.clone()).unwrap_or_default()
    }

    /// The unknown-word heuristic: scan the transition rows of every
    /// training tag of `prev_word` for the single largest outgoing
    /// probability. With nothing to scan, fall back to the best entry
    /// recorded for the previous position. The next memo holds only the
    /// predicted entry.
    fn predict_unknown(&mut self, prev_word: &str) -> String {
        let model = self.model;
        let mut best: Option<(&String, f64)> = None;
        if let Some(prev_tags) = model.tags_for_word(prev_word) {
            for prev_tag in prev_tags.keys() {
                if let Some(row) = model.transition_row(prev_tag) {
                    for (tag, &prob) in row {
                        if improves(best.map(|(_, s)| s), prob) {
                            best = Some((tag, prob));
                        }
                    }
                }
            }
        }
        let (tag, prob) = match best {
            Some((tag, prob)) => (tag.clone(), prob),
            None => {
                let mut fallback: Option<(&String, f64)> = None;
                for (tag, &prob) in &self.memo {
                    if improves(fallback.map(|(_, s)| s), prob) {
                        fallback = Some((tag, prob));
                    }
                }
                match fallback {
                    Some((tag, prob)) => (tag.clone(), prob),
                    None => (String::new(), 0.0),
                }
            }
        };
        self.memo = BTreeMap::from([(tag.clone(), prob)]);
        tag
    }

    /// Scores a held-out labeled corpus against the model.
    ///
    /// Boundary lines reset the memo and are not scored. Every data line is
    /// predicted, compared against its gold tag, and counted in the total.
    ///
    /// # Errors
    ///
    /// Returns [`TraghettoError::InvalidFormat`] or
    /// [`TraghettoError::IOError`] if the corpus cannot be read, aborting
    /// the whole evaluation, and [`TraghettoError::InvalidArgument`] if the
    /// corpus contains no scored words (so a 0/0 error rate is a defined
    /// failure, never a silent zero).
    ///
    /// [`TraghettoError::InvalidFormat`]: crate::TraghettoError::InvalidFormat
    /// [`TraghettoError::IOError`]: crate::TraghettoError::IOError
    /// [`TraghettoError::InvalidArgument`]: crate::TraghettoError::InvalidArgument
    pub fn evaluate<R>(&mut self, rdr: R) -> Result<Evaluation>
    where
        R: BufRead,
    {
        self.reset();
        let mut n_words = 0;
        let mut n_mismatches = 0;
        let mut prev_word = BOUNDARY.to_string();
        for line in rdr.lines() {
            match CorpusLine::parse(&line?)? {
                CorpusLine::Boundary => {
                    self.reset();
                    prev_word = BOUNDARY.to_string();
                }
                CorpusLine::Token { word, tag } => {
                    let predicted = self.predict(&word, &prev_word);
                    n_words += 1;
                    if predicted != tag {
                        n_mismatches += 1;
                    }
                    prev_word = word;
                }
            }
        }
        if n_words == 0 {
            return Err(TraghettoError::invalid_argument(
                "rdr",
                "test corpus contains no scored words",
            ));
        }
        Ok(Evaluation {
            n_words,
            n_mismatches,
        })
    }
}

/// Outcome of scoring a held-out corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Total number of scored words.
    pub n_words: usize,

    /// Number of words whose predicted tag differed from the gold tag.
    pub n_mismatches: usize,
}

impl Evaluation {
    /// Mismatched predictions over total scored words.
    pub fn error_rate(&self) -> f64 {
        self.n_mismatches as f64 / self.n_words as f64
    }

    /// Matching predictions over total scored words.
    pub fn accuracy(&self) -> f64 {
        (self.n_words - self.n_mismatches) as f64 / self.n_words as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::CorpusCounter;

    const TRAINING: &str = "the/D\ndog/N\nran/V\n###/###\n";

    fn model(corpus: &str) -> Model {
        Model::new(CorpusCounter::from_reader(corpus.as_bytes()).unwrap())
    }

    #[test]
    fn test_known_word_path() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        assert_eq!("D", predictor.predict("the", "###"));
        assert_eq!("N", predictor.predict("dog", "the"));
        assert_eq!("V", predictor.predict("ran", "dog"));
    }

    #[test]
    fn test_unknown_word_uses_prev_word_tags() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        assert_eq!("D", predictor.predict("the", "###"));
        // "cat" never occurred in training; the heuristic chases the
        // highest transition out of "the"'s only tag, D → N.
        assert_eq!("N", predictor.predict("cat", "the"));
        assert_eq!("V", predictor.predict("ran", "cat"));
    }

    #[test]
    fn test_unknown_word_falls_back_to_memo() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        // Neither word was ever seen; the only option left is the seeded
        // boundary entry.
        assert_eq!("###", predictor.predict("zzz", "qqq"));
    }

    #[test]
    fn test_ties_prefer_lexicographically_smallest_tag() {
        let model = model("###/###\nfish/N\n###/###\nfish/V\n###/###\n");
        let mut predictor = Predictor::new(&model);

        // N and V score identically for "fish" after a boundary.
        assert_eq!("N", predictor.predict("fish", "###"));
    }

    #[test]
    fn test_predict_is_deterministic() {
        let model = model(TRAINING);
        let words = ["the", "cat", "ran"];

        let mut first = vec![];
        let mut predictor = Predictor::new(&model);
        let mut prev = "###".to_string();
        for word in words {
            first.push(predictor.predict(word, &prev));
            prev = word.to_string();
        }

        let mut second = vec![];
        let mut predictor = Predictor::new(&model);
        let mut prev = "###".to_string();
        for word in words {
            second.push(predictor.predict(word, &prev));
            prev = word.to_string();
        }

        assert_eq!(first, second);
    }

    #[test]
    fn test_undefined_probabilities_never_win() {
        // No boundary line at all: the sentinel was never counted, so the
        // memo seed and every transition out of the sentinel are NaN.
        let model = model("the/D\ndog/N\n");
        let mut predictor = Predictor::new(&model);

        assert_eq!("D", predictor.predict("the", "###"));
        assert_eq!("N", predictor.predict("dog", "the"));
    }

    #[test]
    fn test_evaluate_identical_corpus_has_zero_error_rate() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        let evaluation = predictor.evaluate(TRAINING.as_bytes()).unwrap();

        assert_eq!(3, evaluation.n_words);
        assert_eq!(0, evaluation.n_mismatches);
        assert_eq!(0.0, evaluation.error_rate());
        assert_eq!(1.0, evaluation.accuracy());
    }

    #[test]
    fn test_evaluate_unseen_word_does_not_fail() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        let evaluation = predictor
            .evaluate("the/D\ncat/N\nran/V\n###/###\n".as_bytes())
            .unwrap();

        assert_eq!(0.0, evaluation.error_rate());
    }

    #[test]
    fn test_evaluate_counts_mismatches() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        let evaluation = predictor.evaluate("the/X\n###/###\n".as_bytes()).unwrap();

        assert_eq!(1, evaluation.n_words);
        assert_eq!(1, evaluation.n_mismatches);
        assert_eq!(1.0, evaluation.error_rate());
    }

    #[test]
    fn test_evaluate_empty_corpus_is_an_error() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        let result = predictor.evaluate("###/###\n".as_bytes());

        assert!(result.is_err());
        assert_eq!(
            "InvalidArgumentError: rdr: test corpus contains no scored words",
            &result.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_evaluate_malformed_line_aborts() {
        let model = model(TRAINING);
        let mut predictor = Predictor::new(&model);

        let result = predictor.evaluate("the/D\nfoo\n".as_bytes());

        assert!(matches!(result, Err(TraghettoError::InvalidFormat(_))));
    }
}
