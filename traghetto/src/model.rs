use std::collections::BTreeMap;

use crate::counter::CorpusCounter;

/// Maximum-likelihood ratio. An absent denominator makes the probability
/// undefined; callers treat the resulting NaN as "never wins a comparison".
fn ratio(numer: u32, denom: u32) -> f64 {
    if denom == 0 {
        f64::NAN
    } else {
        f64::from(numer) / f64::from(denom)
    }
}

/// Transition and emission probabilities estimated from corpus counts.
///
/// A model takes ownership of a [`CorpusCounter`] and is read-only from then
/// on: the full probability tables are materialized once at construction,
/// and the point queries recompute the same ratios straight from the counts.
/// No smoothing is applied; unseen pairs have probability zero and a tag
/// that never occurred makes the ratio undefined (NaN).
///
/// # Examples
///
/// ```
/// use traghetto::{CorpusCounter, Model};
///
/// let counter = CorpusCounter::from_reader("the/D\ndog/N\nran/V\n###/###\n".as_bytes()).unwrap();
/// let model = Model::new(counter);
/// assert_eq!(1.0, model.transition_probability("D", "N"));
/// assert_eq!(1.0, model.emission_probability("D", "the"));
/// assert_eq!(0.0, model.transition_probability("D", "V"));
/// ```
pub struct Model {
    counter: CorpusCounter,
    // Uses BTreeMap so iteration and dumped output are ordered.
    transition_probabilities: BTreeMap<String, BTreeMap<String, f64>>,
    emission_probabilities: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Model {
    /// Builds a model from corpus counts.
    ///
    /// # Arguments
    ///
    /// * `counter` - Counts accumulated from a training corpus. The model
    ///   takes ownership; nothing mutates the counts afterwards.
    pub fn new(counter: CorpusCounter) -> Self {
        let mut transition_probabilities = BTreeMap::new();
        for (prev_tag, row) in counter.tag_to_tag_count() {
            let denom = counter.count_of_tag(prev_tag);
            let probs = row
                .iter()
                .map(|(tag, &n)| (tag.clone(), ratio(n, denom)))
                .collect();
            transition_probabilities.insert(prev_tag.clone(), probs);
        }
        let mut emission_probabilities = BTreeMap::new();
        for (tag, row) in counter.tag_to_word_count() {
            let denom = counter.count_of_tag(tag);
            let probs = row
                .iter()
                .map(|(word, &n)| (word.clone(), ratio(n, denom)))
                .collect();
            emission_probabilities.insert(tag.clone(), probs);
        }
        Self {
            counter,
            transition_probabilities,
            emission_probabilities,
        }
    }

    /// The probability of `tag` following `prev_tag`.
    ///
    /// # Returns
    ///
    /// `count(prev_tag → tag) / count(prev_tag)`. Zero if the transition was
    /// never observed; NaN if `prev_tag` itself was never observed.
    pub fn transition_probability(&self, prev_tag: &str, tag: &str) -> f64 {
        ratio(
            self.counter.tag_transition_count(prev_tag, tag),
            self.counter.count_of_tag(prev_tag),
        )
    }

    /// The probability of observing `word` under `tag`.
    ///
    /// # Returns
    ///
    /// `count(tag, word) / count(tag)`. Zero if the pair was never observed;
    /// NaN if `tag` itself was never observed.
    pub fn emission_probability(&self, tag: &str, word: &str) -> f64 {
        ratio(
            self.counter.word_emission_count(tag, word),
            self.counter.count_of_tag(tag),
        )
    }

    /// The full transition probability table, prev tag → tag → probability.
    pub fn transition_probabilities(&self) -> &BTreeMap<String, BTreeMap<String, f64>> {
        &self.transition_probabilities
    }

    /// The full emission probability table, tag → word → probability.
    pub fn emission_probabilities(&self) -> &BTreeMap<String, BTreeMap<String, f64>> {
        &self.emission_probabilities
    }

    /// One row of the transition table: every tag observed after
    /// `prev_tag`, in lexicographic order.
    pub fn transition_row(&self, prev_tag: &str) -> Option<&BTreeMap<String, f64>> {
        self.transition_probabilities.get(prev_tag)
    }

    /// The candidate tags observed for `word` in training.
    pub fn tags_for_word(&self, word: &str) -> Option<&BTreeMap<String, u32>> {
        self.counter.tags_for_word(word)
    }

    /// The counts this model was built from.
    pub fn counts(&self) -> &CorpusCounter {
        &self.counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "###/###\nthe/D\ndog/N\nran/V\n###/###\n";

    fn model(corpus: &str) -> Model {
        Model::new(CorpusCounter::from_reader(corpus.as_bytes()).unwrap())
    }

    #[test]
    fn test_point_queries() {
        let model = model("the/D\ndog/N\nran/V\n###/###\n");

        assert_eq!(1.0, model.transition_probability("D", "N"));
        assert_eq!(1.0, model.emission_probability("D", "the"));
    }

    #[test]
    fn test_unseen_pair_is_zero() {
        let model = model(CORPUS);

        assert_eq!(0.0, model.transition_probability("D", "V"));
        assert_eq!(0.0, model.emission_probability("D", "dog"));
    }

    #[test]
    fn test_unseen_tag_is_nan() {
        let model = model(CORPUS);

        assert!(model.transition_probability("X", "N").is_nan());
        assert!(model.emission_probability("X", "the").is_nan());
    }

    #[test]
    fn test_transition_rows_sum_to_one() {
        let corpus = "###/###\na/D\nb/N\n###/###\nc/D\nd/V\n###/###\n";
        let model = model(corpus);

        for (prev_tag, row) in model.transition_probabilities() {
            let sum: f64 = row.values().sum();
            assert!(
                (sum - 1.0).abs() < 1e-9,
                "row for {prev_tag} sums to {sum}"
            );
        }
    }

    #[test]
    fn test_emission_rows_sum_to_one() {
        let model = model(CORPUS);

        for (tag, row) in model.emission_probabilities() {
            let sum: f64 = row.values().sum();
            assert!((sum - 1.0).abs() < 1e-9, "row for {tag} sums to {sum}");
        }
    }

    #[test]
    fn test_trained_emissions_are_positive() {
        let model = model(CORPUS);

        for (tag, row) in model.counts().tag_to_word_count() {
            for word in row.keys() {
                assert!(model.emission_probability(tag, word) > 0.0);
            }
        }
    }

    #[test]
    fn test_rebuild_is_bit_identical() {
        let a = model(CORPUS);
        let b = model(CORPUS);

        for (row_a, row_b) in a
            .transition_probabilities()
            .iter()
            .zip(b.transition_probabilities())
        {
            assert_eq!(row_a.0, row_b.0);
            for ((tag_a, p_a), (tag_b, p_b)) in row_a.1.iter().zip(row_b.1) {
                assert_eq!(tag_a, tag_b);
                assert_eq!(p_a.to_bits(), p_b.to_bits());
            }
        }
        for (row_a, row_b) in a
            .emission_probabilities()
            .iter()
            .zip(b.emission_probabilities())
        {
            assert_eq!(row_a.0, row_b.0);
            for ((word_a, p_a), (word_b, p_b)) in row_a.1.iter().zip(row_b.1) {
                assert_eq!(word_a, word_b);
                assert_eq!(p_a.to_bits(), p_b.to_bits());
            }
        }
    }

    #[test]
    fn test_point_queries_match_materialized_tables() {
        let model = model(CORPUS);

        for (prev_tag, row) in model.transition_probabilities() {
            for (tag, &p) in row {
                assert_eq!(
                    p.to_bits(),
                    model.transition_probability(prev_tag, tag).to_bits()
                );
            }
        }
        for (tag, row) in model.emission_probabilities() {
            for (word, &p) in row {
                assert_eq!(
                    p.to_bits(),
                    model.emission_probability(tag, word).to_bits()
                );
            }
        }
    }
}
