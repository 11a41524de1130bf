//! # Traghetto
//!
//! Traghetto is a hidden-Markov-model part-of-speech tagger. It counts
//! word/tag and adjacent-tag frequencies from a labeled corpus, estimates
//! maximum-likelihood transition and emission probabilities, and decodes
//! held-out corpora word by word with a Viterbi-style forward pass.
//!
//! Corpora are line-oriented: one `word/tag` entry per line, with the
//! literal line `###/###` marking sentence boundaries.
//!
//! ## Examples
//!
//! ```
//! use traghetto::{CorpusCounter, Model, Predictor};
//!
//! let training = "the/D\ndog/N\nran/V\n###/###\n";
//! let counter = CorpusCounter::from_reader(training.as_bytes()).unwrap();
//! let model = Model::new(counter);
//!
//! assert_eq!(1.0, model.transition_probability("D", "N"));
//!
//! let mut predictor = Predictor::new(&model);
//! let evaluation = predictor.evaluate(training.as_bytes()).unwrap();
//! assert_eq!(0.0, evaluation.error_rate());
//! ```

mod corpus;
mod counter;
mod errors;
mod model;
mod predictor;

pub use corpus::{CorpusLine, BOUNDARY};
pub use counter::CorpusCounter;
pub use errors::{Result, TraghettoError};
pub use model::Model;
pub use predictor::{Evaluation, Predictor};
