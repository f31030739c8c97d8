//! A bigram hidden Markov model part-of-speech tagger.
//!
//! Train a [`CorpusModel`] from a `TAG WORD TAG WORD ...` corpus, then tag
//! raw text with the [`Viterbi`] decoder:
//!
//! ```
//! use postagger::{CorpusModel, Options, Tagger, Viterbi};
//!
//! let model = CorpusModel::from_reader("<s> <s> DT The NN dog VBD barked".as_bytes())?;
//! let viterbi = Viterbi::new(&model, &Options::default())?;
//! let sentence = viterbi.tag(&["The", "dog", "barked"])?;
//! assert_eq!(sentence.to_string(), "DT The NN dog VBD barked");
//! # Ok::<(), postagger::Error>(())
//! ```

pub mod corpus;
mod error;
mod evaluation;
pub mod hmm;
mod options;
pub mod quark;

pub use self::error::{Error, Result};
pub use self::evaluation::{Estimation, Evaluation, TagMeasure};
pub use self::hmm::{
    CorpusModel, Estimator, Format, MostFrequentTagger, Smoothing, TaggedSentence, TaggedToken,
    Tagger, Trainer, UnknownWordRules, Viterbi,
};
pub use self::options::{Options, DEFAULT_BOUNDARY};
