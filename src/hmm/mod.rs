mod baseline;
mod lattice;
mod model;
mod smoothing;
mod tagger;
mod trainer;
mod unknown;
mod viterbi;

pub use baseline::MostFrequentTagger;
pub use model::{CorpusModel, Format};
pub use smoothing::{Estimator, GoodTuring, Smoothing};
pub use tagger::{TaggedSentence, TaggedToken, Tagger};
pub use trainer::Trainer;
pub use unknown::{Candidates, UnknownWordClassifier, UnknownWordRules};
pub use viterbi::Viterbi;
