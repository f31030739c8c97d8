use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::corpus::TaggedPairs;
use crate::error::{Error, Result};

use super::model::{CorpusModel, CountTable};

fn bump(table: &mut CountTable, key1: &str, key2: &str) {
    *table
        .entry(key1.to_string())
        .or_default()
        .entry(key2.to_string())
        .or_insert(0) += 1;
}

/// Counts tag/word pairs into a [`CorpusModel`].
///
/// The first appended pair only sets the previous-tag context; its tag
/// and word are not counted. Every later pair is counted against the tag
/// of the pair before it.
#[derive(Debug, Default)]
pub struct Trainer {
    model: CorpusModel,
    prev: Option<String>,
    num_pairs: usize,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, tag: &str, word: &str) {
        self.num_pairs += 1;
        let Some(prev) = self.prev.replace(tag.to_string()) else {
            return;
        };
        let model = &mut self.model;

        let count = model.tag_counts.entry(tag.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        bump(&mut model.word_counts, tag, word);
        bump(&mut model.bigram_counts, &prev, tag);
        bump(&mut model.tags_for_word, word, tag);

        if count >= model.most_frequent_tag_count {
            model.most_frequent_tag_count = count;
            if model.most_frequent_tag.as_deref() != Some(tag) {
                model.most_frequent_tag = Some(tag.to_string());
            }
        }
        model.num_bigrams += 1;
    }

    /// Appends every pair, stopping at the first error.
    pub fn append_pairs<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = Result<(String, String)>>,
    {
        for pair in pairs {
            let (tag, word) = pair?;
            self.append(&tag, &word);
        }
        Ok(())
    }

    /// Number of pairs appended so far, including the context pair.
    pub fn len(&self) -> usize {
        self.num_pairs
    }

    pub fn is_empty(&self) -> bool {
        self.num_pairs == 0
    }

    pub fn train(self) -> CorpusModel {
        let model = self.model;
        if model.is_empty() {
            log::warn!(
                "training corpus produced an empty model ({} pairs)",
                self.num_pairs
            );
        } else {
            log::info!(
                "trained model (pairs: {}, tags: {}, words: {}, bigrams: {}, most frequent tag: {:?})",
                self.num_pairs,
                model.num_tags(),
                model.vocabulary_size(),
                model.num_bigrams(),
                model.most_frequent_tag()
            );
        }
        model
    }
}

impl CorpusModel {
    /// Trains a model from `(tag, word)` pairs in corpus order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<(String, String)>>,
    {
        let mut trainer = Trainer::new();
        trainer.append_pairs(pairs)?;
        Ok(trainer.train())
    }

    /// Trains a model from a whitespace-delimited `TAG WORD TAG WORD ...` stream.
    pub fn from_reader<R: BufRead>(rdr: R) -> Result<Self> {
        let begin = Instant::now();
        let model = Self::from_pairs(TaggedPairs::from_reader(rdr))?;
        log::info!("training took {:?}", begin.elapsed());
        Ok(model)
    }

    /// Loads the model at `model`, or trains one from `corpus` and saves it
    /// there when no model file exists.
    ///
    /// Without a corpus a missing model is reported as [`Error::ModelNotFound`].
    pub fn load_or_train(model: &Path, corpus: Option<&Path>) -> Result<Self> {
        match (Self::from_path(model), corpus) {
            (Err(Error::ModelNotFound(_)), Some(corpus)) => {
                log::warn!(
                    "model {} not found, training from {}",
                    model.display(),
                    corpus.display()
                );
                let trained = Self::from_reader(BufReader::new(File::open(corpus)?))?;
                trained.save(model)?;
                Ok(trained)
            }
            (ret, _) => ret,
        }
    }
}
