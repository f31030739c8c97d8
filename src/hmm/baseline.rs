use crate::error::{Error, Result};

use super::lattice::argmax;
use super::model::CorpusModel;
use super::tagger::{TaggedSentence, TaggedToken, Tagger};

/// Tags every known word with the tag it was most often seen with, and every
/// unknown word with the most frequent tag of the corpus.
///
/// The score is the product of the per-word relative frequencies of the
/// chosen tags.
#[derive(Debug)]
pub struct MostFrequentTagger<'m> {
    model: &'m CorpusModel,
    num_tokens: u64,
}

impl<'m> MostFrequentTagger<'m> {
    pub fn new(model: &'m CorpusModel) -> Self {
        let num_tokens = model.tags().map(|tag| model.tag_count(tag)).sum();
        Self { model, num_tokens }
    }

    fn choose(&self, word: &str) -> Option<(&'m str, f64)> {
        let model = self.model;
        match model.tags_for_word(word) {
            Some(observed) => {
                let total: u64 = observed.values().sum();
                let (i, count) = argmax(observed.values().map(|&c| c as f64))?;
                let tag = observed.keys().nth(i)?;
                Some((tag.as_str(), count / total as f64))
            }
            None => {
                let tag = model.most_frequent_tag()?;
                let prior = model.most_frequent_tag_count() as f64 / self.num_tokens as f64;
                Some((tag, prior))
            }
        }
    }
}

impl<'m> Tagger for MostFrequentTagger<'m> {
    fn tag(&self, words: &[&str]) -> Result<TaggedSentence> {
        let mut sentence = TaggedSentence {
            tokens: Vec::with_capacity(words.len()),
            score: 1.0,
        };
        for (position, &word) in words.iter().enumerate() {
            let (tag, p) = self.choose(word).ok_or_else(|| Error::NoPath {
                position,
                word: word.to_string(),
            })?;
            sentence.tokens.push(TaggedToken {
                tag: tag.to_string(),
                word: word.to_string(),
            });
            sentence.score *= p;
        }
        Ok(sentence)
    }
}
