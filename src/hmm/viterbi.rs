//! Viterbi decoding of a bigram HMM.
//!
//! Each sentence gets a [`Lattice`] whose first column is a start node
//! carrying the boundary tag. Every word adds a column with one node per
//! candidate tag:
//!
//! ```text
//! score(tag) = max_prev [ prev.score * P(tag | prev.tag) ] * P(word | tag)
//! ```
//!
//! Candidates and predecessors are enumerated in lexicographic tag order,
//! and an equal score found later replaces the current best.

use std::io::{BufRead, Write};

use crate::corpus::{Sentences, Tokens};
use crate::error::{Error, Result};
use crate::options::Options;
use crate::quark::{Quark, StringTable, TextVectorizer};

use super::lattice::{argmax, Lattice, Node};
use super::model::CorpusModel;
use super::smoothing::{Estimator, Smoothing};
use super::tagger::{TaggedSentence, TaggedToken, Tagger};
use super::unknown::{Candidates, UnknownWordClassifier};

#[derive(Debug)]
pub struct Viterbi<'m> {
    estimator: Estimator<'m>,
    classifier: UnknownWordClassifier,
    /// Model tags in lexicographic order first, then the boundary and classifier tags.
    tags: Quark,
    num_model_tags: usize,
    boundary: String,
    start: usize,
}

impl<'m> Viterbi<'m> {
    pub fn new(model: &'m CorpusModel, options: &Options) -> Result<Self> {
        let classifier = UnknownWordClassifier::new(options.unknown.clone())?;
        let mut tags: Quark = model.tags().collect();
        let num_model_tags = tags.len();
        let start = tags.find_or_insert(&options.boundary);
        for tag in classifier.tags() {
            tags.find_or_insert(tag);
        }
        log::debug!(
            "viterbi decoder: {} model tags, {} interned, smoothing {}",
            num_model_tags,
            tags.len(),
            options.smoothing
        );
        Ok(Self {
            estimator: Estimator::new(model, options.smoothing),
            classifier,
            tags,
            num_model_tags,
            boundary: options.boundary.clone(),
            start,
        })
    }

    pub fn model(&self) -> &'m CorpusModel {
        self.estimator.model()
    }

    pub fn smoothing(&self) -> Smoothing {
        self.estimator.smoothing()
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    fn tag_str(&self, id: usize) -> &str {
        self.tags.to_str(id).unwrap_or_default()
    }

    /// Candidate tag ids for `word`, in lexicographic order.
    fn candidates(&self, word: &str) -> Vec<usize> {
        if let Some(observed) = self.model().tags_for_word(word) {
            return observed
                .keys()
                .filter_map(|tag| self.tags.to_id(tag))
                .collect();
        }
        match self.classifier.classify(word) {
            Candidates::Only(tag) => self.tags.to_id(tag).into_iter().collect(),
            Candidates::All => (0..self.num_model_tags).collect(),
        }
    }

    fn column(&self, prev: &[Node], word: &str) -> Vec<Node> {
        let mut column = Vec::new();
        for tag in self.candidates(word) {
            let name = self.tag_str(tag);
            let best = argmax(prev.iter().map(|node| {
                node.score * self.estimator.transition(self.tag_str(node.tag), name)
            }));
            if let Some((back, score)) = best {
                column.push(Node {
                    tag,
                    score: score * self.estimator.emission(name, word),
                    back: Some(back),
                });
            }
        }
        column
    }

    /// Splits `tokens` at boundary markers and tags every non-empty sentence.
    ///
    /// A failed sentence yields its error in place; later sentences still decode.
    pub fn decode<'a, S>(
        &'a self,
        tokens: &'a [S],
    ) -> Box<dyn Iterator<Item = Result<TaggedSentence>> + 'a>
    where
        S: AsRef<str>,
    {
        let sentences = tokens
            .split(move |token| token.as_ref() == self.boundary)
            .filter(|words| !words.is_empty())
            .map(move |words| {
                let words: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
                self.tag(&words)
            });
        Box::new(sentences)
    }

    /// Tags raw text from `rdr` and writes one line per sentence to `out`.
    ///
    /// A sentence that fails to decode is logged and written as an empty
    /// line. Returns the number of sentences read.
    pub fn tag_stream<R, W>(&self, rdr: R, out: &mut W) -> Result<usize>
    where
        R: BufRead,
        W: Write,
    {
        let mut num_sentences = 0;
        for words in Sentences::new(Tokens::new(rdr), &self.boundary) {
            let words = words?;
            let words: Vec<&str> = words.iter().map(String::as_str).collect();
            match self.tag(&words) {
                Ok(sentence) => writeln!(out, "{}", sentence)?,
                Err(e) => {
                    log::error!("failed to tag sentence {}: {}", num_sentences, e);
                    writeln!(out)?;
                }
            }
            num_sentences += 1;
        }
        Ok(num_sentences)
    }
}

impl<'m> Tagger for Viterbi<'m> {
    fn tag(&self, words: &[&str]) -> Result<TaggedSentence> {
        let mut lattice = Lattice::new(self.start);
        for (position, word) in words.iter().enumerate() {
            let column = self.column(lattice.last(), word);
            if column.is_empty() {
                return Err(Error::NoPath {
                    position,
                    word: word.to_string(),
                });
            }
            lattice.push(column);
        }
        let Some((path, score)) = lattice.backtrace() else {
            return Ok(TaggedSentence::default());
        };
        log::debug!("decoded {} words, path score {:e}", words.len(), score);
        let tokens = path
            .into_iter()
            .zip(words)
            .map(|(tag, word)| TaggedToken {
                tag: self.tag_str(tag).to_string(),
                word: word.to_string(),
            })
            .collect();
        Ok(TaggedSentence { tokens, score })
    }
}
