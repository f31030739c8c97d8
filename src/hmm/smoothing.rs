//! Emission and transition probability estimates.
//!
//! | mode        | P(word \| tag)                   | P(next \| prev)                                    |
//! |-------------|----------------------------------|----------------------------------------------------|
//! | raw         | c(tag,word) / c(tag)             | c(prev,next) / c(prev)                             |
//! | add-one     | (c(tag,word)+1) / (c(tag)+V)     | (c(prev,next)+1) / (c(prev)+T)                     |
//! | good-turing | same as add-one                  | c*(prev,next) / sum c*(prev,.), or N(1) / #bigrams |
//!
//! `V` is the vocabulary size, `T` the number of tags, and
//! `c*(c) = (c+1) N(c+1) / N(c)` with `N(c)` the number of distinct tag
//! bigrams seen exactly `c` times. Any zero denominator yields 0.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::model::CorpusModel;

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Smoothing {
    /// Maximum likelihood, no smoothing.
    Raw,
    /// Laplace discounting.
    #[default]
    AddOne,
    /// Good-Turing discounting of tag transitions.
    GoodTuring,
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Smoothing::Raw => "raw",
            Smoothing::AddOne => "add-one",
            Smoothing::GoodTuring => "good-turing",
        })
    }
}

impl FromStr for Smoothing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" => Ok(Smoothing::Raw),
            "add-one" | "laplace" => Ok(Smoothing::AddOne),
            "good-turing" => Ok(Smoothing::GoodTuring),
            _ => Err(Error::invalid_parameter(
                "smoothing",
                format!("{s:?} is not one of raw, add-one, good-turing"),
            )),
        }
    }
}

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Good-Turing re-estimated transition counts, derived from the tag bigram table.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GoodTuring {
    /// count -> number of distinct bigrams with that count
    count_frequency: BTreeMap<u64, u64>,
    /// prev -> next -> adjusted count
    bigram_counts: BTreeMap<String, BTreeMap<String, f64>>,
    /// prev -> sum of adjusted counts
    unigram_totals: BTreeMap<String, f64>,
}

impl GoodTuring {
    pub fn from_model(model: &CorpusModel) -> Self {
        let mut count_frequency = BTreeMap::new();
        for (_, _, count) in model.bigrams() {
            *count_frequency.entry(count).or_insert(0u64) += 1;
        }
        let n = |c: u64| count_frequency.get(&c).copied().unwrap_or(0) as f64;

        let mut bigram_counts = BTreeMap::new();
        let mut unigram_totals = BTreeMap::new();
        for (prev, nexts) in &model.bigram_counts {
            let mut total = 0.0;
            let row: BTreeMap<String, f64> = nexts
                .iter()
                .map(|(next, &c)| {
                    let adjusted = ratio((c as f64 + 1.0) * n(c + 1), n(c));
                    total += adjusted;
                    (next.clone(), adjusted)
                })
                .collect();
            bigram_counts.insert(prev.clone(), row);
            unigram_totals.insert(prev.clone(), total);
        }

        Self {
            count_frequency,
            bigram_counts,
            unigram_totals,
        }
    }

    /// Number of distinct tag bigrams observed exactly `count` times.
    pub fn count_frequency(&self, count: u64) -> u64 {
        self.count_frequency.get(&count).copied().unwrap_or(0)
    }

    pub fn bigram_count(&self, prev: &str, next: &str) -> f64 {
        self.bigram_counts
            .get(prev)
            .and_then(|m| m.get(next))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn unigram_total(&self, prev: &str) -> f64 {
        self.unigram_totals.get(prev).copied().unwrap_or(0.0)
    }
}

/// Probability estimates over a [`CorpusModel`] under one [`Smoothing`] mode.
///
/// Good-Turing tables are built on the first Good-Turing transition query
/// and shared by every later query, including queries from other threads.
#[derive(Debug)]
pub struct Estimator<'m> {
    model: &'m CorpusModel,
    smoothing: Smoothing,
    good_turing: OnceCell<GoodTuring>,
}

impl<'m> Estimator<'m> {
    pub fn new(model: &'m CorpusModel, smoothing: Smoothing) -> Self {
        Self {
            model,
            smoothing,
            good_turing: OnceCell::new(),
        }
    }

    pub fn model(&self) -> &'m CorpusModel {
        self.model
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn good_turing(&self) -> &GoodTuring {
        self.good_turing.get_or_init(|| {
            let tables = GoodTuring::from_model(self.model);
            log::debug!(
                "good-turing tables built ({} count classes, N(1) = {})",
                tables.count_frequency.len(),
                tables.count_frequency(1)
            );
            tables
        })
    }

    /// P(word | tag)
    pub fn emission(&self, tag: &str, word: &str) -> f64 {
        let count = self.model.word_count(tag, word) as f64;
        let tag_count = self.model.tag_count(tag) as f64;
        match self.smoothing {
            Smoothing::Raw => ratio(count, tag_count),
            Smoothing::AddOne | Smoothing::GoodTuring => {
                let vocab_size = self.model.vocabulary_size() as f64;
                ratio(count + 1.0, tag_count + vocab_size)
            }
        }
    }

    /// P(next | prev)
    pub fn transition(&self, prev: &str, next: &str) -> f64 {
        match self.smoothing {
            Smoothing::Raw => ratio(
                self.model.bigram_count(prev, next) as f64,
                self.model.tag_count(prev) as f64,
            ),
            Smoothing::AddOne => ratio(
                self.model.bigram_count(prev, next) as f64 + 1.0,
                (self.model.tag_count(prev) + self.model.num_tags() as u64) as f64,
            ),
            Smoothing::GoodTuring => {
                let tables = self.good_turing();
                let count = tables.bigram_count(prev, next);
                if count > 0.0 {
                    ratio(count, tables.unigram_total(prev))
                } else {
                    ratio(
                        tables.count_frequency(1) as f64,
                        self.model.num_bigrams() as f64,
                    )
                }
            }
        }
    }
}
