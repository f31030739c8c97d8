use std::fmt;

use serde::Serialize;

use crate::error::Result;

/// Assigns one tag to every word of a sentence.
pub trait Tagger {
    fn tag(&self, words: &[&str]) -> Result<TaggedSentence>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedToken {
    pub tag: String,
    pub word: String,
}

/// A tagged sentence together with the probability of its tag path.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaggedSentence {
    pub tokens: Vec<TaggedToken>,
    pub score: f64,
}

impl TaggedSentence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.tag.as_str()).collect()
    }

    pub fn words(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.word.as_str()).collect()
    }
}

/// `TAG WORD TAG WORD ...`
impl fmt::Display for TaggedSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", token.tag, token.word)?;
        }
        Ok(())
    }
}
