//! Whitespace tokenization and tagged-corpus readers.
//!
//! A tagged corpus is a flat stream of alternating `TAG WORD` tokens. Line
//! breaks carry no meaning; sentences are delimited by pairs whose tag is
//! the boundary marker (`<s> <s>` by convention).

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::mem;

use crate::error::{Error, Result};

/// Lazy iterator over the whitespace-delimited tokens of a reader.
pub struct Tokens<R> {
    rdr: R,
    line: String,
    buf: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            buf: VecDeque::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.buf.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            self.line.clear();
            match self.rdr.read_line(&mut self.line) {
                Ok(0) => self.done = true,
                Ok(_) => self
                    .buf
                    .extend(self.line.split_whitespace().map(str::to_string)),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// Groups a token stream into `(tag, word)` pairs.
///
/// A stream with an odd number of tokens yields [`Error::OddTokenCount`]
/// in place of the incomplete last pair.
pub struct TaggedPairs<I> {
    tokens: I,
    count: usize,
}

impl<I> TaggedPairs<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(tokens: I) -> Self {
        Self { tokens, count: 0 }
    }
}

impl<R: BufRead> TaggedPairs<Tokens<R>> {
    pub fn from_reader(rdr: R) -> Self {
        Self::new(Tokens::new(rdr))
    }
}

impl<I> Iterator for TaggedPairs<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = match self.tokens.next()? {
            Ok(tag) => tag,
            Err(e) => return Some(Err(e.into())),
        };
        self.count += 1;
        match self.tokens.next() {
            Some(Ok(word)) => {
                self.count += 1;
                Some(Ok((tag, word)))
            }
            Some(Err(e)) => Some(Err(e.into())),
            None => Some(Err(Error::OddTokenCount {
                count: self.count,
                token: tag,
            })),
        }
    }
}

/// Groups a raw token stream into sentences at `boundary` tokens.
///
/// Boundary tokens are not part of any sentence, and empty sentences are
/// skipped.
pub struct Sentences<I> {
    tokens: I,
    boundary: String,
}

impl<I> Sentences<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(tokens: I, boundary: &str) -> Self {
        Self {
            tokens,
            boundary: boundary.to_string(),
        }
    }
}

impl<I> Iterator for Sentences<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut words = Vec::new();
        for token in self.tokens.by_ref() {
            match token {
                Ok(token) if token == self.boundary => {
                    if !words.is_empty() {
                        return Some(Ok(words));
                    }
                }
                Ok(token) => words.push(token),
                Err(e) => return Some(Err(e)),
            }
        }
        if words.is_empty() {
            None
        } else {
            Some(Ok(words))
        }
    }
}

/// A gold-standard sentence: words and their reference tags.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sentence {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

impl Sentence {
    pub fn push(&mut self, word: String, tag: String) {
        self.words.push(word);
        self.tags.push(tag);
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Splits a tagged pair stream into sentences at pairs tagged `boundary`.
/// Boundary pairs themselves are dropped, as are empty sentences.
pub fn read_tagged_sentences<I>(pairs: I, boundary: &str) -> Result<Vec<Sentence>>
where
    I: IntoIterator<Item = Result<(String, String)>>,
{
    let mut sentences = Vec::new();
    let mut sentence = Sentence::default();
    for pair in pairs {
        let (tag, word) = pair?;
        if tag == boundary {
            if !sentence.is_empty() {
                sentences.push(mem::take(&mut sentence));
            }
        } else {
            sentence.push(word, tag);
        }
    }
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    Ok(sentences)
}
