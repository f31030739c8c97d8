use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Surface heuristics applied to words never seen in training.
///
/// Rules are tried in field order. An empty affix disables its rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnknownWordRules {
    /// Tag for words starting with an uppercase letter.
    pub proper_noun: String,
    /// Tag for words matching `cardinal_pattern`.
    pub cardinal: String,
    pub cardinal_pattern: String,
    /// Tag for hyphenated words and words ending in `adjective_suffix`.
    pub adjective: String,
    pub adjective_suffix: String,
    pub gerund: String,
    pub gerund_prefix: String,
    pub adverb: String,
    pub adverb_prefix: String,
    pub past_participle: String,
    pub past_participle_prefix: String,
    pub plural: String,
    pub plural_prefix: String,
}

impl Default for UnknownWordRules {
    fn default() -> Self {
        Self {
            proper_noun: "NNP".into(),
            cardinal: "CD".into(),
            cardinal_pattern: r"^[[:punct:][:digit:]]*[[:digit:]][[:punct:][:digit:]]*$".into(),
            adjective: "JJ".into(),
            adjective_suffix: "able".into(),
            gerund: "VBG".into(),
            gerund_prefix: "ing".into(),
            adverb: "RB".into(),
            adverb_prefix: "ly".into(),
            past_participle: "VBN".into(),
            past_participle_prefix: "ed".into(),
            plural: "NNS".into(),
            plural_prefix: "s".into(),
        }
    }
}

impl UnknownWordRules {
    /// Sets a rule field by name.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let field = match name {
            "proper_noun" => &mut self.proper_noun,
            "cardinal" => &mut self.cardinal,
            "cardinal_pattern" => {
                Regex::new(value)?;
                &mut self.cardinal_pattern
            }
            "adjective" => &mut self.adjective,
            "adjective_suffix" => &mut self.adjective_suffix,
            "gerund" => &mut self.gerund,
            "gerund_prefix" => &mut self.gerund_prefix,
            "adverb" => &mut self.adverb,
            "adverb_prefix" => &mut self.adverb_prefix,
            "past_participle" => &mut self.past_participle,
            "past_participle_prefix" => &mut self.past_participle_prefix,
            "plural" => &mut self.plural,
            "plural_prefix" => &mut self.plural_prefix,
            _ => {
                return Err(Error::invalid_parameter(
                    &format!("unknown.{name}"),
                    "no such rule",
                ))
            }
        };
        *field = value.to_string();
        Ok(())
    }
}

/// Candidate tags proposed for an unknown word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidates<'a> {
    /// A single heuristic matched.
    Only(&'a str),
    /// Nothing matched; every model tag is a candidate.
    All,
}

#[derive(Debug, Clone)]
pub struct UnknownWordClassifier {
    rules: UnknownWordRules,
    cardinal: Regex,
}

impl UnknownWordClassifier {
    pub fn new(rules: UnknownWordRules) -> Result<Self> {
        let cardinal = Regex::new(&rules.cardinal_pattern)?;
        Ok(Self { rules, cardinal })
    }

    /// Every tag a rule can produce, in rule order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        let r = &self.rules;
        [
            &r.proper_noun,
            &r.cardinal,
            &r.adjective,
            &r.gerund,
            &r.adverb,
            &r.past_participle,
            &r.plural,
        ]
        .into_iter()
        .map(String::as_str)
    }

    pub fn classify(&self, word: &str) -> Candidates<'_> {
        let r = &self.rules;
        let starts = |prefix: &str| !prefix.is_empty() && word.starts_with(prefix);

        if word.chars().next().map_or(false, char::is_uppercase) {
            Candidates::Only(&r.proper_noun)
        } else if self.cardinal.is_match(word) {
            Candidates::Only(&r.cardinal)
        } else if word.contains('-')
            || (!r.adjective_suffix.is_empty() && word.ends_with(&r.adjective_suffix))
        {
            Candidates::Only(&r.adjective)
        } else if starts(&r.gerund_prefix) {
            Candidates::Only(&r.gerund)
        } else if starts(&r.adverb_prefix) {
            Candidates::Only(&r.adverb)
        } else if starts(&r.past_participle_prefix) {
            Candidates::Only(&r.past_participle)
        } else if starts(&r.plural_prefix) {
            Candidates::Only(&r.plural)
        } else {
            Candidates::All
        }
    }
}
