use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hmm::{Smoothing, UnknownWordRules};

pub const DEFAULT_BOUNDARY: &str = "<s>";

/// Decoding options.
///
/// Loaded from a JSON file and refined by `name=value` parameters, e.g.
/// `smoothing=good-turing`, `boundary=<S>` or `unknown.gerund_prefix=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub smoothing: Smoothing,
    /// Token that separates sentences, in tagged corpora (as `<s> <s>`) and in raw text.
    pub boundary: String,
    pub unknown: UnknownWordRules,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::default(),
            boundary: DEFAULT_BOUNDARY.to_string(),
            unknown: UnknownWordRules::default(),
        }
    }
}

impl Options {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let options = serde_json::from_slice(&fs::read(path)?)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "smoothing" => self.smoothing = value.parse()?,
            "boundary" => {
                if value.is_empty() || value.contains(char::is_whitespace) {
                    return Err(Error::invalid_parameter(
                        name,
                        "boundary must be a single non-empty token",
                    ));
                }
                self.boundary = value.to_string();
            }
            _ => match name.strip_prefix("unknown.") {
                Some(rule) => self.unknown.set(rule, value)?,
                None => return Err(Error::invalid_parameter(name, "no such parameter")),
            },
        }
        log::debug!("set {} = {:?}", name, value);
        Ok(())
    }

    /// Applies a `name=value` parameter.
    pub fn set_param(&mut self, param: &str) -> Result<()> {
        let (name, value) = param
            .split_once('=')
            .ok_or_else(|| Error::invalid_parameter(param, "expected NAME=VALUE"))?;
        self.set(name.trim(), value.trim())
    }
}
