use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

pub(crate) type CountTable = BTreeMap<String, BTreeMap<String, u64>>;

/// On-disk encoding of a [`CorpusModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bson,
    Json,
}

impl Format {
    /// `.json` files are JSON, everything else is BSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Bson,
        }
    }

    /// A BSON document starts with its own little-endian length and ends with NUL.
    fn detect(buffer: &[u8]) -> Self {
        if buffer.len() >= 5 && buffer[buffer.len() - 1] == 0 {
            let mut len = [0; 4];
            len.copy_from_slice(&buffer[..4]);
            if i32::from_le_bytes(len) as usize == buffer.len() {
                return Format::Bson;
            }
        }
        Format::Json
    }
}

/// Frequency tables of a bigram HMM estimated from a tagged corpus.
///
/// All tables are ordered maps, so every enumeration over tags or words is
/// in lexicographic order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusModel {
    /// tag -> count
    pub(crate) tag_counts: BTreeMap<String, u64>,
    /// tag -> word -> count
    pub(crate) word_counts: CountTable,
    /// previous tag -> next tag -> count
    pub(crate) bigram_counts: CountTable,
    /// word -> tag -> count
    pub(crate) tags_for_word: CountTable,
    pub(crate) most_frequent_tag: Option<String>,
    pub(crate) most_frequent_tag_count: u64,
    pub(crate) num_bigrams: u64,
}

fn lookup(table: &CountTable, key1: &str, key2: &str) -> u64 {
    table
        .get(key1)
        .and_then(|m| m.get(key2))
        .copied()
        .unwrap_or(0)
}

impl CorpusModel {
    pub fn is_empty(&self) -> bool {
        self.tag_counts.is_empty()
    }

    pub fn tag_count(&self, tag: &str) -> u64 {
        self.tag_counts.get(tag).copied().unwrap_or(0)
    }

    /// Number of times `word` was observed with `tag`.
    pub fn word_count(&self, tag: &str, word: &str) -> u64 {
        lookup(&self.word_counts, tag, word)
    }

    /// Number of times `next` followed `prev`.
    pub fn bigram_count(&self, prev: &str, next: &str) -> u64 {
        lookup(&self.bigram_counts, prev, next)
    }

    /// Every tag observed in training, in lexicographic order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag_counts.keys().map(String::as_str)
    }

    pub fn num_tags(&self) -> usize {
        self.tag_counts.len()
    }

    /// Number of distinct words observed in training.
    pub fn vocabulary_size(&self) -> usize {
        self.tags_for_word.len()
    }

    pub fn knows(&self, word: &str) -> bool {
        self.tags_for_word.contains_key(word)
    }

    /// Tags observed for `word` with their counts, `None` for unknown words.
    pub fn tags_for_word(&self, word: &str) -> Option<&BTreeMap<String, u64>> {
        self.tags_for_word.get(word)
    }

    /// Words observed with `tag` with their counts.
    pub fn words_for_tag(&self, tag: &str) -> Option<&BTreeMap<String, u64>> {
        self.word_counts.get(tag)
    }

    /// Iterates over `(prev, next, count)` for every observed tag bigram.
    pub fn bigrams(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.bigram_counts.iter().flat_map(|(prev, nexts)| {
            nexts
                .iter()
                .map(move |(next, &count)| (prev.as_str(), next.as_str(), count))
        })
    }

    pub fn most_frequent_tag(&self) -> Option<&str> {
        self.most_frequent_tag.as_deref()
    }

    pub fn most_frequent_tag_count(&self) -> u64 {
        self.most_frequent_tag_count
    }

    /// Number of tag bigrams counted during training.
    pub fn num_bigrams(&self) -> u64 {
        self.num_bigrams
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buffer = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::ModelNotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let model = Self::from_memory(&buffer)?;
        log::info!(
            "loaded model from {} ({} tags, {} words, {} bigrams)",
            path.display(),
            model.num_tags(),
            model.vocabulary_size(),
            model.num_bigrams()
        );
        Ok(model)
    }

    /// Decodes a model from either of the [`Format`]s.
    pub fn from_memory(buffer: &[u8]) -> Result<Self> {
        if buffer.is_empty() {
            return Err(Error::InvalidModel("empty buffer".into()));
        }
        match Format::detect(buffer) {
            Format::Bson => {
                bson::from_slice(buffer).map_err(|e| Error::InvalidModel(format!("bson: {e}")))
            }
            Format::Json => serde_json::from_slice(buffer)
                .map_err(|e| Error::InvalidModel(format!("json: {e}"))),
        }
    }

    pub fn to_vec(&self, format: Format) -> Result<Vec<u8>> {
        Ok(match format {
            Format::Bson => bson::to_vec(self)?,
            Format::Json => serde_json::to_vec(self)?,
        })
    }

    /// Writes the model to `path`, replacing any existing file atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = Format::from_path(path);
        let buffer = self.to_vec(format)?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&buffer)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        log::info!(
            "write model to {} ({:?}, {} bytes)",
            path.display(),
            format,
            buffer.len()
        );
        Ok(())
    }

    /// Writes every table in a plain-text format.
    pub fn dump<W: Write>(&self, mut wtr: W) -> Result<()> {
        writeln!(wtr, "MOST_FREQUENT_TAG = {{")?;
        if let Some(tag) = self.most_frequent_tag() {
            writeln!(wtr, "  {}: {}", tag, self.most_frequent_tag_count)?;
        }
        writeln!(wtr, "}}")?;
        writeln!(wtr, "NUM_BIGRAMS = {}", self.num_bigrams)?;
        writeln!(wtr)?;

        writeln!(wtr, "TAGS = {{")?;
        for (tag, count) in &self.tag_counts {
            writeln!(wtr, "  {}: {}", tag, count)?;
        }
        writeln!(wtr, "}}")?;
        writeln!(wtr)?;

        for (name, table) in [
            ("TRANSITIONS", &self.bigram_counts),
            ("EMISSIONS", &self.word_counts),
            ("WORD_TAGS", &self.tags_for_word),
        ] {
            writeln!(wtr, "{} = {{", name)?;
            for (key1, inner) in table {
                for (key2, count) in inner {
                    writeln!(wtr, "  ({}) {} --> {}: {}", name, key1, key2, count)?;
                }
            }
            writeln!(wtr, "}}")?;
            writeln!(wtr)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::Trainer;

    fn model() -> CorpusModel {
        let mut trainer = Trainer::new();
        for (tag, word) in [("<s>", "<s>"), ("DT", "The"), ("NN", "dog"), ("VBD", "barked")] {
            trainer.append(tag, word);
        }
        trainer.train()
    }

    #[test]
    fn lookups_default_to_zero() {
        let model = model();
        assert_eq!(model.tag_count("DT"), 1);
        assert_eq!(model.tag_count("JJ"), 0);
        assert_eq!(model.word_count("NN", "dog"), 1);
        assert_eq!(model.word_count("NN", "cat"), 0);
        assert_eq!(model.word_count("JJ", "dog"), 0);
        assert_eq!(model.bigram_count("DT", "NN"), 1);
        assert_eq!(model.bigram_count("NN", "DT"), 0);
        assert_eq!(model.bigram_count("XX", "DT"), 0);
    }

    #[test]
    fn bigram_iteration_is_ordered() {
        let model = model();
        let bigrams: Vec<_> = model.bigrams().collect();
        assert_eq!(
            bigrams,
            vec![("<s>", "DT", 1), ("DT", "NN", 1), ("NN", "VBD", 1)]
        );
    }

    #[test]
    fn format_detection() {
        let model = model();
        let bson = model.to_vec(Format::Bson).unwrap();
        let json = model.to_vec(Format::Json).unwrap();
        assert_eq!(Format::detect(&bson), Format::Bson);
        assert_eq!(Format::detect(&json), Format::Json);
        assert_eq!(Format::from_path(Path::new("m.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("m.bin")), Format::Bson);
        assert_eq!(Format::from_path(Path::new("model")), Format::Bson);
    }

    #[test]
    fn dump_lists_tables() {
        let mut out = Vec::new();
        model().dump(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  DT: 1"));
        assert!(out.contains("(TRANSITIONS) DT --> NN: 1"));
        assert!(out.contains("(EMISSIONS) VBD --> barked: 1"));
        assert!(out.contains("(WORD_TAGS) dog --> NN: 1"));
        assert!(out.contains("NUM_BIGRAMS = 3"));
    }
}
