use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The model file exists but could not be decoded.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The model file does not exist.
    #[error("model not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// A tagged corpus ended in the middle of a tag/word pair.
    #[error("odd number of tokens in tagged corpus ({count}), trailing token {token:?}")]
    OddTokenCount { count: usize, token: String },

    /// The lattice ran out of candidate tags, so no path reaches the end of the sentence.
    #[error("no path: no candidate tags for {word:?} at position {position}")]
    NoPath { position: usize, word: String },

    #[error("invalid parameter {name}: {msg}")]
    InvalidParameter { name: String, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    BsonEncode(#[from] bson::ser::Error),

    #[error(transparent)]
    BsonDecode(#[from] bson::de::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn invalid_parameter<S>(name: &str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidParameter {
            name: name.to_string(),
            msg: msg.into(),
        }
    }
}
