use std::path::PathBuf;

use conll_parser::RecordError;
use conll_roles::ExtractError;
use conll_tree::TreeError;
use thiserror::Error;

/// Everything that can stop one sentence from being analysed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("sentence has {count} tokens, limit is {limit}")]
    TooManyTokens { count: usize, limit: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
