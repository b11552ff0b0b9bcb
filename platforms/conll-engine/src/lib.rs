//! Dependency-parse analysis: CoNLL records in, tree, actors and sentence out.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::{load_rules, ParserConfig};
pub use error::{ConfigError, ParseError};
pub use pipeline::{ParsedSentence, Parser};
pub use report::{serialize, SentenceReport, TreeNode};

// The types callers need to inspect results
pub use conll_parser::RecordError;
pub use conll_protocol::{ActorRecord, PosTag, SentenceId, Token, TokenId};
pub use conll_roles::{Actor, ExtractError, LabelSet, RuleSet};
pub use conll_tree::{DependencyTree, TreeError};
