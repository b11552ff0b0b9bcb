use conll_parser::{parse_records_from, reconstruct, split_sentences};
use conll_protocol::{ActorRecord, SentenceId, Token};
use conll_roles::{Actor, RoleExtractor};
use conll_tree::DependencyTree;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::report::{SentenceReport, TreeNode};

/// Runs the whole pipeline for one sentence:
/// text -> tokens -> tree -> (actors, reconstructed sentence).
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one sentence. Blank lines are ignored; every other line must be
    /// a record.
    pub fn parse(&self, text: &str) -> Result<ParsedSentence, ParseError> {
        self.parse_block(1, text)
    }

    fn parse_block(&self, first_line: usize, text: &str) -> Result<ParsedSentence, ParseError> {
        let tokens = parse_records_from(first_line, text)?;
        if let Some(limit) = self.config.max_tokens {
            if tokens.len() > limit {
                return Err(ParseError::TooManyTokens { count: tokens.len(), limit });
            }
        }

        let sentence = reconstruct(&tokens);
        let tree = DependencyTree::build(tokens)?;
        let actors = RoleExtractor::new(&tree, &self.config.rules).extract()?;

        debug!(tokens = tree.len(), actors = actors.len(), "parsed sentence");
        Ok(ParsedSentence { tree, actors, sentence })
    }

    /// Parses every blank-line separated sentence of a document. A failing
    /// sentence does not stop the others. Record errors carry line numbers
    /// within the whole document.
    pub fn parse_document(&self, text: &str) -> Vec<(SentenceId, Result<ParsedSentence, ParseError>)> {
        split_sentences(text)
            .into_iter()
            .enumerate()
            .map(|(i, (line, block))| (SentenceId(i as u32), self.parse_block(line, block)))
            .collect()
    }
}

/// The result of parsing one sentence.
#[derive(Debug, Clone)]
pub struct ParsedSentence {
    tree: DependencyTree,
    actors: Vec<Actor>,
    sentence: String,
}

impl ParsedSentence {
    /// Tokens in input order.
    pub fn entities(&self) -> &[Token] {
        self.tree.tokens()
    }

    pub fn tree(&self) -> &DependencyTree {
        &self.tree
    }

    /// Actor records, in the input order of their name anchors.
    pub fn actors(&self) -> Vec<&ActorRecord> {
        self.actors.iter().map(|a| &a.record).collect()
    }

    /// Actors with the token ids behind every field.
    pub fn claims(&self) -> &[Actor] {
        &self.actors
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn report(&self) -> SentenceReport<'_> {
        SentenceReport {
            sentence: &self.sentence,
            actors: self.actors(),
            tree: TreeNode::new(&self.tree, self.tree.root()),
        }
    }

    /// The full report as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self.report())
    }
}
