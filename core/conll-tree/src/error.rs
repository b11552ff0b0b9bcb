use conll_protocol::TokenId;
use thiserror::Error;

/// Structural problems that make a token list unusable as a dependency tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("no root token (head id 0) in sentence")]
    NoRootFound,

    #[error("sentence has {} root tokens: {}", .ids.len(), join_ids(.ids))]
    MultipleRoots { ids: Vec<TokenId> },

    #[error("token id {id} appears more than once")]
    DuplicateTokenId { id: TokenId },

    #[error("token {id} points at head {head}, which is not in the sentence")]
    DanglingHead { id: TokenId, head: TokenId },

    #[error("head chain through token {id} forms a cycle")]
    CycleDetected { id: TokenId },
}

fn join_ids(ids: &[TokenId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
