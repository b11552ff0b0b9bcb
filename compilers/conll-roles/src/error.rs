use conll_protocol::TokenId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// A head chain walked during extraction came back to a token it had
    /// already visited.
    #[error("head chain through token {id} forms a cycle")]
    CycleDetected { id: TokenId },
}
