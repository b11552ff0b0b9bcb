use conll_protocol::{ActorRecord, Token};
use conll_tree::DependencyTree;
use serde::Serialize;

/// Nested view of the tree: `{ "entity": {...}, "child": [...] }`.
#[derive(Debug, Serialize)]
pub struct TreeNode<'a> {
    pub entity: &'a Token,
    pub child: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn new(tree: &'a DependencyTree, token: &'a Token) -> Self {
        Self {
            entity: token,
            child: tree
                .children(token.id)
                .into_iter()
                .map(|c| TreeNode::new(tree, c))
                .collect(),
        }
    }
}

/// Encodes the whole tree, starting at its root, as nested JSON objects.
pub fn serialize(tree: &DependencyTree) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(TreeNode::new(tree, tree.root()))
}

/// Everything known about one sentence, ready for JSON output.
#[derive(Debug, Serialize)]
pub struct SentenceReport<'a> {
    pub sentence: &'a str,
    pub actors: Vec<&'a ActorRecord>,
    pub tree: TreeNode<'a>,
}
