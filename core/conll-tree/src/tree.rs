use std::collections::HashMap;

use conll_protocol::{Token, TokenId};
use petgraph::algo::toposort;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::{Directed, Direction};
use tracing::debug;

use crate::error::TreeError;

/// Read-only dependency tree over one sentence.
///
/// Tokens live in an arena (`tokens`, input order); the graph holds one node
/// per token, in the same order, with an edge from each head to each of its
/// dependents. `index_map` gives O(1) access from a token id to its node.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    tokens: Vec<Token>,
    graph: Graph<TokenId, (), Directed>,
    index_map: HashMap<TokenId, NodeIndex>,
    root: NodeIndex,
}

impl DependencyTree {
    /// Links a flat, input-ordered token list into a tree.
    ///
    /// Exactly one token must carry head id `0`, every other head id must name
    /// a token of the sentence, and following heads must never loop.
    pub fn build(tokens: Vec<Token>) -> Result<Self, TreeError> {
        let mut graph: Graph<TokenId, (), Directed> = Graph::with_capacity(tokens.len(), tokens.len());
        let mut index_map = HashMap::with_capacity(tokens.len());

        // 1. One node per token, in input order
        for token in &tokens {
            if index_map.contains_key(&token.id) {
                return Err(TreeError::DuplicateTokenId { id: token.id });
            }
            let idx = graph.add_node(token.id);
            index_map.insert(token.id, idx);
        }

        // 2. Root set
        let roots: Vec<TokenId> = tokens.iter().filter(|t| t.is_root()).map(|t| t.id).collect();
        let root = match roots.as_slice() {
            [] => return Err(TreeError::NoRootFound),
            [only] => index_map[only],
            _ => return Err(TreeError::MultipleRoots { ids: roots }),
        };

        // 3. Head -> dependent edges
        for token in &tokens {
            let Some(head) = token.head() else { continue };
            if head == token.id {
                return Err(TreeError::CycleDetected { id: token.id });
            }
            let head_idx = *index_map
                .get(&head)
                .ok_or(TreeError::DanglingHead { id: token.id, head })?;
            graph.add_edge(head_idx, index_map[&token.id], ());
        }

        // 4. With one head per token, anything not hanging off the root sits on a loop
        if let Err(cycle) = toposort(&graph, None) {
            return Err(TreeError::CycleDetected { id: graph[cycle.node_id()] });
        }

        debug!(
            tokens = tokens.len(),
            root = %graph[root],
            "built dependency tree"
        );

        Ok(Self { tokens, graph, index_map, root })
    }

    pub fn root(&self) -> &Token {
        &self.tokens[self.root.index()]
    }

    /// All tokens in input order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.index_map.get(&id).map(|idx| &self.tokens[idx.index()])
    }

    pub fn parent(&self, id: TokenId) -> Option<&Token> {
        self.token(id)?.head().and_then(|head| self.token(head))
    }

    /// Direct dependents of `id`, ordered by ascending id.
    pub fn children(&self, id: TokenId) -> Vec<&Token> {
        let Some(&idx) = self.index_map.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<&Token> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|child| &self.tokens[child.index()])
            .collect();
        children.sort_by_key(|t| t.id);
        children
    }

    pub fn child_count(&self, id: TokenId) -> usize {
        self.index_map
            .get(&id)
            .map_or(0, |&idx| self.graph.neighbors_directed(idx, Direction::Outgoing).count())
    }

    /// Every token below `id` (not `id` itself), depth-first, children in
    /// ascending id order.
    pub fn descendants(&self, id: TokenId) -> Vec<&Token> {
        let mut out = Vec::new();
        let mut stack: Vec<&Token> = self.children(id).into_iter().rev().collect();
        while let Some(token) = stack.pop() {
            out.push(token);
            stack.extend(self.children(token.id).into_iter().rev());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conll_protocol::{AttributeMap, PosTag};
    use proptest::prelude::*;

    fn t(id: u32, word: &str, head: u32, relation: &str) -> Token {
        Token {
            id: TokenId(id),
            word: word.to_string(),
            pos_tag: PosTag::Noun,
            attributes: AttributeMap::new(),
            head_id: TokenId(head),
            relation: relation.to_string(),
        }
    }

    fn ids(tokens: &[&Token]) -> Vec<u32> {
        tokens.iter().map(|t| t.id.0).collect()
    }

    #[test]
    fn test_simple_tree() {
        // "John Smith left quickly"
        let tree = DependencyTree::build(vec![
            t(1, "John", 3, "nsubj"),
            t(2, "Smith", 1, "name"),
            t(3, "left", 0, "ROOT"),
            t(4, "quickly", 3, "advmod"),
        ])
        .unwrap();

        assert_eq!(tree.root().id, TokenId(3));
        assert_eq!(ids(&tree.children(TokenId(3))), vec![1, 4]);
        assert_eq!(ids(&tree.children(TokenId(1))), vec![2]);
        assert!(tree.children(TokenId(2)).is_empty());
        assert_eq!(tree.parent(TokenId(2)).map(|t| t.id), Some(TokenId(1)));
        assert_eq!(tree.parent(TokenId(3)), None);
        assert_eq!(ids(&tree.descendants(TokenId(3))), vec![1, 2, 4]);
    }

    #[test]
    fn test_children_sorted_regardless_of_input_order() {
        let tree = DependencyTree::build(vec![
            t(4, "d", 1, "x"),
            t(1, "a", 0, "ROOT"),
            t(3, "c", 1, "x"),
            t(2, "b", 1, "x"),
        ])
        .unwrap();

        assert_eq!(ids(&tree.children(TokenId(1))), vec![2, 3, 4]);
        assert_eq!(tree.child_count(TokenId(1)), 3);
        // Arena keeps input order
        assert_eq!(tree.tokens()[0].id, TokenId(4));
    }

    #[test]
    fn test_no_root() {
        let err = DependencyTree::build(vec![t(1, "a", 2, "x"), t(2, "b", 1, "x")]).unwrap_err();
        assert_eq!(err, TreeError::NoRootFound);

        let err = DependencyTree::build(Vec::new()).unwrap_err();
        assert_eq!(err, TreeError::NoRootFound);
    }

    #[test]
    fn test_multiple_roots() {
        let err = DependencyTree::build(vec![t(1, "a", 0, "ROOT"), t(2, "b", 0, "ROOT")]).unwrap_err();
        assert_eq!(err, TreeError::MultipleRoots { ids: vec![TokenId(1), TokenId(2)] });
    }

    #[test]
    fn test_dangling_head() {
        let err = DependencyTree::build(vec![t(1, "a", 0, "ROOT"), t(2, "b", 9, "x")]).unwrap_err();
        assert_eq!(err, TreeError::DanglingHead { id: TokenId(2), head: TokenId(9) });
    }

    #[test]
    fn test_duplicate_id() {
        let err = DependencyTree::build(vec![t(1, "a", 0, "ROOT"), t(1, "b", 1, "x")]).unwrap_err();
        assert_eq!(err, TreeError::DuplicateTokenId { id: TokenId(1) });
    }

    #[test]
    fn test_cycle_detected() {
        // 2 -> 3 -> 2, detached from the root
        let err = DependencyTree::build(vec![
            t(1, "a", 0, "ROOT"),
            t(2, "b", 3, "x"),
            t(3, "c", 2, "x"),
        ])
        .unwrap_err();
        assert!(matches!(err, TreeError::CycleDetected { id } if id == TokenId(2) || id == TokenId(3)));

        let err = DependencyTree::build(vec![t(1, "a", 0, "ROOT"), t(2, "b", 2, "x")]).unwrap_err();
        assert_eq!(err, TreeError::CycleDetected { id: TokenId(2) });
    }

    /// Token `i + 2` hangs off some earlier token; token 1 is the root.
    fn arb_tokens() -> impl Strategy<Value = Vec<Token>> {
        prop::collection::vec(any::<prop::sample::Index>(), 0..24).prop_map(|heads| {
            let mut tokens = vec![t(1, "w1", 0, "ROOT")];
            for (i, head) in heads.iter().enumerate() {
                let id = i as u32 + 2;
                let head = head.index(i + 1) as u32 + 1;
                tokens.push(t(id, &format!("w{id}"), head, "dep"));
            }
            tokens.reverse();
            tokens
        })
    }

    proptest! {
        #[test]
        fn test_every_token_reachable_once(tokens in arb_tokens()) {
            let tree = DependencyTree::build(tokens.clone()).unwrap();
            let reached = tree.descendants(tree.root().id);
            prop_assert_eq!(reached.len() + 1, tokens.len());

            let mut seen: Vec<u32> = ids(&reached);
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), reached.len());
        }

        #[test]
        fn test_build_is_idempotent(tokens in arb_tokens()) {
            let first = DependencyTree::build(tokens.clone()).unwrap();
            let second = DependencyTree::build(tokens.clone()).unwrap();
            for token in &tokens {
                prop_assert_eq!(ids(&first.children(token.id)), ids(&second.children(token.id)));
                prop_assert_eq!(first.parent(token.id).map(|t| t.id), second.parent(token.id).map(|t| t.id));
            }
        }
    }
}
