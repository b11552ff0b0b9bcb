use std::collections::HashSet;

use conll_protocol::{ActorRecord, Token, TokenId};
use conll_tree::DependencyTree;
use tracing::debug;

use crate::error::ExtractError;
use crate::rules::RuleSet;
use crate::used::UsedSet;

/// An extracted actor together with the tokens each field was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub record: ActorRecord,
    pub name_ids: Vec<TokenId>,
    pub position_ids: Vec<TokenId>,
    pub action_ids: Vec<TokenId>,
}

impl Actor {
    /// Every token id this actor consumed.
    pub fn claimed(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.name_ids
            .iter()
            .chain(&self.position_ids)
            .chain(&self.action_ids)
            .copied()
    }
}

/// Result of climbing from a name towards the root.
struct Climb<'a> {
    /// Single-child ancestors passed on the way up (claimed).
    passed: Vec<TokenId>,
    /// First ancestor with several dependents, or a predicate.
    split_point: Option<&'a Token>,
}

/// Walks a dependency tree and builds one actor per proper-name anchor.
pub struct RoleExtractor<'a> {
    tree: &'a DependencyTree,
    rules: &'a RuleSet,
}

impl<'a> RoleExtractor<'a> {
    pub fn new(tree: &'a DependencyTree, rules: &'a RuleSet) -> Self {
        Self { tree, rules }
    }

    /// Runs the extraction with a fresh [`UsedSet`]. Actors come out in the
    /// input order of their anchors.
    pub fn extract(&self) -> Result<Vec<Actor>, ExtractError> {
        let mut used = UsedSet::new();
        let mut actors = Vec::new();

        for anchor in self.tree.tokens() {
            if !self.rules.is_name(anchor) || used.is_used(anchor.id) {
                continue;
            }
            actors.push(self.extract_actor(anchor, &mut used)?);
        }

        Ok(actors)
    }

    fn extract_actor(&self, anchor: &'a Token, used: &mut UsedSet) -> Result<Actor, ExtractError> {
        // 1. Name (anchor + title + further name parts)
        let (governor, name_ids) = self.merge_name(anchor, used);

        // 2. Climb to the split point
        let climb = self.climb(governor, used)?;

        // 3. Position phrase
        let mut position_ids = climb.passed;
        if let Some(split) = climb.split_point {
            self.collect_position(split, used, &mut position_ids);
        }
        position_ids.sort_unstable();

        // 4. Action, for grammatical subjects only
        let action_ids = match climb.split_point {
            Some(split) if self.rules.is_subject(governor) || self.rules.is_subject(anchor) => {
                self.extract_action(split, used)?
            }
            _ => Vec::new(),
        };

        debug!(
            anchor = %anchor.id,
            governor = %governor.id,
            split_point = ?climb.split_point.map(|t| t.id.0),
            "extracted actor"
        );

        Ok(Actor {
            record: ActorRecord {
                name: self.words(&name_ids),
                position: self.words(&position_ids),
                action: self.words(&action_ids),
            },
            name_ids,
            position_ids,
            action_ids,
        })
    }

    /// Claims the anchor and whatever completes its name. Returns the token
    /// that governs the whole name (where the climb starts) and the name ids
    /// in ascending order.
    fn merge_name(&self, anchor: &'a Token, used: &mut UsedSet) -> (&'a Token, Vec<TokenId>) {
        used.claim(anchor.id);
        let mut ids = vec![anchor.id];

        let parent = self
            .tree
            .parent(anchor.id)
            .filter(|p| !used.is_used(p.id) && self.rules.is_name_head(p));

        let governor = match parent {
            Some(parent) => {
                used.claim(parent.id);
                ids.push(parent.id);
                parent
            }
            None => {
                let title = self
                    .tree
                    .children(anchor.id)
                    .into_iter()
                    .find(|c| !used.is_used(c.id) && self.rules.is_title(c));
                if let Some(title) = title {
                    used.claim(title.id);
                    ids.push(title.id);
                }
                anchor
            }
        };

        // Remaining parts of a multi-token name ("Barack Hussein Obama")
        for owner in [governor.id, anchor.id] {
            for part in self.tree.children(owner) {
                if self.rules.is_name(part) && used.claim(part.id) {
                    ids.push(part.id);
                }
            }
        }

        ids.sort_unstable();
        (governor, ids)
    }

    /// Moves up from `from` until the root or a split point, claiming every
    /// single-child ancestor on the way.
    fn climb(&self, from: &'a Token, used: &mut UsedSet) -> Result<Climb<'a>, ExtractError> {
        let mut visited = HashSet::from([from.id]);
        let mut passed = Vec::new();
        let mut current = from;

        while let Some(parent) = self.tree.parent(current.id) {
            if !visited.insert(parent.id) {
                return Err(ExtractError::CycleDetected { id: parent.id });
            }
            if self.is_split_point(parent) {
                return Ok(Climb { passed, split_point: Some(parent) });
            }
            if used.claim(parent.id) {
                passed.push(parent.id);
            }
            current = parent;
        }

        Ok(Climb { passed, split_point: None })
    }

    fn is_split_point(&self, token: &Token) -> bool {
        self.tree.child_count(token.id) > 1 || self.rules.is_predicate(token)
    }

    /// Collects title words at and below a (non-predicate) split point.
    fn collect_position(&self, split: &Token, used: &mut UsedSet, out: &mut Vec<TokenId>) {
        if self.rules.is_predicate(split) {
            return;
        }
        if self.rules.is_position_word(split) && used.claim(split.id) {
            out.push(split.id);
        }
        self.collect_position_below(split.id, used, out);
    }

    fn collect_position_below(&self, id: TokenId, used: &mut UsedSet, out: &mut Vec<TokenId>) {
        for child in self.tree.children(id) {
            // Clauses hanging off the title belong to their own predicate
            if self.rules.is_predicate(child) {
                continue;
            }
            if !used.is_used(child.id) && self.rules.is_position_word(child) {
                used.claim(child.id);
                out.push(child.id);
            }
            self.collect_position_below(child.id, used, out);
        }
    }

    /// Finds the predicate governing `split` and gathers its phrase.
    fn extract_action(&self, split: &'a Token, used: &mut UsedSet) -> Result<Vec<TokenId>, ExtractError> {
        let Some(verb) = self.find_predicate(split)? else {
            return Ok(Vec::new());
        };
        // Shared predicate already spent on an earlier actor
        if !used.claim(verb.id) {
            return Ok(Vec::new());
        }

        let mut ids = vec![verb.id];
        self.collect_action(verb.id, used, &mut ids);
        ids.sort_unstable();
        Ok(ids)
    }

    /// First predicate on the head chain starting at `from` (inclusive).
    fn find_predicate(&self, from: &'a Token) -> Result<Option<&'a Token>, ExtractError> {
        let mut visited = HashSet::new();
        let mut current = Some(from);

        while let Some(token) = current {
            if !visited.insert(token.id) {
                return Err(ExtractError::CycleDetected { id: token.id });
            }
            if self.rules.is_predicate(token) {
                return Ok(Some(token));
            }
            current = self.tree.parent(token.id);
        }

        Ok(None)
    }

    fn collect_action(&self, id: TokenId, used: &mut UsedSet, out: &mut Vec<TokenId>) {
        for child in self.tree.children(id) {
            if used.is_used(child.id) || !self.rules.is_action_word(child) {
                continue;
            }
            used.claim(child.id);
            out.push(child.id);
            self.collect_action(child.id, used, out);
        }
    }

    fn words(&self, ids: &[TokenId]) -> String {
        ids.iter()
            .filter_map(|id| self.tree.token(*id))
            .map(|t| t.word.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
