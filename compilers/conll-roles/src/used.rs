use std::collections::HashSet;

use conll_protocol::TokenId;

/// Token ids already claimed by an extracted actor during one run.
///
/// Ids are only ever added. Every collection step checks the set before
/// taking a token, so no word ends up in two actors (or two fields of one).
#[derive(Debug, Default, Clone)]
pub struct UsedSet {
    ids: HashSet<TokenId>,
}

impl UsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, id: TokenId) -> bool {
        self.ids.contains(&id)
    }

    /// Marks `id` as used. Returns `false` if it was already claimed.
    pub fn claim(&mut self, id: TokenId) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
