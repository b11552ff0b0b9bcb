use alloc::string::String;

use rkyv::{Archive, Deserialize, Serialize};

use crate::attributes::AttributeMap;
use crate::ids::TokenId;
use crate::tags::PosTag;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One record of a dependency parse. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub id: TokenId,
    pub word: String,
    pub pos_tag: PosTag,
    pub attributes: AttributeMap,
    pub head_id: TokenId,
    pub relation: String,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head_id.is_none()
    }

    /// The governor of this token, `None` for a root.
    pub fn head(&self) -> Option<TokenId> {
        if self.is_root() {
            None
        } else {
            Some(self.head_id)
        }
    }
}

/// One extracted participant: who, in what capacity, doing what.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ActorRecord {
    pub name: String,
    pub position: String,
    pub action: String,
}
