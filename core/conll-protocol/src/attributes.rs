use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Well-known feature names.
pub const CASE: &str = "Case";
pub const ANIMACY: &str = "Animacy";

/// Well-known feature values (compared case-insensitively).
pub const ANIMATE: &str = "anim";
pub const INANIMATE: &str = "inan";

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[archive(check_bytes)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Morphological features of a token (`Case=Nom|Animacy=Anim`).
///
/// Keys are unique and looked up case-sensitively. Insertion order is kept
/// only so that debugging output mirrors the input line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")
)]
#[archive(check_bytes)]
pub struct AttributeMap {
    entries: Vec<Attribute>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an earlier value for the same key.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.entries.push(Attribute { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// True when `name` is present and its value equals `expected`, ignoring
    /// ASCII case.
    pub fn value_is(&self, name: &str, expected: &str) -> bool {
        self.get(name)
            .map_or(false, |v| v.eq_ignore_ascii_case(expected))
    }

    /// Animate or inanimate: the feature that marks a noun as a possible title.
    pub fn has_animacy(&self) -> bool {
        self.value_is(ANIMACY, ANIMATE) || self.value_is(ANIMACY, INANIMATE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl From<BTreeMap<String, String>> for AttributeMap {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<AttributeMap> for BTreeMap<String, String> {
    fn from(map: AttributeMap) -> Self {
        map.entries
            .into_iter()
            .map(|a| (a.name, a.value))
            .collect()
    }
}
