use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use bitflags::bitflags;
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Coarse word class of a token (the Universal tag set, plus the legacy `CONJ`).
///
/// Tags outside the known vocabulary are kept verbatim in `Other` so that a
/// round trip through the parser never loses information.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[archive(check_bytes)]
pub enum PosTag {
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    CoordinatingConjunction,
    /// Pre-v2 tag covering every conjunction.
    Conjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    Unknown,
    Other(String),
}

impl PosTag {
    pub fn as_str(&self) -> &str {
        match self {
            PosTag::Adjective => "ADJ",
            PosTag::Adposition => "ADP",
            PosTag::Adverb => "ADV",
            PosTag::Auxiliary => "AUX",
            PosTag::CoordinatingConjunction => "CCONJ",
            PosTag::Conjunction => "CONJ",
            PosTag::Determiner => "DET",
            PosTag::Interjection => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Numeral => "NUM",
            PosTag::Particle => "PART",
            PosTag::Pronoun => "PRON",
            PosTag::ProperNoun => "PROPN",
            PosTag::Punctuation => "PUNCT",
            PosTag::SubordinatingConjunction => "SCONJ",
            PosTag::Symbol => "SYM",
            PosTag::Verb => "VERB",
            PosTag::Unknown => "X",
            PosTag::Other(raw) => raw.as_str(),
        }
    }

    /// The single-bit set for this tag. `Other` maps to the empty set and so
    /// never matches a rule.
    pub fn flag(&self) -> PosTagSet {
        match self {
            PosTag::Adjective => PosTagSet::ADJ,
            PosTag::Adposition => PosTagSet::ADP,
            PosTag::Adverb => PosTagSet::ADV,
            PosTag::Auxiliary => PosTagSet::AUX,
            PosTag::CoordinatingConjunction => PosTagSet::CCONJ,
            PosTag::Conjunction => PosTagSet::CONJ,
            PosTag::Determiner => PosTagSet::DET,
            PosTag::Interjection => PosTagSet::INTJ,
            PosTag::Noun => PosTagSet::NOUN,
            PosTag::Numeral => PosTagSet::NUM,
            PosTag::Particle => PosTagSet::PART,
            PosTag::Pronoun => PosTagSet::PRON,
            PosTag::ProperNoun => PosTagSet::PROPN,
            PosTag::Punctuation => PosTagSet::PUNCT,
            PosTag::SubordinatingConjunction => PosTagSet::SCONJ,
            PosTag::Symbol => PosTagSet::SYM,
            PosTag::Verb => PosTagSet::VERB,
            PosTag::Unknown => PosTagSet::X,
            PosTag::Other(_) => PosTagSet::empty(),
        }
    }
}

impl From<&str> for PosTag {
    fn from(raw: &str) -> Self {
        match raw {
            "ADJ" => PosTag::Adjective,
            "ADP" => PosTag::Adposition,
            "ADV" => PosTag::Adverb,
            "AUX" => PosTag::Auxiliary,
            "CCONJ" => PosTag::CoordinatingConjunction,
            "CONJ" => PosTag::Conjunction,
            "DET" => PosTag::Determiner,
            "INTJ" => PosTag::Interjection,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Numeral,
            "PART" => PosTag::Particle,
            "PRON" => PosTag::Pronoun,
            "PROPN" => PosTag::ProperNoun,
            "PUNCT" => PosTag::Punctuation,
            "SCONJ" => PosTag::SubordinatingConjunction,
            "SYM" => PosTag::Symbol,
            "VERB" => PosTag::Verb,
            "X" => PosTag::Unknown,
            other => PosTag::Other(other.to_string()),
        }
    }
}

impl From<String> for PosTag {
    fn from(raw: String) -> Self {
        PosTag::from(raw.as_str())
    }
}

impl From<PosTag> for String {
    fn from(tag: PosTag) -> String {
        tag.as_str().to_string()
    }
}

impl FromStr for PosTag {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(PosTag::from(s))
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// A set of part-of-speech tags, used by the extraction rule tables.
    ///
    /// Flag names match the tag spelling, so a serialized set reads like
    /// `"VERB | ADJ | ADV"`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct PosTagSet: u32 {
        const ADJ = 1;
        const ADP = 1 << 1;
        const ADV = 1 << 2;
        const AUX = 1 << 3;
        const CCONJ = 1 << 4;
        const CONJ = 1 << 5;
        const DET = 1 << 6;
        const INTJ = 1 << 7;
        const NOUN = 1 << 8;
        const NUM = 1 << 9;
        const PART = 1 << 10;
        const PRON = 1 << 11;
        const PROPN = 1 << 12;
        const PUNCT = 1 << 13;
        const SCONJ = 1 << 14;
        const SYM = 1 << 15;
        const VERB = 1 << 16;
        const X = 1 << 17;
    }
}

impl PosTagSet {
    pub fn matches(&self, tag: &PosTag) -> bool {
        self.intersects(tag.flag())
    }
}
