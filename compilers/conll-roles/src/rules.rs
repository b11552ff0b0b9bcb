use conll_protocol::attributes::CASE;
use conll_protocol::{PosTagSet, Token};
use serde::{Deserialize, Serialize};

/// Relation that marks a proper-name token: every such token anchors an actor.
pub const NAME_RELATIONS: &[&str] = &["name"];

/// Relations of a token that supplies the title merged into an actor's name.
pub const TITLE_RELATIONS: &[&str] = &["appos", "nmod"];

/// Relations collected below a split point into the position phrase.
pub const POSITION_RELATIONS: &[&str] = &["dobj", "obj", "amod", "case", "nmod"];

/// Relations collected below the predicate into the action phrase.
pub const ACTION_RELATIONS: &[&str] = &["dobj", "obj", "case", "conj"];

/// Relations under which an animate/inanimate common noun joins the action.
pub const ACTION_NOUN_RELATIONS: &[&str] = &["nmod"];

/// Tags of a name's parent that make it part of the displayed name.
pub const NAME_HEAD_POS_TAGS: PosTagSet = PosTagSet::NOUN.union(PosTagSet::PROPN);

/// Tags that mark a predicate (the token an action is built around).
pub const PREDICATE_POS_TAGS: PosTagSet = PosTagSet::VERB;

/// Common-noun tags that count as titles when they carry `Animacy`.
pub const COMMON_NOUN_POS_TAGS: PosTagSet = PosTagSet::NOUN;

/// Tags collected below the predicate into the action phrase.
pub const ACTION_POS_TAGS: PosTagSet = PosTagSet::VERB
    .union(PosTagSet::ADJ)
    .union(PosTagSet::ADV)
    .union(PosTagSet::DET)
    .union(PosTagSet::CONJ)
    .union(PosTagSet::CCONJ)
    .union(PosTagSet::PART)
    .union(PosTagSet::ADP);

/// `Case` value that marks a grammatical subject.
pub const SUBJECT_CASE: &str = "Nom";

/// A set of dependency relation labels. Matching is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&[&str]> for LabelSet {
    fn from(labels: &[&str]) -> Self {
        Self::new(labels.iter().copied())
    }
}

/// Label and tag tables driving the role extractor.
///
/// Every field defaults to the constant of the same name, so a rule file only
/// needs to list the tables it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub name_relations: LabelSet,
    pub title_relations: LabelSet,
    pub position_relations: LabelSet,
    pub action_relations: LabelSet,
    pub action_noun_relations: LabelSet,
    pub name_head_pos_tags: PosTagSet,
    pub predicate_pos_tags: PosTagSet,
    pub common_noun_pos_tags: PosTagSet,
    pub action_pos_tags: PosTagSet,
    pub subject_case: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            name_relations: NAME_RELATIONS.into(),
            title_relations: TITLE_RELATIONS.into(),
            position_relations: POSITION_RELATIONS.into(),
            action_relations: ACTION_RELATIONS.into(),
            action_noun_relations: ACTION_NOUN_RELATIONS.into(),
            name_head_pos_tags: NAME_HEAD_POS_TAGS,
            predicate_pos_tags: PREDICATE_POS_TAGS,
            common_noun_pos_tags: COMMON_NOUN_POS_TAGS,
            action_pos_tags: ACTION_POS_TAGS,
            subject_case: SUBJECT_CASE.to_string(),
        }
    }
}

impl RuleSet {
    pub fn is_name(&self, token: &Token) -> bool {
        self.name_relations.contains(&token.relation)
    }

    /// The token directly linked to a name that supplies its title.
    pub fn is_title(&self, token: &Token) -> bool {
        self.title_relations.contains(&token.relation)
    }

    pub fn is_name_head(&self, token: &Token) -> bool {
        self.is_title(token) || self.name_head_pos_tags.matches(&token.pos_tag)
    }

    pub fn is_predicate(&self, token: &Token) -> bool {
        self.predicate_pos_tags.matches(&token.pos_tag)
    }

    fn is_titled_noun(&self, token: &Token) -> bool {
        self.common_noun_pos_tags.matches(&token.pos_tag) && token.attributes.has_animacy()
    }

    pub fn is_position_word(&self, token: &Token) -> bool {
        self.position_relations.contains(&token.relation) || self.is_titled_noun(token)
    }

    pub fn is_action_word(&self, token: &Token) -> bool {
        self.action_pos_tags.matches(&token.pos_tag)
            || self.action_relations.contains(&token.relation)
            || (self.is_titled_noun(token) && self.action_noun_relations.contains(&token.relation))
    }

    pub fn is_subject(&self, token: &Token) -> bool {
        token.attributes.value_is(CASE, &self.subject_case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let rules = RuleSet::default();
        assert!(rules.name_relations.contains("name"));
        assert!(rules.title_relations.contains("appos"));
        assert!(rules.title_relations.contains("nmod"));
        assert!(!rules.title_relations.contains("nsubj"));
        assert_eq!(rules.action_pos_tags, ACTION_POS_TAGS);
        assert!(rules.action_pos_tags.contains(PosTagSet::ADP));
        assert!(!rules.action_pos_tags.contains(PosTagSet::NOUN));
    }

    #[test]
    fn test_partial_rule_file() {
        let json = r#"{
            "name_relations": ["name", "flat:name"],
            "action_pos_tags": "VERB | AUX | ADV"
        }"#;
        let rules: RuleSet = serde_json::from_str(json).unwrap();

        assert!(rules.name_relations.contains("flat:name"));
        assert!(rules.action_pos_tags.contains(PosTagSet::AUX));
        assert!(!rules.action_pos_tags.contains(PosTagSet::DET));
        // Untouched tables keep their defaults
        assert_eq!(rules.position_relations, LabelSet::from(POSITION_RELATIONS));
        assert_eq!(rules.subject_case, SUBJECT_CASE);
    }

    #[test]
    fn test_rules_round_trip_through_json() {
        let rules = RuleSet::default();
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
