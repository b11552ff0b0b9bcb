use std::fs;
use std::path::Path;

use conll_roles::RuleSet;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for a [`Parser`](crate::Parser).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Label and tag tables for the role extractor.
    pub rules: RuleSet,
    /// Reject sentences longer than this. Extraction recurses once per tree
    /// level, so untrusted input should carry a ceiling.
    pub max_tokens: Option<usize>,
}

impl ParserConfig {
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_max_tokens(mut self, limit: usize) -> Self {
        self.max_tokens = Some(limit);
        self
    }

    /// Reads a whole config (rules and limits) from a JSON file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: Self = serde_json::from_str(&read(path)?).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rules(&self.rules)?;
        if self.max_tokens == Some(0) {
            return Err(ConfigError::Invalid("max_tokens must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn validate_rules(rules: &RuleSet) -> Result<(), ConfigError> {
    if rules.name_relations.is_empty() {
        return Err(ConfigError::Invalid("name_relations must not be empty".to_string()));
    }
    if rules.predicate_pos_tags.is_empty() {
        return Err(ConfigError::Invalid("predicate_pos_tags must not be empty".to_string()));
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a rule file (JSON). Tables missing from the file keep their defaults.
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleSet, ConfigError> {
    let path = path.as_ref();
    let rules: RuleSet = serde_json::from_str(&read(path)?).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    validate_rules(&rules)?;
    Ok(rules)
}
