pub mod error;
pub mod extractor;
pub mod rules;
pub mod used;

pub use error::ExtractError;
pub use extractor::{Actor, RoleExtractor};
pub use rules::{LabelSet, RuleSet};
pub use used::UsedSet;
