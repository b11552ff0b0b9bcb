#![no_std] // The protocol types carry no I/O

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod attributes;
pub mod ids;
pub mod tags;

// Re-export core types for convenience
pub use attributes::{Attribute, AttributeMap};
pub use ids::{SentenceId, TokenId};
pub use tags::{PosTag, PosTagSet};

pub mod model;
pub use model::*;
