pub mod attributes;
pub mod document;
pub mod error;
pub mod record;
pub mod sentence;

pub use attributes::parse_attributes;
pub use document::split_sentences;
pub use error::RecordError;
pub use record::{parse_record, parse_records, parse_records_from};
pub use sentence::reconstruct;
