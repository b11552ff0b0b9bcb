pub mod error;
pub mod tree;

pub use error::TreeError;
pub use tree::DependencyTree;
