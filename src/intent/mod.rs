pub mod types;
pub mod classifier;

pub use types::*;
pub use classifier::{classify, Classification, Phrases};
