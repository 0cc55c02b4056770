pub mod types;
pub mod comparator;
pub mod aggregate;

pub use types::*;
pub use comparator::matches;
pub use aggregate::{aggregate, Counted};
