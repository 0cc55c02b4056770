pub mod templates;
pub mod realizer;

pub use templates::{TemplateRepository, PLACEHOLDER};
pub use realizer::{determiner, generate};
