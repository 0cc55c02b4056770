pub mod config;
pub mod error;
pub mod event;
pub mod reactor;
pub mod telemetry;

pub use config::StageConfig;
pub use error::{NlgError, Result};
pub use event::{Event, InputEvent, MessageId};
pub use reactor::Reactor;
