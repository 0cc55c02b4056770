pub mod kernel;
pub mod intent;
pub mod outputs;
pub mod perception;

// Entry points used by the binary and the integration tests
pub use kernel::reactor::Reactor;
pub use kernel::{NlgError, StageConfig};
