// Core module: framing, constants and timing (NO I/O dependencies)
pub mod types;
pub mod protocol;
pub mod timing;

pub use types::*;
pub use protocol::*;
pub use timing::*;
