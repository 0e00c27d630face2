// client: line sender library - pushes command files to the slider and records the replies

// Re-export framing and constants
pub use slider_core::*;

// Re-export transport abstractions
pub use slider_transport::*;

mod config;
mod error;
mod sender;
mod stamped;

pub use config::*;
pub use error::*;
pub use sender::*;
pub use stamped::*;
