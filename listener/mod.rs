// listener: prints the slider's UDP log stream with arrival timestamps

pub use slider_core::*;
pub use slider_transport::*;

mod config;
mod error;
mod listener;

pub use config::*;
pub use error::*;
pub use listener::*;
