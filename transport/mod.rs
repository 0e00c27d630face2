// Transport module: socket plumbing for the command link and the log socket
pub mod traits;
pub mod tcp;
pub mod udp;

pub use traits::*;
pub use tcp::*;
pub use udp::*;
