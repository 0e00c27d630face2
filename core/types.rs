// Constants and small value types shared by the sender and the listener
use std::fmt;
use std::time::Duration;

/// Hostname the slider announces itself under.
pub const DEFAULT_HOST: &str = "slider.local";

/// Address used when talking to a device simulator on this machine.
pub const LOCAL_HOST: &str = "127.0.0.1";

/// TCP port of the slider command interface.
pub const DEVICE_PORT: u16 = 2500;

/// UDP port the slider broadcasts its log lines to.
pub const LOG_PORT: u16 = 12345;

/// Largest datagram the listener reads in one go.
pub const MAX_DATAGRAM: usize = 4096;

/// No UDP datagram is larger than this, so no receive buffer needs to be either.
pub const MAX_UDP_PAYLOAD: usize = 65_535;

/// Receive buffer size kept between one byte and the largest possible datagram.
pub fn datagram_buffer_size(requested: usize) -> usize {
    requested.clamp(1, MAX_UDP_PAYLOAD)
}

/// Pause after closing the command connection.
pub const DEFAULT_LINGER: Duration = Duration::from_secs(1);

// Target of the command connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: &str, port: u16) -> Self {
        Endpoint {
            host: host.to_string(),
            port,
        }
    }

    pub fn device() -> Self {
        Endpoint::new(DEFAULT_HOST, DEVICE_PORT)
    }

    pub fn local() -> Self {
        Endpoint::new(LOCAL_HOST, DEVICE_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

// One reply line read back from the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// false when the peer closed the stream before the terminator arrived
    pub terminated: bool,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}
