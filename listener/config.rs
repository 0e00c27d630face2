// Listener configuration read from environment variables
// RECV_LOG_PORT: UDP port to listen on (default: 12345)
// RECV_LOG_BUFFER_SIZE: Largest datagram read in one go (default: 4096, at most 65535)
use slider_core::{datagram_buffer_size, LOG_PORT, MAX_DATAGRAM};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    pub port: u16,
    pub buffer_size: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            port: LOG_PORT,
            buffer_size: MAX_DATAGRAM,
        }
    }
}

impl ListenerConfig {
    pub fn from_env() -> Self {
        ListenerConfig::from_vars(
            env::var("RECV_LOG_PORT").ok(),
            env::var("RECV_LOG_BUFFER_SIZE").ok(),
        )
    }

    /// Unparsable values fall back to the defaults.
    pub fn from_vars(port: Option<String>, buffer_size: Option<String>) -> Self {
        let port = port
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(LOG_PORT);

        let buffer_size = buffer_size
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .map(datagram_buffer_size)
            .unwrap_or(MAX_DATAGRAM);

        ListenerConfig { port, buffer_size }
    }

    pub fn set_buffer_size(&mut self, size: usize) {
        self.buffer_size = datagram_buffer_size(size);
    }
}
