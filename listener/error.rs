use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListenError {
    #[error("failed to bind UDP port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },

    #[error("failed to receive datagram: {0}")]
    Receive(#[source] io::Error),

    #[error("failed to write log entry: {0}")]
    Output(#[source] io::Error),
}
