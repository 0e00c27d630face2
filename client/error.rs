use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),

    #[error("failed to write transcript: {0}")]
    Output(#[source] io::Error),

    #[error("hostname {host} could not be resolved: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("send failed: {0}")]
    Send(#[source] io::Error),

    #[error("failed to read reply: {0}")]
    Receive(#[source] io::Error),

    #[error("failed to close connection: {0}")]
    Disconnect(#[source] io::Error),
}
