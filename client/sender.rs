// Line sender: one command out, one reply back, strictly in turn
use crate::config::SenderConfig;
use crate::error::SendError;
use slider_core::{clean_line, encode_command, Endpoint, Reply, ReplyDecoder, STATUS_COMMAND};
use slider_transport::{TcpTransport, Transport};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames written, the status command included
    pub commands_sent: usize,
    pub replies: usize,
    /// Replies cut short by the peer closing the connection
    pub unterminated: usize,
}

/// Input lines, split on `\n` and decoded lossily.
pub fn command_lines<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader
        .split(b'\n')
        .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
}

/// `Host: <name>`, printed once before the stamped transcript starts.
pub fn announce_host<W: Write>(endpoint: &Endpoint, mut out: W) -> io::Result<()> {
    writeln!(out, "Host: {}", endpoint.host)?;
    out.flush()
}

/// Resolve and connect to the configured slider, reporting progress on `out`.
pub fn connect_device<W: Write>(
    config: &SenderConfig,
    mut out: W,
) -> Result<LineSender<TcpTransport, W>, SendError> {
    let endpoint = &config.endpoint;

    let mut transport = TcpTransport::new(&endpoint.host, endpoint.port);
    let ip = match transport.resolve() {
        Ok(ip) => ip,
        Err(source) => {
            writeln!(out, "Hostname could not be resolved. Exiting")
                .map_err(SendError::Output)?;
            return Err(SendError::Resolve {
                host: endpoint.host.clone(),
                source,
            });
        }
    };

    transport.connect().map_err(|source| SendError::Connect {
        target: endpoint.to_string(),
        source,
    })?;
    writeln!(out, "Socket Connected to {} on ip {}", endpoint.host, ip)
        .map_err(SendError::Output)?;

    Ok(LineSender::new(transport, out))
}

pub struct LineSender<T: Transport, W: Write> {
    transport: T,
    out: W,
    summary: SessionSummary,
}

impl<T: Transport, W: Write> LineSender<T, W> {
    pub fn new(transport: T, out: W) -> Self {
        LineSender {
            transport,
            out,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    /// Send one command and print its reply. Blank commands are skipped and yield `None`.
    pub fn send_command(&mut self, command: &str) -> Result<Option<Reply>, SendError> {
        let command = match clean_line(command) {
            Some(c) => c,
            None => return Ok(None),
        };

        writeln!(self.out, "Send: {}", command).map_err(SendError::Output)?;
        self.summary.commands_sent += 1;

        let frame = encode_command(command);
        if let Err(e) = self.transport.send_all(&frame) {
            writeln!(self.out, "Send failed").map_err(SendError::Output)?;
            // The send error is the one worth reporting
            let _ = self.out.flush();
            return Err(SendError::Send(e));
        }
        debug!(bytes = frame.len(), "sent");

        let reply = self.read_reply()?;
        writeln!(self.out, "{}", reply.text).map_err(SendError::Output)?;
        self.out.flush().map_err(SendError::Output)?;

        self.summary.replies += 1;
        if !reply.terminated {
            self.summary.unterminated += 1;
            warn!("connection closed before reply terminator");
        }
        Ok(Some(reply))
    }

    /// Send every line, then the status command.
    pub fn run<I>(&mut self, lines: I) -> Result<SessionSummary, SendError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            let line = line.map_err(SendError::Input)?;
            self.send_command(&line)?;
        }
        self.send_command(STATUS_COMMAND)?;
        Ok(self.summary)
    }

    /// Close the connection and give the device a moment before the process goes away.
    pub fn finish(mut self, linger: Duration) -> Result<W, SendError> {
        self.transport.disconnect().map_err(SendError::Disconnect)?;
        if !linger.is_zero() {
            thread::sleep(linger);
        }
        Ok(self.out)
    }

    // Byte at a time, so nothing past the terminator is consumed
    fn read_reply(&mut self) -> Result<Reply, SendError> {
        let mut decoder = ReplyDecoder::new();
        let mut byte = [0u8; 1];
        loop {
            match self.transport.receive(&mut byte) {
                Ok(0) => return Ok(decoder.finish()),
                Ok(_) => {
                    if let Some(reply) = decoder.feed(byte[0]) {
                        return Ok(reply);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(SendError::Receive(e)),
            }
        }
    }
}
