// TCP transport for the slider command port
use crate::traits::{not_connected, Transport};
use nix::sys::socket::{setsockopt, sockopt};
use std::io::{Error, ErrorKind, Read, Result, Write};
use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use tracing::debug;

pub struct TcpTransport {
    host: String,
    port: u16,
    resolved: Option<IpAddr>,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    pub fn new(host: &str, port: u16) -> Self {
        TcpTransport {
            host: host.to_string(),
            port,
            resolved: None,
            stream: None,
        }
    }

    /// Look up the host, IPv4 first. Cached after the first success.
    pub fn resolve(&mut self) -> Result<IpAddr> {
        if let Some(ip) = self.resolved {
            return Ok(ip);
        }

        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port).to_socket_addrs()?.collect();
        let ip = addrs
            .iter()
            .find(|a| a.is_ipv4())
            .or_else(|| addrs.first())
            .map(|a| a.ip())
            .ok_or_else(|| {
                Error::new(ErrorKind::NotFound, format!("no address for {}", self.host))
            })?;

        debug!(host = %self.host, %ip, "resolved");
        self.resolved = Some(ip);
        Ok(ip)
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Commands are tiny and each one waits for a reply, so Nagle only adds latency.
    fn set_nodelay(stream: &TcpStream) -> Result<()> {
        setsockopt(stream, sockopt::TcpNoDelay, &true).map_err(Error::from)
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        match self.stream {
            Some(ref mut stream) => stream.write(data),
            None => Err(not_connected()),
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.stream {
            Some(ref mut stream) => stream.read(buf),
            None => Err(not_connected()),
        }
    }

    fn connect(&mut self) -> Result<()> {
        let ip = self.resolve()?;
        let stream = TcpStream::connect((ip, self.port))?;
        Self::set_nodelay(&stream)?;
        debug!(peer = %SocketAddr::new(ip, self.port), "connected");
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }
}
