// UDP transport for the broadcast log socket
use crate::traits::{not_connected, DatagramTransport};
use nix::sys::socket::{setsockopt, sockopt};
use std::io::{Error, Result};
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use tracing::{debug, warn};

/// Receive buffer requested from the kernel, enough to ride out bursts of log lines.
const RECV_BUFFER_SIZE: usize = 256 * 1024;

pub struct UdpTransport {
    address: SocketAddr,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Listen on every interface.
    pub fn new(port: u16) -> Self {
        UdpTransport::with_address(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }

    pub fn with_address(address: SocketAddr) -> Self {
        UdpTransport {
            address,
            socket: None,
        }
    }

    /// Set socket receive buffer size (SO_RCVBUF)
    pub fn set_receive_buffer_size(&self, size: usize) -> Result<()> {
        if let Some(ref socket) = self.socket {
            setsockopt(socket, sockopt::RcvBuf, &size).map_err(Error::from)?;
        }
        Ok(())
    }
}

impl DatagramTransport for UdpTransport {
    fn bind(&mut self) -> Result<()> {
        let socket = UdpSocket::bind(self.address)?;
        self.socket = Some(socket);

        if let Err(e) = self.set_receive_buffer_size(RECV_BUFFER_SIZE) {
            warn!("could not enlarge receive buffer: {}", e);
        }
        debug!(address = %self.address, "bound");
        Ok(())
    }

    fn receive_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr)> {
        match self.socket {
            Some(ref socket) => socket.recv_from(buf),
            None => Err(not_connected()),
        }
    }

    fn local_addr(&self) -> Result<SocketAddr> {
        match self.socket {
            Some(ref socket) => socket.local_addr(),
            None => Err(not_connected()),
        }
    }
}
