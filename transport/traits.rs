// Transport abstraction - lets the sender and listener run over real sockets or test doubles
use std::io::{Error, ErrorKind, Result};
use std::net::SocketAddr;

pub trait Transport: Send {
    fn send(&mut self, data: &[u8]) -> Result<usize>;
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;

    /// Keep sending until every byte is written.
    fn send_all(&mut self, mut data: &[u8]) -> Result<()> {
        while !data.is_empty() {
            match self.send(data) {
                Ok(0) => {
                    return Err(Error::new(ErrorKind::WriteZero, "failed to write whole frame"));
                }
                Ok(n) => data = &data[n..],
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

pub trait DatagramTransport: Send {
    fn bind(&mut self) -> Result<()>;
    fn receive_from(&mut self, buf: &mut [u8]) -> Result<(usize, SocketAddr)>;
    fn local_addr(&self) -> Result<SocketAddr>;
}

pub(crate) fn not_connected() -> Error {
    Error::new(ErrorKind::NotConnected, "Not connected")
}
