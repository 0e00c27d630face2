// Log listener: receive, stamp, print, repeat
use crate::config::ListenerConfig;
use crate::error::ListenError;
use chrono::{DateTime, Local};
use slider_core::{datagram_buffer_size, DeltaClock, Tick};
use slider_transport::{DatagramTransport, UdpTransport};
use std::convert::Infallible;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::trace;

/// One received datagram, after it has been printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub tick: Tick,
    pub len: usize,
    pub from: SocketAddr,
}

/// `[YYYY-MM-DD HH:MM:SS.ffffff delta] ` followed by the datagram exactly as received.
pub fn write_entry<W: Write>(
    out: &mut W,
    wall: &DateTime<Local>,
    delta: Duration,
    data: &[u8],
) -> io::Result<()> {
    write!(
        out,
        "[{} {:2.6}] ",
        wall.format("%F %T%.6f"),
        delta.as_secs_f64()
    )?;
    out.write_all(data)
}

pub struct LogListener<T: DatagramTransport, W: Write> {
    transport: T,
    out: W,
    clock: DeltaClock,
    buffer: Vec<u8>,
}

impl<W: Write> LogListener<UdpTransport, W> {
    /// Bind the log port on all interfaces.
    pub fn bind(
        config: &ListenerConfig,
        clock: DeltaClock,
        mut out: W,
    ) -> Result<Self, ListenError> {
        writeln!(out, "Socket Created").map_err(ListenError::Output)?;

        let mut transport = UdpTransport::new(config.port);
        transport.bind().map_err(|source| ListenError::Bind {
            port: config.port,
            source,
        })?;

        let addr = transport.local_addr().map_err(|source| ListenError::Bind {
            port: config.port,
            source,
        })?;
        writeln!(out, "Socket bound to {}", addr).map_err(ListenError::Output)?;
        out.flush().map_err(ListenError::Output)?;

        Ok(LogListener::new(transport, clock, out, config.buffer_size))
    }
}

impl<T: DatagramTransport, W: Write> LogListener<T, W> {
    /// `transport` must already be bound. The buffer is clamped to a valid datagram size.
    pub fn new(transport: T, clock: DeltaClock, out: W, buffer_size: usize) -> Self {
        LogListener {
            transport,
            out,
            clock,
            buffer: vec![0u8; datagram_buffer_size(buffer_size)],
        }
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    pub fn out(&self) -> &W {
        &self.out
    }

    /// Block for the next datagram and print it.
    pub fn receive_one(&mut self) -> Result<Entry, ListenError> {
        let (len, from) = loop {
            match self.transport.receive_from(&mut self.buffer) {
                Ok(received) => break received,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(ListenError::Receive(e)),
            }
        };

        let tick = self.clock.tick(Instant::now());
        let wall = Local::now();
        trace!(%from, len, "datagram");

        write_entry(&mut self.out, &wall, tick.delta, &self.buffer[..len])
            .and_then(|_| self.out.flush())
            .map_err(ListenError::Output)?;

        Ok(Entry { tick, len, from })
    }

    /// Runs until an error; there is no other way out.
    pub fn run(&mut self) -> Result<Infallible, ListenError> {
        loop {
            self.receive_one()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::VecDeque;

    struct QueuedDatagrams {
        queue: VecDeque<Vec<u8>>,
    }

    impl DatagramTransport for QueuedDatagrams {
        fn bind(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn receive_from(&mut self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
            let data = self
                .queue
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "drained"))?;
            let n = data.len().min(buf.len());
            buf[..n].copy_from_slice(&data[..n]);
            Ok((n, SocketAddr::from(([192, 168, 4, 1], 4210))))
        }

        fn local_addr(&self) -> io::Result<SocketAddr> {
            Ok(SocketAddr::from(([0, 0, 0, 0], 12345)))
        }
    }

    fn queued(datagrams: &[&[u8]]) -> QueuedDatagrams {
        QueuedDatagrams {
            queue: datagrams.iter().map(|d| d.to_vec()).collect(),
        }
    }

    #[test]
    fn entry_format() {
        let wall = Local.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        let mut out = Vec::new();
        write_entry(&mut out, &wall, Duration::from_micros(1_500_250), b"Logging\n").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[2021-03-04 05:06:07.000000 1.500250] Logging\n"
        );
    }

    #[test]
    fn content_is_not_touched() {
        let wall = Local.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
        let raw: &[u8] = b"  x=1\t\r\n\x00\xfe";
        let mut out = Vec::new();
        write_entry(&mut out, &wall, Duration::ZERO, raw).unwrap();
        assert!(out.ends_with(raw));
        assert!(out.starts_with(b"[2021-03-04 05:06:07.000000 0.000000] "));
    }

    #[test]
    fn deltas_follow_elapsed() {
        let clock = DeltaClock::start();
        let base = clock.base();
        let mut listener = LogListener::new(queued(&[b"a", b"b", b"c"]), clock, Vec::new(), 64);

        let first = listener.receive_one().unwrap();
        assert_eq!(first.tick.delta, first.tick.elapsed);
        assert!(first.tick.elapsed <= base.elapsed());

        let mut prev = first.tick.elapsed;
        for _ in 0..2 {
            let entry = listener.receive_one().unwrap();
            assert_eq!(entry.tick.delta, entry.tick.elapsed - prev);
            prev = entry.tick.elapsed;
        }
    }

    #[test]
    fn oversized_datagram_is_cut_to_buffer() {
        let datagrams = queued(&[b"0123456789"]);
        let mut listener = LogListener::new(datagrams, DeltaClock::start(), Vec::new(), 4);
        let entry = listener.receive_one().unwrap();
        assert_eq!(entry.len, 4);
        assert!(listener.out().ends_with(b"] 0123"));
    }

    #[test]
    fn huge_buffer_request_is_clamped() {
        let listener = LogListener::new(queued(&[]), DeltaClock::start(), Vec::new(), usize::MAX);
        assert_eq!(listener.buffer.len(), slider_core::MAX_UDP_PAYLOAD);

        let listener = LogListener::new(queued(&[]), DeltaClock::start(), Vec::new(), 0);
        assert_eq!(listener.buffer.len(), 1);
    }

    #[test]
    fn run_stops_on_receive_error() {
        let datagrams = queued(&[b"one\n"]);
        let mut listener = LogListener::new(datagrams, DeltaClock::start(), Vec::new(), 16);
        match listener.run() {
            Ok(never) => match never {},
            Err(ListenError::Receive(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            Err(e) => panic!("unexpected error: {}", e),
        }
        assert!(listener.out().ends_with(b"] one\n"));
    }
}
