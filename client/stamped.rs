// Transcript writer: every line that starts gets a wall-clock prefix
use std::io::{self, Write};

type StampFn = Box<dyn FnMut() -> String + Send>;

/// `(HH:MM:SS.mmm): ` in local time.
pub fn local_stamp() -> String {
    chrono::Local::now().format("(%H:%M:%S%.3f): ").to_string()
}

/// Prefixes the first byte of every line with a timestamp.
///
/// A bare `\n` passes through unstamped, so empty lines stay empty.
pub struct StampedWriter<W: Write> {
    inner: W,
    at_line_start: bool,
    stamp: StampFn,
}

impl<W: Write> StampedWriter<W> {
    pub fn new(inner: W) -> Self {
        StampedWriter::with_stamp(inner, local_stamp)
    }

    pub fn with_stamp<F>(inner: W, stamp: F) -> Self
    where
        F: FnMut() -> String + Send + 'static,
    {
        StampedWriter {
            inner,
            at_line_start: true,
            stamp: Box::new(stamp),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for StampedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while !rest.is_empty() {
            let (chunk, tail) = match rest.iter().position(|&b| b == b'\n') {
                Some(i) => rest.split_at(i + 1),
                None => (rest, &[][..]),
            };

            if self.at_line_start && chunk != b"\n" {
                let prefix = (self.stamp)();
                self.inner.write_all(prefix.as_bytes())?;
            }
            self.inner.write_all(chunk)?;
            self.at_line_start = chunk.ends_with(b"\n");
            rest = tail;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
