// Command framing - pure byte handling, no I/O
use crate::types::Reply;

/// Delimits commands and replies on the wire.
pub const TERMINATOR: u8 = b'\r';

/// Sent once the input is exhausted; the device answers with its motion status.
pub const STATUS_COMMAND: &str = "XX";

/// Trailing whitespace removed; `None` for lines that must not be sent.
pub fn clean_line(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Frame a command: the text minus any stray terminator bytes, then exactly one terminator.
pub fn encode_command(command: &str) -> Vec<u8> {
    let mut frame = Vec::with_capacity(command.len() + 1);
    frame.extend(command.bytes().filter(|&b| b != TERMINATOR));
    frame.push(TERMINATOR);
    frame
}

/// Accumulates a reply one byte at a time.
///
/// The device ends every reply with `\r\n`. Line feeds are dropped, so the
/// `\n` left over from the previous reply is swallowed at the start of the
/// next one.
#[derive(Debug, Default)]
pub struct ReplyDecoder {
    pending: Vec<u8>,
}

impl ReplyDecoder {
    pub fn new() -> Self {
        ReplyDecoder::default()
    }

    /// Feed one byte; returns the reply once the terminator is seen.
    pub fn feed(&mut self, byte: u8) -> Option<Reply> {
        match byte {
            TERMINATOR => Some(self.take(true)),
            b'\n' => None,
            _ => {
                self.pending.push(byte);
                None
            }
        }
    }

    /// The peer closed the stream: hand back whatever arrived.
    pub fn finish(&mut self) -> Reply {
        self.take(false)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn take(&mut self, terminated: bool) -> Reply {
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Reply { text, terminated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Reply> {
        let mut decoder = ReplyDecoder::new();
        bytes.iter().filter_map(|&b| decoder.feed(b)).collect()
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(clean_line(""), None);
        assert_eq!(clean_line("   \t"), None);
        assert_eq!(clean_line("\r"), None);
        assert_eq!(clean_line("M 100  \r"), Some("M 100"));
        assert_eq!(clean_line("  EM 1"), Some("  EM 1"));
    }

    #[test]
    fn frame_has_exactly_one_terminator() {
        assert_eq!(encode_command("v"), b"v\r");
        assert_eq!(encode_command("XX\r"), b"XX\r");
        assert_eq!(encode_command("a\rb"), b"ab\r");
        assert_eq!(encode_command(""), b"\r");

        let frame = encode_command("SM 1 2\r\r");
        assert_eq!(frame.iter().filter(|&&b| b == TERMINATOR).count(), 1);
        assert_eq!(frame.last(), Some(&TERMINATOR));
    }

    #[test]
    fn decoder_splits_on_carriage_return() {
        let replies = decode_all(b"Slider-Firmware V1.0\r\n!8 Err: Unknown command\r\n");
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].text, "Slider-Firmware V1.0");
        assert_eq!(replies[1].text, "!8 Err: Unknown command");
        assert!(replies.iter().all(|r| r.terminated));
    }

    #[test]
    fn decoder_drops_line_feeds_anywhere() {
        let replies = decode_all(b"\nO\nK\r");
        assert_eq!(replies[0].text, "OK");
    }

    #[test]
    fn finish_returns_partial_reply() {
        let mut decoder = ReplyDecoder::new();
        for &b in b"parti" {
            assert!(decoder.feed(b).is_none());
        }
        assert!(!decoder.is_empty());
        let reply = decoder.finish();
        assert_eq!(reply.text, "parti");
        assert!(!reply.terminated);
        assert!(decoder.is_empty());
    }
}
