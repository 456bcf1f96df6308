use core::fmt;

/// A blocking source of input bytes.
pub trait ByteSource {
    /// Next byte, or `None` once the input is closed.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Scripted input, consumed front to back.
impl ByteSource for &[u8] {
    fn read_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }
}

const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7F;

/// Reads one line at a time into a caller-provided buffer.
///
/// - Printable ASCII is stored and echoed; other bytes are ignored.
/// - Backspace (`0x08`) and DEL (`0x7F`) erase the previous character.
/// - `\r` or `\n` ends the line; a `\n` directly following a `\r` is swallowed
///   so `\r\n` terminals do not produce an extra empty line.
/// - Once the buffer is full (one byte is kept in reserve, as for a NUL
///   terminator), further characters are dropped until the line ends.
#[derive(Debug, Default)]
pub struct LineEditor {
    after_cr: bool,
}

impl LineEditor {
    #[must_use]
    pub const fn new() -> Self {
        Self { after_cr: false }
    }

    /// Read one line from `source`, echoing to `echo`.
    ///
    /// Returns `None` if the source closes before a line terminator; the
    /// partial line is discarded.
    pub fn read_line<'b, S, W>(
        &mut self,
        source: &mut S,
        echo: &mut W,
        buf: &'b mut [u8],
    ) -> Option<&'b str>
    where
        S: ByteSource + ?Sized,
        W: fmt::Write + ?Sized,
    {
        let capacity = buf.len().saturating_sub(1);
        let mut len = 0;

        loop {
            let b = source.read_byte()?;
            let after_cr = core::mem::replace(&mut self.after_cr, b == b'\r');

            match b {
                b'\n' if after_cr => {}
                b'\r' | b'\n' => {
                    let _ = echo.write_char('\n');
                    break;
                }
                BACKSPACE | DELETE => {
                    if len > 0 {
                        len -= 1;
                        let _ = echo.write_str("\x08 \x08");
                    }
                }
                b' '..=b'~' if len < capacity => {
                    buf[len] = b;
                    len += 1;
                    let _ = echo.write_char(char::from(b));
                }
                _ => {}
            }
        }

        // Only printable ASCII was stored.
        core::str::from_utf8(&buf[..len]).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &[u8], buf_len: usize) -> (Vec<String>, String) {
        let mut source = input;
        let mut echo = String::new();
        let mut editor = LineEditor::new();
        let mut buf = vec![0u8; buf_len];
        let mut lines = Vec::new();
        while let Some(line) = editor.read_line(&mut source, &mut echo, &mut buf) {
            lines.push(line.to_owned());
        }
        (lines, echo)
    }

    #[test]
    fn splits_on_either_terminator() {
        let (lines, echo) = read_all(b"help\nbt\r", 80);
        assert_eq!(lines, ["help", "bt"]);
        assert_eq!(echo, "help\nbt\n");
    }

    #[test]
    fn crlf_is_one_terminator() {
        let (lines, _) = read_all(b"ki\r\n\r\nsm 0\r\n", 80);
        assert_eq!(lines, ["ki", "", "sm 0"]);
    }

    #[test]
    fn backspace_erases_and_stops_at_line_start() {
        let (lines, echo) = read_all(b"\x08hx\x08elp\x7f\x7fp\n", 80);
        assert_eq!(lines, ["hep"]);
        assert_eq!(echo, "hx\x08 \x08elp\x08 \x08\x08 \x08p\n");
    }

    #[test]
    fn control_bytes_are_ignored() {
        let (lines, _) = read_all(b"s\x1bm\t0\n", 80);
        assert_eq!(lines, ["sm0"]);
    }

    #[test]
    fn full_buffer_drops_excess() {
        let (lines, _) = read_all(b"abcdefgh\n", 5);
        assert_eq!(lines, ["abcd"]);
    }

    #[test]
    fn unterminated_input_is_discarded() {
        let (lines, _) = read_all(b"help\nkerninfo", 80);
        assert_eq!(lines, ["help"]);
    }
}
