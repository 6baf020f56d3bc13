//! Reading a seekable stream line by line, last line first
//!
//! `ReverseLines` produces the same lines as reading the whole stream and
//! reversing the result, but only ever holds one chunk of the input (plus the
//! partial line straddling the chunk boundary) in memory.

use std::io::{self, Read, Seek, SeekFrom};

/// Default number of bytes read per backward step.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Iterator over the lines of a stream, from the end toward the start.
///
/// Lines are split on `\n` and returned without it. A `\n` at the very end of
/// the stream does not produce an empty final line. Invalid UTF-8 is replaced
/// with U+FFFD; decoding happens only once a line is complete, so multi-byte
/// characters cut by a chunk boundary survive intact.
pub struct ReverseLines<R> {
    reader: R,
    /// Offset of the first byte not yet read; everything after it has been consumed.
    pos: u64,
    chunk_size: u64,
    /// Complete lines from the current chunk, in forward order (popped from the back).
    pending: Vec<Vec<u8>>,
    /// First fragment of the most recent chunk; may be the end of a longer line.
    tail: Option<Vec<u8>>,
    buf: Vec<u8>,
}

impl<R: Read + Seek> ReverseLines<R> {
    pub fn new(reader: R) -> io::Result<Self> {
        Self::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// Create a reader that steps backward `chunk_size` bytes at a time.
    /// A chunk size of 0 is treated as 1.
    pub fn with_chunk_size(mut reader: R, chunk_size: usize) -> io::Result<Self> {
        let pos = reader.seek(SeekFrom::End(0))?;
        Ok(Self {
            reader,
            pos,
            chunk_size: chunk_size.max(1) as u64,
            pending: Vec::new(),
            tail: None,
            buf: Vec::new(),
        })
    }

    /// Read the chunk that ends at `pos` and split it into lines.
    fn read_chunk(&mut self) -> io::Result<()> {
        let start = self.pos.saturating_sub(self.chunk_size);
        let len = (self.pos - start) as usize;

        self.reader.seek(SeekFrom::Start(start))?;
        self.buf.resize(len, 0);
        self.reader.read_exact(&mut self.buf)?;
        self.pos = start;

        let mut parts: Vec<Vec<u8>> = self
            .buf
            .split(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();

        match self.tail.take() {
            Some(tail) => {
                if let Some(last) = parts.last_mut() {
                    last.extend_from_slice(&tail);
                }
            }
            None => {
                // Newline at end of stream terminates the last line, it doesn't start a new one
                if parts.len() > 1 && parts.last().is_some_and(Vec::is_empty) {
                    parts.pop();
                }
            }
        }

        let mut parts = parts.into_iter();
        self.tail = parts.next();
        self.pending.extend(parts);
        Ok(())
    }
}

impl<R: Read + Seek> Iterator for ReverseLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop() {
                return Some(Ok(decode(line)));
            }
            if self.pos == 0 {
                return self.tail.take().map(|tail| Ok(decode(tail)));
            }
            if let Err(e) = self.read_chunk() {
                // Stop after the first failure instead of retrying the same chunk forever
                self.pos = 0;
                self.tail = None;
                return Some(Err(e));
            }
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// What reading forward and reversing would give.
    fn forward_reversed(input: &str) -> Vec<String> {
        let mut lines: Vec<String> = input.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines.reverse();
        lines
    }

    fn read_back(input: &[u8], chunk_size: usize) -> Vec<String> {
        ReverseLines::with_chunk_size(Cursor::new(input.to_vec()), chunk_size)
            .unwrap()
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    const INPUTS: &[&str] = &[
        "",
        "\n",
        "\n\n",
        "single",
        "single\n",
        "10 /a/b\n20 /a/c\n35 /a\n",
        "10 /a/b\n20 /a/c\n35 /a",
        "a\n\nb\n\n",
        "\nleading blank\n",
        "4\t./caf\u{e9}/na\u{ef}ve\n8\t./\u{65e5}\u{672c}\n12\t.\n",
    ];

    #[test]
    fn test_matches_forward_reversed_for_all_chunk_sizes() {
        for input in INPUTS {
            let expected = forward_reversed(input);
            for chunk_size in 1..=input.len() + 3 {
                assert_eq!(
                    read_back(input.as_bytes(), chunk_size),
                    expected,
                    "input {:?}, chunk size {}",
                    input,
                    chunk_size
                );
            }
            assert_eq!(read_back(input.as_bytes(), DEFAULT_CHUNK_SIZE), expected);
        }
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        assert!(read_back(b"", 4).is_empty());
    }

    #[test]
    fn test_trailing_newline_is_not_a_line() {
        assert_eq!(read_back(b"x\ny\n", 2), vec!["y", "x"]);
    }

    #[test]
    fn test_lone_newline_is_one_empty_line() {
        assert_eq!(read_back(b"\n", 1), vec![""]);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        assert_eq!(read_back(b"a\nb", 0), vec!["b", "a"]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let lines = read_back(b"1 ok\n2 bad\xff\n", 3);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "2 bad\u{fffd}");
        assert_eq!(lines[1], "1 ok");
    }

    #[test]
    fn test_long_input_with_small_chunks() {
        let input: String = (0..500).map(|i| format!("{} /root/entry{}\n", i, i)).collect();
        assert_eq!(read_back(input.as_bytes(), 7), forward_reversed(&input));
    }

    /// Serves reads only at or past `readable_from`.
    struct FailingBelow {
        inner: Cursor<Vec<u8>>,
        readable_from: u64,
    }

    impl Read for FailingBelow {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.inner.position() < self.readable_from {
                return Err(io::Error::other("device went away"));
            }
            self.inner.read(buf)
        }
    }

    impl Seek for FailingBelow {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_read_error_is_yielded_once_then_stops() {
        let reader = FailingBelow {
            inner: Cursor::new(b"a\nb\nc\n".to_vec()),
            readable_from: 2,
        };
        let mut lines = ReverseLines::with_chunk_size(reader, 2).unwrap();

        assert_eq!(lines.next().unwrap().unwrap(), "c");
        let err = lines.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "device went away");
        assert!(lines.next().is_none());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_starts_from_end_regardless_of_initial_position() {
        let mut cursor = Cursor::new(b"a\nb\nc".to_vec());
        cursor.set_position(2);
        let lines: Vec<String> = ReverseLines::with_chunk_size(cursor, 2)
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(lines, vec!["c", "b", "a"]);
    }
}
