// Copyright 2025 Linebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Line iterator over a buffered reader.
//!
//! Both meters consume their input through [`LineStream`]. The stream
//! yields owned lines with the trailing newline removed and terminates
//! on end-of-input. Read errors -- an interrupted read, a closed pipe --
//! also terminate the stream: a truncated input is measured as-is, it
//! is never an error.

use std::io::BufRead;
use tracing::debug;

/// An unbounded sequence of text lines drawn from a reader.
pub struct LineStream<R> {
    reader: R,
    done: bool,
}

impl<R: BufRead> LineStream<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for LineStream<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                }
                Some(line)
            }
            Err(err) => {
                // Interruption counts as ordinary end-of-stream.
                debug!("input stream ended early: {err}");
                self.done = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    #[test]
    fn test_yields_lines_without_newline() {
        let stream = LineStream::new(Cursor::new("one\ntwo\nthree\n"));
        let lines: Vec<String> = stream.collect();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_final_line_without_newline_is_kept() {
        let stream = LineStream::new(Cursor::new("one\ntwo"));
        let lines: Vec<String> = stream.collect();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let stream = LineStream::new(Cursor::new(""));
        assert_eq!(stream.count(), 0);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let stream = LineStream::new(Cursor::new("a\n\nb\n"));
        let lines: Vec<String> = stream.collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    struct FailingReader {
        yielded: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.yielded {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            } else {
                self.yielded = true;
                buf[..4].copy_from_slice(b"ok\nx");
                Ok(4)
            }
        }
    }

    #[test]
    fn test_read_error_terminates_stream_gracefully() {
        let reader = io::BufReader::new(FailingReader { yielded: false });
        let lines: Vec<String> = LineStream::new(reader).collect();
        // The complete first line survives; the error swallows the rest.
        assert_eq!(lines, vec!["ok"]);
    }
}
