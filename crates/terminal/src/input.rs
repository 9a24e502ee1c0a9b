//! Whitespace-separated token input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Reads operator answers one token at a time.
///
/// Several answers may be typed on one line; they are consumed in order.
pub struct Prompter<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }
            // Undecodable bytes become an ordinary token the caller rejects.
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_owned),
            );
        }
    }

    /// Print `prompt` and read one token.
    pub fn ask<W: Write>(&mut self, out: &mut W, prompt: &str) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        self.next_token()
    }

    /// Print `prompt` until the answer parses as an integer.
    pub fn ask_number<W: Write>(&mut self, out: &mut W, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            let Some(token) = self.ask(out, prompt)? else {
                return Ok(None);
            };
            match token.parse::<i64>() {
                Ok(n) => return Ok(Some(n)),
                Err(_) => writeln!(out, "Please enter a number.")?,
            }
        }
    }
}
