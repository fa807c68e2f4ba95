//! Operator confirmation gate.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

pub const CONFIRM_PROMPT: &str = "Press 'y' to continue  ";

/// Block until a line reading exactly `y` arrives on `input`.
///
/// Any other answer repeats the prompt. Closing the input first is an error.
pub fn confirm_to_continue<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{}", CONFIRM_PROMPT)
            .and_then(|_| output.flush())
            .map_err(|e| Error::internal_io(e.to_string(), Some("write prompt".to_string())))?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read confirmation".to_string())))?;
        if read == 0 {
            return Err(Error::confirmation_aborted());
        }

        if line.trim_end_matches(['\r', '\n']) == "y" {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str) -> (Result<()>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = confirm_to_continue(&mut reader, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn accepts_y_immediately() {
        let (result, out) = run("y\n");
        assert!(result.is_ok());
        assert_eq!(out, CONFIRM_PROMPT);
    }

    #[test]
    fn repeats_until_exact_y() {
        let (result, out) = run("n\nyes\nY\n y\ny\n");
        assert!(result.is_ok());
        assert_eq!(out.matches(CONFIRM_PROMPT).count(), 5);
    }

    #[test]
    fn stops_reading_after_y() {
        let mut reader = Cursor::new(b"no\ny\nleftover\n".to_vec());
        let mut out = Vec::new();
        confirm_to_continue(&mut reader, &mut out).unwrap();

        let mut rest = String::new();
        reader.read_line(&mut rest).unwrap();
        assert_eq!(rest, "leftover\n");
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let (result, _) = run("y\r\n");
        assert!(result.is_ok());
    }

    #[test]
    fn final_line_without_newline_counts() {
        let (result, _) = run("n\ny");
        assert!(result.is_ok());
    }

    #[test]
    fn end_of_input_without_y_is_aborted() {
        let (result, out) = run("n\nnope\n");
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "validation.confirmation_aborted");
        assert_eq!(out.matches(CONFIRM_PROMPT).count(), 3);
    }
}
