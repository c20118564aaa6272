//! Blocking line-oriented prompts with a default on empty input.

use crate::float_types::Real;
use std::io::{self, BufRead, Write};

/// Reply printed when a line cannot be parsed as a number.
pub const INVALID_NUMBER_MESSAGE: &str = "Please enter a valid number.";

/// Asks questions on `output` and reads the answers from `input`.
///
/// Generic over the streams so the same loop drives the terminal in the
/// binary and in-memory buffers in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line of text.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Read one line, with the trailing newline and surrounding whitespace
    /// removed.
    ///
    /// # Errors
    /// [`io::ErrorKind::UnexpectedEof`] when the input is exhausted.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_owned())
    }

    /// Show `LABEL [default]: ` and return the number typed, or `default`
    /// for an empty line. Anything unparsable prints
    /// [`INVALID_NUMBER_MESSAGE`] and asks again.
    ///
    /// # Errors
    /// Any I/O error on either stream, including end of input.
    pub fn prompt_float(&mut self, label: &str, default: Real) -> io::Result<Real> {
        loop {
            write!(self.output, "{label} [{default:?}]: ")?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match answer.parse::<Real>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say(INVALID_NUMBER_MESSAGE)?,
            }
        }
    }

    /// Consume the prompter, handing back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn empty_line_takes_default() {
        let mut p = prompter("\n");
        assert_eq!(p.prompt_float("THICKNESS", 25.4).unwrap(), 25.4);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "THICKNESS [25.4]: ");
    }

    #[test]
    fn whole_number_default_keeps_decimal_point() {
        let mut p = prompter("\n");
        assert_eq!(p.prompt_float("OUTER_RADIUS", 180.0).unwrap(), 180.0);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "OUTER_RADIUS [180.0]: ");
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut p = prompter("   \t \r\n");
        assert_eq!(p.prompt_float("BOLT_RADIUS", 5.0).unwrap(), 5.0);
    }

    #[test]
    fn parses_typed_value() {
        let mut p = prompter(" 12.5 \n");
        assert_eq!(p.prompt_float("BOLT_RADIUS", 5.0).unwrap(), 12.5);
    }

    #[test]
    fn reprompts_until_valid() {
        let mut p = prompter("abc\n1,5\n7\n");
        assert_eq!(p.prompt_float("BOLT_RADIUS", 5.0).unwrap(), 7.0);
        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown.matches("BOLT_RADIUS [5.0]: ").count(), 3);
        assert_eq!(shown.matches(INVALID_NUMBER_MESSAGE).count(), 2);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut p = prompter("oops\n");
        let err = p.prompt_float("THICKNESS", 25.4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
