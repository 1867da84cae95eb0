//! Interaction with the person running the tool.
//!
//! Every stage talks to the operator through [`Operator`], so a run can be
//! driven from a terminal or from a scripted buffer.

use std::io::{self, BufRead, Write};

use apiref_core::error::{ApirefError, Result};

/// Line-oriented conversation with the operator.
pub trait Operator {
    /// Print one line.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Print `prompt` without a newline and read one answer, trimmed.
    ///
    /// Blocks until a line is available. End of input is an error.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Print `question` on its own line and accept only an exact `y`.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        self.say(question)?;
        Ok(self.ask("")? == "y")
    }
}

/// [`Operator`] over any reader and writer, normally stdin and stdout.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        if !prompt.is_empty() {
            write!(self.output, "{prompt}")?;
        }
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(ApirefError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }
        Ok(answer.trim().to_string())
    }
}
