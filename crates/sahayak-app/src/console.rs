//! Terminal voice channel: prompts to stdout, answers from stdin.

use std::io::{BufRead, Write};

use sahayak_dialogue::{DialogueError, VoiceIo};

pub struct ConsoleVoice<R, W> {
    input: R,
    output: W,
    echo_input: bool,
}

impl ConsoleVoice<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleVoice<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            echo_input: false,
        }
    }

    /// Write each line read back to the output, for input that is not typed.
    pub fn with_echo(mut self) -> Self {
        self.echo_input = true;
        self
    }
}

impl<R: BufRead, W: Write> VoiceIo for ConsoleVoice<R, W> {
    fn speak(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "🤖: {}", text).and_then(|_| self.output.flush()) {
            tracing::warn!(error = %e, "Failed to write agent response");
        }
    }

    fn listen(&mut self) -> Result<Option<String>, DialogueError> {
        write!(self.output, "👤: ")
            .and_then(|_| self.output.flush())
            .map_err(|e| DialogueError::Voice(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| DialogueError::Voice(e.to_string()))?;
        if read == 0 {
            if self.echo_input {
                let _ = writeln!(self.output);
            }
            return Ok(None);
        }

        let text = line.trim_end_matches(['\r', '\n']).to_string();
        if self.echo_input {
            writeln!(self.output, "{}", text).map_err(|e| DialogueError::Voice(e.to_string()))?;
        }
        Ok(Some(text))
    }
}
