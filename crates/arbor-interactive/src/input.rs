//! Where session commands come from.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Prompt shown before reading a command line.
pub const PROMPT: &str = "interactive> ";

/// A source of command lines. `None` means input is exhausted.
pub trait CommandSource {
    /// Produce the next command, writing any echo or prompt to `out`.
    fn next_command(&mut self, out: &mut dyn Write) -> io::Result<Option<String>>;
}

/// A fixed queue of commands. Blank entries are dropped; each command is
/// echoed as `> cmd` when taken.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    queue: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: commands
                .into_iter()
                .map(Into::into)
                .filter(|command: &String| !command.trim().is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_command(&mut self, out: &mut dyn Write) -> io::Result<Option<String>> {
        let Some(command) = self.queue.pop_front() else {
            return Ok(None);
        };
        writeln!(out, "> {command}")?;
        Ok(Some(command))
    }
}

/// Reads one command per line after printing [`PROMPT`].
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for LineReader<R> {
    fn next_command(&mut self, out: &mut dyn Write) -> io::Result<Option<String>> {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                writeln!(out)?;
                Ok(None)
            }
            Ok(_) => Ok(Some(line.trim_end_matches(['\r', '\n']).to_string())),
            Err(err) => {
                tracing::warn!(target: "arbor::interactive", %err, "failed to read command; ending session");
                writeln!(out)?;
                Ok(None)
            }
        }
    }
}

/// Runs a script first, then falls back to reading lines.
#[derive(Debug)]
pub struct ScriptThenReader<R> {
    script: ScriptedCommands,
    reader: LineReader<R>,
}

impl<R: BufRead> ScriptThenReader<R> {
    pub fn new(script: ScriptedCommands, reader: R) -> Self {
        Self {
            script,
            reader: LineReader::new(reader),
        }
    }
}

impl<R: BufRead> CommandSource for ScriptThenReader<R> {
    fn next_command(&mut self, out: &mut dyn Write) -> io::Result<Option<String>> {
        if !self.script.is_empty() {
            return self.script.next_command(out);
        }
        self.reader.next_command(out)
    }
}
