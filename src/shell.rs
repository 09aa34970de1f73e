use crate::counters::{CountMinSketch, FrequencyCounter};
use crate::error::Result;
use std::hash::BuildHasher;
use std::io::{BufRead, Write};
use tracing::debug;
use xxhash_rust::xxh64::Xxh64Builder;

const HELP: &str = "Valid commands: help, add, count, exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Help,
    Add,
    Count,
    Exit,
    Unknown,
}

impl Command {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "help" => Command::Help,
            "add" => Command::Add,
            "count" => Command::Count,
            "exit" => Command::Exit,
            _ => Command::Unknown,
        }
    }
}

/// Line-oriented command loop around a single sketch.
///
/// Reads a command, then for `add` and `count` a line of data, and writes the
/// response to `output`. End of input ends the session like `exit`.
pub struct Shell<R: BufRead, W: Write, S = Xxh64Builder> {
    input: R,
    output: W,
    sketch: CountMinSketch<S>,
    line: String,
}

impl<R: BufRead, W: Write, S: BuildHasher> Shell<R, W, S> {
    pub fn new(sketch: CountMinSketch<S>, input: R, output: W) -> Self {
        Shell {
            input,
            output,
            sketch,
            line: String::new(),
        }
    }

    pub fn sketch(&self) -> &CountMinSketch<S> {
        &self.sketch
    }

    /// Runs until `exit` or end of input and hands the sketch back.
    pub fn run(mut self) -> Result<CountMinSketch<S>> {
        writeln!(self.output, "{}", HELP)?;

        while let Some(input) = self.prompt("Command: ")? {
            let command = Command::parse(&input);
            debug!(?command, "shell command");

            match command {
                Command::Help => writeln!(self.output, "{}", HELP)?,
                Command::Add => {
                    let Some(data) = self.prompt("Data: ")? else {
                        break;
                    };
                    self.sketch.increment(&data);
                    writeln!(self.output, "Added data.")?;
                }
                Command::Count => {
                    let Some(data) = self.prompt("Data: ")? else {
                        break;
                    };
                    let count = self.sketch.estimate(&data);
                    writeln!(self.output, "Count of data: {}", count)?;
                }
                Command::Exit => break,
                Command::Unknown => writeln!(
                    self.output,
                    "That is not a valid command. Use the help command for a list."
                )?,
            }
        }

        self.output.flush()?;
        Ok(self.sketch)
    }

    /// Writes `prompt` and reads one line without its line terminator.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        self.line.clear();
        if self.input.read_line(&mut self.line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let data = self.line.trim_end_matches(['\n', '\r']);
        Ok(Some(data.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(script: &str) -> (CountMinSketch, String) {
        let sketch: CountMinSketch = CountMinSketch::new(1000, 10).unwrap();
        let mut output = Vec::new();
        let shell = Shell::new(sketch, Cursor::new(script), &mut output);
        let sketch = shell.run().unwrap();
        (sketch, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_add_and_count() {
        let (sketch, output) =
            run_session("add\napple\nadd\napple\ncount\napple\ncount\npear\nexit\n");

        assert_eq!(sketch.estimate("apple"), 2);
        assert_eq!(output.matches("Added data.").count(), 2);
        assert!(output.contains("Count of data: 2\n"));
        assert!(output.contains("Count of data: 0\n"));
    }

    #[test]
    fn test_data_keeps_inner_whitespace() {
        let (sketch, _) = run_session("add\nred apple\r\nexit\n");
        assert_eq!(sketch.estimate("red apple"), 1);
        assert_eq!(sketch.estimate("red"), 0);
    }

    #[test]
    fn test_help_and_unknown() {
        let (sketch, output) = run_session("help\nfly\nexit\n");
        // banner plus the explicit help
        assert_eq!(output.matches(HELP).count(), 2);
        assert!(output.contains("That is not a valid command."));
        assert_eq!(sketch.total_count(), 0);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (sketch, output) = run_session("add\nplum\n");
        assert_eq!(sketch.estimate("plum"), 1);
        assert!(output.ends_with("Command: \n"));

        // input ends while waiting for data
        let (sketch, _) = run_session("add\n");
        assert_eq!(sketch.total_count(), 0);
    }

    #[test]
    fn test_exit_stops_reading() {
        let (sketch, _) = run_session("exit\nadd\napple\n");
        assert_eq!(sketch.estimate("apple"), 0);
    }

    #[test]
    fn test_commands_tolerate_surrounding_whitespace() {
        assert_eq!(Command::parse("  add \r\n"), Command::Add);
        assert_eq!(Command::parse("COUNT"), Command::Unknown);
    }
}
