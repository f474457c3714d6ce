//! Console abstraction for the interactive dialogue.
//!
//! Every prompt and user-facing line goes through the [`Console`] trait so
//! the dialogue logic can be exercised with scripted input in tests. Log
//! output is separate and handled by `tracing`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Width of the separator line printed between dialogue sections.
pub const SEPARATOR_WIDTH: usize = 40;

/// The dashed line printed after the dialogue and after each report.
pub fn separator_line() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// A blocking line-oriented console.
pub trait Console {
    /// Read one line of input, without the trailing newline.
    fn read_line(&mut self) -> io::Result<String>;

    /// Write a line of user-facing output.
    fn write_line(&mut self, text: &str);
}

/// Console backed by stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<String> {
        let _ = io::stdout().flush();
        let mut buf = String::new();
        let bytes = io::stdin().lock().read_line(&mut buf)?;
        if bytes == 0 {
            // Closed stdin is the one way out of an otherwise unbounded
            // retry loop; surface it instead of spinning.
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(buf.trim_end_matches(['\r', '\n']).to_string())
    }

    fn write_line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Console that replays a fixed input script and records everything written.
///
/// Used throughout the test suite to drive the dialogue non-interactively.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far, joined with newlines.
    pub fn printed(&self) -> String {
        self.output.join("\n")
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<String> {
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))
    }

    fn write_line(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
