//! External process execution for tidyhook.
//!
//! Every git and tool invocation goes through the [`CommandRunner`] trait so
//! checks can run against scripted output in tests. [`SystemRunner`] is the
//! real implementation backed by `std::process::Command`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Bytes written to the child's stdin. `None` connects stdin to null.
    pub stdin: Option<Vec<u8>>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, cwd: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.as_ref().to_path_buf(),
            stdin: None,
        }
    }

    /// Build a command from an argv vector. Returns `None` for an empty vector.
    pub fn from_argv(argv: Vec<String>, cwd: impl AsRef<Path>) -> Option<Self> {
        let mut argv = argv.into_iter();
        let program = argv.next()?;
        Some(Self::new(program, cwd).args(argv))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Shell-quoted rendering of the command line, for messages and logs.
    pub fn display(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

/// Captured result of a command that started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, or `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    /// Stdout followed by stderr, the way a terminal would interleave them for
    /// tools that write findings to one stream and status to the other.
    pub fn combined_text(&self) -> String {
        let stdout = self.stdout_text();
        let stderr = self.stderr_text();
        match (stdout.is_empty(), stderr.is_empty()) {
            (_, true) => stdout,
            (true, false) => stderr,
            (false, false) if stdout.ends_with('\n') => format!("{}{}", stdout, stderr),
            (false, false) => format!("{}\n{}", stdout, stderr),
        }
    }
}

/// Capability to run an external command and capture its output.
///
/// An `Err` means the command could not be started at all (for example the
/// program is not installed). A command that starts and exits non-zero is an
/// `Ok` with a failing status.
pub trait CommandRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        tracing::debug!(command = %command.display(), cwd = %command.cwd.display(), "spawning");

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin_pipe = child.stdin.take();
        let output = std::thread::scope(|scope| {
            // Feed stdin from a helper so a child that fills its stdout pipe
            // before draining stdin cannot deadlock us.
            if let (Some(mut pipe), Some(input)) = (stdin_pipe, command.stdin.as_deref()) {
                scope.spawn(move || {
                    // A tool that exits without reading all input closes the pipe; that is not our error.
                    let _ = pipe.write_all(input);
                });
            }
            child.wait_with_output()
        })?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
