use crate::exec::{CommandRunner, SystemRunner, ToolCommand, ToolOutput};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A repository on `main` with one commit containing `README.md`.
pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    git(path, &["init"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    // Keep developer hooks and autocrlf settings out of test repositories.
    git(path, &["config", "core.autocrlf", "false"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "--no-verify", "-m", "Initial commit"]);

    temp_dir
}

/// Write `content` to `rel` inside `repo` and stage it.
pub(crate) fn stage_file(repo: &Path, rel: &str, content: &str) {
    let full = repo.join(rel);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&full, content).unwrap();
    git(repo, &["add", "--", rel]);
}

/// Full object name of `HEAD` in `repo`.
pub(crate) fn head_sha(repo: &Path) -> String {
    let output = Command::new("git")
        .current_dir(repo)
        .args(["rev-parse", "HEAD"])
        .output()
        .unwrap();
    assert!(output.status.success(), "git rev-parse HEAD failed");
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}

struct FakeRule {
    program: String,
    args_prefix: Vec<String>,
    output: ToolOutput,
}

/// Scripted [`CommandRunner`].
///
/// Rules are matched in registration order on program name and argument
/// prefix. Programs registered with [`FakeRunner::passthrough`] run for real.
/// Anything else fails to start with `NotFound`, like a missing tool.
pub(crate) struct FakeRunner {
    rules: Vec<FakeRule>,
    passthrough: Vec<String>,
    calls: RefCell<Vec<ToolCommand>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self {
            rules: Vec::new(),
            passthrough: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn on(self, program: &str, stdout: &str, stderr: &str, status: i32) -> Self {
        self.on_args(program, &[], stdout, stderr, status)
    }

    pub(crate) fn on_args(
        mut self,
        program: &str,
        args_prefix: &[&str],
        stdout: &str,
        stderr: &str,
        status: i32,
    ) -> Self {
        self.rules.push(FakeRule {
            program: program.to_string(),
            args_prefix: args_prefix.iter().map(|s| s.to_string()).collect(),
            output: ToolOutput {
                status: Some(status),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
        });
        self
    }

    pub(crate) fn passthrough(mut self, program: &str) -> Self {
        self.passthrough.push(program.to_string());
        self
    }

    /// Commands seen so far, in order.
    pub(crate) fn calls(&self) -> Vec<ToolCommand> {
        self.calls.borrow().clone()
    }

    /// Commands seen so far for one program.
    pub(crate) fn calls_to(&self, program: &str) -> Vec<ToolCommand> {
        self.calls()
            .into_iter()
            .filter(|c| c.program == program)
            .collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &ToolCommand) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(command.clone());

        let rule = self.rules.iter().find(|rule| {
            rule.program == command.program && command.args.starts_with(&rule.args_prefix)
        });
        if let Some(rule) = rule {
            return Ok(rule.output.clone());
        }

        if self.passthrough.contains(&command.program) {
            return SystemRunner.run(command);
        }

        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such file or directory: {}", command.program),
        ))
    }
}
