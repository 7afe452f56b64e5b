//! External process spawning.
//!
//! Every tool reword talks to (git, the model CLI, the pager) is reached
//! through [`CommandRunner`], so tests can swap in canned outputs.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tracing::debug;

/// A single external command to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Text written to the child's stdin, which is then closed.
    pub stdin: Option<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Program and arguments joined by spaces, for log lines.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Trait for spawning external processes.
///
/// This abstraction allows replacing real subprocesses in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and capture stdout and stderr.
    ///
    /// A non-zero exit is not an error here; callers decide what it means.
    async fn output(&self, invocation: &Invocation) -> io::Result<CommandOutput>;

    /// Run with stdout and stderr attached to the terminal and return the exit code.
    async fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>>;
}

/// Runner that spawns real processes with tokio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn output(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        debug!("Running: {}", invocation.display());

        let mut cmd = build_command(invocation);
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        let writer = feed_stdin(&mut child, invocation.stdin.clone());
        let output = child.wait_with_output().await?;
        finish_stdin(writer).await?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
        debug!("Running interactively: {}", invocation.display());

        let mut cmd = build_command(invocation);
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());

        let mut child = cmd.spawn()?;
        let writer = feed_stdin(&mut child, invocation.stdin.clone());
        let status = child.wait().await?;
        finish_stdin(writer).await?;

        Ok(status.code())
    }
}

fn build_command(invocation: &Invocation) -> Command {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    if let Some(dir) = &invocation.current_dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(if invocation.stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd
}

/// Write stdin from a separate task so a child that talks before it has read
/// everything cannot block on a full pipe.
fn feed_stdin(child: &mut Child, input: Option<String>) -> Option<JoinHandle<io::Result<()>>> {
    let input = input?;
    let mut stdin = child.stdin.take()?;
    Some(tokio::spawn(async move {
        stdin.write_all(input.as_bytes()).await?;
        // Dropping the handle closes the pipe and signals end of input.
        drop(stdin);
        Ok::<(), io::Error>(())
    }))
}

async fn finish_stdin(writer: Option<JoinHandle<io::Result<()>>>) -> io::Result<()> {
    let Some(writer) = writer else {
        return Ok(());
    };

    match writer.await {
        Ok(Ok(())) => Ok(()),
        // The child exited (or a pager was quit) before reading all input.
        Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            debug!("Child closed stdin early: {}", e);
            Ok(())
        }
        Ok(Err(e)) => Err(e),
        Err(e) => Err(io::Error::other(e)),
    }
}
