// Serialized gateway to the external `taghive` process.
//
// The backend is a stateful, non-concurrency-safe command-line tool, so every
// invocation goes through one FIFO queue: a single worker task drains jobs in
// submission order and never overlaps two subprocesses. A failing call does
// not abort the queue; later calls still run.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use tagline_common::types::TagNameError;

use crate::invoke::{ToolInvocation, TOOL_BINARY};

/// Default search location for the tool binary when no directory is
/// configured.
pub const DEFAULT_TOOL_DIR: &str = "/usr/local/bin";

/// The single error kind at the core boundary: the subprocess exited
/// abnormally or could not be launched. Never retried automatically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ToolError {
    pub message: String,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    fn spawn(invocation: &ToolInvocation, error: &io::Error) -> Self {
        Self::new(format!("failed to run `{invocation}`: {error}"))
    }

    fn failed(invocation: &ToolInvocation, code: Option<i32>, stderr: &str) -> Self {
        Self::new(format!("`{invocation}` failed with code {:?}: {}", code, stderr.trim()))
    }
}

impl From<TagNameError> for ToolError {
    fn from(error: TagNameError) -> Self {
        Self::new(error.to_string())
    }
}

/// Raw outcome of one subprocess run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Runs the external tool. Injectable so tests can script responses and
/// observe invocation order.
pub trait CommandExecutor: Send + Sync {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        path_prepend: &Path,
    ) -> Result<CommandResult, io::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCommandExecutor;

impl CommandExecutor for ProcessCommandExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: &Path,
        path_prepend: &Path,
    ) -> Result<CommandResult, io::Error> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .env("PATH", prepend_search_path(path_prepend))
            .output()?;
        Ok(CommandResult {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// `PATH` for one invocation: the resolved tool directory ahead of the
/// inherited search path. Scoped to the single subprocess, never exported
/// process-wide, so configuration changes apply on the next call.
fn prepend_search_path(dir: &Path) -> std::ffi::OsString {
    match std::env::var_os("PATH") {
        Some(existing) => {
            let mut paths = vec![dir.to_path_buf()];
            paths.extend(std::env::split_paths(&existing));
            std::env::join_paths(paths).unwrap_or_else(|_| dir.as_os_str().to_os_string())
        }
        None => dir.as_os_str().to_os_string(),
    }
}

/// Where to find the tool binary. Re-read on every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSettings {
    /// Directory containing the `taghive` executable; `None` falls back to
    /// [`DEFAULT_TOOL_DIR`].
    pub tool_dir: Option<PathBuf>,
}

impl ToolSettings {
    fn resolved_dir(&self) -> PathBuf {
        self.tool_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_TOOL_DIR))
    }
}

struct Job {
    invocation: ToolInvocation,
    workspace_root: PathBuf,
    reply: oneshot::Sender<Result<String, ToolError>>,
}

/// FIFO gateway: submission order is execution order, one subprocess at a
/// time, failures isolated per call.
pub struct CommandGateway {
    queue: mpsc::UnboundedSender<Job>,
    settings: Arc<RwLock<ToolSettings>>,
}

impl CommandGateway {
    /// Gateway backed by real subprocesses. Must be created inside a tokio
    /// runtime; the worker task lives as long as the gateway.
    pub fn new(settings: ToolSettings) -> Self {
        Self::with_executor(settings, ProcessCommandExecutor)
    }

    pub fn with_executor<E>(settings: ToolSettings, executor: E) -> Self
    where
        E: CommandExecutor + 'static,
    {
        let settings = Arc::new(RwLock::new(settings));
        let (queue, jobs) = mpsc::unbounded_channel();
        tokio::spawn(drain_queue(jobs, Arc::clone(&settings), Arc::new(executor)));
        Self { queue, settings }
    }

    /// Point the gateway at a different tool directory. Takes effect on the
    /// next call; in-flight and already-queued calls keep the directory they
    /// resolved at dispatch time.
    pub fn set_tool_dir(&self, tool_dir: Option<PathBuf>) {
        if let Ok(mut settings) = self.settings.write() {
            settings.tool_dir = tool_dir;
        }
    }

    /// Queue an invocation and wait for its outcome. Calls submitted earlier
    /// have settled (succeeded or failed) before this one starts.
    pub async fn run(
        &self,
        invocation: ToolInvocation,
        workspace_root: &Path,
    ) -> Result<String, ToolError> {
        let (reply, outcome) = oneshot::channel();
        let job = Job { invocation, workspace_root: workspace_root.to_path_buf(), reply };
        self.queue
            .send(job)
            .map_err(|_| ToolError::new("command gateway worker is gone"))?;
        outcome.await.map_err(|_| ToolError::new("command gateway dropped the call"))?
    }
}

async fn drain_queue(
    mut jobs: mpsc::UnboundedReceiver<Job>,
    settings: Arc<RwLock<ToolSettings>>,
    executor: Arc<dyn CommandExecutor>,
) {
    while let Some(job) = jobs.recv().await {
        let result = run_one(&job, &settings, &executor).await;
        // Receiver may have been dropped; the call itself still ran.
        let _ = job.reply.send(result);
    }
}

async fn run_one(
    job: &Job,
    settings: &Arc<RwLock<ToolSettings>>,
    executor: &Arc<dyn CommandExecutor>,
) -> Result<String, ToolError> {
    // Resolve the tool location once per call so config edits apply without
    // a restart.
    let tool_dir = match settings.read() {
        Ok(settings) => settings.resolved_dir(),
        Err(_) => PathBuf::from(DEFAULT_TOOL_DIR),
    };

    debug!(command = %job.invocation, cwd = %job.workspace_root.display(), "running external tool");

    let invocation = job.invocation.clone();
    let cwd = job.workspace_root.clone();
    let executor = Arc::clone(executor);
    let outcome = tokio::task::spawn_blocking(move || {
        let result = executor.execute(TOOL_BINARY, invocation.args(), &cwd, &tool_dir);
        (invocation, result)
    })
    .await;

    let (invocation, result) = match outcome {
        Ok(pair) => pair,
        Err(join_error) => {
            return Err(ToolError::new(format!("external tool call panicked: {join_error}")))
        }
    };

    match result {
        Err(error) => Err(ToolError::spawn(&invocation, &error)),
        Ok(result) if result.success => Ok(result.stdout),
        Ok(result) => {
            let stderr =
                if result.stderr.trim().is_empty() { &result.stdout } else { &result.stderr };
            Err(ToolError::failed(&invocation, result.code, stderr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Debug, Clone)]
    struct Invocation {
        program: String,
        args: Vec<String>,
        cwd: PathBuf,
        path_prepend: PathBuf,
        started: Instant,
        finished: Instant,
    }

    #[derive(Clone)]
    struct MockExecutor {
        calls: Arc<Mutex<Vec<Invocation>>>,
        responses: Arc<Mutex<VecDeque<Result<CommandResult, io::Error>>>>,
        delay: Option<Duration>,
    }

    impl MockExecutor {
        fn new(responses: Vec<Result<CommandResult, io::Error>>) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                responses: Arc::new(Mutex::new(VecDeque::from(responses))),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn calls(&self) -> Vec<Invocation> {
            self.calls.lock().expect("mock calls lock poisoned").clone()
        }
    }

    impl CommandExecutor for MockExecutor {
        fn execute(
            &self,
            program: &str,
            args: &[String],
            cwd: &Path,
            path_prepend: &Path,
        ) -> Result<CommandResult, io::Error> {
            let started = Instant::now();
            if let Some(delay) = self.delay {
                std::thread::sleep(delay);
            }
            let response = self
                .responses
                .lock()
                .expect("mock responses lock poisoned")
                .pop_front()
                .expect("missing mock response");
            self.calls.lock().expect("mock calls lock poisoned").push(Invocation {
                program: program.to_string(),
                args: args.to_vec(),
                cwd: cwd.to_path_buf(),
                path_prepend: path_prepend.to_path_buf(),
                started,
                finished: Instant::now(),
            });
            response
        }
    }

    fn ok(stdout: &str) -> Result<CommandResult, io::Error> {
        Ok(CommandResult {
            success: true,
            code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    fn exit_1(stderr: &str) -> Result<CommandResult, io::Error> {
        Ok(CommandResult {
            success: false,
            code: Some(1),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    fn root() -> PathBuf {
        PathBuf::from("/workspace")
    }

    #[tokio::test]
    async fn successful_call_returns_stdout() {
        let mock = MockExecutor::new(vec![ok("alpha\nbeta\n")]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock.clone());

        let output = gateway
            .run(ToolInvocation::list_tags(), &root())
            .await
            .expect("listing should succeed");

        assert_eq!(output, "alpha\nbeta\n");
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, TOOL_BINARY);
        assert_eq!(calls[0].args, ["tags"]);
        assert_eq!(calls[0].cwd, root());
    }

    #[tokio::test]
    async fn nonzero_exit_becomes_tool_error_with_stderr() {
        let mock = MockExecutor::new(vec![exit_1("no workspace database found\n")]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock);

        let error = gateway
            .run(ToolInvocation::list_tags(), &root())
            .await
            .expect_err("listing should fail");

        assert_eq!(
            error.message,
            "`taghive tags` failed with code Some(1): no workspace database found"
        );
    }

    #[tokio::test]
    async fn nonzero_exit_with_empty_stderr_falls_back_to_stdout() {
        let mock = MockExecutor::new(vec![Ok(CommandResult {
            success: false,
            code: Some(2),
            stdout: "usage: taghive tags [file]\n".to_string(),
            stderr: String::new(),
        })]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock);

        let error = gateway.run(ToolInvocation::list_tags(), &root()).await.expect_err("should fail");
        assert!(error.message.contains("usage: taghive tags"));
    }

    #[tokio::test]
    async fn launch_failure_becomes_tool_error() {
        let mock = MockExecutor::new(vec![Err(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        ))]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock);

        let error = gateway.run(ToolInvocation::init(), &root()).await.expect_err("should fail");
        assert!(error.message.starts_with("failed to run `taghive init`"));
        assert!(error.message.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn calls_run_in_submission_order_without_overlap() {
        let mock = MockExecutor::new(vec![ok("created tag x\n"), ok("x\n")])
            .with_delay(Duration::from_millis(40));
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock.clone());

        let root = root();
        let slow = gateway.run(ToolInvocation::create_tag("x"), &root);
        let fast = gateway.run(ToolInvocation::list_tags(), &root);
        let (first, second) = tokio::join!(slow, fast);
        first.expect("create should succeed");
        second.expect("list should succeed");

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, ["create", "x"]);
        assert_eq!(calls[1].args, ["tags"]);
        assert!(
            calls[0].finished <= calls[1].started,
            "second call must start only after the first settles"
        );
    }

    #[tokio::test]
    async fn a_failed_call_does_not_abort_the_queue() {
        let mock = MockExecutor::new(vec![exit_1("tag already exists"), ok("x\ny\n")]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock.clone());

        let root = root();
        let first = gateway.run(ToolInvocation::create_tag("x"), &root);
        let second = gateway.run(ToolInvocation::list_tags(), &root);
        let (first, second) = tokio::join!(first, second);

        first.expect_err("first call should fail");
        assert_eq!(second.expect("second call should still run"), "x\ny\n");
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn configured_tool_dir_is_prepended_per_call() {
        let mock = MockExecutor::new(vec![ok(""), ok("")]);
        let settings = ToolSettings { tool_dir: Some(PathBuf::from("/opt/taghive/bin")) };
        let gateway = CommandGateway::with_executor(settings, mock.clone());

        gateway.run(ToolInvocation::list_tags(), &root()).await.expect("first call");

        // Config change applies to the next call, no restart needed.
        gateway.set_tool_dir(None);
        gateway.run(ToolInvocation::list_tags(), &root()).await.expect("second call");

        let calls = mock.calls();
        assert_eq!(calls[0].path_prepend, PathBuf::from("/opt/taghive/bin"));
        assert_eq!(calls[1].path_prepend, PathBuf::from(DEFAULT_TOOL_DIR));
    }

    #[tokio::test]
    async fn unset_tool_dir_uses_the_default_search_location() {
        let mock = MockExecutor::new(vec![ok("")]);
        let gateway = CommandGateway::with_executor(ToolSettings::default(), mock.clone());

        gateway.run(ToolInvocation::list_tags(), &root()).await.expect("call should succeed");
        assert_eq!(mock.calls()[0].path_prepend, PathBuf::from(DEFAULT_TOOL_DIR));
    }
}
