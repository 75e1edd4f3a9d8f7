use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::ToolchainFamily;
use crate::ToolchainRegistry;
use crate::types::{BuildError, BuildOutcome, Invocation, ToolchainSpec};

/// Something that can turn a source string into a timed build outcome.
///
/// The sweep is written against this so it can be driven without a real compiler.
pub trait Builder {
    fn build(&self, source: &str) -> impl Future<Output = BuildOutcome>;
}

/// Removes the listed files when dropped, whatever path led there
struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(()) => debug!("Removed {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove {}: {e}", path.display()),
            }
        }
    }
}

/// Runs one compiler invocation per call under a wall-clock deadline
pub struct BuildExecutor {
    registry: Arc<ToolchainRegistry>,
    spec: ToolchainSpec,
    timeout: Duration,
    work_dir: PathBuf,
}

impl BuildExecutor {
    pub fn new(
        registry: Arc<ToolchainRegistry>,
        spec: ToolchainSpec,
        timeout: Duration,
        work_dir: PathBuf,
    ) -> Self {
        Self {
            registry,
            spec,
            timeout,
            work_dir,
        }
    }

    pub fn family(&self) -> &dyn ToolchainFamily {
        self.registry.family_for(&self.spec.compiler)
    }

    /// Compile `source` once, collapsing every failure mode into a failed outcome
    pub async fn execute(&self, source: &str) -> BuildOutcome {
        match self.try_execute(source).await {
            Ok(outcome) => outcome,
            Err(e) => {
                match &e {
                    BuildError::CompileFailure { stderr, .. } => {
                        warn!("Compilation failed: {e}");
                        if !stderr.trim().is_empty() {
                            warn!("{}", stderr.trim_end());
                        }
                    }
                    BuildError::CompileTimeout { .. } => warn!("Compilation timed out: {e}"),
                    BuildError::Spawn(_) | BuildError::Environment(_) => {
                        warn!("Error during compilation: {e}")
                    }
                }
                BuildOutcome::failure(e.stderr().map(str::to_string))
            }
        }
    }

    async fn try_execute(&self, source: &str) -> Result<BuildOutcome, BuildError> {
        let mut file = tempfile::Builder::new()
            .prefix("regcost-")
            .suffix(".cpp")
            .tempfile_in(&self.work_dir)?;
        file.write_all(source.as_bytes())?;
        file.flush()?;
        // Closes our handle; the path is still removed on drop
        let source_path = file.into_temp_path();

        let invocation = self.family().invocation(&self.spec, &source_path);
        let _scratch = ScratchFiles {
            paths: std::iter::once(invocation.artifact.clone())
                .chain(invocation.byproducts.iter().cloned())
                .collect(),
        };

        let elapsed = self.run_compiler(&invocation).await?;

        let binary_size = match fs::metadata(&invocation.artifact) {
            Ok(meta) => meta.len(),
            Err(_) => 0,
        };
        Ok(BuildOutcome::success(elapsed.as_secs_f64(), binary_size))
    }

    async fn run_compiler(&self, invocation: &Invocation) -> Result<Duration, BuildError> {
        debug!("Running: {}", invocation.command_line());

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Drivers fork cc1plus, as and friends; a new group lets a timeout reach all of them
        #[cfg(unix)]
        cmd.process_group(0);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(BuildError::Spawn)?;
        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let waited = tokio::time::timeout(self.timeout, async {
            tokio::try_join!(child.wait(), read_pipe(stdout), read_pipe(stderr))
        })
        .await;

        let (status, stdout, stderr) = match waited {
            Ok(output) => output.map_err(BuildError::Environment)?,
            Err(_) => {
                terminate(&mut child, pid).await;
                return Err(BuildError::CompileTimeout {
                    seconds: self.timeout.as_secs(),
                });
            }
        };
        let elapsed = start.elapsed();

        if !status.success() {
            let mut stderr = String::from_utf8_lossy(&stderr).into_owned();
            // cl reports diagnostics on stdout
            if stderr.trim().is_empty() {
                stderr = String::from_utf8_lossy(&stdout).into_owned();
            }
            return Err(BuildError::CompileFailure { status, stderr });
        }

        Ok(elapsed)
    }
}

async fn read_pipe(pipe: Option<impl AsyncRead + Unpin>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Kill the compiler and every process it started, then reap the driver.
///
/// Returns only once nothing in the group can still write into the work dir.
async fn terminate(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        if let Some(pid) = pid.and_then(|pid| i32::try_from(pid).ok())
            && let Err(e) = killpg(Pid::from_raw(pid), Signal::SIGKILL)
        {
            debug!("Failed to kill process group {pid}: {e}");
        }
    }
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(e) = child.kill().await {
        debug!("Failed to kill compiler: {e}");
    }
}

impl Builder for BuildExecutor {
    fn build(&self, source: &str) -> impl Future<Output = BuildOutcome> {
        self.execute(source)
    }
}
