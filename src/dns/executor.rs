use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;
use tokio::process::Command;

use crate::dns::types::CommandScript;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to write script artifact: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to launch script: {0}")]
    Launch(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExecutionError>;

#[cfg(windows)]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x08000000;

/// A file that must not outlive the operation that created it.
///
/// Dropping the guard deletes the file; deletion failure is swallowed and
/// logged at debug level only.
pub struct TransientArtifact {
    path: PathBuf,
}

impl TransientArtifact {
    /// Claims an artifact path that a later step will create, so the file is
    /// removed even when that step or its consumers fail.
    pub fn claim(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Writes `lines` to `path`, one per line, and claims the result.
    pub fn write(path: impl Into<PathBuf>, lines: &[String]) -> Result<Self> {
        let path = path.into();
        let contents = lines.join("\n") + "\n";
        std::fs::write(&path, contents).map_err(ExecutionError::Write)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            debug!(
                "could not delete transient artifact {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

/// Marks the artifact hidden. Cosmetic only; failures are ignored.
async fn hide(path: &Path) {
    #[cfg(windows)]
    {
        let mut command = Command::new("attrib");
        command.arg("+h").arg(path);
        command.creation_flags(CREATE_NO_WINDOW);
        let _ = command.status().await;
    }
    #[cfg(not(windows))]
    let _ = path;
}

#[cfg(windows)]
fn interpreter(path: &Path) -> Command {
    let mut command = Command::new("cmd.exe");
    command.arg("/C").arg(path);
    command
}

#[cfg(not(windows))]
fn interpreter(path: &Path) -> Command {
    let mut command = Command::new("sh");
    command.arg(path);
    command
}

/// Writes `script` to its artifact file, executes it and waits for
/// completion. The artifact is deleted on every exit path. Per-line command
/// failures inside the script are not detected; only a launch failure is an
/// error.
pub async fn run_script(script: &CommandScript) -> Result<()> {
    let artifact = TransientArtifact::write(&script.file_name, &script.lines)?;
    hide(artifact.path()).await;

    let command = interpreter(artifact.path());
    execute(command, artifact).await
}

/// Runs `command` to completion while holding the artifact guard, so the
/// script file is deleted whether or not the launch succeeds.
async fn execute(mut command: Command, _artifact: TransientArtifact) -> Result<()> {
    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);

    command.status().await.map_err(ExecutionError::Launch)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_and_drop_deletes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("script.bat");

        let artifact = TransientArtifact::write(&path, &["@echo off".to_string()])
            .expect("write should succeed");
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_claim_tolerates_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let guard = TransientArtifact::claim(dir.path().join("never_created.txt"));
        // Dropping must not panic even though nothing was written.
        drop(guard);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("no_such_dir").join("script.bat");
        let result = TransientArtifact::write(&path, &[]);
        assert!(matches!(result, Err(ExecutionError::Write(_))));
    }

    #[tokio::test]
    async fn test_cleanup_after_launch_failure() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("orphan.bat");
        let artifact = TransientArtifact::write(&path, &["@echo off".to_string()])
            .expect("write should succeed");
        assert!(path.exists());

        let command = Command::new("dnswitch-no-such-interpreter");
        let result = execute(command, artifact).await;
        assert!(matches!(result, Err(ExecutionError::Launch(_))));
        assert!(!path.exists(), "artifact must not survive a launch failure");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_script_executes_and_cleans_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script_path = dir.path().join("run.sh");
        let marker = dir.path().join("marker.txt");

        let script = CommandScript {
            file_name: script_path.to_string_lossy().into_owned(),
            lines: vec![format!("echo ran > {}", marker.display())],
        };

        run_script(&script).await.expect("run should succeed");
        assert!(marker.exists(), "script body did not execute");
        assert!(!script_path.exists(), "script artifact leaked");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_script_ignores_script_exit_status() {
        let dir = tempfile::tempdir().expect("tempdir");
        let script_path = dir.path().join("fail.sh");

        let script = CommandScript {
            file_name: script_path.to_string_lossy().into_owned(),
            lines: vec!["exit 7".to_string()],
        };

        // A failing script body is not an execution error.
        run_script(&script).await.expect("exit status is not inspected");
        assert!(!script_path.exists());
    }
}
