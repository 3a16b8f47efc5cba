//! Code execution sandbox.
//!
//! Each submission gets its own temporary workspace: the source is written
//! under its entry-point name, compiled, executed, and the normalized stdout
//! compared against the puzzle's expected output. The workspace is removed
//! on every path; removal failures are logged and never change the result.
//!
//! The sandbox is stateless between calls and safe to share across tasks.
mod entry_point;
mod error;
mod process;

pub use entry_point::extract_entry_point;
pub use error::{SandboxError, Stage};

use std::path::Path;
use std::time::Duration;

use game_core::{normalize_output, outputs_match};
use tempfile::TempDir;

use crate::config::{SandboxConfig, ToolCommand};
use process::{ToolFailure, run_tool};

/// Outcome of a single compile-and-run attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationResult {
    pub success: bool,
    /// Normalized program output; empty when the program never ran.
    pub output: String,
    pub error: Option<SandboxError>,
}

impl CompilationResult {
    fn succeeded(output: String) -> Self {
        Self {
            success: true,
            output,
            error: None,
        }
    }

    fn failed(error: SandboxError) -> Self {
        let output = match &error {
            SandboxError::OutputMismatch { actual, .. } => actual.clone(),
            _ => String::new(),
        };
        Self {
            success: false,
            output,
            error: Some(error),
        }
    }

    /// Player-facing failure description.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Compiles and runs untrusted submissions with external tools.
#[derive(Clone, Debug)]
pub struct CodeExecutionSandbox {
    config: SandboxConfig,
}

impl CodeExecutionSandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Compile `source`, run it and compare its stdout with `expected_output`.
    ///
    /// Both sides are normalized before comparison. Never panics and never
    /// leaves a workspace behind.
    pub async fn compile_and_run(&self, source: &str, expected_output: &str) -> CompilationResult {
        match self.execute(source, expected_output).await {
            Ok(output) => {
                tracing::info!(target: "runtime::sandbox", "submission produced the expected output");
                CompilationResult::succeeded(output)
            }
            Err(error) => {
                tracing::info!(target: "runtime::sandbox", kind = ?error, "submission rejected");
                CompilationResult::failed(error)
            }
        }
    }

    async fn execute(&self, source: &str, expected_output: &str) -> Result<String, SandboxError> {
        let entry = extract_entry_point(source).ok_or(SandboxError::NoEntryPointFound)?;
        let workspace = self.create_workspace()?;

        tracing::debug!(
            target: "runtime::sandbox",
            entry,
            workspace = %workspace.path().display(),
            "prepared sandbox workspace"
        );

        let result = self
            .run_in(workspace.path(), entry, source, expected_output)
            .await;

        let path = workspace.path().to_path_buf();
        if let Err(error) = workspace.close() {
            tracing::warn!(
                target: "runtime::sandbox",
                workspace = %path.display(),
                %error,
                "failed to remove sandbox workspace"
            );
        }

        result
    }

    fn create_workspace(&self) -> Result<TempDir, SandboxError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("sandbox-");
        let created = match &self.config.work_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        created.map_err(|e| SandboxError::Workspace(e.to_string()))
    }

    async fn run_in(
        &self,
        dir: &Path,
        entry: &str,
        source: &str,
        expected_output: &str,
    ) -> Result<String, SandboxError> {
        let file_name = format!("{entry}.{}", self.config.source_extension);
        tokio::fs::write(dir.join(&file_name), source)
            .await
            .map_err(|e| SandboxError::Workspace(e.to_string()))?;

        let compiler = &self.config.compiler;
        let compiled = run_tool(
            compiler,
            &compiler.render_args(&file_name, entry),
            dir,
            self.config.timeout,
        )
        .await
        .map_err(|failure| self.classify(failure, compiler, Stage::Compile))?;

        if !compiled.status.success() {
            return Err(SandboxError::CompilationError {
                stderr: compiled.stderr,
            });
        }

        let runtime = &self.config.runtime;
        let ran = run_tool(
            runtime,
            &runtime.render_args(&file_name, entry),
            dir,
            self.config.timeout,
        )
        .await
        .map_err(|failure| self.classify(failure, runtime, Stage::Run))?;

        if !ran.stderr.is_empty() || !ran.status.success() {
            let stderr = if ran.stderr.is_empty() {
                format!("process exited with {}", ran.status)
            } else {
                ran.stderr
            };
            return Err(SandboxError::ExecutionError { stderr });
        }

        if !outputs_match(&ran.stdout, expected_output) {
            return Err(SandboxError::OutputMismatch {
                expected: normalize_output(expected_output),
                actual: normalize_output(&ran.stdout),
            });
        }

        Ok(normalize_output(&ran.stdout))
    }

    fn classify(&self, failure: ToolFailure, tool: &ToolCommand, stage: Stage) -> SandboxError {
        match failure {
            ToolFailure::Spawn(error) => {
                let program = tool.program.clone();
                let reason = error.to_string();
                match stage {
                    Stage::Compile => SandboxError::CompilerUnavailable { program, reason },
                    Stage::Run => SandboxError::RuntimeUnavailable { program, reason },
                }
            }
            ToolFailure::Io(error) => match stage {
                Stage::Compile => SandboxError::CompilationError {
                    stderr: error.to_string(),
                },
                Stage::Run => SandboxError::ExecutionError {
                    stderr: error.to_string(),
                },
            },
            ToolFailure::TimedOut => SandboxError::TimedOut {
                stage,
                limit_ms: self.config.timeout.map_or(0, |d| duration_millis(d)),
            },
        }
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
