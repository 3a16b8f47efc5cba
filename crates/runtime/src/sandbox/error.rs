use strum::{AsRefStr, Display};
use thiserror::Error;

/// Which child process a sandbox failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Compile,
    Run,
}

/// Reasons a submission did not produce the expected output.
///
/// Messages are written for the player; they are shown verbatim in the
/// terminal subview.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SandboxError {
    #[error("No public class found. Declare your program as `public class Main`.")]
    NoEntryPointFound,

    #[error("Compiler `{program}` is not available: {reason}")]
    CompilerUnavailable { program: String, reason: String },

    #[error("Compilation failed:\n{stderr}")]
    CompilationError { stderr: String },

    #[error("Runtime `{program}` is not available: {reason}")]
    RuntimeUnavailable { program: String, reason: String },

    #[error("Program failed:\n{stderr}")]
    ExecutionError { stderr: String },

    #[error("Wrong output. Expected `{expected}` but got `{actual}`.")]
    OutputMismatch { expected: String, actual: String },

    #[error("The {stage} step exceeded {limit_ms} ms and was stopped.")]
    TimedOut { stage: Stage, limit_ms: u64 },

    #[error("Could not prepare the sandbox workspace: {0}")]
    Workspace(String),
}
