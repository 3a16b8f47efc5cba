//! Sandbox pipeline against scripted toolchains.
//!
//! `sh` stands in for the compiler and runtime so every failure mode can be
//! produced without a JDK. The real-toolchain test skips itself when `javac`
//! is not installed.
#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use common::{MAIN_SOURCE, scripted_sandbox};
use runtime::{CodeExecutionSandbox, SandboxConfig, SandboxError, Stage, ToolCommand};

fn sandbox_in(root: &tempfile::TempDir, config: SandboxConfig) -> CodeExecutionSandbox {
    CodeExecutionSandbox::new(SandboxConfig {
        work_root: Some(root.path().to_path_buf()),
        ..config
    })
}

fn assert_workspace_removed(root: &tempfile::TempDir) {
    let leftovers = std::fs::read_dir(root.path()).unwrap().count();
    assert_eq!(leftovers, 0, "sandbox workspace left behind");
}

#[tokio::test]
async fn matching_output_succeeds_and_cleans_up() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(&root, scripted_sandbox("printf 'Aletheia\\r\\n'"));

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.output, "Aletheia");
    assert_eq!(result.error_message(), None);
    assert_workspace_removed(&root);
}

#[tokio::test]
async fn source_is_written_under_entry_point_name() {
    let root = tempfile::tempdir().unwrap();
    let config = SandboxConfig {
        // The compiler succeeds only if `Greeter.java` exists in its CWD.
        compiler: ToolCommand::new("sh", ["-c", "test -f Greeter.java"]),
        runtime: ToolCommand::new("sh", ["-c", "echo \"$0\"", "{entry}"]),
        ..scripted_sandbox("")
    };
    let sandbox = sandbox_in(&root, config);

    let result = sandbox
        .compile_and_run("public final class Greeter {}", "Greeter")
        .await;

    assert!(result.success, "{:?}", result.error);
}

#[tokio::test]
async fn missing_entry_point_runs_nothing() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(&root, scripted_sandbox("echo Aletheia"));

    let result = sandbox
        .compile_and_run("class Main { }", "Aletheia")
        .await;

    assert!(!result.success);
    assert_eq!(result.error, Some(SandboxError::NoEntryPointFound));
    assert_workspace_removed(&root);
}

#[tokio::test]
async fn compiler_failure_reports_stderr_verbatim() {
    let root = tempfile::tempdir().unwrap();
    let config = SandboxConfig {
        compiler: ToolCommand::new(
            "sh",
            ["-c", "echo 'Main.java:3: error: missing semicolon' >&2; exit 1"],
        ),
        ..scripted_sandbox("echo Aletheia")
    };
    let sandbox = sandbox_in(&root, config);

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert_eq!(
        result.error,
        Some(SandboxError::CompilationError {
            stderr: "Main.java:3: error: missing semicolon\n".to_string()
        })
    );
    assert!(result.error_message().unwrap().contains("missing semicolon"));
    assert_workspace_removed(&root);
}

#[tokio::test]
async fn stderr_output_is_an_execution_error() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(
        &root,
        scripted_sandbox("echo Aletheia; echo 'Exception in thread main' >&2"),
    );

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(matches!(
        result.error,
        Some(SandboxError::ExecutionError { ref stderr }) if stderr.contains("Exception")
    ));
}

#[tokio::test]
async fn silent_non_zero_exit_is_an_execution_error() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(&root, scripted_sandbox("echo Aletheia; exit 3"));

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(matches!(
        result.error,
        Some(SandboxError::ExecutionError { .. })
    ));
}

#[tokio::test]
async fn comparison_is_case_sensitive() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(&root, scripted_sandbox("echo aletheia"));

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(!result.success);
    assert_eq!(result.output, "aletheia");
    assert_eq!(
        result.error,
        Some(SandboxError::OutputMismatch {
            expected: "Aletheia".to_string(),
            actual: "aletheia".to_string(),
        })
    );
    assert_workspace_removed(&root);
}

#[tokio::test]
async fn missing_tools_are_reported_by_stage() {
    let root = tempfile::tempdir().unwrap();

    let no_compiler = sandbox_in(
        &root,
        SandboxConfig {
            compiler: ToolCommand::new("definitely-not-a-compiler-7f3a", ["{file}"]),
            ..scripted_sandbox("echo Aletheia")
        },
    );
    let result = no_compiler.compile_and_run(MAIN_SOURCE, "Aletheia").await;
    assert!(matches!(
        result.error,
        Some(SandboxError::CompilerUnavailable { ref program, .. })
            if program == "definitely-not-a-compiler-7f3a"
    ));

    let no_runtime = sandbox_in(
        &root,
        SandboxConfig {
            runtime: ToolCommand::new("definitely-not-a-runtime-7f3a", ["{entry}"]),
            ..scripted_sandbox("")
        },
    );
    let result = no_runtime.compile_and_run(MAIN_SOURCE, "Aletheia").await;
    assert!(matches!(
        result.error,
        Some(SandboxError::RuntimeUnavailable { .. })
    ));

    assert_workspace_removed(&root);
}

#[tokio::test]
async fn runaway_program_is_killed_at_the_limit() {
    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(
        &root,
        SandboxConfig {
            timeout: Some(Duration::from_millis(200)),
            ..scripted_sandbox("exec sleep 30")
        },
    );

    let started = Instant::now();
    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(
        result.error,
        Some(SandboxError::TimedOut {
            stage: Stage::Run,
            limit_ms: 200,
        })
    );
    assert_workspace_removed(&root);
}

#[test]
fn failure_messages_are_distinct() {
    let errors = [
        SandboxError::NoEntryPointFound,
        SandboxError::CompilerUnavailable {
            program: "javac".into(),
            reason: "not found".into(),
        },
        SandboxError::CompilationError {
            stderr: "x".into(),
        },
        SandboxError::RuntimeUnavailable {
            program: "java".into(),
            reason: "not found".into(),
        },
        SandboxError::ExecutionError {
            stderr: "x".into(),
        },
        SandboxError::OutputMismatch {
            expected: "x".into(),
            actual: "y".into(),
        },
    ];
    let messages: std::collections::HashSet<String> =
        errors.iter().map(ToString::to_string).collect();
    assert_eq!(messages.len(), errors.len());
}

#[tokio::test]
async fn real_jdk_prints_aletheia() {
    let javac_present = std::process::Command::new("javac")
        .arg("-version")
        .output()
        .is_ok_and(|out| out.status.success());
    if !javac_present {
        eprintln!("javac not installed; skipping");
        return;
    }

    let root = tempfile::tempdir().unwrap();
    let sandbox = sandbox_in(
        &root,
        SandboxConfig {
            timeout: Some(Duration::from_secs(60)),
            ..SandboxConfig::default()
        },
    );

    let result = sandbox.compile_and_run(MAIN_SOURCE, "Aletheia").await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.output, "Aletheia");
    assert_workspace_removed(&root);
}
