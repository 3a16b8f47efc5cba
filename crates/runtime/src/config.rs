//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use game_core::{FixedTimeStep, GameConfig};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game: GameConfig,
    /// Period of the simulation cadence.
    pub tick_period: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Persist the player every N simulated ticks. 0 disables checkpoints.
    pub checkpoint_interval_ticks: u64,
    /// Ticks each dialogue line stays up before auto-advancing.
    pub dialogue_advance_ticks: u32,
    pub sandbox: SandboxConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_CHECKPOINT_INTERVAL_TICKS: u64 = 600;
    pub const DEFAULT_DIALOGUE_ADVANCE_TICKS: u32 = 180;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TICK_PERIOD_MS` - Simulation cadence (default: 16)
    /// - `EVENT_BUFFER_SIZE` - Per-topic event buffer (default: 100)
    /// - `COMMAND_BUFFER_SIZE` - Command queue size (default: 32)
    /// - `CHECKPOINT_INTERVAL_TICKS` - Ticks between autosaves, 0 disables (default: 600)
    /// - `DIALOGUE_ADVANCE_TICKS` - Ticks per dialogue line (default: 180)
    /// - `SANDBOX_*` - See [`SandboxConfig::from_env`]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("TICK_PERIOD_MS") {
            config.tick_period = Duration::from_millis(millis.max(1));
        }

        if let Some(capacity) = read_env::<usize>("EVENT_BUFFER_SIZE") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("COMMAND_BUFFER_SIZE") {
            config.command_buffer_size = capacity.max(1);
        }

        if let Some(interval) = read_env::<u64>("CHECKPOINT_INTERVAL_TICKS") {
            config.checkpoint_interval_ticks = interval;
        }

        if let Some(ticks) = read_env::<u32>("DIALOGUE_ADVANCE_TICKS") {
            config.dialogue_advance_ticks = ticks.max(1);
        }

        config.sandbox = SandboxConfig::from_env();
        config
    }

    pub fn time_step(&self) -> FixedTimeStep {
        FixedTimeStep::new(self.tick_period)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            tick_period: Duration::from_millis(FixedTimeStep::DEFAULT_PERIOD_MS),
            event_buffer_size: 100,
            command_buffer_size: 32,
            checkpoint_interval_ticks: Self::DEFAULT_CHECKPOINT_INTERVAL_TICKS,
            dialogue_advance_ticks: Self::DEFAULT_DIALOGUE_ADVANCE_TICKS,
            sandbox: SandboxConfig::default(),
        }
    }
}

/// External program invocation with argument templates.
///
/// Arguments may contain `{file}` (source file name inside the workspace) and
/// `{entry}` (entry-point type name) placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments with placeholders substituted.
    pub fn render_args(&self, file: &str, entry: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace("{file}", file).replace("{entry}", entry))
            .collect()
    }
}

/// Settings for the code execution sandbox.
#[derive(Clone, Debug)]
pub struct SandboxConfig {
    /// Ahead-of-time compiler, run with the workspace as CWD.
    pub compiler: ToolCommand,
    /// Runtime that executes the compiled artifact.
    pub runtime: ToolCommand,
    /// Extension of the materialised source file.
    pub source_extension: String,
    /// Wall-clock limit per child process. `None` disables the limit.
    pub timeout: Option<Duration>,
    /// Parent of the per-invocation workspaces (system temp dir by default).
    pub work_root: Option<PathBuf>,
}

impl SandboxConfig {
    /// Policy default for the per-process time limit.
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

    /// Construct sandbox configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SANDBOX_COMPILER` / `SANDBOX_COMPILER_ARGS` - Compiler program and
    ///   whitespace-separated argument template (default: `javac {file}`)
    /// - `SANDBOX_RUNTIME` / `SANDBOX_RUNTIME_ARGS` - Runtime program and
    ///   argument template (default: `java -cp . {entry}`)
    /// - `SANDBOX_SOURCE_EXTENSION` - Source file extension (default: `java`)
    /// - `SANDBOX_TIMEOUT_MS` - Per-process limit, 0 disables (default: 10000)
    /// - `SANDBOX_WORK_DIR` - Parent directory for workspaces
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(program) = env::var("SANDBOX_COMPILER") {
            config.compiler.program = program;
        }
        if let Ok(args) = env::var("SANDBOX_COMPILER_ARGS") {
            config.compiler.args = args.split_whitespace().map(String::from).collect();
        }

        if let Ok(program) = env::var("SANDBOX_RUNTIME") {
            config.runtime.program = program;
        }
        if let Ok(args) = env::var("SANDBOX_RUNTIME_ARGS") {
            config.runtime.args = args.split_whitespace().map(String::from).collect();
        }

        if let Ok(extension) = env::var("SANDBOX_SOURCE_EXTENSION") {
            config.source_extension = extension;
        }

        if let Some(millis) = read_env::<u64>("SANDBOX_TIMEOUT_MS") {
            config.timeout = timeout_from_millis(millis);
        }

        config.work_root = env::var("SANDBOX_WORK_DIR").ok().map(PathBuf::from);

        config
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            compiler: ToolCommand::new("javac", ["{file}"]),
            runtime: ToolCommand::new("java", ["-cp", ".", "{entry}"]),
            source_extension: "java".to_string(),
            timeout: Some(Duration::from_millis(Self::DEFAULT_TIMEOUT_MS)),
            work_root: None,
        }
    }
}

/// 0 means no limit.
fn timeout_from_millis(millis: u64) -> Option<Duration> {
    (millis > 0).then(|| Duration::from_millis(millis))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
