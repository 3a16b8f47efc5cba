//! Host configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use runtime::RuntimeConfig;

/// Configuration for the headless host.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub runtime: RuntimeConfig,
    pub player_name: String,
    /// Write the seeded campaign as JSON before starting.
    pub campaign_dump: Option<PathBuf>,
    /// Directory holding `<PuzzleTitle>.java` solutions that replace the
    /// built-in ones.
    pub solutions_dir: Option<PathBuf>,
    /// Upper bound for each scripted stage before the run gives up.
    pub stage_timeout: Duration,
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PLAYER_NAME` - Display name of the demo player (default: Ada)
    /// - `CAMPAIGN_DUMP` - Path to write the campaign JSON to
    /// - `SOLUTIONS_DIR` - Directory with solution overrides
    /// - `SCRIPT_STAGE_TIMEOUT_MS` - Per-stage limit (default: 30000)
    /// - everything [`RuntimeConfig::from_env`] reads
    pub fn from_env() -> Self {
        let mut config = Self {
            runtime: RuntimeConfig::from_env(),
            ..Self::default()
        };

        if let Ok(name) = env::var("PLAYER_NAME") {
            config.player_name = name;
        }

        config.campaign_dump = env::var("CAMPAIGN_DUMP").ok().map(PathBuf::from);
        config.solutions_dir = env::var("SOLUTIONS_DIR").ok().map(PathBuf::from);

        if let Some(millis) = read_env::<u64>("SCRIPT_STAGE_TIMEOUT_MS") {
            config.stage_timeout = Duration::from_millis(millis.max(1));
        }

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            player_name: "Ada".to_string(),
            campaign_dump: None,
            solutions_dir: None,
            stage_timeout: Duration::from_secs(30),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
