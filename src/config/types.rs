use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::gate::{AttemptPolicy, GatePolicy, DEFAULT_ATTEMPTS, DEFAULT_MAX_LINE_LEN};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub launch: LaunchConfig,
}

/// Passphrase gate settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Passphrase compared against each entered line.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Attempt budget (default: 3).
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// How `attempts` maps to permitted guesses (default: compatible).
    #[serde(default)]
    pub attempt_policy: AttemptPolicy,
    /// Longest line kept for comparison; 0 disables the cap (default: 1024).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Disable canonical mode and echo while reading (default: false).
    #[serde(default)]
    pub raw_mode: bool,
    /// Read from /dev/tty instead of stdin (default: false).
    #[serde(default)]
    pub use_tty: bool,
    /// Reader poll timeout in milliseconds (default: 50).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Prompt and feedback messages written to stderr.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_prompt_enabled")]
    pub enabled: bool,
    #[serde(default = "default_prompt_text")]
    pub text: String,
}

/// Command started once access is granted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Program followed by its arguments. Empty means nothing is launched.
    #[serde(default)]
    pub command: Vec<String>,
}

fn default_secret() -> String {
    "lmnop".to_string()
}

fn default_attempts() -> u32 {
    DEFAULT_ATTEMPTS
}

fn default_max_line_len() -> usize {
    DEFAULT_MAX_LINE_LEN
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_prompt_enabled() -> bool {
    true
}

fn default_prompt_text() -> String {
    "Passphrase: ".to_string()
}

impl GateConfig {
    /// Gate policy built from these settings.
    pub fn policy(&self) -> GatePolicy {
        GatePolicy::new(self.secret.as_bytes())
            .with_attempt_policy(self.attempt_policy)
            .with_max_line_len(self.line_cap())
    }

    pub fn line_cap(&self) -> Option<usize> {
        (self.max_line_len > 0).then_some(self.max_line_len)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            attempts: default_attempts(),
            attempt_policy: AttemptPolicy::default(),
            max_line_len: default_max_line_len(),
            raw_mode: false,
            use_tty: false,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl std::fmt::Debug for GateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateConfig")
            .field("secret", &"<redacted>")
            .field("attempts", &self.attempts)
            .field("attempt_policy", &self.attempt_policy)
            .field("max_line_len", &self.max_line_len)
            .field("raw_mode", &self.raw_mode)
            .field("use_tty", &self.use_tty)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            enabled: default_prompt_enabled(),
            text: default_prompt_text(),
        }
    }
}
