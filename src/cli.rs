use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::gate::AttemptPolicy;

/// Ask for a passphrase on the terminal and exit (or run a command) only
/// when it is entered correctly.
#[derive(Debug, Parser)]
#[command(name = "keygate", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/keygate/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the attempt budget
    #[arg(long, value_name = "N")]
    pub attempts: Option<u32>,

    /// Allow exactly N guesses instead of N + 1
    #[arg(long)]
    pub exact_attempts: bool,

    /// Disable line buffering and echo while reading
    #[arg(long)]
    pub raw: bool,

    /// Read from /dev/tty instead of stdin
    #[arg(long)]
    pub tty: bool,

    /// Do not print the prompt or retry messages
    #[arg(long)]
    pub no_prompt: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to run after access is granted
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Config file to load: `--config` if given, the default path otherwise.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::config_path)
    }

    /// Apply command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(attempts) = self.attempts {
            config.gate.attempts = attempts;
        }
        if self.exact_attempts {
            config.gate.attempt_policy = AttemptPolicy::Exact;
        }
        if self.raw {
            config.gate.raw_mode = true;
        }
        if self.tty {
            config.gate.use_tty = true;
        }
        if self.no_prompt {
            config.prompt.enabled = false;
        }
        if !self.command.is_empty() {
            config.launch.command = self.command.clone();
        }
    }
}
