use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use keygate::app::{self, exit_code};
use keygate::cli::Cli;
use keygate::config::Config;
use keygate::logging::init_tracing;
use keygate::shutdown::ShutdownCoordinator;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" });

    let mut config = match Config::load_from(&cli.config_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return to_exit_code(exit_code::CONFIG);
        }
    };
    cli.apply(&mut config);
    if let Err(err) = config.validate() {
        eprintln!("Error: {}", err);
        return to_exit_code(exit_code::CONFIG);
    }

    match run(config) {
        Ok(code) => to_exit_code(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> anyhow::Result<i32> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let shutdown = ShutdownCoordinator::new();
    let code = runtime.block_on(app::run(config, &shutdown))?;
    Ok(code)
}

fn to_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
