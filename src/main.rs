use std::io;
use std::process::ExitCode;

use telshell::{Shell, ShellConfig, ShellResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "shell terminated");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> ShellResult<()> {
    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), ShellConfig::default())?;

    info!(
        version = telshell::VERSION,
        transport = sentinel_stream::VERSION,
        "telshell starting"
    );
    shell.run()
}

/// Diagnostics go to stderr, off unless RUST_LOG asks for them, so stdout
/// carries nothing but shell output.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
