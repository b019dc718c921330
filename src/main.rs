use std::process::ExitCode;

use clap::Parser;
use tinyfront::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match cli.execute(std::io::stdin().lock(), &mut std::io::stdout(), &mut std::io::stderr()) {
		Ok(outcome) => outcome.into(),
		Err(e) => {
			eprintln!("Failed write output: {e}");
			ExitCode::FAILURE
		}
	}
}

/// Logs go to stderr so they never mix with reports on stdout.
fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
