use std::process;

use clap::Parser;
use git_mono::cli::Cli;
use git_mono::ui;

fn main() {
    // Logs go to stderr so stdout stays scriptable; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.execute() {
        ui::display_error(&e.to_string());

        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }

        process::exit(1);
    }
}
