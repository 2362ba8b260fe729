//! linebench CLI entry point.

use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout is reserved for structured
    // output (JSON documents and charts).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = linebench_cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
