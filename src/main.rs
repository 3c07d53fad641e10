mod cli;
mod config;
mod content;
mod model;
mod scheduler;
mod tracker;
mod video;

use std::process;

use tracing_subscriber::EnvFilter;

use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if scheduler::is_clipboard_holder() {
        let code = i32::from(scheduler::hold_clipboard().is_err());
        process::exit(code);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("handraiser=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
