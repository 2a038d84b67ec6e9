//! Escape Filter
//!
//! Replays terminal output (logs, CI output, recorded sessions) and prints
//! the text that would be left on the screen.
//!
//! # Usage
//!
//! ```bash
//! # Filter standard input
//! script -q -c 'make' /dev/null | escape-filter
//!
//! # Filter files, replayed in order onto one screen
//! escape-filter build.log test.log
//!
//! # Inspect the final screen state
//! escape-filter --json session.log
//! ```

use std::io;
use std::process::ExitCode;

use escape_filter::app::{self, Options, APP_NAME};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Help and version arrive as errors that go to stdout
    let options = match Options::try_parse_from(std::env::args_os()) {
        Ok(options) => options,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        },
    };

    match app::run(&options, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{APP_NAME}: {e}");
            ExitCode::FAILURE
        },
    }
}
