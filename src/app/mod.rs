//! Application glue module
//!
//! Command-line options, input acquisition and output formatting around
//! the filter core.

mod config;

use std::fs::File;
use std::io::{self, BufReader, Write};

use tracing::{debug, info};

use crate::error::Result;
use crate::filter::EscapeFilter;

pub use config::{CliArgs, Input, Options, OutputFormat, APP_NAME};

/// Replay one input onto the filter's screen
pub fn load_input(filter: &mut EscapeFilter, input: &Input) -> Result<()> {
    match input {
        Input::Stdin => {
            debug!("reading standard input");
            filter.load(io::stdin().lock())
        }
        Input::File(path) => {
            debug!(path = %path.display(), "reading file");
            let file = File::open(path)?;
            filter.load(BufReader::new(file))
        }
    }
}

/// Format the final screen
pub fn format_output(filter: &EscapeFilter, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(filter.render()),
        OutputFormat::Json => Ok(filter.screen().snapshot().to_json()?),
    }
}

/// Replay all inputs in order and write the result
pub fn run<W: Write>(options: &Options, out: &mut W) -> Result<()> {
    let mut filter = EscapeFilter::new();

    for input in &options.inputs {
        load_input(&mut filter, input)?;
    }

    let output = format_output(&filter, options.format)?;
    info!(
        lines = filter.screen().lines().len(),
        bytes = output.len(),
        "filtered"
    );

    out.write_all(output.as_bytes())?;
    out.flush()?;
    Ok(())
}
