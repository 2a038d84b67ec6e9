//! Command-line configuration

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

/// Program name used in messages
pub const APP_NAME: &str = "escape-filter";

/// Command-line arguments
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "escape-filter")]
#[command(version)]
#[command(
    about = "Replays terminal escape sequences and prints the text left on the screen",
    long_about = None
)]
pub struct CliArgs {
    /// Print a JSON snapshot of the screen instead of text
    #[arg(short, long)]
    pub json: bool,

    /// Input files, replayed in order onto one screen (`-` for standard input)
    #[arg(value_name = "INFILE")]
    pub inputs: Vec<PathBuf>,
}

/// One input to replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input (`-` or no files given)
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            Input::Stdin
        } else {
            Input::File(path)
        }
    }
}

/// How the final screen is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Rendered text
    #[default]
    Text,
    /// JSON snapshot of lines and cursor
    Json,
}

/// Options for a filtering run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Inputs, replayed in order onto one screen
    pub inputs: Vec<Input>,
    /// Output format
    pub format: OutputFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inputs: vec![Input::Stdin],
            format: OutputFormat::Text,
        }
    }
}

impl From<CliArgs> for Options {
    fn from(args: CliArgs) -> Self {
        let mut inputs: Vec<Input> = args.inputs.into_iter().map(Input::from).collect();
        if inputs.is_empty() {
            inputs.push(Input::Stdin);
        }

        let format = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self { inputs, format }
    }
}

impl Options {
    /// Parse command-line arguments, including the program name.
    ///
    /// Help and version requests come back as a [`clap::Error`] whose
    /// [`use_stderr`](clap::Error::use_stderr) is false.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        CliArgs::try_parse_from(args).map(Options::from)
    }
}
