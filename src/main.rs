mod commands;
mod decoder;
mod diagnostics;
mod engine;
mod error;
mod locator;
mod presenter;
mod resolver;
mod types;
mod vlq;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::LineEnding;

#[derive(Parser)]
#[command(
    name = "mapref",
    about = "Resolve generated-code positions back to original source via source maps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the companion .map path for a generated file, if present
    Locate {
        /// Path to the generated file
        file: PathBuf,
    },
    /// Print the original source:line:column for a generated position
    Resolve {
        /// Path to the generated file (its .map sibling is read)
        file: PathBuf,
        /// Position in the generated file as LINE:COLUMN
        position: String,
        /// Explain on stderr why nothing was resolved
        #[arg(long)]
        verbose: bool,
    },
    /// Print the original source snippet around a generated position
    Show {
        /// Path to the generated file (its .map sibling is read)
        file: PathBuf,
        /// Position in the generated file as LINE:COLUMN
        position: String,
        /// Line-ending convention for splitting embedded source text
        #[arg(long, value_enum, default_value = "auto")]
        line_ending: LineEndingArg,
        /// Explain on stderr why nothing was shown
        #[arg(long)]
        verbose: bool,
    },
}

/// CLI surface for the line-ending convention.
#[derive(Clone, Copy, ValueEnum)]
enum LineEndingArg {
    /// Detect from the embedded text: \r\n if present, else \n
    Auto,
    /// Force \r\n
    Crlf,
    /// Force \n
    Lf,
}

impl From<LineEndingArg> for LineEnding {
    fn from(arg: LineEndingArg) -> Self {
        match arg {
            LineEndingArg::Auto => LineEnding::Auto,
            LineEndingArg::Crlf => LineEnding::CrLf,
            LineEndingArg::Lf => LineEnding::Lf,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Locate { file } => commands::locate(&file),
        Commands::Resolve {
            file,
            position,
            verbose,
        } => commands::resolve_only(&file, &position, verbose),
        Commands::Show {
            file,
            position,
            line_ending,
            verbose,
        } => commands::show(&file, &position, line_ending.into(), verbose),
    }
}
