//! This module defines the command line arguments we accept.

use std::{io::IsTerminal, path::PathBuf};
use termcolor::ColorChoice;


#[derive(Debug, clap::Parser)]
#[command(version, about = "GraphQL API for courses, students and grades.")]
pub(crate) struct Args {
    /// Whether to use colors in terminal output.
    #[arg(long, global = true, value_enum, default_value_t = ColorArg::Auto)]
    pub(crate) color: ColorArg,

    #[command(subcommand)]
    pub(crate) cmd: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Command {
    /// Starts the HTTP server (this is the default if no subcommand is given).
    Serve {
        #[command(flatten)]
        shared: Shared,
    },

    /// Checks the configuration and the seed data for problems. Exits with 0
    /// if everything is Ok, and with 1 otherwise.
    Check {
        #[command(flatten)]
        shared: Shared,
    },

    /// Outputs a template for the configuration file (which includes
    /// descriptions of all options).
    WriteConfig {
        /// Target file. If not specified, the template is written to stdout.
        target: Option<PathBuf>,
    },

    /// Exports the API as GraphQL schema.
    ExportApiSchema {
        /// Target file. If not specified, the schema is written to stdout.
        target: Option<PathBuf>,
    },
}

#[derive(Debug, Default, clap::Args)]
pub(crate) struct Shared {
    /// Path to the configuration file. If this is not specified, we try the
    /// env variable `GRADEBOOK_CONFIG_PATH`, then `config.toml` and
    /// `/etc/gradebook/config.toml`. If none exists, defaults are used.
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum ColorArg {
    Auto,
    Always,
    Never,
}

impl Args {
    pub(crate) fn stdout_color(&self) -> ColorChoice {
        self.color_choice(std::io::stdout().is_terminal())
    }

    pub(crate) fn stderr_color(&self) -> ColorChoice {
        self.color_choice(std::io::stderr().is_terminal())
    }

    fn color_choice(&self, is_terminal: bool) -> ColorChoice {
        match self.color {
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
            ColorArg::Auto if is_terminal => ColorChoice::Auto,
            ColorArg::Auto => ColorChoice::Never,
        }
    }
}
