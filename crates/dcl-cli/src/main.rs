// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `dcl`: parse, print and resolve declarative configuration scripts.

mod commands;
mod config;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::Format;
use config::Config;

/// Resolve declarative configuration scripts against a schema.
#[derive(Parser, Debug)]
#[command(name = "dcl", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a script and report syntax errors
    Parse {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the schema-agnostic document of a script
    Document {
        file: PathBuf,
        /// Omit source spans
        #[arg(long)]
        no_spans: bool,
    },
    /// Resolve a script against a JSON schema declaration
    Resolve {
        file: PathBuf,
        /// Schema declaration (JSON)
        #[arg(short, long)]
        schema: PathBuf,
        /// Reject members of enclosing receivers
        #[arg(long)]
        strict: bool,
        /// Configuration file (default: ./dcl.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("DCL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    output::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> error::Result<ExitCode> {
    match cli.command {
        Command::Parse { file, format } => commands::parse(&file, format),
        Command::Document { file, no_spans } => commands::document(&file, !no_spans),
        Command::Resolve {
            file,
            schema,
            strict,
            config,
            format,
        } => {
            let mut settings = Config::load(config.as_deref())?.resolver;
            if strict {
                settings.strict_receiver_checks = true;
            }
            commands::resolve(&file, &schema, settings, format)
        }
    }
}
