// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Errors that stop the CLI before it can report diagnostics.

use std::path::PathBuf;

use dcl_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is not a valid schema declaration: {source}", path.display())]
    SchemaJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("invalid configuration in `{}`: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
