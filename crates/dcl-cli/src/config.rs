// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! `dcl.toml` configuration.
//!
//! ```toml
//! [resolver]
//! strict-receiver-checks = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use dcl_resolve::ResolverSettings;
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILENAME: &str = "dcl.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub resolver: ResolverSettings,
}

impl Config {
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else `dcl.toml` in the working directory if
    /// present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.is_file() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&text, &path)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}
