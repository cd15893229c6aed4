// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! CLI output styling.
//!
//! Respects NO_COLOR and FORCE_COLOR. Colors are disabled when output is piped.

use colored::Colorize;

/// Initialize color support based on environment. Call once at startup.
pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

pub fn banner_ok(phase: &str) -> String {
    format!("{} {} {}", "===".dimmed(), format!("{} OK", phase).green().bold(), "===".dimmed())
}

pub fn banner_fail(phase: &str, errors: usize) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} FAILED: {} error(s)", phase, errors).red().bold(),
        "===".dimmed()
    )
}

pub fn section(title: &str) -> String {
    format!("{} {} {}", "===".dimmed(), title.bold(), "===".dimmed())
}
