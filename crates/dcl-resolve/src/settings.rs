// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Resolver configuration.

use serde::Deserialize;

/// Policies applied by the code resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverSettings {
    /// Only accept functions and properties of the receiver on top of the
    /// scope stack. Members of enclosing receivers are reported as
    /// `CrossScopeAccess` instead of being resolved against them.
    pub strict_receiver_checks: bool,
}

impl ResolverSettings {
    pub fn strict() -> Self {
        Self {
            strict_receiver_checks: true,
        }
    }

    pub fn lenient() -> Self {
        Self::default()
    }
}
