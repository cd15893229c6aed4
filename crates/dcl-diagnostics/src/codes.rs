//! Error code registry.
//!
//! Maps error codes (E0001, E0400, etc.) to titles and categories.

use std::collections::BTreeMap;

use dcl_resolve::FailureReason;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: BTreeMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Schema,
    Resolution,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Schema => write!(f, "Schema"),
            ErrorCategory::Resolution => write!(f, "Resolution"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = BTreeMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                // Lexer errors (E00xx)
                "E0001" => ("invalid token", Syntax),

                // Parser errors (E01xx)
                "E0100" => ("invalid syntax", Syntax),

                // Schema errors (E03xx)
                "E0300" => ("invalid schema", Schema),

                // Resolution errors (E04xx), one per failure reason
                "E0400" => ("unresolved signature", Resolution),
                "E0401" => ("value type mismatch", Resolution),
                "E0402" => ("cross-scope access", Resolution),
                "E0403" => ("unresolved base", Resolution),
                "E0404" => ("depends on an error", Resolution),
                "E0405" => ("read-only property", Resolution),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    /// Every code, in code order.
    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

/// The code reported for a failure reason.
pub fn reason_code(reason: FailureReason) -> &'static str {
    match reason {
        FailureReason::UnresolvedSignature => "E0400",
        FailureReason::ValueTypeMismatch => "E0401",
        FailureReason::CrossScopeAccess => "E0402",
        FailureReason::UnresolvedBase => "E0403",
        FailureReason::IsError => "E0404",
        FailureReason::ReadOnlyProperty => "E0405",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reason_code_is_registered() {
        let registry = ErrorCodeRegistry::default();
        for reason in [
            FailureReason::UnresolvedSignature,
            FailureReason::ValueTypeMismatch,
            FailureReason::CrossScopeAccess,
            FailureReason::UnresolvedBase,
            FailureReason::IsError,
            FailureReason::ReadOnlyProperty,
        ] {
            let info = registry.get(reason_code(reason)).unwrap();
            assert_eq!(info.category, ErrorCategory::Resolution);
        }
    }

    #[test]
    fn codes_are_listed_in_order() {
        let registry = ErrorCodeRegistry::default();
        let codes: Vec<&str> = registry.all().map(|info| info.code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
