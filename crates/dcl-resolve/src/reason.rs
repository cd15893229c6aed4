// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Failure reason codes.

use std::fmt;

/// Why a node failed to resolve.
///
/// Variant names are a stable contract: tooling matches on the rendered
/// names, so new reasons may be added but existing ones are never renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// No function or property with a matching name and signature exists on
    /// the receivers in scope, or more than one matches equally well.
    UnresolvedSignature,
    /// The assigned value's type is not assignable to the property's type.
    ValueTypeMismatch,
    /// The target belongs to an enclosing receiver rather than the current
    /// one, and strict receiver checks are on.
    CrossScopeAccess,
    /// The receiver the node would resolve against is itself unresolved.
    UnresolvedBase,
    /// The node, or the value it depends on, is already an error.
    IsError,
    /// The property exists but cannot be assigned.
    ReadOnlyProperty,
}

impl FailureReason {
    pub fn name(self) -> &'static str {
        match self {
            FailureReason::UnresolvedSignature => "UnresolvedSignature",
            FailureReason::ValueTypeMismatch => "ValueTypeMismatch",
            FailureReason::CrossScopeAccess => "CrossScopeAccess",
            FailureReason::UnresolvedBase => "UnresolvedBase",
            FailureReason::IsError => "IsError",
            FailureReason::ReadOnlyProperty => "ReadOnlyProperty",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons attached to one failed node: deduplicated, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReasonSet(Vec<FailureReason>);

impl ReasonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(reason: FailureReason) -> Self {
        Self(vec![reason])
    }

    /// Add `reason` unless already present. Returns whether it was added.
    pub fn insert(&mut self, reason: FailureReason) -> bool {
        if self.0.contains(&reason) {
            return false;
        }
        self.0.push(reason);
        true
    }

    pub fn contains(&self, reason: FailureReason) -> bool {
        self.0.contains(&reason)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = FailureReason> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<FailureReason> for ReasonSet {
    fn from_iter<I: IntoIterator<Item = FailureReason>>(iter: I) -> Self {
        let mut set = ReasonSet::new();
        for reason in iter {
            set.insert(reason);
        }
        set
    }
}

impl fmt::Display for ReasonSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, reason) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_discovery_order_without_duplicates() {
        let mut reasons = ReasonSet::single(FailureReason::CrossScopeAccess);
        assert!(reasons.insert(FailureReason::ValueTypeMismatch));
        assert!(!reasons.insert(FailureReason::CrossScopeAccess));
        assert_eq!(reasons.len(), 2);
        assert_eq!(reasons.to_string(), "CrossScopeAccess, ValueTypeMismatch");
    }

    #[test]
    fn collects_from_iterator() {
        let reasons: ReasonSet = [FailureReason::IsError, FailureReason::IsError, FailureReason::UnresolvedBase]
            .into_iter()
            .collect();
        assert_eq!(reasons.iter().collect::<Vec<_>>(), vec![FailureReason::IsError, FailureReason::UnresolvedBase]);
    }
}
