// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! One-line-per-node rendering of a resolved document.
//!
//! ```text
//! ContainerElementResolved -> element addAndConfigure(String): T
//! LiteralValueResolved -> test
//! PropertyAssignmentResolved -> T.number: Int
//! LiteralValueResolved -> 123
//! ```
//!
//! Lines follow [`ResolvedDocument::flatten`] order. The output depends only on
//! the document, never on hashing or platform.

use dcl_resolve::{DocumentResolution, ElementResolution, PropertyResolution, ResolvedDocument, ValueResolution};

pub fn render_resolutions(document: &ResolvedDocument) -> Vec<String> {
    document.flatten().into_iter().map(render_resolution).collect()
}

/// Successes render `Name -> summary`, failures `Name(Reason, ...)`.
pub fn render_resolution(resolution: DocumentResolution<'_>) -> String {
    let name = resolution.name();
    if let Some(reasons) = resolution.reasons() {
        return format!("{}({})", name, reasons);
    }
    let summary = match resolution {
        DocumentResolution::Element(ElementResolution::ContainerElementResolved { function, .. }) => {
            format!("{} {}", function.semantics.label(), function.signature())
        }
        DocumentResolution::Element(ElementResolution::PropertyConfiguringElementResolved {
            configured_type,
            function,
        }) => format!("{} {}: {}", function.semantics.label(), function.name, configured_type),
        DocumentResolution::Property(PropertyResolution::PropertyAssignmentResolved { receiver_type, property }) => {
            format!("{}.{}: {}", receiver_type, property.name, property.ty)
        }
        DocumentResolution::Value(ValueResolution::LiteralValueResolved { value }) => value.to_string(),
        DocumentResolution::Value(ValueResolution::ValueFactoryResolved { function }) => {
            format!("{} {}", function.semantics.label(), function.signature())
        }
        _ => return name.to_string(),
    };
    format!("{} -> {}", name, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcl_resolve::{ErrorResolution, FailureReason, ReasonSet};

    #[test]
    fn failures_list_their_reasons() {
        let reasons: ReasonSet = [FailureReason::CrossScopeAccess, FailureReason::ValueTypeMismatch]
            .into_iter()
            .collect();
        let resolution = PropertyResolution::PropertyNotAssigned(reasons);
        assert_eq!(
            render_resolution(DocumentResolution::Property(&resolution)),
            "PropertyNotAssigned(CrossScopeAccess, ValueTypeMismatch)"
        );
    }

    #[test]
    fn error_nodes_render_their_name() {
        assert_eq!(render_resolution(DocumentResolution::Error(&ErrorResolution)), "ErrorResolution");
    }

    #[test]
    fn literals_render_their_value() {
        let resolution = ValueResolution::LiteralValueResolved {
            value: dcl_ast::Literal::Long(7),
        };
        assert_eq!(
            render_resolution(DocumentResolution::Value(&resolution)),
            "LiteralValueResolved -> 7L"
        );
    }
}
