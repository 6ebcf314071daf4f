//! Diagnostic findings produced by the analysis. Pure data; the rendering
//! lives in `report`.

use crate::analysis::store::Assumption;
use crate::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum FindingKind {
    RedundantNullCheck,
    RedundantNotNullCheck,
    FieldAccessMayBeNull,
    FieldAccessIsNull,
    FunctionCallMayBeNull,
    FunctionCallIsNull,
    SwitchOnNull,
}

impl FindingKind {
    /// Stable identifier used in the serialized report.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FindingKind::RedundantNullCheck => "REDUNDANT_NULL_CHECK",
            FindingKind::RedundantNotNullCheck => "REDUNDANT_NOT_NULL_CHECK",
            FindingKind::FieldAccessMayBeNull => "FIELD_ACCESS_MAY_BE_NULL",
            FindingKind::FieldAccessIsNull => "FIELD_ACCESS_IS_NULL",
            FindingKind::FunctionCallMayBeNull => "FUNCTION_CALL_MAY_BE_NULL",
            FindingKind::FunctionCallIsNull => "FUNCTION_CALL_IS_NULL",
            FindingKind::SwitchOnNull => "SWITCH_ON_NULL",
        }
    }
}

/// One diagnostic: what is wrong, the offending source span, and the
/// assumption that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Finding {
    pub(crate) kind: FindingKind,
    pub(crate) span: Span,
    pub(crate) proof: Assumption,
}

impl Finding {
    pub(crate) fn new(kind: FindingKind, span: Span, proof: Assumption) -> Finding {
        Finding { kind, span, proof }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    const ALL_KINDS: [FindingKind; 7] = [
        FindingKind::RedundantNullCheck,
        FindingKind::RedundantNotNullCheck,
        FindingKind::FieldAccessMayBeNull,
        FindingKind::FieldAccessIsNull,
        FindingKind::FunctionCallMayBeNull,
        FindingKind::FunctionCallIsNull,
        FindingKind::SwitchOnNull,
    ];

    #[test]
    fn kind_identifiers_are_unique() {
        let identifiers: BTreeSet<&str> = ALL_KINDS.iter().map(|kind| kind.as_str()).collect();
        assert_eq!(identifiers.len(), ALL_KINDS.len());
    }

    #[test]
    fn kind_identifiers_are_screaming_snake_case() {
        for kind in ALL_KINDS {
            let identifier = kind.as_str();
            assert!(
                identifier
                    .chars()
                    .all(|ch| ch.is_ascii_uppercase() || ch == '_'),
                "unexpected identifier: {identifier}"
            );
        }
    }
}
