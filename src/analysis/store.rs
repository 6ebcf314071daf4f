//! Per-path nullability state.

use std::collections::BTreeMap;

use crate::ast::Span;

/// Lattice value for what is known about a variable on the current path.
///
/// `Null` and `NotNull` are proven facts. `Nullable` is declared-but-not-
/// proven (an explicit annotation). `Unknown` is no information at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AssumptionKind {
    NotNull,
    Null,
    Unknown,
    Nullable,
}

/// An assumption plus the source span that justifies it.
///
/// The justifying span is diagnostic evidence only. Merges and comparisons
/// look at the kind alone, never at where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Assumption {
    pub(crate) kind: AssumptionKind,
    pub(crate) cause: Span,
}

impl Assumption {
    pub(crate) fn new(kind: AssumptionKind, cause: Span) -> Assumption {
        Assumption { kind, cause }
    }
}

/// Immutable variable-to-assumption map for one control-flow path.
///
/// Every update derives a new store; a store handed to a sibling branch is
/// never mutated after the fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AssumptionStore {
    entries: BTreeMap<String, Assumption>,
}

impl AssumptionStore {
    pub(crate) fn new() -> AssumptionStore {
        AssumptionStore::default()
    }

    pub(crate) fn get(&self, name: &str) -> Option<Assumption> {
        self.entries.get(name).copied()
    }

    /// Current lattice kind for a name; absent names count as `Unknown`.
    pub(crate) fn kind_of(&self, name: &str) -> AssumptionKind {
        self.entries
            .get(name)
            .map(|assumption| assumption.kind)
            .unwrap_or(AssumptionKind::Unknown)
    }

    /// Derives a store with one entry added or replaced.
    pub(crate) fn with(&self, name: &str, assumption: Assumption) -> AssumptionStore {
        let mut entries = self.entries.clone();
        entries.insert(name.to_string(), assumption);
        AssumptionStore { entries }
    }

    /// Derives a store with all of `updates` laid over this one.
    pub(crate) fn with_all(&self, updates: &[(String, Assumption)]) -> AssumptionStore {
        let mut entries = self.entries.clone();
        for (name, assumption) in updates {
            entries.insert(name.clone(), *assumption);
        }
        AssumptionStore { entries }
    }

    /// Union merge for an effective AND: both sides' facts hold, and
    /// `other`'s entries win on a conflicting name.
    pub(crate) fn union(&self, other: &AssumptionStore) -> AssumptionStore {
        let mut entries = self.entries.clone();
        for (name, assumption) in &other.entries {
            entries.insert(name.clone(), *assumption);
        }
        AssumptionStore { entries }
    }

    /// Agreement merge for an effective OR: keeps this store's entries whose
    /// kind matches `other`'s entry for the same name. Only facts both
    /// branches arrived at survive the merge.
    pub(crate) fn agreement(&self, other: &AssumptionStore) -> AssumptionStore {
        let entries = self
            .entries
            .iter()
            .filter(|(name, assumption)| {
                other
                    .entries
                    .get(name.as_str())
                    .is_some_and(|theirs| theirs.kind == assumption.kind)
            })
            .map(|(name, assumption)| (name.clone(), *assumption))
            .collect();
        AssumptionStore { entries }
    }

    /// Entries of `refined` whose kind changed relative to this store and is
    /// a proven fact, each flipped `Null` <-> `NotNull` with its cause kept.
    /// This is what a condition contributes to the implicit else branch.
    pub(crate) fn flipped_difference(&self, refined: &AssumptionStore) -> Vec<(String, Assumption)> {
        refined
            .entries
            .iter()
            .filter(|(name, assumption)| self.kind_of(name) != assumption.kind)
            .filter_map(|(name, assumption)| {
                let flipped = match assumption.kind {
                    AssumptionKind::Null => AssumptionKind::NotNull,
                    AssumptionKind::NotNull => AssumptionKind::Null,
                    AssumptionKind::Unknown | AssumptionKind::Nullable => return None,
                };
                Some((name.clone(), Assumption::new(flipped, assumption.cause)))
            })
            .collect()
    }
}
