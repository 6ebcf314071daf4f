//! Declared parameter nullability, collected per method name.

use std::collections::BTreeMap;

use crate::analysis::store::{Assumption, AssumptionKind, AssumptionStore};
use crate::ast::{CompilationUnit, ParamDecl};

/// Method name to ordered `(parameter name, declared assumption)` pairs,
/// built once per compilation unit before any body is walked.
///
/// Lookup is by name only; a later declaration of the same name replaces an
/// earlier one, and call sites apply a contract only when the argument count
/// matches. This is a known limitation of the contract model.
#[derive(Debug, Default)]
pub(crate) struct MethodContracts {
    by_name: BTreeMap<String, Vec<(String, Assumption)>>,
}

impl MethodContracts {
    pub(crate) fn build(unit: &CompilationUnit) -> MethodContracts {
        let mut by_name = BTreeMap::new();
        for class in &unit.types {
            for method in &class.methods {
                let params = method.params.iter().map(param_assumption).collect();
                // a later method of the same name supersedes an earlier one
                by_name.insert(method.name.clone(), params);
            }
        }
        MethodContracts { by_name }
    }

    /// Contract for a call site, if any method of that name was declared.
    pub(crate) fn params_for_call(&self, name: &str) -> Option<&[(String, Assumption)]> {
        self.by_name.get(name).map(|params| params.as_slice())
    }

    /// Entry store for walking a declared method's body.
    ///
    /// The contract map is built from the same unit the walker runs over, so
    /// a missing entry cannot be caused by input and means the caller seeded
    /// the walk from a different unit. That is a programming error, not an
    /// analyzable condition, and aborts.
    pub(crate) fn entry_store(&self, method_name: &str) -> AssumptionStore {
        let Some(params) = self.by_name.get(method_name) else {
            panic!("no contract for method `{method_name}`: contracts must be built from the unit under analysis");
        };
        let mut store = AssumptionStore::new();
        for (name, assumption) in params {
            store = store.with(name, *assumption);
        }
        store
    }
}

fn param_assumption(param: &ParamDecl) -> (String, Assumption) {
    let kind = param
        .annotations
        .iter()
        .find_map(|annotation| match annotation.as_str() {
            "Nullable" => Some(AssumptionKind::Nullable),
            "NotNull" => Some(AssumptionKind::NotNull),
            _ => None,
        })
        .unwrap_or(AssumptionKind::Unknown);
    (param.name.clone(), Assumption::new(kind, param.span))
}
