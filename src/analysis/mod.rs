//! Flow-sensitive nullability analysis.
//!
//! Contracts are collected from every method signature first, then each
//! method body is walked independently, with the method's own parameter
//! annotations seeding the initial assumption store.

pub(crate) mod cond;
pub(crate) mod contracts;
pub(crate) mod expr;
pub(crate) mod stmt;
pub(crate) mod store;

use crate::ast::{CompilationUnit, MethodDecl};
use crate::findings::Finding;
use contracts::MethodContracts;

/// Analyzes every method of every type in the unit, in declaration order.
pub(crate) fn analyze_unit(unit: &CompilationUnit) -> Vec<Finding> {
    let contracts = MethodContracts::build(unit);
    let mut findings = Vec::new();
    for class in &unit.types {
        for method in &class.methods {
            findings.extend(analyze_method(method, &contracts));
        }
    }
    findings
}

fn analyze_method(method: &MethodDecl, contracts: &MethodContracts) -> Vec<Finding> {
    let entry = contracts.entry_store(&method.name);
    let Some(body) = &method.body else {
        return Vec::new();
    };
    stmt::walk_block(body, contracts, &entry).findings
}
