//! Statement walking: threads the assumption store through statement
//! sequences and scopes branch refinements to the branch they prove.

use crate::analysis::contracts::MethodContracts;
use crate::analysis::expr::evaluate;
use crate::analysis::store::{AssumptionKind, AssumptionStore};
use crate::ast::{Block, IfStmt, Stmt, SwitchStmt};
use crate::findings::{Finding, FindingKind};

/// Result of walking a statement: what it reported and the store the
/// next statement starts from.
pub(crate) struct Walk {
    pub(crate) findings: Vec<Finding>,
    pub(crate) store: AssumptionStore,
}

pub(crate) fn walk_statement(
    statement: &Stmt,
    contracts: &MethodContracts,
    store: &AssumptionStore,
) -> Walk {
    match statement {
        Stmt::Block(block) => walk_block(block, contracts, store),
        Stmt::Expr(expr_stmt) => {
            let eval = evaluate(&expr_stmt.expr, contracts, store, false);
            Walk {
                findings: eval.findings,
                store: eval.store,
            }
        }
        Stmt::If(if_stmt) => walk_if(if_stmt, contracts, store),
        Stmt::Switch(switch) => walk_switch(switch, contracts, store),
        Stmt::Other(_) => Walk {
            findings: Vec::new(),
            store: store.clone(),
        },
    }
}

/// Statements see the effects of the statements before them, but a block
/// as a whole leaves the enclosing store untouched.
pub(crate) fn walk_block(
    block: &Block,
    contracts: &MethodContracts,
    store: &AssumptionStore,
) -> Walk {
    let mut findings = Vec::new();
    let mut current = store.clone();
    for statement in &block.statements {
        let walk = walk_statement(statement, contracts, &current);
        findings.extend(walk.findings);
        current = walk.store;
    }
    Walk {
        findings,
        store: store.clone(),
    }
}

fn walk_if(if_stmt: &IfStmt, contracts: &MethodContracts, store: &AssumptionStore) -> Walk {
    let condition = evaluate(&if_stmt.condition, contracts, store, false);
    let mut findings = condition.findings;
    let then = walk_statement(&if_stmt.then_branch, contracts, &condition.store);
    findings.extend(then.findings);
    if let Some(else_branch) = &if_stmt.else_branch {
        // whatever the condition proved null or not-null holds flipped
        // on the else path
        let flipped = store.flipped_difference(&condition.store);
        let else_store = store.with_all(&flipped);
        let else_walk = walk_statement(else_branch, contracts, &else_store);
        findings.extend(else_walk.findings);
    }
    Walk {
        findings,
        store: store.clone(),
    }
}

fn walk_switch(switch: &SwitchStmt, contracts: &MethodContracts, store: &AssumptionStore) -> Walk {
    let selector = evaluate(&switch.selector, contracts, store, false);
    let mut findings = Vec::new();
    if selector.assumption.kind == AssumptionKind::Null {
        findings.push(Finding::new(
            FindingKind::SwitchOnNull,
            switch.selector.span(),
            selector.assumption,
        ));
    }
    // case labels fall through, so entry effects carry into later entries
    // and out of the switch itself
    let mut current = store.clone();
    for entry in &switch.entries {
        for statement in &entry.statements {
            let walk = walk_statement(statement, contracts, &current);
            findings.extend(walk.findings);
            current = walk.store;
        }
    }
    Walk {
        findings,
        store: current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_unit;

    fn walk_body(body: &str) -> Walk {
        let source = format!("class T {{ void m() {{ {body} }} }}");
        let unit = parse_unit(&source);
        let contracts = MethodContracts::build(&unit);
        let block = unit.types[0].methods[0].body.clone().unwrap();
        walk_block(&block, &contracts, &AssumptionStore::new())
    }

    fn kinds(walk: &Walk) -> Vec<FindingKind> {
        walk.findings.iter().map(|finding| finding.kind).collect()
    }

    #[test]
    fn expression_statements_thread_the_store() {
        let walk = walk_body("String a = null; a.length();");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn nested_blocks_do_not_leak_facts() {
        let walk = walk_body("{ String a = null; } a.length();");
        assert!(walk.findings.is_empty());
    }

    #[test]
    fn if_facts_reach_only_the_then_branch() {
        let walk = walk_body("if (a == null) { a.length(); } a.length();");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn else_branch_sees_the_flipped_fact() {
        let walk = walk_body("if (a != null) { } else { a.length(); }");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn condition_findings_come_before_branch_findings() {
        let walk = walk_body("if (a == null && a == null) { a.length(); }");
        assert_eq!(
            kinds(&walk),
            vec![
                FindingKind::RedundantNullCheck,
                FindingKind::FieldAccessIsNull
            ]
        );
    }

    #[test]
    fn switch_on_a_null_selector_reports() {
        let walk = walk_body("String a = null; switch (a) { case 1: break; }");
        assert_eq!(kinds(&walk), vec![FindingKind::SwitchOnNull]);
    }

    #[test]
    fn switch_entries_fall_through_into_each_other() {
        let walk = walk_body("switch (x) { case 1: a = null; case 2: a.length(); }");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn switch_effects_escape_the_switch() {
        let walk = walk_body("switch (x) { case 1: a = null; } a.length();");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn unsupported_statements_keep_the_store() {
        let walk = walk_body("String a = null; assert true; a.length();");
        assert_eq!(kinds(&walk), vec![FindingKind::FieldAccessIsNull]);
    }

    #[test]
    fn a_block_returns_the_store_it_was_given() {
        let walk = walk_body("String a = null;");
        assert_eq!(walk.store, AssumptionStore::new());
    }
}
