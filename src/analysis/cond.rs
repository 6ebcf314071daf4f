//! Boolean-condition analysis: AND/OR store threading and equality
//! refinement, with De Morgan handling of enclosing negations.

use crate::analysis::contracts::MethodContracts;
use crate::analysis::expr::{Evaluation, evaluate};
use crate::analysis::store::{Assumption, AssumptionKind, AssumptionStore};
use crate::ast::{BinaryExpr, BinaryOp, Expr};
use crate::findings::{Finding, FindingKind};

/// `&&` / `||`, with the effective operator decided by the inversion flag:
/// a negated OR refines like an AND and vice versa.
pub(crate) fn logical(
    binary: &BinaryExpr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    let is_or = (binary.op == BinaryOp::Or) != inverted;
    let left = evaluate(&binary.lhs, contracts, store, inverted);
    // an effective AND guarantees the left side held when the right runs,
    // so the right side sees the left-refined store; an effective OR does not
    let right_input = if is_or { store } else { &left.store };
    let right = evaluate(&binary.rhs, contracts, right_input, inverted);
    let merged = if is_or {
        left.store.agreement(&right.store)
    } else {
        left.store.union(&right.store)
    };
    let mut findings = right.findings;
    findings.extend(left.findings);
    Evaluation {
        assumption: Assumption::new(AssumptionKind::Unknown, binary.span),
        findings,
        store: merged,
    }
}

/// `==` / `!=`, with the effective comparison decided by the inversion flag.
///
/// Both operands are evaluated first so nested field and call findings
/// surface, but their store changes are discarded; any fact this comparison
/// establishes lands on the incoming store.
pub(crate) fn equality(
    binary: &BinaryExpr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    let is_not_equals = (binary.op == BinaryOp::NotEquals) != inverted;
    let lhs = binary.lhs.unwrap_parens();
    let rhs = binary.rhs.unwrap_parens();
    let left = evaluate(lhs, contracts, store, inverted);
    let right = evaluate(rhs, contracts, store, inverted);
    let mut findings = left.findings;
    findings.extend(right.findings);

    let mut redundancy = None;
    let mut fact = None;
    match (left.assumption.kind, right.assumption.kind) {
        (AssumptionKind::Null, AssumptionKind::Null)
        | (AssumptionKind::NotNull, AssumptionKind::Null) => {
            redundancy = Some(if is_not_equals {
                FindingKind::RedundantNotNullCheck
            } else {
                FindingKind::RedundantNullCheck
            });
        }
        (AssumptionKind::Null, AssumptionKind::NotNull) => {
            redundancy = Some(if is_not_equals {
                FindingKind::RedundantNullCheck
            } else {
                FindingKind::RedundantNotNullCheck
            });
        }
        (AssumptionKind::Nullable, AssumptionKind::Nullable) => {}
        (AssumptionKind::Unknown | AssumptionKind::Nullable, right_kind)
            if right_kind != AssumptionKind::Unknown =>
        {
            if let Expr::Name(name) = lhs {
                fact = Some((
                    name.name.clone(),
                    Assumption::new(
                        maybe_invert(right_kind, is_not_equals),
                        right.assumption.cause,
                    ),
                ));
            }
        }
        (left_kind, AssumptionKind::Unknown | AssumptionKind::Nullable)
            if left_kind != AssumptionKind::Unknown =>
        {
            if let Expr::Name(name) = rhs {
                fact = Some((
                    name.name.clone(),
                    Assumption::new(
                        maybe_invert(left_kind, is_not_equals),
                        left.assumption.cause,
                    ),
                ));
            }
        }
        _ => {}
    }

    if let Some(kind) = redundancy {
        findings.push(Finding::new(kind, binary.span, left.assumption));
    }
    let store = match fact {
        Some((name, assumption)) => store.with(&name, assumption),
        None => store.clone(),
    };
    Evaluation {
        assumption: Assumption::new(AssumptionKind::Unknown, binary.span),
        findings,
        store,
    }
}

/// Inverting a proven `Null` gives `NotNull`; inverting anything else
/// degrades to `Unknown`. Known-incomplete for name-vs-name inequalities
/// under inversion; kept as is deliberately.
fn maybe_invert(kind: AssumptionKind, invert: bool) -> AssumptionKind {
    if !invert {
        return kind;
    }
    match kind {
        AssumptionKind::Null => AssumptionKind::NotNull,
        _ => AssumptionKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_unit;

    fn eval_condition(condition: &str, store: &AssumptionStore) -> Evaluation {
        let source = format!("class T {{ void m() {{ if ({condition}) {{ }} }} }}");
        let unit = parse_unit(&source);
        let contracts = MethodContracts::build(&unit);
        let body = unit.types[0].methods[0].body.clone().unwrap();
        let crate::ast::Stmt::If(if_stmt) = &body.statements[0] else {
            panic!("expected if statement");
        };
        evaluate(&if_stmt.condition, &contracts, store, false)
    }

    fn assume(kind: AssumptionKind, start: usize) -> Assumption {
        Assumption::new(kind, crate::ast::Span::new(start, start + 1, 1))
    }

    #[test]
    fn comparing_unknown_to_null_establishes_a_fact() {
        let store = AssumptionStore::new();
        let eval = eval_condition("a == null", &store);
        assert!(eval.findings.is_empty());
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::Null);

        let eval = eval_condition("a != null", &store);
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::NotNull);
    }

    #[test]
    fn null_literal_on_the_left_works_too() {
        let store = AssumptionStore::new();
        let eval = eval_condition("null != a", &store);
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::NotNull);
    }

    #[test]
    fn proven_not_null_makes_checks_redundant() {
        let store = AssumptionStore::new().with("a", assume(AssumptionKind::NotNull, 0));
        let eval = eval_condition("a != null", &store);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNotNullCheck);

        let eval = eval_condition("a == null", &store);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNullCheck);
    }

    #[test]
    fn redundancy_proof_is_the_left_assumption() {
        let left = assume(AssumptionKind::NotNull, 3);
        let store = AssumptionStore::new().with("a", left);
        let eval = eval_condition("a != null", &store);
        assert_eq!(eval.findings[0].proof, left);
    }

    #[test]
    fn two_null_literals_compare_redundantly() {
        let eval = eval_condition("null == null", &AssumptionStore::new());
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNullCheck);
    }

    #[test]
    fn negation_flips_the_effective_comparison() {
        let store = AssumptionStore::new().with("a", assume(AssumptionKind::NotNull, 0));
        let eval = eval_condition("!(a == null)", &store);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNotNullCheck);

        let eval = eval_condition("!(a != null)", &store);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNullCheck);
    }

    #[test]
    fn double_negation_is_inert() {
        let store = AssumptionStore::new().with("a", assume(AssumptionKind::NotNull, 0));
        let direct = eval_condition("a != null", &store);
        let doubled = eval_condition("!(!(a != null))", &store);
        let kinds = |eval: &Evaluation| -> Vec<FindingKind> {
            eval.findings.iter().map(|finding| finding.kind).collect()
        };
        assert_eq!(kinds(&direct), kinds(&doubled));
        assert_eq!(direct.store, doubled.store);
    }

    #[test]
    fn and_threads_left_facts_into_the_right_side() {
        let store = AssumptionStore::new().with("a", assume(AssumptionKind::Nullable, 0));
        let eval = eval_condition("a != null && a.f == 5", &store);
        assert!(eval.findings.is_empty());
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::NotNull);
    }

    #[test]
    fn or_does_not_thread_left_facts() {
        let store = AssumptionStore::new().with("a", assume(AssumptionKind::Nullable, 0));
        let eval = eval_condition("a != null || a.f == 5", &store);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::FieldAccessMayBeNull);
    }

    #[test]
    fn or_merge_keeps_only_agreed_facts() {
        let store = AssumptionStore::new();
        let eval = eval_condition("a == null || a == null", &store);
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::Null);

        let eval = eval_condition("a == null || a != null", &store);
        assert_eq!(eval.store.get("a"), None);
    }

    #[test]
    fn negated_or_refines_like_and() {
        // for a null `a`, !(b || !(a == c)) requires a == c on the path
        let store = AssumptionStore::new()
            .with("a", assume(AssumptionKind::Null, 0))
            .with("c", assume(AssumptionKind::NotNull, 1));
        let eval = eval_condition("!(b || !(a == c))", &store);
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNotNullCheck);
    }

    #[test]
    fn known_side_propagates_onto_an_unknown_name() {
        let store = AssumptionStore::new().with("src", assume(AssumptionKind::Null, 2));
        let eval = eval_condition("dst == src", &store);
        let fact = eval.store.get("dst").unwrap();
        assert_eq!(fact.kind, AssumptionKind::Null);
        // the new fact is justified by the known side's cause
        assert_eq!(fact.cause, assume(AssumptionKind::Null, 2).cause);
    }

    #[test]
    fn inverted_propagation_degrades_to_unknown() {
        // inversion can only prove the positive of a Null fact
        let store = AssumptionStore::new().with("src", assume(AssumptionKind::NotNull, 2));
        let eval = eval_condition("!(dst == src)", &store);
        let fact = eval.store.get("dst").unwrap();
        assert_eq!(fact.kind, AssumptionKind::Unknown);
    }

    #[test]
    fn nullable_to_nullable_comparison_is_silent() {
        let store = AssumptionStore::new()
            .with("a", assume(AssumptionKind::Nullable, 0))
            .with("b", assume(AssumptionKind::Nullable, 1));
        let eval = eval_condition("a != b", &store);
        assert!(eval.findings.is_empty());
        assert_eq!(eval.store.kind_of("a"), AssumptionKind::Nullable);
        assert_eq!(eval.store.kind_of("b"), AssumptionKind::Nullable);
    }

    #[test]
    fn operand_stores_are_discarded_but_facts_remain() {
        let eval = eval_condition("(a = null) == null", &AssumptionStore::new());
        assert_eq!(eval.findings.len(), 1);
        assert_eq!(eval.findings[0].kind, FindingKind::RedundantNullCheck);
        // the assignment inside the operand does not leak out
        assert_eq!(eval.store.get("a"), None);
    }

    #[test]
    fn nested_findings_order_right_before_left_under_logical_operators() {
        let store = AssumptionStore::new()
            .with("p", assume(AssumptionKind::Null, 0))
            .with("q", assume(AssumptionKind::Null, 5));
        let eval = eval_condition("p.x == 1 || q.x == 2", &store);
        let kinds: Vec<FindingKind> = eval.findings.iter().map(|finding| finding.kind).collect();
        assert_eq!(
            kinds,
            vec![FindingKind::FieldAccessIsNull, FindingKind::FieldAccessIsNull]
        );
        // right operand's finding comes first
        assert!(eval.findings[0].span.start > eval.findings[1].span.start);
    }
}
