//! Expression evaluation: the assumption an expression produces, plus the
//! findings it raises and the store updates it causes.

use crate::analysis::cond;
use crate::analysis::contracts::MethodContracts;
use crate::analysis::store::{Assumption, AssumptionKind, AssumptionStore};
use crate::ast::{
    AssignExpr, BinaryOp, CallExpr, Expr, FieldAccessExpr, LiteralKind, UnaryOp, VarDeclExpr,
};
use crate::findings::{Finding, FindingKind};

/// Result of evaluating one expression on one path.
pub(crate) struct Evaluation {
    pub(crate) assumption: Assumption,
    pub(crate) findings: Vec<Finding>,
    pub(crate) store: AssumptionStore,
}

impl Evaluation {
    /// Evaluation with no findings and an unchanged store.
    pub(crate) fn inert(assumption: Assumption, store: &AssumptionStore) -> Evaluation {
        Evaluation {
            assumption,
            findings: Vec::new(),
            store: store.clone(),
        }
    }
}

/// Evaluates `expr` under `store`. `inverted` carries enclosing logical
/// negations down into boolean structure (see `cond`); outside boolean
/// structure it is simply threaded through.
///
/// Unsupported expression kinds evaluate to `Unknown` with no findings and
/// no store change. That is graceful degradation, not an error.
pub(crate) fn evaluate(
    expr: &Expr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    let expr = expr.unwrap_parens();
    match expr {
        Expr::Literal(literal) => {
            let kind = if literal.kind == LiteralKind::Null {
                AssumptionKind::Null
            } else {
                AssumptionKind::NotNull
            };
            Evaluation::inert(Assumption::new(kind, literal.span), store)
        }
        Expr::Name(name) => {
            let assumption = store
                .get(&name.name)
                .unwrap_or(Assumption::new(AssumptionKind::Unknown, name.span));
            Evaluation::inert(assumption, store)
        }
        Expr::VarDecl(decl) => declaration(decl, contracts, store, inverted),
        Expr::Assign(assign) => assignment(assign, contracts, store, inverted),
        Expr::FieldAccess(access) => field_access(access, store),
        Expr::Call(call) => method_call(call, contracts, store, inverted),
        Expr::Unary(unary) => match unary.op {
            UnaryOp::Not => evaluate(&unary.operand, contracts, store, !inverted),
            UnaryOp::Other => {
                Evaluation::inert(Assumption::new(AssumptionKind::Unknown, unary.span), store)
            }
        },
        Expr::Binary(binary) => match binary.op {
            BinaryOp::And | BinaryOp::Or => cond::logical(binary, contracts, store, inverted),
            BinaryOp::Equals | BinaryOp::NotEquals => {
                cond::equality(binary, contracts, store, inverted)
            }
            BinaryOp::Other => {
                let left = evaluate(&binary.lhs, contracts, store, inverted);
                let right = evaluate(&binary.rhs, contracts, store, inverted);
                let mut findings = left.findings;
                findings.extend(right.findings);
                Evaluation {
                    assumption: Assumption::new(AssumptionKind::Unknown, binary.span),
                    findings,
                    store: store.clone(),
                }
            }
        },
        Expr::Paren(_) | Expr::Other(_) => {
            Evaluation::inert(Assumption::new(AssumptionKind::Unknown, expr.span()), store)
        }
    }
}

/// Declarators are folded left to right, each initializer seeing the store
/// already extended with the names declared before it, so that
/// `TreeNode a = null, b = a.next()` reports on `b`'s initializer.
fn declaration(
    decl: &VarDeclExpr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    let mut findings = Vec::new();
    let mut store = store.clone();
    for declarator in &decl.declarators {
        let Some(init) = &declarator.init else {
            // no initializer, no knowledge
            continue;
        };
        let init_eval = evaluate(init, contracts, &store, inverted);
        findings.extend(init_eval.findings);
        store = init_eval.store.with(&declarator.name, init_eval.assumption);
    }
    Evaluation {
        assumption: Assumption::new(AssumptionKind::Unknown, decl.span),
        findings,
        store,
    }
}

fn assignment(
    assign: &AssignExpr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    if assign.compound {
        return Evaluation::inert(Assumption::new(AssumptionKind::Unknown, assign.span), store);
    }
    let value = evaluate(&assign.value, contracts, store, inverted);
    let store = match assign.target.as_ref() {
        Expr::Name(name) => value.store.with(&name.name, value.assumption),
        // field or array targets are not tracked; the value's effects remain
        _ => value.store,
    };
    Evaluation {
        assumption: value.assumption,
        findings: value.findings,
        store,
    }
}

fn field_access(access: &FieldAccessExpr, store: &AssumptionStore) -> Evaluation {
    let mut findings = Vec::new();
    if let Expr::Name(scope) = access.scope.unwrap_parens() {
        if let Some(assumption) = store.get(&scope.name) {
            match assumption.kind {
                AssumptionKind::Nullable => findings.push(Finding::new(
                    FindingKind::FieldAccessMayBeNull,
                    access.span,
                    assumption,
                )),
                AssumptionKind::Null => findings.push(Finding::new(
                    FindingKind::FieldAccessIsNull,
                    access.span,
                    assumption,
                )),
                AssumptionKind::NotNull | AssumptionKind::Unknown => {}
            }
        }
    }
    // fields are not tracked as named entities, so the access itself is Unknown
    Evaluation {
        assumption: Assumption::new(AssumptionKind::Unknown, access.span),
        findings,
        store: store.clone(),
    }
}

fn method_call(
    call: &CallExpr,
    contracts: &MethodContracts,
    store: &AssumptionStore,
    inverted: bool,
) -> Evaluation {
    let result = Assumption::new(AssumptionKind::Unknown, call.span);
    match call.receiver.as_deref() {
        None => {
            let Some(params) = contracts.params_for_call(&call.name) else {
                return Evaluation::inert(result, store);
            };
            if params.len() != call.args.len() {
                return Evaluation::inert(result, store);
            }
            // arguments contribute their assumptions only; findings and
            // store changes inside them are discarded
            let args: Vec<Assumption> = call
                .args
                .iter()
                .map(|arg| evaluate(arg, contracts, store, inverted).assumption)
                .collect();
            let mut findings = Vec::new();
            for ((_, declared), arg) in params.iter().zip(&args) {
                if declared.kind != AssumptionKind::NotNull
                    || arg.kind == AssumptionKind::NotNull
                {
                    continue;
                }
                let kind = if arg.kind == AssumptionKind::Null {
                    FindingKind::FunctionCallIsNull
                } else {
                    FindingKind::FunctionCallMayBeNull
                };
                findings.push(Finding::new(kind, call.span, *arg));
            }
            Evaluation {
                assumption: result,
                findings,
                store: store.clone(),
            }
        }
        Some(Expr::Name(receiver)) => {
            let mut findings = Vec::new();
            if let Some(assumption) = store.get(&receiver.name) {
                match assumption.kind {
                    AssumptionKind::Null => findings.push(Finding::new(
                        FindingKind::FieldAccessIsNull,
                        call.span,
                        assumption,
                    )),
                    AssumptionKind::Nullable => findings.push(Finding::new(
                        FindingKind::FieldAccessMayBeNull,
                        call.span,
                        assumption,
                    )),
                    AssumptionKind::NotNull | AssumptionKind::Unknown => {}
                }
            }
            Evaluation {
                assumption: result,
                findings,
                store: store.clone(),
            }
        }
        // calls on chained receivers are not analyzed
        Some(_) => Evaluation::inert(result, store),
    }
}
