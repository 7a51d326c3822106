//! The fixpoint solver: repeated simplification of a constraint set.
//!
//! One pass simplifies every constraint once, in submission order, against
//! the substitution as it stands; later constraints in a pass observe
//! extensions made by earlier ones. Passes repeat while progress occurs.
//! Contradictions are collected as diagnostics and removed, never aborting
//! the solve, so a single compile reports every independent type error.

use rustc_hash::FxHashSet;

use crate::catalogue::TypeCatalogue;
use crate::constraint::{Constraint, ConstraintKind, Simplified};
use crate::error::{Diagnostic, DiagnosticKind, Failure};
use crate::subst::Substitution;
use crate::ty::{Ty, TyVar};

/// Solve a constraint set against a catalogue of known types.
///
/// `subst` is the substitution that minted the constraint set's type
/// variables; it starts with no bindings and accumulates them monotonically.
/// Returns the final substitution and the diagnostics. The substitution
/// resolves every variable mentioned by the input constraints to a concrete
/// type exactly when the diagnostic list is empty.
pub fn solve(
    constraints: Vec<Constraint>,
    catalogue: &TypeCatalogue,
    mut subst: Substitution,
) -> (Substitution, Vec<Diagnostic>) {
    let mentioned = mentioned_vars(&constraints);
    let mut diagnostics = Vec::new();
    let mut work = constraints;

    loop {
        let mut progress = false;
        let mut remaining = Vec::with_capacity(work.len());

        for constraint in work {
            let before = subst.extensions();
            match constraint.simplify(&mut subst, catalogue) {
                Simplified::Tautology => progress = true,
                Simplified::Contradiction(failure) => {
                    diagnostics.push(failed(&constraint, failure, &mut subst));
                    progress = true;
                }
                Simplified::Replaced(next) => {
                    remaining.push(next);
                    progress = true;
                }
                Simplified::Unchanged => {
                    if subst.extensions() > before {
                        progress = true;
                    }
                    remaining.push(constraint);
                }
            }
        }

        work = remaining;
        if work.is_empty() || !progress {
            break;
        }
    }

    // Stalled constraints: no pass can make progress, yet requirements
    // remain. Each is reported as an ambiguity.
    for constraint in &work {
        diagnostics.push(stalled(constraint, &mut subst));
    }

    // Resolution audit: a clean solve must leave no mentioned variable
    // unresolved (e.g. two variables equated to each other and nothing else).
    if diagnostics.is_empty() {
        let mut seen = FxHashSet::default();
        for var in mentioned {
            if let Ty::Var(rep) = subst.resolve(Ty::Var(var)) {
                if seen.insert(rep) {
                    diagnostics.push(unresolved(rep));
                }
            }
        }
    }

    (subst, diagnostics)
}

/// Variables mentioned by the input constraints, in first-mention order.
fn mentioned_vars(constraints: &[Constraint]) -> Vec<TyVar> {
    let mut vars = Vec::new();
    for constraint in constraints {
        constraint.collect_vars(&mut vars);
    }
    let mut seen = FxHashSet::default();
    vars.retain(|v| seen.insert(*v));
    vars
}

fn failed(constraint: &Constraint, failure: Failure, subst: &mut Substitution) -> Diagnostic {
    let message = match constraint.failure_message() {
        Some(provider) => provider(subst),
        None => failure.message,
    };
    Diagnostic {
        kind: failure.kind,
        message,
        constraint: constraint.to_string(),
        span: constraint.span(),
    }
}

fn stalled(constraint: &Constraint, subst: &mut Substitution) -> Diagnostic {
    Diagnostic {
        kind: DiagnosticKind::AmbiguousType,
        message: ambiguity_message(constraint, subst),
        constraint: constraint.to_string(),
        span: constraint.span(),
    }
}

/// Message for a constraint left undecided at the end of a solve. A stalled
/// disjunction defers to its first alternative so errors stay deterministic.
fn ambiguity_message(constraint: &Constraint, subst: &mut Substitution) -> String {
    if let Some(provider) = constraint.failure_message() {
        return provider(subst);
    }
    match constraint.kind() {
        ConstraintKind::Disjunction(alts) if !alts.is_empty() => {
            ambiguity_message(&alts[0], subst)
        }
        _ => format!("cannot infer type: `{constraint}` is still ambiguous"),
    }
}

fn unresolved(rep: TyVar) -> Diagnostic {
    Diagnostic {
        kind: DiagnosticKind::AmbiguousType,
        message: format!("cannot infer a concrete type for `?{}`", rep.0),
        constraint: format!("?{}", rep.0),
        span: None,
    }
}
