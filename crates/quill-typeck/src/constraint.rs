//! The constraint algebra: equality, member presence, disjunction.
//!
//! Constraints are immutable once built; simplification only ever produces
//! new constraint values. Each kind reduces itself against the current
//! substitution and the type catalogue into a tautology, a contradiction,
//! a replacement constraint, or no progress.
//!
//! A constraint may carry a failure message provider: a deferred closure
//! invoked only if the constraint is ultimately judged unsatisfiable. The
//! provider (and span) propagate through every rewrite, so a member
//! constraint that case-splits into a disjunction still reports the
//! author's original intent when that disjunction later dies.

use std::fmt;
use std::rc::Rc;

use crate::catalogue::TypeCatalogue;
use crate::error::{ExtendError, Failure, Span};
use crate::subst::Substitution;
use crate::ty::{Ty, TyVar};

/// Deferred diagnostic text, invoked only on failure. Takes the current
/// substitution so the message can name resolved types.
pub type FailureMessageProvider = Rc<dyn Fn(&mut Substitution) -> String>;

/// The result of one simplification step.
#[derive(Debug)]
pub enum Simplified {
    /// The constraint is satisfied; drop it.
    Tautology,
    /// The constraint is violated; report and drop it.
    Contradiction(Failure),
    /// No progress possible yet; retry on a later pass.
    Unchanged,
    /// The constraint rewrote itself into a simpler one.
    Replaced(Constraint),
}

/// One requirement a solution must satisfy.
#[derive(Clone)]
pub struct Constraint {
    kind: ConstraintKind,
    failure_message: Option<FailureMessageProvider>,
    span: Option<Span>,
}

#[derive(Clone, Debug)]
pub enum ConstraintKind {
    /// Both sides must resolve to the same concrete type.
    Equality(Ty, Ty),
    /// The type must resolve to a concrete type with the named member.
    HasMember(Ty, String),
    /// At least one alternative must hold. Order is preserved for
    /// deterministic diagnostics only.
    Disjunction(Vec<Constraint>),
}

impl Constraint {
    /// Require `a` and `b` to resolve to the same concrete type.
    pub fn equality(a: Ty, b: Ty) -> Self {
        Constraint { kind: ConstraintKind::Equality(a, b), failure_message: None, span: None }
    }

    /// Require `ty` to resolve to a concrete type with member `member`.
    pub fn has_member(ty: Ty, member: impl Into<String>) -> Self {
        Constraint {
            kind: ConstraintKind::HasMember(ty, member.into()),
            failure_message: None,
            span: None,
        }
    }

    /// Require at least one of `alternatives` to hold.
    pub fn disjunction(alternatives: Vec<Constraint>) -> Self {
        Constraint {
            kind: ConstraintKind::Disjunction(alternatives),
            failure_message: None,
            span: None,
        }
    }

    /// Attach a deferred failure message (builder style).
    pub fn with_failure_message(
        mut self,
        provider: impl Fn(&mut Substitution) -> String + 'static,
    ) -> Self {
        self.failure_message = Some(Rc::new(provider));
        self
    }

    /// Attach a source span (builder style).
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn failure_message(&self) -> Option<&FailureMessageProvider> {
        self.failure_message.as_ref()
    }

    /// Collect every variable mentioned by this constraint, in mention order.
    pub fn collect_vars(&self, out: &mut Vec<TyVar>) {
        fn push(ty: &Ty, out: &mut Vec<TyVar>) {
            if let Ty::Var(v) = ty {
                out.push(*v);
            }
        }
        match &self.kind {
            ConstraintKind::Equality(a, b) => {
                push(a, out);
                push(b, out);
            }
            ConstraintKind::HasMember(ty, _) => push(ty, out),
            ConstraintKind::Disjunction(alts) => {
                for alt in alts {
                    alt.collect_vars(out);
                }
            }
        }
    }

    /// Hand this constraint's provider and span down to a derived constraint
    /// that lacks its own.
    fn bequeath(&self, mut derived: Constraint) -> Constraint {
        if derived.failure_message.is_none() {
            derived.failure_message = self.failure_message.clone();
        }
        if derived.span.is_none() {
            derived.span = self.span;
        }
        derived
    }

    /// One reduction step against the current substitution and catalogue.
    pub fn simplify(&self, subst: &mut Substitution, catalogue: &TypeCatalogue) -> Simplified {
        match &self.kind {
            ConstraintKind::Equality(a, b) => simplify_equality(a, b, subst),
            ConstraintKind::HasMember(ty, member) => {
                self.simplify_has_member(ty, member, subst, catalogue)
            }
            ConstraintKind::Disjunction(alts) => {
                self.simplify_disjunction(alts, subst, catalogue)
            }
        }
    }

    fn simplify_has_member(
        &self,
        ty: &Ty,
        member: &str,
        subst: &mut Substitution,
        catalogue: &TypeCatalogue,
    ) -> Simplified {
        match subst.resolve(ty.clone()) {
            Ty::Con(con) => {
                let has = catalogue
                    .get(&con.name)
                    .is_some_and(|def| def.has_member(member));
                if has {
                    Simplified::Tautology
                } else {
                    Simplified::Contradiction(Failure::missing_member(&Ty::Con(con), member))
                }
            }
            unresolved => {
                // Case-split over every catalogue type that has the member.
                let alternatives: Vec<Constraint> = catalogue
                    .types_with_member(member)
                    .map(|def| Constraint::equality(unresolved.clone(), def.ty()))
                    .collect();
                if alternatives.is_empty() {
                    return Simplified::Contradiction(Failure::no_applicable_member(
                        member,
                        &catalogue.type_names(),
                    ));
                }
                let disjunction = self.bequeath(Constraint::disjunction(alternatives));
                match disjunction.simplify(subst, catalogue) {
                    Simplified::Unchanged => Simplified::Replaced(disjunction),
                    outcome => outcome,
                }
            }
        }
    }

    fn simplify_disjunction(
        &self,
        alternatives: &[Constraint],
        subst: &mut Substitution,
        catalogue: &TypeCatalogue,
    ) -> Simplified {
        // Trial every alternative against a copy of the confirmed
        // substitution: branches must not observe one another's bindings.
        let mut viable = Vec::new();
        let mut first_failure: Option<Failure> = None;
        for (i, alt) in alternatives.iter().enumerate() {
            let mut trial = subst.clone();
            let before = trial.extensions();
            match alt.simplify(&mut trial, catalogue) {
                Simplified::Contradiction(failure) => {
                    if first_failure.is_none() {
                        first_failure = Some(failure);
                    }
                }
                Simplified::Tautology if trial.extensions() == before => {
                    // Satisfied under the confirmed substitution alone, with
                    // no speculative binding: the disjunction holds outright.
                    return Simplified::Tautology;
                }
                _ => viable.push(i),
            }
        }

        match viable.len() {
            0 => Simplified::Contradiction(first_failure.unwrap_or(Failure {
                kind: crate::error::DiagnosticKind::TypeMismatch,
                message: "disjunction has no alternatives".to_string(),
            })),
            1 => {
                // Sole viable branch: commit it against the real substitution.
                let only = &alternatives[viable[0]];
                match only.simplify(subst, catalogue) {
                    Simplified::Unchanged => {
                        if alternatives.len() == 1 {
                            Simplified::Unchanged
                        } else {
                            Simplified::Replaced(self.bequeath(only.clone()))
                        }
                    }
                    Simplified::Replaced(next) => Simplified::Replaced(self.bequeath(next)),
                    outcome => outcome,
                }
            }
            n if n < alternatives.len() => {
                // Shed the dead branches, keep the rest for a later pass.
                let kept = viable
                    .into_iter()
                    .map(|i| alternatives[i].clone())
                    .collect();
                Simplified::Replaced(self.bequeath(Constraint::disjunction(kept)))
            }
            _ => Simplified::Unchanged,
        }
    }
}

fn simplify_equality(a: &Ty, b: &Ty, subst: &mut Substitution) -> Simplified {
    let a = subst.resolve(a.clone());
    let b = subst.resolve(b.clone());
    match (a, b) {
        (Ty::Con(x), Ty::Con(y)) => {
            if x == y {
                Simplified::Tautology
            } else {
                Simplified::Contradiction(Failure::mismatch(&Ty::Con(x), &Ty::Con(y)))
            }
        }
        // Reflexivity: resolve() normalizes to the class representative,
        // so unified variables compare equal here.
        (Ty::Var(v), Ty::Var(w)) if v == w => Simplified::Tautology,
        // Two distinct unresolved variables: defer until another
        // constraint pins one side.
        (Ty::Var(_), Ty::Var(_)) => Simplified::Unchanged,
        (Ty::Var(v), concrete) | (concrete, Ty::Var(v)) => match subst.extend(v, concrete) {
            Ok(()) => Simplified::Tautology,
            Err(ExtendError::Conflict { bound, attempted }) => {
                Simplified::Contradiction(Failure::mismatch(&bound, &attempted))
            }
            Err(ExtendError::Cycle { var }) => Simplified::Contradiction(Failure::cyclic(var)),
        },
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::Equality(a, b) => write!(f, "{a} == {b}"),
            ConstraintKind::HasMember(ty, member) => write!(f, "{ty}.[{member}]"),
            ConstraintKind::Disjunction(alts) => {
                write!(f, "(")?;
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "{alt}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("kind", &self.kind)
            .field("has_failure_message", &self.failure_message.is_some())
            .field("span", &self.span)
            .finish()
    }
}
