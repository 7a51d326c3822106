//! Failure and diagnostic types for the constraint solver.
//!
//! Ordinary type errors never abort a solve: each one becomes a
//! [`Diagnostic`] and solving continues, so one compile surfaces every
//! independent error. Only contract violations by the caller (duplicate
//! catalogue names) are surfaced as `Result` errors at construction time.

use std::fmt;
use std::ops::Range;

use crate::ty::{Ty, TyVar};

/// A byte range in the script source, supplied by the constraint-emitting
/// pass. The solver never inspects source text; spans only flow through to
/// diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// The category of a solver diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Two types required equal resolved to different concrete types.
    TypeMismatch,
    /// Extending a variable would bind it to itself. Well-formed constraint
    /// emission never produces this; it is an internal-consistency check.
    CyclicBinding,
    /// No catalogue type (or not the resolved type) supports a required member.
    NoApplicableMember,
    /// The solver stalled before the constraint could be decided.
    AmbiguousType,
}

/// Why a constraint was judged unsatisfiable.
///
/// Produced by `Constraint::simplify`; the solver turns it into a
/// [`Diagnostic`], substituting the constraint's own failure message
/// provider if one was attached.
#[derive(Clone, Debug)]
pub struct Failure {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Failure {
    pub fn mismatch(expected: &Ty, found: &Ty) -> Self {
        Failure {
            kind: DiagnosticKind::TypeMismatch,
            message: format!("type mismatch: expected `{expected}`, found `{found}`"),
        }
    }

    pub fn cyclic(var: TyVar) -> Self {
        Failure {
            kind: DiagnosticKind::CyclicBinding,
            message: format!("internal: binding `?{}` would make it refer to itself", var.0),
        }
    }

    pub fn missing_member(ty: &Ty, member: &str) -> Self {
        Failure {
            kind: DiagnosticKind::NoApplicableMember,
            message: format!("type `{ty}` has no member `{member}`"),
        }
    }

    pub fn no_applicable_member(member: &str, searched: &[String]) -> Self {
        Failure {
            kind: DiagnosticKind::NoApplicableMember,
            message: if searched.is_empty() {
                format!("no known type has a member `{member}`")
            } else {
                format!(
                    "no known type has a member `{member}` (searched {})",
                    searched.join(", ")
                )
            },
        }
    }
}

/// A single solver diagnostic.
///
/// Carries the resolved human-readable message (from the failing
/// constraint's message provider if it had one), the constraint's
/// rendering (e.g. `?0.[Add]`), and the source span if the constraint
/// carried one.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    /// Rendering of the offending constraint.
    pub constraint: String,
    pub span: Option<Span>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.constraint, self.message)
    }
}

/// Failure to extend the substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtendError {
    /// The variable already resolves to a different concrete type.
    Conflict { bound: Ty, attempted: Ty },
    /// The binding would make the variable resolve to itself.
    Cycle { var: TyVar },
}

impl fmt::Display for ExtendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtendError::Conflict { bound, attempted } => {
                write!(f, "conflicting binding: already `{bound}`, attempted `{attempted}`")
            }
            ExtendError::Cycle { var } => {
                write!(f, "cyclic binding of `?{}`", var.0)
            }
        }
    }
}

impl std::error::Error for ExtendError {}

/// Contract violation while building a type catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogueError {
    /// Two concrete types were registered under the same name.
    DuplicateTypeName(String),
}

impl fmt::Display for CatalogueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogueError::DuplicateTypeName(name) => {
                write!(f, "duplicate type name `{name}` in catalogue")
            }
        }
    }
}

impl std::error::Error for CatalogueError {}
