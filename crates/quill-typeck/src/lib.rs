//! Quill type solver: constraint-based type inference for dialogue scripts.
//!
//! This crate is the type-checking core of the Quill compiler. The pass
//! that walks a parsed script emits an unordered bag of constraints
//! (equalities, member-presence requirements, and disjunctions of either)
//! over a mix of concrete types and inference variables; this crate solves
//! that bag against the catalogue of known types, producing either a
//! complete substitution or localized, human-readable diagnostics.
//!
//! It does not parse source text, walk syntax trees, or generate code;
//! those stages live elsewhere in the compiler.
//!
//! # Architecture
//!
//! - [`ty`]: Type representation (`Ty`, `TyCon`, `TyVar`)
//! - [`catalogue`]: The closed set of known concrete types and their members
//! - [`subst`]: Union-find substitution with conflict and cycle detection
//! - [`constraint`]: Constraint kinds and their simplification rules
//! - [`solver`]: The fixpoint pass loop and error collection
//! - [`builtins`]: The standard Quill catalogue (Any, Number, String, Bool)
//! - [`error`]: Diagnostic and failure types
//! - [`diagnostics`]: Ariadne rendering of diagnostics against source text
//!
//! # Example
//!
//! ```
//! use quill_typeck::{builtins, solve, Constraint, Substitution, Ty};
//!
//! let catalogue = builtins::standard_catalogue();
//! let mut subst = Substitution::new();
//! let operand = subst.fresh_var();
//!
//! // `<<set $x to $y * 2>>` emits, among others, a member constraint on $y.
//! let constraints = vec![
//!     Constraint::has_member(operand.clone(), "Multiply"),
//! ];
//!
//! let (mut subst, diagnostics) = solve(constraints, &catalogue, subst);
//! assert!(diagnostics.is_empty());
//! assert_eq!(subst.resolve(operand), Ty::number());
//! ```

pub mod builtins;
pub mod catalogue;
pub mod constraint;
pub mod diagnostics;
pub mod error;
pub mod solver;
pub mod subst;
pub mod ty;

pub use catalogue::{MemberSig, TypeCatalogue, TypeDef};
pub use constraint::{Constraint, ConstraintKind, FailureMessageProvider, Simplified};
pub use error::{CatalogueError, Diagnostic, DiagnosticKind, ExtendError, Failure, Span};
pub use solver::solve;
pub use subst::Substitution;
pub use ty::{Ty, TyCon, TyVar};
