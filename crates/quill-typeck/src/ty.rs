//! Type representation for the Quill type solver.
//!
//! Defines the core `Ty` enum and type variables (`TyVar`). Quill's type
//! system is nominal and monomorphic: a type is either a named concrete
//! type from the catalogue or an inference variable waiting to be pinned
//! by the solver.

use std::fmt;

/// A type variable, identified by a `u32` index into the unification table.
///
/// Type variables are created by the constraint-emitting pass (one per
/// expression whose type is not yet known) and resolved by the solver.
/// The `ena` crate handles the union-find mechanics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TyVar(pub u32);

/// A concrete type constructor, identified by name.
///
/// Quill types are nominal: two constructors are the same type exactly
/// when their names match. Member tables, parent edges, and descriptions
/// live on the catalogue's [`TypeDef`](crate::catalogue::TypeDef), not
/// here, so `Ty` values stay cheap to clone and compare.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TyCon {
    pub name: String,
}

impl TyCon {
    pub fn new(name: impl Into<String>) -> Self {
        TyCon { name: name.into() }
    }
}

impl fmt::Display for TyCon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A Quill type: either an inference variable or a concrete named type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    /// A type variable (unresolved during solving).
    Var(TyVar),
    /// A concrete type from the catalogue.
    Con(TyCon),
}

impl Ty {
    /// Create a concrete type by name.
    pub fn con(name: impl Into<String>) -> Ty {
        Ty::Con(TyCon::new(name))
    }

    /// Create the `Any` type.
    pub fn any() -> Ty {
        Ty::con("Any")
    }

    /// Create the `Number` type.
    pub fn number() -> Ty {
        Ty::con("Number")
    }

    /// Create the `String` type.
    pub fn string() -> Ty {
        Ty::con("String")
    }

    /// Create the `Bool` type.
    pub fn bool() -> Ty {
        Ty::con("Bool")
    }

    /// Whether this type is an inference variable.
    pub fn is_var(&self) -> bool {
        matches!(self, Ty::Var(_))
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Var(v) => write!(f, "?{}", v.0),
            Ty::Con(c) => write!(f, "{}", c),
        }
    }
}

// ── ena trait implementations ──────────────────────────────────────────

impl ena::unify::UnifyKey for TyVar {
    type Value = Option<Ty>;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        TyVar(u)
    }

    fn tag() -> &'static str {
        "TyVar"
    }
}

impl ena::unify::EqUnifyValue for Ty {}
