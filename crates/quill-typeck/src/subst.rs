//! The substitution: an evolving mapping from type variables to types.
//!
//! Backed by `ena`'s union-find table, so chain resolution is cheap and
//! cycles cannot be formed behind the solver's back: `extend` refuses any
//! binding that would make a variable resolve to itself, and every other
//! binding either unions two variables or pins a root to a concrete type.
//!
//! The substitution is monotonic within one solve: bindings are only added
//! or tightened (variable-to-variable links replaced by concrete pins),
//! never removed. The `extensions` counter exposes that monotonicity to the
//! solver's progress check. Cloning is cheap enough that disjunction
//! alternatives are trialed against throwaway copies.

use ena::unify::InPlaceUnificationTable;

use crate::error::ExtendError;
use crate::ty::{Ty, TyVar};

/// The accumulated record of which type variables are pinned to which types.
#[derive(Clone, Debug)]
pub struct Substitution {
    table: InPlaceUnificationTable<TyVar>,
    extensions: u32,
}

impl Default for Substitution {
    fn default() -> Self {
        Self::new()
    }
}

impl Substitution {
    /// Create a new, empty substitution.
    pub fn new() -> Self {
        Substitution {
            table: InPlaceUnificationTable::new(),
            extensions: 0,
        }
    }

    /// Create a fresh type variable.
    ///
    /// Variables are minted by the constraint-emitting pass before solving;
    /// the solver itself never creates one.
    pub fn fresh_var(&mut self) -> Ty {
        Ty::Var(self.table.new_key(None))
    }

    /// Number of variables created so far.
    pub fn num_vars(&self) -> usize {
        self.table.len()
    }

    /// Number of successful extensions so far. Strictly non-decreasing;
    /// the solver uses it to detect progress within a pass.
    pub fn extensions(&self) -> u32 {
        self.extensions
    }

    /// Resolve a type through the substitution.
    ///
    /// Concrete types come back unchanged. A variable follows its binding
    /// chain to the representative: a concrete type if the chain is pinned,
    /// otherwise the root variable of its equivalence class. Union-find
    /// guarantees termination; `extend` refuses the bindings that could
    /// form a chain back onto itself.
    pub fn resolve(&mut self, ty: Ty) -> Ty {
        match ty {
            Ty::Var(v) => match self.table.probe_value(v) {
                Some(inner) => self.resolve(inner),
                None => Ty::Var(self.table.find(v)),
            },
            concrete => concrete,
        }
    }

    /// Bind `var` to `ty`.
    ///
    /// Fails with [`ExtendError::Cycle`] if `ty` resolves back to `var`
    /// itself, and with [`ExtendError::Conflict`] if `var` already resolves
    /// to a different concrete type than `ty` does. Binding a variable to
    /// the concrete type it already resolves to is a no-op.
    pub fn extend(&mut self, var: TyVar, ty: Ty) -> Result<(), ExtendError> {
        let target = self.resolve(ty);
        let current = self.resolve(Ty::Var(var));

        match (current, target) {
            (Ty::Var(root), Ty::Var(other)) => {
                if root == other {
                    return Err(ExtendError::Cycle { var });
                }
                self.table
                    .unify_var_var(root, other)
                    .expect("unifying two unbound variables cannot conflict");
                self.extensions += 1;
                Ok(())
            }
            (Ty::Var(root), concrete) => {
                self.table
                    .unify_var_value(root, Some(concrete))
                    .expect("pinning an unbound variable cannot conflict");
                self.extensions += 1;
                Ok(())
            }
            (bound, Ty::Var(other)) => {
                // `var` is already pinned; tighten the other chain onto it.
                self.table
                    .unify_var_value(other, Some(bound))
                    .expect("pinning an unbound variable cannot conflict");
                self.extensions += 1;
                Ok(())
            }
            (bound, attempted) => {
                if bound == attempted {
                    Ok(())
                } else {
                    Err(ExtendError::Conflict { bound, attempted })
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_concrete_is_identity() {
        let mut subst = Substitution::new();
        assert_eq!(subst.resolve(Ty::number()), Ty::number());
    }

    #[test]
    fn resolve_unbound_var_is_its_own_representative() {
        let mut subst = Substitution::new();
        let v = subst.fresh_var();
        assert_eq!(subst.resolve(v.clone()), v);
    }

    #[test]
    fn extend_pins_a_variable() {
        let mut subst = Substitution::new();
        let v = subst.fresh_var();
        let Ty::Var(var) = v else { unreachable!() };
        subst.extend(var, Ty::number()).unwrap();
        assert_eq!(subst.resolve(v), Ty::number());
        assert_eq!(subst.extensions(), 1);
    }

    #[test]
    fn chains_resolve_through_variables() {
        let mut subst = Substitution::new();
        let a = subst.fresh_var();
        let b = subst.fresh_var();
        let Ty::Var(va) = a else { unreachable!() };
        subst.extend(va, b.clone()).unwrap();
        // a -> b, both still unresolved: same representative.
        assert_eq!(subst.resolve(a.clone()), subst.resolve(b.clone()));
        let Ty::Var(vb) = b else { unreachable!() };
        subst.extend(vb, Ty::string()).unwrap();
        assert_eq!(subst.resolve(a), Ty::string());
    }

    #[test]
    fn extend_is_idempotent_on_equal_concrete() {
        let mut subst = Substitution::new();
        let v = subst.fresh_var();
        let Ty::Var(var) = v else { unreachable!() };
        subst.extend(var, Ty::number()).unwrap();
        let before = subst.extensions();
        subst.extend(var, Ty::number()).unwrap();
        assert_eq!(subst.extensions(), before, "re-binding to the same type is a no-op");
    }

    #[test]
    fn extend_conflict() {
        let mut subst = Substitution::new();
        let v = subst.fresh_var();
        let Ty::Var(var) = v else { unreachable!() };
        subst.extend(var, Ty::number()).unwrap();
        let err = subst.extend(var, Ty::string()).unwrap_err();
        assert_eq!(
            err,
            ExtendError::Conflict { bound: Ty::number(), attempted: Ty::string() }
        );
    }

    #[test]
    fn extend_cycle() {
        let mut subst = Substitution::new();
        let a = subst.fresh_var();
        let b = subst.fresh_var();
        let (Ty::Var(va), Ty::Var(vb)) = (a.clone(), b.clone()) else { unreachable!() };
        subst.extend(va, b).unwrap();
        // b now shares a class with a; binding it back is a cycle.
        let err = subst.extend(vb, a).unwrap_err();
        assert!(matches!(err, ExtendError::Cycle { .. }));
    }

    #[test]
    fn extend_through_a_pinned_chain() {
        let mut subst = Substitution::new();
        let a = subst.fresh_var();
        let b = subst.fresh_var();
        let (Ty::Var(va), Ty::Var(_vb)) = (a.clone(), b.clone()) else { unreachable!() };
        subst.extend(va, Ty::number()).unwrap();
        // a is pinned; extending a with the unresolved b drags b onto Number.
        subst.extend(va, b.clone()).unwrap();
        assert_eq!(subst.resolve(b), Ty::number());
    }

    #[test]
    fn clones_are_isolated() {
        let mut subst = Substitution::new();
        let v = subst.fresh_var();
        let Ty::Var(var) = v.clone() else { unreachable!() };
        let mut trial = subst.clone();
        trial.extend(var, Ty::number()).unwrap();
        assert_eq!(trial.resolve(v.clone()), Ty::number());
        assert_eq!(subst.resolve(v.clone()), v, "trial bindings must not leak back");
    }
}
