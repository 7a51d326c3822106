//! The type catalogue: the closed set of concrete types known to a solve.
//!
//! Each concrete type carries a name, an optional parent (subtype edge),
//! a diagnostic description, and a table of named members. The solver only
//! ever reads member tables; it never invokes or mutates them. Iteration
//! order is registration order, which keeps member-presence case-splits
//! deterministic.

use rustc_hash::FxHashMap;

use crate::error::CatalogueError;
use crate::ty::Ty;

/// The signature of a named member (operation) on a concrete type.
///
/// The solver treats signatures as opaque capabilities: it only tests for
/// a member's *presence*. Arity and parameter/return shape are recorded so
/// the constraint-emitting pass can build call-site constraints from them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSig {
    /// Parameter types, in order.
    pub params: Vec<Ty>,
    /// Return type.
    pub ret: Ty,
}

impl MemberSig {
    pub fn new(params: Vec<Ty>, ret: Ty) -> Self {
        MemberSig { params, ret }
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A concrete type definition.
#[derive(Clone, Debug)]
pub struct TypeDef {
    /// The type's name; also its identity.
    pub name: String,
    /// Parent type name, if any. Present for future subtyping rules; the
    /// equality rules in this crate do not consult it.
    pub parent: Option<String>,
    /// Human-readable description, used only in diagnostics.
    pub description: String,
    members: FxHashMap<String, MemberSig>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        TypeDef {
            name: name.into(),
            parent: None,
            description: description.into(),
            members: FxHashMap::default(),
        }
    }

    /// Set the parent type (builder style).
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Add a member (builder style). Re-adding a name replaces the signature.
    pub fn with_member(mut self, name: impl Into<String>, sig: MemberSig) -> Self {
        self.members.insert(name.into(), sig);
        self
    }

    /// Whether this type has a member with the given name.
    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Look up a member signature.
    pub fn member(&self, name: &str) -> Option<&MemberSig> {
        self.members.get(name)
    }

    /// The type as a `Ty` value.
    pub fn ty(&self) -> Ty {
        Ty::con(self.name.clone())
    }
}

/// The catalogue of concrete types for one solve.
///
/// Immutable once handed to the solver. Registration order is preserved:
/// `iter` and `types_with_member` yield types in the order they were
/// registered, so case-splits and diagnostics are deterministic.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalogue {
    defs: Vec<TypeDef>,
    index: FxHashMap<String, usize>,
}

impl TypeCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete type.
    ///
    /// Duplicate names are a contract violation by the catalogue builder,
    /// surfaced as an error rather than a user-facing diagnostic.
    pub fn register(&mut self, def: TypeDef) -> Result<(), CatalogueError> {
        if self.index.contains_key(&def.name) {
            return Err(CatalogueError::DuplicateTypeName(def.name));
        }
        self.index.insert(def.name.clone(), self.defs.len());
        self.defs.push(def);
        Ok(())
    }

    /// Look up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.index.get(name).map(|&i| &self.defs[i])
    }

    /// All registered types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.defs.iter()
    }

    /// All types whose member table contains `member`, in registration order.
    pub fn types_with_member<'a>(
        &'a self,
        member: &'a str,
    ) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.defs.iter().filter(move |d| d.has_member(member))
    }

    /// Names of all registered types, in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.defs.iter().map(|d| d.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig0() -> MemberSig {
        MemberSig::new(vec![Ty::number()], Ty::number())
    }

    #[test]
    fn register_and_lookup() {
        let mut cat = TypeCatalogue::new();
        cat.register(TypeDef::new("Number", "A number.").with_member("Add", sig0()))
            .unwrap();
        assert!(cat.get("Number").unwrap().has_member("Add"));
        assert!(!cat.get("Number").unwrap().has_member("Concat"));
        assert!(cat.get("String").is_none());
    }

    #[test]
    fn duplicate_registration_is_an_error() {
        let mut cat = TypeCatalogue::new();
        cat.register(TypeDef::new("Number", "A number.")).unwrap();
        let err = cat.register(TypeDef::new("Number", "Another number."));
        assert!(matches!(err, Err(CatalogueError::DuplicateTypeName(n)) if n == "Number"));
    }

    #[test]
    fn member_search_preserves_registration_order() {
        let mut cat = TypeCatalogue::new();
        cat.register(TypeDef::new("B", "").with_member("M", sig0())).unwrap();
        cat.register(TypeDef::new("A", "").with_member("M", sig0())).unwrap();
        let found: Vec<_> = cat.types_with_member("M").map(|d| d.name.as_str()).collect();
        assert_eq!(found, vec!["B", "A"]);
    }
}
