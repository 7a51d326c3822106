//! The standard Quill type catalogue.
//!
//! Registers the built-in script types and the operator members each one
//! supports. Operator members are what the constraint-emitting pass targets
//! when it sees `a + b` (a `HasMember(_, "Add")` constraint on the operand
//! type), so the tables below define which operators each built-in accepts.

use crate::catalogue::{MemberSig, TypeCatalogue, TypeDef};
use crate::ty::Ty;

fn binary(operand: Ty, ret: Ty) -> MemberSig {
    MemberSig::new(vec![operand.clone(), operand], ret)
}

fn unary(operand: Ty, ret: Ty) -> MemberSig {
    MemberSig::new(vec![operand], ret)
}

/// Build the catalogue of built-in script types: `Any`, `Number`, `String`
/// and `Bool`, each (except `Any`) with `Any` as parent.
pub fn standard_catalogue() -> TypeCatalogue {
    let mut catalogue = TypeCatalogue::new();

    catalogue
        .register(TypeDef::new("Any", "Any type."))
        .expect("built-in type names are unique");

    let number = TypeDef::new("Number", "A number.")
        .with_parent("Any")
        .with_member("Add", binary(Ty::number(), Ty::number()))
        .with_member("Minus", binary(Ty::number(), Ty::number()))
        .with_member("Multiply", binary(Ty::number(), Ty::number()))
        .with_member("Divide", binary(Ty::number(), Ty::number()))
        .with_member("Modulo", binary(Ty::number(), Ty::number()))
        .with_member("UnaryMinus", unary(Ty::number(), Ty::number()))
        .with_member("EqualTo", binary(Ty::number(), Ty::bool()))
        .with_member("NotEqualTo", binary(Ty::number(), Ty::bool()))
        .with_member("GreaterThan", binary(Ty::number(), Ty::bool()))
        .with_member("GreaterThanOrEqualTo", binary(Ty::number(), Ty::bool()))
        .with_member("LessThan", binary(Ty::number(), Ty::bool()))
        .with_member("LessThanOrEqualTo", binary(Ty::number(), Ty::bool()));
    catalogue.register(number).expect("built-in type names are unique");

    // String addition is concatenation.
    let string = TypeDef::new("String", "A string.")
        .with_parent("Any")
        .with_member("Add", binary(Ty::string(), Ty::string()))
        .with_member("EqualTo", binary(Ty::string(), Ty::bool()))
        .with_member("NotEqualTo", binary(Ty::string(), Ty::bool()));
    catalogue.register(string).expect("built-in type names are unique");

    let boolean = TypeDef::new("Bool", "A boolean value.")
        .with_parent("Any")
        .with_member("And", binary(Ty::bool(), Ty::bool()))
        .with_member("Or", binary(Ty::bool(), Ty::bool()))
        .with_member("Xor", binary(Ty::bool(), Ty::bool()))
        .with_member("Not", unary(Ty::bool(), Ty::bool()))
        .with_member("EqualTo", binary(Ty::bool(), Ty::bool()))
        .with_member("NotEqualTo", binary(Ty::bool(), Ty::bool()));
    catalogue.register(boolean).expect("built-in type names are unique");

    catalogue
}
