//! End-to-end solver tests: overload resolution through member presence,
//! propagation through equalities, error collection, and determinism.

use quill_typeck::{
    builtins, solve, Constraint, DiagnosticKind, MemberSig, Substitution, Ty, TypeCatalogue,
    TypeDef,
};

/// Catalogue with exactly one `Add` type and one `Concat` type.
fn small_catalogue() -> TypeCatalogue {
    let mut cat = TypeCatalogue::new();
    cat.register(
        TypeDef::new("Number", "A number.").with_member(
            "Add",
            MemberSig::new(vec![Ty::number(), Ty::number()], Ty::number()),
        ),
    )
    .unwrap();
    cat.register(
        TypeDef::new("String", "A string.").with_member(
            "Concat",
            MemberSig::new(vec![Ty::string(), Ty::string()], Ty::string()),
        ),
    )
    .unwrap();
    cat
}

#[test]
fn member_presence_resolves_the_unique_candidate() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();

    let (mut subst, diagnostics) =
        solve(vec![Constraint::has_member(v1.clone(), "Add")], &cat, subst);

    assert!(diagnostics.is_empty());
    assert_eq!(subst.resolve(v1), Ty::number());
}

#[test]
fn conflicting_member_requirements_fail() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();

    let constraints = vec![
        Constraint::has_member(v1.clone(), "Add"),
        Constraint::has_member(v1, "Concat"),
    ];
    let (_, diagnostics) = solve(constraints, &cat, subst);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::NoApplicableMember);
    assert!(diagnostics[0].message.contains("Concat"));
}

#[test]
fn bindings_propagate_through_equality() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();
    let v2 = subst.fresh_var();

    let constraints = vec![
        Constraint::equality(v1.clone(), v2.clone()),
        Constraint::has_member(v2.clone(), "Add"),
    ];
    let (mut subst, diagnostics) = solve(constraints, &cat, subst);

    assert!(diagnostics.is_empty());
    assert_eq!(subst.resolve(v1), Ty::number());
    assert_eq!(subst.resolve(v2), Ty::number());
}

#[test]
fn nonexistent_member_fails_naming_it() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();

    let (_, diagnostics) =
        solve(vec![Constraint::has_member(v1, "Nonexistent")], &cat, subst);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::NoApplicableMember);
    assert!(diagnostics[0].message.contains("Nonexistent"));
}

#[test]
fn overloaded_member_is_ambiguous_without_more_evidence() {
    // Both Number and String support Add in the standard catalogue.
    let cat = builtins::standard_catalogue();
    let mut subst = Substitution::new();
    let v = subst.fresh_var();

    let (_, diagnostics) = solve(vec![Constraint::has_member(v, "Add")], &cat, subst);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::AmbiguousType);
}

#[test]
fn overloaded_member_resolves_once_an_equality_pins_it() {
    let cat = builtins::standard_catalogue();
    let mut subst = Substitution::new();
    let v = subst.fresh_var();

    let constraints = vec![
        Constraint::has_member(v.clone(), "Add"),
        Constraint::equality(v.clone(), Ty::string()),
    ];
    let (mut subst, diagnostics) = solve(constraints, &cat, subst);

    assert!(diagnostics.is_empty());
    assert_eq!(subst.resolve(v), Ty::string());
}

#[test]
fn custom_failure_message_survives_the_disjunction_rewrite() {
    // Force the HasMember -> Disjunction -> exhaustion path: Add is
    // overloaded, so the constraint first case-splits, then every branch
    // dies once the variable is pinned to Bool.
    let cat = builtins::standard_catalogue();
    let mut subst = Substitution::new();
    let v = subst.fresh_var();

    let constraints = vec![
        Constraint::has_member(v.clone(), "Add")
            .with_failure_message(|_| "operator + cannot be used with $money".to_string()),
        Constraint::equality(v, Ty::bool()),
    ];
    let (_, diagnostics) = solve(constraints, &cat, subst);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "operator + cannot be used with $money"
    );
}

#[test]
fn custom_failure_message_on_the_no_candidate_path() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v = subst.fresh_var();

    let constraint = Constraint::has_member(v, "Teleport")
        .with_failure_message(|_| "nothing in this story can Teleport".to_string());
    let (_, diagnostics) = solve(vec![constraint], &cat, subst);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "nothing in this story can Teleport");
}

#[test]
fn errors_are_collected_not_fail_fast() {
    let cat = small_catalogue();
    let subst = Substitution::new();

    let constraints = vec![
        Constraint::equality(Ty::number(), Ty::string()),
        Constraint::equality(Ty::string(), Ty::con("Bool")),
    ];
    let (_, diagnostics) = solve(constraints, &cat, subst);

    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::TypeMismatch));
}

#[test]
fn clean_solve_resolves_every_mentioned_variable() {
    let cat = small_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();
    let v2 = subst.fresh_var();

    // v1 == v2 alone pins neither; the solve must not claim success.
    let (_, diagnostics) = solve(
        vec![Constraint::equality(v1, v2)],
        &cat,
        subst,
    );
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::AmbiguousType));
}

#[test]
fn solved_equalities_hold_under_the_returned_substitution() {
    let cat = builtins::standard_catalogue();
    let mut subst = Substitution::new();
    let a = subst.fresh_var();
    let b = subst.fresh_var();

    let constraints = vec![
        Constraint::equality(a.clone(), b.clone()),
        Constraint::equality(b.clone(), Ty::number()),
        Constraint::has_member(a.clone(), "Modulo"),
    ];
    let (mut subst, diagnostics) = solve(constraints, &cat, subst);

    assert!(diagnostics.is_empty());
    assert_eq!(subst.resolve(a), subst.resolve(b.clone()));
    assert_eq!(subst.resolve(b), Ty::number());
}

#[test]
fn solving_is_deterministic() {
    let run = || {
        let cat = builtins::standard_catalogue();
        let mut subst = Substitution::new();
        let v1 = subst.fresh_var();
        let v2 = subst.fresh_var();
        let v3 = subst.fresh_var();
        let constraints = vec![
            Constraint::has_member(v1.clone(), "Add"),
            Constraint::equality(v1.clone(), v2.clone()),
            Constraint::equality(v2, Ty::string()),
            Constraint::has_member(v3.clone(), "Xor"),
            Constraint::equality(Ty::number(), Ty::bool()),
        ];
        let (mut subst, diagnostics) = solve(constraints, &cat, subst);
        let bindings = vec![subst.resolve(v1), subst.resolve(v3)];
        let messages: Vec<String> = diagnostics.iter().map(|d| d.to_string()).collect();
        (bindings, messages)
    };

    assert_eq!(run(), run());
}

#[test]
fn extensions_are_monotonic_across_a_solve() {
    let cat = builtins::standard_catalogue();
    let mut subst = Substitution::new();
    let v1 = subst.fresh_var();
    let v2 = subst.fresh_var();
    let before = subst.extensions();

    let constraints = vec![
        Constraint::equality(v1.clone(), v2),
        Constraint::has_member(v1, "Concat"),
    ];
    let (subst, _) = solve(constraints, &cat, subst);

    assert!(subst.extensions() >= before);
}
