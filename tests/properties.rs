//! Property tests for translation, literal counting and root derivation.
//!
//! Random constraint trees come from a seeded ChaCha generator so failures are
//! reproducible.

use std::collections::BTreeMap;

use feature_logic::constraint::Constraint;
use feature_logic::literal::{count_literals, count_negative_literals, count_positive_literals, feature_names, max_depth};
use feature_logic::model::{insert_group, is_abstract, Feature, FeatureMap, GroupKind, HIDDEN_ATTRIBUTE};
use feature_logic::relation::{is_excludes, is_requires};
use feature_logic::root::derive_root;
use feature_logic::translate::{from_formula, to_formula};
use feature_logic::Error;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

const NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn lit(name: &str) -> Constraint {
    Constraint::literal(name)
}

fn random_constraint(rng: &mut ChaCha8Rng, depth: usize) -> Constraint {
    if depth == 0 || rng.random_bool(0.25) {
        return lit(NAMES[rng.random_range(0..NAMES.len())]);
    }
    let next = depth - 1;
    match rng.random_range(0..6) {
        0 => Constraint::not(random_constraint(rng, next)),
        1 => Constraint::paren(random_constraint(rng, next)),
        2 => Constraint::and(random_constraint(rng, next), random_constraint(rng, next)),
        3 => Constraint::or(random_constraint(rng, next), random_constraint(rng, next)),
        4 => Constraint::implies(random_constraint(rng, next), random_constraint(rng, next)),
        _ => Constraint::equiv(random_constraint(rng, next), random_constraint(rng, next)),
    }
}

/// Direct truth-table semantics of a constraint tree, independent of the translator.
fn evaluate(constraint: &Constraint, assignment: &BTreeMap<String, bool>) -> bool {
    match constraint {
        Constraint::Literal(name) => assignment[name],
        Constraint::Not(c) => !evaluate(c, assignment),
        Constraint::Parenthesis(c) => evaluate(c, assignment),
        Constraint::And(l, r) => evaluate(l, assignment) && evaluate(r, assignment),
        Constraint::Or(l, r) => evaluate(l, assignment) || evaluate(r, assignment),
        Constraint::Implication(l, r) => !evaluate(l, assignment) || evaluate(r, assignment),
        Constraint::Equivalence(l, r) => evaluate(l, assignment) == evaluate(r, assignment),
        Constraint::Expression(text) => panic!("cannot evaluate expression {}", text),
    }
}

fn assignments(names: &[&str]) -> Vec<BTreeMap<String, bool>> {
    (0..1u32 << names.len())
        .map(|bits| {
            names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.to_string(), bits & (1 << i) != 0))
                .collect()
        })
        .collect()
}

fn assert_equivalent(lhs: &Constraint, rhs: &Constraint) {
    let names: Vec<&str> = feature_names(lhs).into_iter().collect();
    assert_eq!(feature_names(rhs).into_iter().collect::<Vec<_>>(), names);
    for assignment in assignments(&names) {
        assert_eq!(
            evaluate(lhs, &assignment),
            evaluate(rhs, &assignment),
            "{} and {} differ under {:?}",
            lhs,
            rhs,
            assignment
        );
    }
}

// ─── Translation ───────────────────────────────────────────────────────────────

#[test]
fn round_trip_is_equivalent() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..500 {
        let c = random_constraint(&mut rng, 5);
        let f = to_formula(&c).unwrap();
        let back = from_formula(&f).unwrap();
        assert_equivalent(&c, &back);
    }
}

#[test]
fn formula_agrees_with_constraint() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let c = random_constraint(&mut rng, 4);
        let f = to_formula(&c).unwrap();
        let names: Vec<&str> = feature_names(&c).into_iter().collect();
        assert_eq!(f.variables().into_iter().collect::<Vec<_>>(), names);
        for assignment in assignments(&names) {
            assert_eq!(f.evaluate(&assignment), evaluate(&c, &assignment), "{} vs {}", c, f);
        }
    }
}

#[test]
fn round_trip_is_stable_after_first_pass() {
    let mut rng = ChaCha8Rng::seed_from_u64(1234);
    for _ in 0..200 {
        let c = random_constraint(&mut rng, 5);
        let once = from_formula(&to_formula(&c).unwrap()).unwrap();
        let twice = from_formula(&to_formula(&once).unwrap()).unwrap();
        assert_eq!(to_formula(&once).unwrap(), to_formula(&twice).unwrap());
    }
}

#[test]
fn expression_constraints_are_rejected() {
    let c = Constraint::implies(lit("A"), Constraint::expression("Price > 10"));
    assert!(matches!(to_formula(&c), Err(Error::UnsupportedConstruct { .. })));
}

// ─── Literals ──────────────────────────────────────────────────────────────────

#[test]
fn literal_counts_add_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..300 {
        let c = random_constraint(&mut rng, 5);
        assert_eq!(
            count_literals(&c),
            count_positive_literals(&c) + count_negative_literals(&c),
            "{}",
            c
        );
    }
}

#[test]
fn shape_classification() {
    assert!(is_requires(&Constraint::or(Constraint::not(lit("A")), lit("B"))));
    assert!(!is_requires(&Constraint::or(lit("A"), lit("B"))));
    assert!(is_excludes(&Constraint::or(
        Constraint::not(lit("A")),
        Constraint::not(lit("B"))
    )));
}

#[test]
fn depth() {
    assert_eq!(max_depth(&lit("A")), 1);
    assert_eq!(
        max_depth(&Constraint::and(lit("A"), Constraint::or(lit("B"), lit("C")))),
        3
    );
}

// ─── Roots ─────────────────────────────────────────────────────────────────────

#[test]
fn single_root_is_idempotent() {
    let mut features = FeatureMap::new();
    features.insert("Phone".to_string(), Feature::new("Phone"));
    insert_group(&mut features, "Phone", GroupKind::Mandatory, &["Calls", "Screen"]);
    insert_group(&mut features, "Phone", GroupKind::Optional, &["Camera"]);
    let before = features.clone();

    let (features, root) = derive_root(features, "Root").unwrap();
    assert_eq!(root, "Phone");
    assert_eq!(features, before);
    assert!(!features.contains_key("Root"));
}

#[test]
fn several_roots_are_synthesized_once() {
    let mut features = FeatureMap::new();
    for name in ["A", "B", "C"] {
        features.insert(name.to_string(), Feature::new(name));
    }
    insert_group(&mut features, "B", GroupKind::Alternative, &["B1", "B2"]);

    let (features, root) = derive_root(features, "Root").unwrap();
    assert_eq!(root, "Root");

    let synthetic = &features["Root"];
    assert!(is_abstract(synthetic));
    assert!(synthetic.attributes.contains_key(HIDDEN_ATTRIBUTE));
    assert_eq!(synthetic.groups.len(), 1);
    assert_eq!(synthetic.groups[0].kind, GroupKind::Mandatory);
    assert_eq!(synthetic.groups[0].features, vec!["A", "B", "C"]);

    let snapshot = features.clone();
    let (features, again) = derive_root(features, "Root").unwrap();
    assert_eq!(again, "Root");
    assert_eq!(features, snapshot);
}

#[test]
fn empty_map_has_no_root() {
    let err = derive_root(FeatureMap::new(), "Root").unwrap_err();
    assert!(err.clone().into_features().is_empty());
    assert_eq!(Error::from(err), Error::ModelHasNoRoot);
}
