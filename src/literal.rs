//! Literal classification over constraint trees.
//!
//! Classification is purely structural: a *positive literal* is a bare
//! [`Constraint::Literal`], a *negative literal* is a [`Constraint::Not`] whose
//! content is a bare literal. `!!A` is neither; it is a negation of a negative
//! literal. Relation matching in [`relation`][crate::relation] relies on this
//! narrow distinction.
//!
//! Extractors descend through every sub-part, so parenthesization is transparent.

use std::collections::BTreeSet;

use crate::constraint::Constraint;

pub fn is_positive_literal(constraint: &Constraint) -> bool {
    matches!(constraint, Constraint::Literal(_))
}

pub fn is_negative_literal(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Not(content) => is_positive_literal(content),
        _ => false,
    }
}

pub fn is_literal(constraint: &Constraint) -> bool {
    is_positive_literal(constraint) || is_negative_literal(constraint)
}

/// Feature name referenced by a positive or negative literal.
pub fn literal_name(constraint: &Constraint) -> Option<&str> {
    match constraint {
        Constraint::Literal(name) => Some(name.as_str()),
        Constraint::Not(content) => match content.as_ref() {
            Constraint::Literal(name) => Some(name.as_str()),
            _ => None,
        },
        _ => None,
    }
}

/// All bare literal nodes in the tree, whatever their polarity.
pub fn literals(constraint: &Constraint) -> BTreeSet<&Constraint> {
    let mut result = BTreeSet::new();
    collect(constraint, &mut result, &is_positive_literal, false);
    result
}

/// All negative literal nodes (`!A`) in the tree.
pub fn negative_literals(constraint: &Constraint) -> BTreeSet<&Constraint> {
    let mut result = BTreeSet::new();
    collect(constraint, &mut result, &is_negative_literal, true);
    result
}

/// All positive literal nodes in the tree that are not the content of a negative literal.
pub fn positive_literals(constraint: &Constraint) -> BTreeSet<&Constraint> {
    let mut result = BTreeSet::new();
    collect(constraint, &mut result, &is_positive_literal, true);
    result
}

/// Feature names referenced anywhere in the tree.
pub fn feature_names(constraint: &Constraint) -> BTreeSet<&str> {
    literals(constraint).into_iter().filter_map(literal_name).collect()
}

// When `stop_at_literal` is set, the walk does not descend into literals of the
// other polarity, so `!A` never contributes `A` as a positive literal.
fn collect<'a>(
    constraint: &'a Constraint,
    out: &mut BTreeSet<&'a Constraint>,
    accept: &dyn Fn(&Constraint) -> bool,
    stop_at_literal: bool,
) {
    if accept(constraint) {
        out.insert(constraint);
        return;
    }
    if stop_at_literal && is_literal(constraint) {
        return;
    }
    for child in constraint.sub_parts() {
        collect(child, out, accept, stop_at_literal);
    }
}

/// Number of bare literal occurrences, counting repeats.
pub fn count_literals(constraint: &Constraint) -> usize {
    if is_positive_literal(constraint) {
        return 1;
    }
    constraint.sub_parts().into_iter().map(count_literals).sum()
}

pub fn count_positive_literals(constraint: &Constraint) -> usize {
    if is_positive_literal(constraint) {
        return 1;
    }
    if is_negative_literal(constraint) {
        return 0;
    }
    constraint.sub_parts().into_iter().map(count_positive_literals).sum()
}

pub fn count_negative_literals(constraint: &Constraint) -> usize {
    if is_negative_literal(constraint) {
        return 1;
    }
    constraint.sub_parts().into_iter().map(count_negative_literals).sum()
}

pub fn has_positive_literal(constraint: &Constraint) -> bool {
    count_positive_literals(constraint) > 0
}

pub fn has_negative_literal(constraint: &Constraint) -> bool {
    count_negative_literals(constraint) > 0
}

/// Number of nodes on the longest root-to-leaf path; a single literal has depth 1.
pub fn max_depth(constraint: &Constraint) -> usize {
    1 + constraint.sub_parts().into_iter().map(max_depth).max().unwrap_or(0)
}

/// One-level complexity probe: `constraint` is not a literal and at least one of
/// its direct children is not a bare literal.
///
/// Note that `!A` counts as simple but `A & !B` counts as complex, since the
/// probe only looks for bare literals among the children.
pub fn is_complex_constraint(constraint: &Constraint) -> bool {
    if is_positive_literal(constraint) {
        return false;
    }
    constraint.sub_parts().into_iter().any(|child| !is_positive_literal(child))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn lit(name: &str) -> Constraint {
        Constraint::literal(name)
    }

    fn not(c: Constraint) -> Constraint {
        Constraint::not(c)
    }

    #[test]
    fn test_literal_shapes() {
        assert!(is_positive_literal(&lit("A")));
        assert!(!is_negative_literal(&lit("A")));
        assert!(is_literal(&lit("A")));

        assert!(is_negative_literal(&not(lit("A"))));
        assert!(!is_positive_literal(&not(lit("A"))));
        assert!(is_literal(&not(lit("A"))));
    }

    #[test]
    fn test_double_negation_is_not_a_literal() {
        let c = not(not(lit("A")));
        assert!(!is_negative_literal(&c));
        assert!(!is_positive_literal(&c));
        assert!(!is_literal(&c));
        assert_eq!(literal_name(&c), None);
    }

    #[test]
    fn test_negated_subtree_is_not_a_literal() {
        let c = not(Constraint::and(lit("A"), lit("B")));
        assert!(!is_negative_literal(&c));
        assert!(!is_literal(&c));
    }

    #[test]
    fn test_paren_literal_is_not_a_literal() {
        assert!(!is_literal(&Constraint::paren(lit("A"))));
    }

    #[test]
    fn test_literal_sets() {
        // (A | !B) & (!A => C)
        let c = Constraint::and(
            Constraint::paren(Constraint::or(lit("A"), not(lit("B")))),
            Constraint::paren(Constraint::implies(not(lit("A")), lit("C"))),
        );

        let all: Vec<_> = literals(&c).into_iter().cloned().collect();
        assert_eq!(all, vec![lit("A"), lit("B"), lit("C")]);

        let negative: Vec<_> = negative_literals(&c).into_iter().cloned().collect();
        assert_eq!(negative, vec![not(lit("A")), not(lit("B"))]);

        let positive: Vec<_> = positive_literals(&c).into_iter().cloned().collect();
        assert_eq!(positive, vec![lit("A"), lit("C")]);

        let names: Vec<_> = feature_names(&c).into_iter().collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_literal_of_itself() {
        let a = lit("A");
        assert_eq!(literals(&a).len(), 1);
        assert!(literals(&a).contains(&a));
        assert!(negative_literals(&a).is_empty());
        assert!(positive_literals(&not(lit("A"))).is_empty());
    }

    #[test]
    fn test_counts() {
        // !A | (B & !C) | A
        let c = Constraint::or(
            Constraint::or(not(lit("A")), Constraint::paren(Constraint::and(lit("B"), not(lit("C"))))),
            lit("A"),
        );
        assert_eq!(count_literals(&c), 4);
        assert_eq!(count_positive_literals(&c), 2);
        assert_eq!(count_negative_literals(&c), 2);
        assert!(has_positive_literal(&c));
        assert!(has_negative_literal(&c));

        let only_negative = Constraint::and(not(lit("A")), not(lit("B")));
        assert!(!has_positive_literal(&only_negative));
    }

    #[test]
    fn test_counts_ignore_expressions() {
        let c = Constraint::and(lit("A"), Constraint::expression("Price > 10"));
        assert_eq!(count_literals(&c), 1);
        assert_eq!(count_positive_literals(&c), 1);
        assert_eq!(count_negative_literals(&c), 0);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(max_depth(&lit("A")), 1);
        assert_eq!(max_depth(&not(lit("A"))), 2);

        let c = Constraint::and(lit("A"), Constraint::or(lit("B"), lit("C")));
        assert_eq!(max_depth(&c), 3);

        let c = Constraint::paren(c);
        assert_eq!(max_depth(&c), 4);
    }

    #[test]
    fn test_is_complex_constraint() {
        assert!(!is_complex_constraint(&lit("A")));
        assert!(!is_complex_constraint(&Constraint::or(lit("A"), lit("B"))));
        assert!(is_complex_constraint(&Constraint::or(not(lit("A")), lit("B"))));
        assert!(is_complex_constraint(&Constraint::and(
            lit("A"),
            Constraint::or(lit("B"), lit("C"))
        )));
        assert!(!is_complex_constraint(&not(lit("A"))));
        assert!(!is_complex_constraint(&Constraint::expression("X > 1")));
    }
}
