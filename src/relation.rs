//! Recognition of `requires` / `excludes` relations in constraint trees.
//!
//! Feature-model formats without a general constraint language usually support
//! two binary relations between features. Their standard propositional encodings
//! are
//!
//! ```text
//! A requires B   ==   !A | B
//! A excludes B   ==   !A | !B
//! ```
//!
//! The matchers here only recognize exactly these two-literal top-level shapes
//! (plus the implication forms `A => B` and `A => !B` for the single-feature
//! variants). Anything else, even if logically equivalent, is reported as
//! [`RelationKind::None`], and callers emit the constraint generically.

use std::fmt::{self, Display, Formatter};

use crate::constraint::Constraint;
use crate::literal::{is_negative_literal, is_positive_literal, literal_name};

/// `!A | B` or `A | !B`.
pub fn is_requires(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Or(lhs, rhs) => {
            (is_negative_literal(lhs) && is_positive_literal(rhs))
                || (is_positive_literal(lhs) && is_negative_literal(rhs))
        }
        _ => false,
    }
}

/// `!A | !B`.
pub fn is_excludes(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Or(lhs, rhs) => is_negative_literal(lhs) && is_negative_literal(rhs),
        _ => false,
    }
}

/// `!A | B` or `A => B`.
pub fn is_single_feature_requires(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Or(lhs, rhs) => is_negative_literal(lhs) && is_positive_literal(rhs),
        Constraint::Implication(lhs, rhs) => is_positive_literal(lhs) && is_positive_literal(rhs),
        _ => false,
    }
}

/// `!A | !B` or `A => !B`.
pub fn is_single_feature_excludes(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Or(lhs, rhs) => is_negative_literal(lhs) && is_negative_literal(rhs),
        Constraint::Implication(lhs, rhs) => is_positive_literal(lhs) && is_negative_literal(rhs),
        _ => false,
    }
}

/// Returns `constraint` if it is a positive literal, otherwise its first direct
/// child that is one.
pub fn first_positive_literal(constraint: &Constraint) -> Option<&Constraint> {
    first_matching(constraint, is_positive_literal)
}

/// Returns `constraint` if it is a negative literal, otherwise its first direct
/// child that is one.
pub fn first_negative_literal(constraint: &Constraint) -> Option<&Constraint> {
    first_matching(constraint, is_negative_literal)
}

fn first_matching<'a>(constraint: &'a Constraint, accept: fn(&Constraint) -> bool) -> Option<&'a Constraint> {
    if accept(constraint) {
        return Some(constraint);
    }
    constraint.sub_parts().into_iter().find(|child| accept(child))
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RelationKind {
    Requires,
    Excludes,
    SingleFeatureRequires,
    SingleFeatureExcludes,
    None,
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelationKind::Requires => "requires",
            RelationKind::Excludes => "excludes",
            RelationKind::SingleFeatureRequires => "single-feature requires",
            RelationKind::SingleFeatureExcludes => "single-feature excludes",
            RelationKind::None => "none",
        };
        f.write_str(name)
    }
}

/// Result of [`classify`]: the relation tag and the two literal nodes justifying it.
///
/// For [`RelationKind::Requires`] the literals are `(negative, positive)` regardless
/// of the order they appear in, so `!A | B` and `B | !A` both yield `(!A, B)`.
/// For the implication shapes they are `(antecedent, consequent)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Relation<'a> {
    pub kind: RelationKind,
    pub literals: Option<(&'a Constraint, &'a Constraint)>,
}

impl<'a> Relation<'a> {
    const NONE: Self = Self {
        kind: RelationKind::None,
        literals: None,
    };

    fn new(kind: RelationKind, first: &'a Constraint, second: &'a Constraint) -> Self {
        Self {
            kind,
            literals: Some((first, second)),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind == RelationKind::None
    }

    /// Feature names as `(source, target)`: for requires, the feature that
    /// requires and the feature required; for excludes, both excluded features.
    pub fn features(&self) -> Option<(&'a str, &'a str)> {
        let (first, second) = self.literals?;
        Some((literal_name(first)?, literal_name(second)?))
    }
}

/// Classifies a top-level constraint.
///
/// Shapes are tested in the order requires, excludes, single-feature requires,
/// single-feature excludes; the first match wins.
pub fn classify(constraint: &Constraint) -> Relation<'_> {
    let relation = match constraint {
        Constraint::Or(lhs, rhs) if is_requires(constraint) => {
            if is_negative_literal(lhs) {
                Relation::new(RelationKind::Requires, lhs, rhs)
            } else {
                Relation::new(RelationKind::Requires, rhs, lhs)
            }
        }
        Constraint::Or(lhs, rhs) if is_excludes(constraint) => Relation::new(RelationKind::Excludes, lhs, rhs),
        Constraint::Implication(lhs, rhs) if is_single_feature_requires(constraint) => {
            Relation::new(RelationKind::SingleFeatureRequires, lhs, rhs)
        }
        Constraint::Implication(lhs, rhs) if is_single_feature_excludes(constraint) => {
            Relation::new(RelationKind::SingleFeatureExcludes, lhs, rhs)
        }
        _ => Relation::NONE,
    };
    log::trace!("classify({}) -> {}", constraint, relation.kind);
    relation
}
