//! Uniform access to the two operands of binary nodes.
//!
//! Exporters often only care about "the left side" and "the right side" of a
//! connective, whatever the connective is. [`BinaryOperands`] exposes that view;
//! non-binary nodes answer `None`.

use crate::constraint::Constraint;
use crate::formula::Formula;

pub trait BinaryOperands {
    type Operand;

    /// Returns `(left, right)` if `self` is a binary node.
    fn as_binary(&self) -> Option<(&Self::Operand, &Self::Operand)>;
}

impl BinaryOperands for Constraint {
    type Operand = Constraint;

    fn as_binary(&self) -> Option<(&Constraint, &Constraint)> {
        match self {
            Constraint::And(lhs, rhs)
            | Constraint::Or(lhs, rhs)
            | Constraint::Implication(lhs, rhs)
            | Constraint::Equivalence(lhs, rhs) => Some((lhs, rhs)),
            Constraint::Literal(_)
            | Constraint::Not(_)
            | Constraint::Parenthesis(_)
            | Constraint::Expression(_) => None,
        }
    }
}

impl BinaryOperands for Formula {
    type Operand = Formula;

    fn as_binary(&self) -> Option<(&Formula, &Formula)> {
        match self {
            Formula::And(lhs, rhs)
            | Formula::Or(lhs, rhs)
            | Formula::Implication(lhs, rhs)
            | Formula::Equivalence(lhs, rhs) => Some((lhs, rhs)),
            Formula::Literal { .. } | Formula::Not(_) => None,
        }
    }
}

pub fn left<T: BinaryOperands>(node: &T) -> Option<&T::Operand> {
    node.as_binary().map(|(lhs, _)| lhs)
}

pub fn right<T: BinaryOperands>(node: &T) -> Option<&T::Operand> {
    node.as_binary().map(|(_, rhs)| rhs)
}
