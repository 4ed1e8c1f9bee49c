//! Propositional formulas as seen by a logic engine.
//!
//! [`Formula`] mirrors the constraint tree restricted to the connectives a
//! propositional engine understands. Literals carry a polarity (`phase`), so a
//! negated variable is a single node rather than a negation of a variable. There
//! is no parenthesization node: precedence is encoded by the tree itself.
//!
//! The [`Display`] implementation is the engine's canonical text form:
//!
//! | Connective  | Syntax     |
//! |-------------|------------|
//! | negation    | `~A`       |
//! | conjunction | `A & B`    |
//! | disjunction | `A \| B`   |
//! | implication | `A => B`   |
//! | equivalence | `A <=> B`  |
//!
//! Parentheses are only emitted where precedence requires them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};

use crate::constraint::{needs_parens, write_name, PREC_AND, PREC_ATOM, PREC_EQUIV, PREC_IMPL, PREC_NOT, PREC_OR};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Literal { name: String, phase: bool },
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implication(Box<Formula>, Box<Formula>),
    Equivalence(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// A variable occurrence; `phase == false` is the negated literal.
    pub fn literal(name: impl Into<String>, phase: bool) -> Self {
        Formula::Literal {
            name: name.into(),
            phase,
        }
    }

    /// Negation, normalized the way engines do: negating a literal flips its
    /// phase, and a double negation cancels out.
    pub fn not(operand: Self) -> Self {
        match operand {
            Formula::Literal { name, phase } => Formula::Literal { name, phase: !phase },
            Formula::Not(inner) => *inner,
            _ => Formula::Not(Box::new(operand)),
        }
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Formula::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Formula::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implication(lhs: Self, rhs: Self) -> Self {
        Formula::Implication(Box::new(lhs), Box::new(rhs))
    }

    pub fn equivalence(lhs: Self, rhs: Self) -> Self {
        Formula::Equivalence(Box::new(lhs), Box::new(rhs))
    }
}

impl Formula {
    /// Variable names occurring in the formula, regardless of phase.
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables<'a>(&'a self, vars: &mut BTreeSet<&'a str>) {
        match self {
            Formula::Literal { name, .. } => {
                vars.insert(name);
            }
            Formula::Not(operand) => operand.collect_variables(vars),
            Formula::And(lhs, rhs)
            | Formula::Or(lhs, rhs)
            | Formula::Implication(lhs, rhs)
            | Formula::Equivalence(lhs, rhs) => {
                lhs.collect_variables(vars);
                rhs.collect_variables(vars);
            }
        }
    }

    /// Evaluates the formula under `assignment`; unassigned variables are false.
    pub fn evaluate(&self, assignment: &BTreeMap<String, bool>) -> bool {
        match self {
            Formula::Literal { name, phase } => assignment.get(name).copied().unwrap_or(false) == *phase,
            Formula::Not(operand) => !operand.evaluate(assignment),
            Formula::And(lhs, rhs) => lhs.evaluate(assignment) && rhs.evaluate(assignment),
            Formula::Or(lhs, rhs) => lhs.evaluate(assignment) || rhs.evaluate(assignment),
            Formula::Implication(lhs, rhs) => !lhs.evaluate(assignment) || rhs.evaluate(assignment),
            Formula::Equivalence(lhs, rhs) => lhs.evaluate(assignment) == rhs.evaluate(assignment),
        }
    }

    /// Total number of nodes.
    pub fn size(&self) -> usize {
        match self {
            Formula::Literal { .. } => 1,
            Formula::Not(operand) => 1 + operand.size(),
            Formula::And(lhs, rhs)
            | Formula::Or(lhs, rhs)
            | Formula::Implication(lhs, rhs)
            | Formula::Equivalence(lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Formula::Equivalence(_, _) => PREC_EQUIV,
            Formula::Implication(_, _) => PREC_IMPL,
            Formula::Or(_, _) => PREC_OR,
            Formula::And(_, _) => PREC_AND,
            Formula::Not(_) => PREC_NOT,
            Formula::Literal { phase: true, .. } => PREC_ATOM,
            Formula::Literal { phase: false, .. } => PREC_NOT,
        }
    }
}

fn write_operand(f: &mut Formatter<'_>, parent: u8, operand: &Formula) -> fmt::Result {
    if needs_parens(parent, operand.precedence()) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (lhs, op, rhs) = match self {
            Formula::Literal { name, phase } => {
                if !phase {
                    f.write_str("~")?;
                }
                return write_name(f, name);
            }
            Formula::Not(operand) => {
                f.write_str("~")?;
                return write_operand(f, PREC_NOT, operand);
            }
            Formula::And(lhs, rhs) => (lhs, "&", rhs),
            Formula::Or(lhs, rhs) => (lhs, "|", rhs),
            Formula::Implication(lhs, rhs) => (lhs, "=>", rhs),
            Formula::Equivalence(lhs, rhs) => (lhs, "<=>", rhs),
        };
        let prec = self.precedence();
        write_operand(f, prec, lhs)?;
        write!(f, " {} ", op)?;
        write_operand(f, prec, rhs)
    }
}
