//! Constraint trees attached to a feature model.
//!
//! A [`Constraint`] is the boolean-expression layer of a variability model: feature
//! references combined with negation, conjunction, disjunction, implication and
//! equivalence. [`Constraint::Parenthesis`] is a transparent wrapper that keeps the
//! grouping written in the source text. [`Constraint::Expression`] stands for
//! arithmetic or attribute constraints (e.g. `Price > 10`); they are carried through
//! unchanged but cannot be handed to a propositional engine.
//!
//! The [`Display`] implementation renders UVL-style syntax (`!`, `&`, `|`, `=>`,
//! `<=>`) that the [`parser`][crate::parser] accepts back.

use std::fmt::{self, Display, Formatter, Write};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constraint {
    Literal(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
    Implication(Box<Constraint>, Box<Constraint>),
    Equivalence(Box<Constraint>, Box<Constraint>),
    Parenthesis(Box<Constraint>),
    Expression(String),
}

impl Constraint {
    pub fn literal(name: impl Into<String>) -> Self {
        Constraint::Literal(name.into())
    }

    /// Wraps `content` in a negation.
    ///
    /// Unlike [`Formula::not`][crate::formula::Formula::not], double negations are kept:
    /// constraint trees preserve the shape they were written in.
    pub fn not(content: Self) -> Self {
        Constraint::Not(Box::new(content))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Constraint::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Constraint::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Constraint::Implication(Box::new(lhs), Box::new(rhs))
    }

    pub fn equiv(lhs: Self, rhs: Self) -> Self {
        Constraint::Equivalence(Box::new(lhs), Box::new(rhs))
    }

    pub fn paren(content: Self) -> Self {
        Constraint::Parenthesis(Box::new(content))
    }

    pub fn expression(text: impl Into<String>) -> Self {
        Constraint::Expression(text.into())
    }
}

impl Constraint {
    /// Short name of the node kind, used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Constraint::Literal(_) => "literal",
            Constraint::Not(_) => "not",
            Constraint::And(_, _) => "and",
            Constraint::Or(_, _) => "or",
            Constraint::Implication(_, _) => "implication",
            Constraint::Equivalence(_, _) => "equivalence",
            Constraint::Parenthesis(_) => "parenthesis",
            Constraint::Expression(_) => "expression",
        }
    }

    /// The child of a negation or parenthesis node.
    pub fn content(&self) -> Option<&Constraint> {
        match self {
            Constraint::Not(content) | Constraint::Parenthesis(content) => Some(content),
            _ => None,
        }
    }

    /// Direct children in left-to-right order.
    ///
    /// Literals and expressions have none, negation and parenthesis have one,
    /// the binary connectives have two.
    pub fn sub_parts(&self) -> Vec<&Constraint> {
        match self {
            Constraint::Literal(_) | Constraint::Expression(_) => vec![],
            Constraint::Not(content) | Constraint::Parenthesis(content) => vec![content],
            Constraint::And(lhs, rhs)
            | Constraint::Or(lhs, rhs)
            | Constraint::Implication(lhs, rhs)
            | Constraint::Equivalence(lhs, rhs) => vec![lhs, rhs],
        }
    }

    /// Binding strength of the node's top-level operator; atoms bind tightest.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Constraint::Equivalence(_, _) => PREC_EQUIV,
            Constraint::Implication(_, _) => PREC_IMPL,
            Constraint::Or(_, _) => PREC_OR,
            Constraint::And(_, _) => PREC_AND,
            Constraint::Not(_) => PREC_NOT,
            Constraint::Literal(_) | Constraint::Parenthesis(_) | Constraint::Expression(_) => PREC_ATOM,
        }
    }
}

pub(crate) const PREC_EQUIV: u8 = 1;
pub(crate) const PREC_IMPL: u8 = 2;
pub(crate) const PREC_OR: u8 = 3;
pub(crate) const PREC_AND: u8 = 4;
pub(crate) const PREC_NOT: u8 = 5;
pub(crate) const PREC_ATOM: u8 = 6;

/// Whether an operand of precedence `operand` under an operator of precedence
/// `parent` must be parenthesized so that the text parses back to the same tree
/// shape. `&` and `|` are associative; `=>` and `<=>` are not.
pub(crate) fn needs_parens(parent: u8, operand: u8) -> bool {
    operand < parent || (operand == parent && (parent == PREC_IMPL || parent == PREC_EQUIV))
}

/// Whether `name` can be written without quotes.
pub(crate) fn is_plain_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// Writes `name` bare if it is plain, otherwise double-quoted with `"` and `\`
/// escaped by a backslash.
pub(crate) fn write_name(f: &mut Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_name(name) {
        return f.write_str(name);
    }
    f.write_char('"')?;
    for c in name.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

fn write_operand(f: &mut Formatter<'_>, parent: u8, operand: &Constraint) -> fmt::Result {
    if needs_parens(parent, operand.precedence()) {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl Display for Constraint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (lhs, op, rhs) = match self {
            Constraint::Literal(name) => return write_name(f, name),
            Constraint::Expression(text) => return f.write_str(text),
            Constraint::Parenthesis(content) => return write!(f, "({})", content),
            Constraint::Not(content) => {
                f.write_str("!")?;
                return write_operand(f, PREC_NOT, content);
            }
            Constraint::And(lhs, rhs) => (lhs, "&", rhs),
            Constraint::Or(lhs, rhs) => (lhs, "|", rhs),
            Constraint::Implication(lhs, rhs) => (lhs, "=>", rhs),
            Constraint::Equivalence(lhs, rhs) => (lhs, "<=>", rhs),
        };
        let prec = self.precedence();
        write_operand(f, prec, lhs)?;
        write!(f, " {} ", op)?;
        write_operand(f, prec, rhs)
    }
}
