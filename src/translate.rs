//! Translation between constraint trees and engine formulas.
//!
//! [`Translator::to_formula`] mirrors a [`Constraint`] node by node into a
//! [`Formula`]; parenthesization is dropped since the tree already encodes
//! grouping. [`Translator::from_formula`] goes the other way through text: the
//! formula is rendered, its `~` negations are rewritten to `!`, and the result is
//! parsed with the constraint grammar. The way back therefore preserves literals
//! and logical meaning, but not the original parenthesization.
//!
//! # Examples
//!
//! ```
//! use feature_logic::constraint::Constraint;
//! use feature_logic::translate::{from_formula, to_formula};
//!
//! let c = Constraint::implies(Constraint::literal("A"), Constraint::literal("B"));
//! let f = to_formula(&c).unwrap();
//! assert_eq!(f.to_string(), "A => B");
//! assert_eq!(from_formula(&f).unwrap(), c);
//! ```

use log::debug;

use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::formula::Formula;
use crate::parser::parse_constraint_bounded;

/// Default nesting bound for translation and parsing.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TranslateConfig {
    /// Deepest constraint or formula nesting accepted before failing with
    /// [`Error::MalformedTree`].
    pub max_depth: usize,
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TranslateConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct Translator {
    config: TranslateConfig,
}

impl Translator {
    pub fn new(config: TranslateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslateConfig {
        &self.config
    }

    /// Builds the engine formula for `constraint`.
    ///
    /// Fails with [`Error::UnsupportedConstruct`] if the tree contains an
    /// [`Constraint::Expression`] node, and with [`Error::MalformedTree`] if it
    /// nests deeper than the configured bound. No partial result is returned.
    pub fn to_formula(&self, constraint: &Constraint) -> Result<Formula> {
        self.build(constraint, 1)
    }

    fn build(&self, constraint: &Constraint, depth: usize) -> Result<Formula> {
        if depth > self.config.max_depth {
            return Err(Error::MalformedTree {
                max_depth: self.config.max_depth,
            });
        }
        debug!("build(depth = {}, kind = {})", depth, constraint.kind());

        let next = depth + 1;
        let formula = match constraint {
            Constraint::Implication(lhs, rhs) => Formula::implication(self.build(lhs, next)?, self.build(rhs, next)?),
            Constraint::Equivalence(lhs, rhs) => Formula::equivalence(self.build(lhs, next)?, self.build(rhs, next)?),
            Constraint::And(lhs, rhs) => Formula::and(self.build(lhs, next)?, self.build(rhs, next)?),
            Constraint::Or(lhs, rhs) => Formula::or(self.build(lhs, next)?, self.build(rhs, next)?),
            Constraint::Not(content) => Formula::not(self.build(content, next)?),
            Constraint::Parenthesis(content) => self.build(content, next)?,
            Constraint::Literal(name) => Formula::literal(name.as_str(), true),
            Constraint::Expression(_) => {
                return Err(Error::UnsupportedConstruct {
                    constraint: constraint.to_string(),
                })
            }
        };
        Ok(formula)
    }

    /// Rebuilds a constraint tree from an engine formula.
    pub fn from_formula(&self, formula: &Formula) -> Result<Constraint> {
        let text = rewrite_negation(&formula.to_string());
        debug!("from_formula: {}", text);
        parse_constraint_bounded(&text, self.config.max_depth)
    }
}

/// Replaces the engine's `~` with the constraint grammar's `!`, leaving quoted
/// names (including their escaped quotes) untouched.
fn rewrite_negation(text: &str) -> String {
    let mut quoted = false;
    let mut escaped = false;
    text.chars()
        .map(|c| {
            if escaped {
                escaped = false;
                return c;
            }
            match c {
                '\\' if quoted => {
                    escaped = true;
                    c
                }
                '"' => {
                    quoted = !quoted;
                    c
                }
                '~' if !quoted => '!',
                _ => c,
            }
        })
        .collect()
}

/// [`Translator::to_formula`] with the default configuration.
pub fn to_formula(constraint: &Constraint) -> Result<Formula> {
    Translator::default().to_formula(constraint)
}

/// [`Translator::from_formula`] with the default configuration.
pub fn from_formula(formula: &Formula) -> Result<Constraint> {
    Translator::default().from_formula(formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn lit(name: &str) -> Constraint {
        Constraint::literal(name)
    }

    fn var(name: &str) -> Formula {
        Formula::literal(name, true)
    }

    #[test]
    fn test_to_formula_mirrors_structure() {
        let c = Constraint::equiv(
            Constraint::and(lit("A"), Constraint::not(lit("B"))),
            Constraint::or(lit("C"), Constraint::implies(lit("D"), lit("E"))),
        );
        let expected = Formula::equivalence(
            Formula::and(var("A"), Formula::literal("B", false)),
            Formula::or(var("C"), Formula::implication(var("D"), var("E"))),
        );
        assert_eq!(to_formula(&c).unwrap(), expected);
    }

    #[test]
    fn test_to_formula_unwraps_parenthesis() {
        let c = Constraint::paren(Constraint::paren(Constraint::and(lit("A"), Constraint::paren(lit("B")))));
        assert_eq!(to_formula(&c).unwrap(), Formula::and(var("A"), var("B")));
    }

    #[test]
    fn test_to_formula_negates_subtrees() {
        let c = Constraint::not(Constraint::or(lit("A"), lit("B")));
        assert_eq!(
            to_formula(&c).unwrap(),
            Formula::Not(Box::new(Formula::or(var("A"), var("B"))))
        );
    }

    #[test]
    fn test_to_formula_rejects_expressions() {
        let c = Constraint::and(lit("A"), Constraint::expression("Price > 10"));
        assert_eq!(
            to_formula(&c),
            Err(Error::UnsupportedConstruct {
                constraint: "Price > 10".to_string()
            })
        );
    }

    #[test]
    fn test_to_formula_depth_bound() {
        let mut c = lit("A");
        for _ in 0..9 {
            c = Constraint::not(c);
        }
        // 10 levels in total.
        let translator = Translator::new(TranslateConfig::default().with_max_depth(10));
        assert!(translator.to_formula(&c).is_ok());

        let translator = Translator::new(TranslateConfig::default().with_max_depth(9));
        assert_eq!(translator.to_formula(&c), Err(Error::MalformedTree { max_depth: 9 }));
    }

    #[test]
    fn test_from_formula() {
        let f = Formula::implication(Formula::literal("A", false), Formula::and(var("B"), Formula::literal("C", false)));
        let c = from_formula(&f).unwrap();
        assert_eq!(
            c,
            Constraint::implies(
                Constraint::not(lit("A")),
                Constraint::and(lit("B"), Constraint::not(lit("C")))
            )
        );
    }

    #[test]
    fn test_from_formula_adds_parentheses() {
        let f = Formula::and(Formula::or(var("A"), var("B")), var("C"));
        let c = from_formula(&f).unwrap();
        assert_eq!(
            c,
            Constraint::and(Constraint::paren(Constraint::or(lit("A"), lit("B"))), lit("C"))
        );
    }

    #[test]
    fn test_from_formula_keeps_quoted_tilde() {
        let f = Formula::or(Formula::literal("a~b", false), var("C"));
        assert_eq!(f.to_string(), "~\"a~b\" | C");
        let c = from_formula(&f).unwrap();
        assert_eq!(c, Constraint::or(Constraint::not(lit("a~b")), lit("C")));
    }

    #[test]
    fn test_from_formula_keeps_escaped_quotes() {
        let f = Formula::or(Formula::literal("a\"b", false), Formula::literal("c~d", false));
        assert_eq!(f.to_string(), r#"~"a\"b" | ~"c~d""#);
        let c = from_formula(&f).unwrap();
        assert_eq!(c, Constraint::or(Constraint::not(lit("a\"b")), Constraint::not(lit("c~d"))));

        let c = Constraint::or(Constraint::not(lit("x\\")), lit("y\"~"));
        assert_eq!(from_formula(&to_formula(&c).unwrap()).unwrap(), c);
    }

    #[test]
    fn test_round_trip_requires() {
        let c = Constraint::or(Constraint::not(lit("A")), lit("B"));
        let back = from_formula(&to_formula(&c).unwrap()).unwrap();
        assert_eq!(back, c);
    }
}
