//! # feature-logic: constraint layer analysis for feature models
//!
//! **`feature-logic`** prepares the constraints of a variability (feature) model for
//! a propositional-logic engine and interprets what comes back.
//!
//! ## What is in a feature model?
//!
//! A feature model is a tree of configurable **features**. Each feature owns
//! **groups** of child features (mandatory, optional, alternative, or, or
//! cardinality-bounded). On top of the tree sits a list of cross-tree
//! **constraints**: boolean expressions over feature names, such as
//! `Navigation => GPS` or `!(Cloud & Offline)`.
//!
//! ## Key Features
//!
//! - **Formula translation**: [`translate`] converts a [`Constraint`][crate::constraint::Constraint]
//!   tree into an engine [`Formula`][crate::formula::Formula] and back. The way back
//!   goes through the constraint grammar, so it keeps literals and logical meaning
//!   but not the original parentheses.
//! - **Relation recognition**: [`relation`] recovers `requires` and `excludes`
//!   relations from their canonical two-literal shapes (`!A | B`, `!A | !B`,
//!   `A => B`, `A => !B`), with [`literal`] providing the underlying shape tests.
//! - **Root unification**: [`root`] guarantees a single root, hanging several
//!   disconnected top-level features under one synthesized abstract root.
//!
//! ## Basic Usage
//!
//! ```rust
//! use feature_logic::parser::parse_constraint;
//! use feature_logic::relation::{classify, RelationKind};
//! use feature_logic::translate::{from_formula, to_formula};
//!
//! // 1. Parse a constraint
//! let c = parse_constraint("!Cloud | Network").unwrap();
//!
//! // 2. Recognize the relation it encodes
//! let relation = classify(&c);
//! assert_eq!(relation.kind, RelationKind::Requires);
//! assert_eq!(relation.features(), Some(("Cloud", "Network")));
//!
//! // 3. Hand it to a logic engine and take it back
//! let f = to_formula(&c).unwrap();
//! assert_eq!(f.to_string(), "~Cloud | Network");
//! assert_eq!(from_formula(&f).unwrap(), c);
//! ```
//!
//! All operations are synchronous and touch no global state. Recursive walks over
//! deep trees in [`translate`] and [`parser`] are bounded by
//! [`TranslateConfig::max_depth`][crate::translate::TranslateConfig::max_depth].

pub mod binary;
pub mod constraint;
pub mod error;
pub mod formula;
pub mod literal;
pub mod model;
pub mod parser;
pub mod relation;
pub mod root;
pub mod sampling;
pub mod translate;
pub mod utils;

pub use error::{Error, Result};
