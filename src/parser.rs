//! Parser for the textual constraint grammar.
//!
//! ```text
//! constraint  := equivalence
//! equivalence := implication ( "<=>" implication )*
//! implication := disjunction ( "=>" disjunction )*
//! disjunction := conjunction ( "|" conjunction )*
//! conjunction := unary ( "&" unary )*
//! unary       := "!" unary | atom
//! atom        := NAME | QUOTED | "(" constraint ")"
//! ```
//!
//! All binary operators are left-associative, so `A => B => C` reads as
//! `(A => B) => C`. Source parentheses are kept as [`Constraint::Parenthesis`]
//! nodes. Names are either plain identifiers (a Unicode letter or `_`, followed
//! by Unicode letters, digits, `_` or `.`) or double-quoted strings in which `\`
//! escapes the next character, as in `"say \"hi\""`.

use log::debug;

use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::translate::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Name(String),
    Not,
    And,
    Or,
    Implies,
    Equiv,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Name(name) => format!("name '{}'", name),
            Token::Not => "'!'".to_string(),
            Token::And => "'&'".to_string(),
            Token::Or => "'|'".to_string(),
            Token::Implies => "'=>'".to_string(),
            Token::Equiv => "'<=>'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token)>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '!' => {
                chars.next();
                tokens.push((pos, Token::Not));
            }
            '&' => {
                chars.next();
                tokens.push((pos, Token::And));
            }
            '|' => {
                chars.next();
                tokens.push((pos, Token::Or));
            }
            '(' => {
                chars.next();
                tokens.push((pos, Token::LParen));
            }
            ')' => {
                chars.next();
                tokens.push((pos, Token::RParen));
            }
            '=' => {
                chars.next();
                match chars.next() {
                    Some((_, '>')) => tokens.push((pos, Token::Implies)),
                    _ => return Err(Error::parse(pos, "expected '=>'")),
                }
            }
            '<' => {
                chars.next();
                match (chars.next(), chars.next()) {
                    (Some((_, '=')), Some((_, '>'))) => tokens.push((pos, Token::Equiv)),
                    _ => return Err(Error::parse(pos, "expected '<=>'")),
                }
            }
            '"' => {
                chars.next();
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '"')) => break,
                        Some((_, '\\')) => match chars.next() {
                            Some((_, c)) => name.push(c),
                            None => return Err(Error::parse(pos, "unterminated quoted name")),
                        },
                        Some((_, c)) => name.push(c),
                        None => return Err(Error::parse(pos, "unterminated quoted name")),
                    }
                }
                tokens.push((pos, Token::Name(name)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((pos, Token::Name(name)));
            }
            c => return Err(Error::parse(pos, format!("unexpected character '{}'", c))),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |&(offset, _)| offset)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::MalformedTree {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_binary(
        &mut self,
        op: &Token,
        operand: fn(&mut Self) -> Result<Constraint>,
        build: fn(Constraint, Constraint) -> Constraint,
    ) -> Result<Constraint> {
        // Chains build left-deep trees, so every operator adds a level.
        let mut lhs = operand(self)?;
        let mut levels = 0;
        while self.eat(op) {
            self.enter()?;
            levels += 1;
            let rhs = operand(self)?;
            lhs = build(lhs, rhs);
        }
        self.depth -= levels;
        Ok(lhs)
    }

    fn parse_equivalence(&mut self) -> Result<Constraint> {
        self.parse_binary(&Token::Equiv, Self::parse_implication, Constraint::equiv)
    }

    fn parse_implication(&mut self) -> Result<Constraint> {
        self.parse_binary(&Token::Implies, Self::parse_disjunction, Constraint::implies)
    }

    fn parse_disjunction(&mut self) -> Result<Constraint> {
        self.parse_binary(&Token::Or, Self::parse_conjunction, Constraint::or)
    }

    fn parse_conjunction(&mut self) -> Result<Constraint> {
        self.parse_binary(&Token::And, Self::parse_unary, Constraint::and)
    }

    fn parse_unary(&mut self) -> Result<Constraint> {
        self.enter()?;
        let result = if self.eat(&Token::Not) {
            self.parse_unary().map(Constraint::not)
        } else {
            self.parse_atom()
        };
        self.leave();
        result
    }

    fn parse_atom(&mut self) -> Result<Constraint> {
        let offset = self.offset();
        match self.tokens.get(self.pos).map(|(_, token)| token.clone()) {
            Some(Token::Name(name)) => {
                self.pos += 1;
                Ok(Constraint::Literal(name))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let content = self.parse_equivalence()?;
                if !self.eat(&Token::RParen) {
                    return Err(Error::parse(self.offset(), "expected ')'"));
                }
                Ok(Constraint::paren(content))
            }
            Some(token) => Err(Error::parse(offset, format!("unexpected {}", token.describe()))),
            None => Err(Error::parse(offset, "unexpected end of input")),
        }
    }
}

/// Parses `text` into a constraint tree.
pub fn parse_constraint(text: &str) -> Result<Constraint> {
    parse_constraint_bounded(text, DEFAULT_MAX_DEPTH)
}

/// Parses `text`, failing with [`Error::MalformedTree`] if the resulting tree
/// would nest deeper than `max_depth`.
pub fn parse_constraint_bounded(text: &str, max_depth: usize) -> Result<Constraint> {
    let tokens = tokenize(text)?;
    debug!("parse: {} tokens from {:?}", tokens.len(), text);

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.len(),
        depth: 0,
        max_depth,
    };
    let constraint = parser.parse_equivalence()?;
    if let Some(token) = parser.peek() {
        let message = format!("unexpected trailing {}", token.describe());
        return Err(Error::parse(parser.offset(), message));
    }
    Ok(constraint)
}
