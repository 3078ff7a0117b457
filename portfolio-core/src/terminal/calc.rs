//! Arithmetic for the `calc` command: `+ - * /`, unary sign, parentheses and
//! decimal literals over `f64`.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character {0:?} at {1}")]
    Unexpected(char, usize),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("malformed number {0:?}")]
    BadNumber(String),
    #[error("result is not finite")]
    NotFinite,
    #[error("expression nests too deeply")]
    TooDeep,
}

/// Parentheses and unary signs each add a level of recursion.
pub const MAX_DEPTH: usize = 64;

/// Drops every character outside the calculator alphabet.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect()
}

pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let source = sanitize(input);
    if source.is_empty() {
        return Err(CalcError::Empty);
    }

    // `++` and `--` are increment/decrement tokens, not two signs.
    for (token, sign) in [("--", '-'), ("++", '+')] {
        if let Some(pos) = source.find(token) {
            return Err(CalcError::Unexpected(sign, pos + 1));
        }
    }

    let mut parser = Parser {
        chars: source.chars().collect(),
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if let Some(ch) = parser.peek() {
        return Err(CalcError::Unexpected(ch, parser.pos));
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    // -0 prints as "-0"; the terminal shows plain 0.
    Ok(if value == 0.0 { 0.0 } else { value })
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, CalcError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        let value = self.nested_factor();
        self.depth -= 1;
        value
    }

    fn nested_factor(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some('+') => {
                self.pos += 1;
                self.factor()
            }
            Some('(') => {
                self.pos += 1;
                let value = self.expression()?;
                match self.bump() {
                    Some(')') => Ok(value),
                    Some(other) => Err(CalcError::Unexpected(other, self.pos - 1)),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.number(),
            Some(other) => Err(CalcError::Unexpected(other, self.pos)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit() || ch == '.') {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(CalcError::BadNumber(literal));
        }
        literal
            .parse::<f64>()
            .map_err(|_| CalcError::BadNumber(literal))
    }
}
