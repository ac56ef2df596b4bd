use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Column types a catalog can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Text,
    Boolean,
    /// Only reachable through catalog seeding, no literal infers to it
    Date,
    Real,
}

impl DataType {
    /// Whether a value of type `actual` may be stored in a column declared `self`.
    ///
    /// Integers widen into REAL columns; the reverse is rejected.
    pub fn is_compatible(self, actual: DataType) -> bool {
        self == actual || (self == DataType::Real && actual == DataType::Integer)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Date => write!(f, "DATE"),
            DataType::Real => write!(f, "REAL"),
        }
    }
}

/// A literal value supplied by the caller for INSERT/UPDATE
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    Text(String),
    Boolean(bool),
}

impl Literal {
    /// Returns the inferred type of the literal
    pub fn datatype(&self) -> DataType {
        match self {
            Self::Integer(_) => DataType::Integer,
            Self::Real(_) => DataType::Real,
            Self::Text(_) => DataType::Text,
            Self::Boolean(_) => DataType::Boolean,
        }
    }

    /// Classifies raw token text into a literal.
    ///
    /// `'abc'` is text with the quotes stripped, `true`/`false` are booleans,
    /// `-12` and `3.5` are numbers. Anything else is kept verbatim as text.
    pub fn classify(raw: &str) -> Result<Self> {
        if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
            return Ok(Self::Text(raw[1..raw.len() - 1].to_string()));
        }
        if raw.eq_ignore_ascii_case("true") {
            return Ok(Self::Boolean(true));
        }
        if raw.eq_ignore_ascii_case("false") {
            return Ok(Self::Boolean(false));
        }

        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return Ok(Self::Integer(raw.parse()?));
        }
        // Same shape the lexer accepts for numbers: digits with a single '.'
        if digits.matches('.').count() == 1
            && digits.chars().any(|c| c.is_ascii_digit())
            && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        {
            return Ok(Self::Real(raw.parse()?));
        }

        Ok(Self::Text(raw.to_string()))
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Renders the literal the way it is embedded in generated SQL.
///
/// Text is quoted verbatim, embedded quotes are not escaped. Non-finite
/// reals render as `NaN`/`inf`/`-inf`, which are not valid SQL literals.
impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{}", v),
            Literal::Real(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Literal::Real(v) => write!(f, "{}", v),
            Literal::Text(v) => write!(f, "'{}'", v),
            Literal::Boolean(true) => write!(f, "TRUE"),
            Literal::Boolean(false) => write!(f, "FALSE"),
        }
    }
}
