use std::fmt::Display;

use crate::sql::types::Literal;

/// Statements a production can validate and render
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement
    Select {
        /// Requested columns, or the single wildcard `["*"]`
        columns: Vec<String>,
        table_name: String,
        /// Raw condition, rendered verbatim after WHERE
        condition: Option<String>,
    },
    /// INSERT statement, values pair positionally with columns
    Insert {
        table_name: String,
        columns: Vec<String>,
        values: Vec<Literal>,
    },
    /// UPDATE statement
    Update {
        table_name: String,
        assignments: Assignments,
        condition: Option<String>,
    },
    /// DELETE statement
    Delete {
        table_name: String,
        condition: Option<String>,
    },
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Select { .. } => StatementKind::Select,
            Statement::Insert { .. } => StatementKind::Insert,
            Statement::Update { .. } => StatementKind::Update,
            Statement::Delete { .. } => StatementKind::Delete,
        }
    }

    pub fn table_name(&self) -> &str {
        match self {
            Statement::Select { table_name, .. }
            | Statement::Insert { table_name, .. }
            | Statement::Update { table_name, .. }
            | Statement::Delete { table_name, .. } => table_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatementKind::Select => write!(f, "SELECT"),
            StatementKind::Insert => write!(f, "INSERT"),
            StatementKind::Update => write!(f, "UPDATE"),
            StatementKind::Delete => write!(f, "DELETE"),
        }
    }
}

/// UPDATE assignments in insertion order.
///
/// Setting a column twice replaces the value but keeps the first position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments(Vec<(String, Literal)>);

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Literal>) {
        let column = column.into();
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some((_, v)) => *v = value,
            None => self.0.push((column, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.0.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Literal>> FromIterator<(K, V)> for Assignments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut assignments = Self::new();
        for (column, value) in iter {
            assignments.set(column, value);
        }
        assignments
    }
}
