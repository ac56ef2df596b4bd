use tracing::warn;

use crate::sql::{ast::Assignments, schema::Catalog, types::Literal};

use super::{with_condition, Attribute, AttributeBuilder, Production};

/// INSERT production
pub struct Insert {
    table_name: String,
    columns: Vec<String>,
    values: Vec<Literal>,
}

impl Insert {
    pub fn new(table_name: String, columns: Vec<String>, values: Vec<Literal>) -> Box<Self> {
        Box::new(Self {
            table_name,
            columns,
            values,
        })
    }
}

fn join_values(values: &[Literal]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Production for Insert {
    fn produce(self: Box<Self>, catalog: &Catalog) -> Attribute {
        let mut attr = AttributeBuilder::new();
        if !attr.require_table(catalog, &self.table_name) {
            return attr.abort();
        }

        for col in &self.columns {
            attr.require_column(catalog, &self.table_name, col);
        }

        // Unlike unknown columns, a count mismatch stops generation
        if self.columns.len() != self.values.len() {
            warn!(
                table = %self.table_name,
                columns = self.columns.len(),
                values = self.values.len(),
                "insert column and value counts differ"
            );
            attr.error("The number of columns and values does not match".to_string());
            return attr.abort();
        }

        let code = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table_name,
            self.columns.join(", "),
            join_values(&self.values)
        );
        attr.finish(self.table_name, self.columns, code)
    }
}

/// UPDATE production
pub struct Update {
    table_name: String,
    assignments: Assignments,
    condition: Option<String>,
}

impl Update {
    pub fn new(table_name: String, assignments: Assignments, condition: Option<String>) -> Box<Self> {
        Box::new(Self {
            table_name,
            assignments,
            condition,
        })
    }
}

impl Production for Update {
    fn produce(self: Box<Self>, catalog: &Catalog) -> Attribute {
        let mut attr = AttributeBuilder::new();
        if !attr.require_table(catalog, &self.table_name) {
            return attr.abort();
        }

        let mut set_clauses = Vec::with_capacity(self.assignments.len());
        for (col, value) in self.assignments.iter() {
            // Unknown columns are dropped from the SET list
            let Some(expected) = catalog.lookup_type(&self.table_name, col) else {
                attr.missing_column(&self.table_name, col);
                continue;
            };

            // Incompatible values are still rendered
            let actual = value.datatype();
            if !expected.is_compatible(actual) {
                attr.error(format!(
                    "Incompatible type for '{}': expected {}, got {}",
                    col, expected, actual
                ));
            }
            set_clauses.push(format!("{} = {}", col, value));
        }

        let code = with_condition(
            format!("UPDATE {} SET {}", self.table_name, set_clauses.join(", ")),
            self.condition.as_deref(),
        );
        attr.finish(self.table_name, Vec::new(), code)
    }
}

/// DELETE production
pub struct Delete {
    table_name: String,
    condition: Option<String>,
}

impl Delete {
    pub fn new(table_name: String, condition: Option<String>) -> Box<Self> {
        Box::new(Self {
            table_name,
            condition,
        })
    }
}

impl Production for Delete {
    fn produce(self: Box<Self>, catalog: &Catalog) -> Attribute {
        let mut attr = AttributeBuilder::new();
        if !attr.require_table(catalog, &self.table_name) {
            return attr.abort();
        }

        let code = with_condition(
            format!("DELETE FROM {}", self.table_name),
            self.condition.as_deref(),
        );
        attr.finish(self.table_name, Vec::new(), code)
    }
}
