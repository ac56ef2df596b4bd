use tracing::{debug, warn};

use crate::sql::{
    ast::{Assignments, Statement},
    production::{
        mutation::{Delete, Insert, Update},
        query::Select,
    },
    schema::Catalog,
    types::{DataType, Literal},
};

mod mutation;
mod query;

/// Statement-specific validate-then-generate step
pub trait Production {
    fn produce(self: Box<Self>, catalog: &Catalog) -> Attribute;
}

impl dyn Production {
    /// Builds the production for a statement
    pub fn build(stmt: Statement) -> Box<dyn Production> {
        match stmt {
            Statement::Select {
                columns,
                table_name,
                condition,
            } => Select::new(columns, table_name, condition),
            Statement::Insert {
                table_name,
                columns,
                values,
            } => Insert::new(table_name, columns, values),
            Statement::Update {
                table_name,
                assignments,
                condition,
            } => Update::new(table_name, assignments, condition),
            Statement::Delete {
                table_name,
                condition,
            } => Delete::new(table_name, condition),
        }
    }
}

/// Outcome of one production: generated SQL plus its validation report.
///
/// `code` may be non-empty while `valid` is false; check `valid` before
/// running the SQL anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Reserved for single-value results, unset by the statement productions
    pub datatype: Option<DataType>,
    /// Reserved for single-value results, unset by the statement productions
    pub value: Option<Literal>,
    /// Generated SQL, empty when generation was short-circuited
    pub code: String,
    pub table: String,
    pub columns: Vec<String>,
    pub valid: bool,
    /// Diagnostics in detection order
    pub errors: Vec<String>,
}

/// Collects diagnostics during a production and folds them into the final
/// `Attribute`. Validity is derived from the collected errors, so it can
/// only go from true to false.
#[derive(Debug, Default)]
pub(crate) struct AttributeBuilder {
    errors: Vec<String>,
}

impl AttributeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, msg: String) {
        debug!(error = %msg, "validation failed");
        self.errors.push(msg);
    }

    /// Checks that the target table exists, recording an error if not
    pub fn require_table(&mut self, catalog: &Catalog, table_name: &str) -> bool {
        if catalog.table_exists(table_name) {
            return true;
        }
        warn!(table = %table_name, "table does not exist");
        self.error(format!("Table '{}' does not exist", table_name));
        false
    }

    /// Checks that a column exists in the target table, recording an error if not
    pub fn require_column(&mut self, catalog: &Catalog, table_name: &str, column: &str) -> bool {
        if catalog.column_exists(table_name, column) {
            return true;
        }
        self.missing_column(table_name, column);
        false
    }

    pub fn missing_column(&mut self, table_name: &str, column: &str) {
        self.error(format!(
            "Column '{}' does not exist in '{}'",
            column, table_name
        ));
    }

    /// Stops the production without generating any SQL
    pub fn abort(self) -> Attribute {
        self.finish(String::new(), Vec::new(), String::new())
    }

    pub fn finish(self, table: String, columns: Vec<String>, code: String) -> Attribute {
        Attribute {
            datatype: None,
            value: None,
            code,
            table,
            columns,
            valid: self.errors.is_empty(),
            errors: self.errors,
        }
    }
}

/// Appends ` WHERE <condition>` when a non-empty condition was given
fn with_condition(mut code: String, condition: Option<&str>) -> String {
    if let Some(cond) = condition.filter(|c| !c.is_empty()) {
        code.push_str(" WHERE ");
        code.push_str(cond);
    }
    code
}

/// Validates and generates SQL statements against an owned schema catalog
#[derive(Debug, Clone)]
pub struct ProductionEngine {
    catalog: Catalog,
}

impl Default for ProductionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductionEngine {
    /// Creates an engine seeded with the `usuarios` table
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seeded())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Adds or replaces a table; subsequent statements validate against it
    pub fn register_table<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, DataType)>,
    ) {
        self.catalog.register_table(name, columns);
    }

    /// Runs the production matching the statement
    pub fn produce(&self, stmt: Statement) -> Attribute {
        debug!(kind = %stmt.kind(), table = %stmt.table_name(), "producing statement");
        <dyn Production>::build(stmt).produce(&self.catalog)
    }

    pub fn select<S: Into<String>>(
        &self,
        columns: impl IntoIterator<Item = S>,
        table_name: &str,
        condition: Option<&str>,
    ) -> Attribute {
        self.produce(Statement::Select {
            columns: columns.into_iter().map(Into::into).collect(),
            table_name: table_name.to_string(),
            condition: condition.map(str::to_string),
        })
    }

    pub fn insert<S: Into<String>, V: Into<Literal>>(
        &self,
        table_name: &str,
        columns: impl IntoIterator<Item = S>,
        values: impl IntoIterator<Item = V>,
    ) -> Attribute {
        self.produce(Statement::Insert {
            table_name: table_name.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn update(
        &self,
        table_name: &str,
        assignments: Assignments,
        condition: Option<&str>,
    ) -> Attribute {
        self.produce(Statement::Update {
            table_name: table_name.to_string(),
            assignments,
            condition: condition.map(str::to_string),
        })
    }

    pub fn delete(&self, table_name: &str, condition: Option<&str>) -> Attribute {
        self.produce(Statement::Delete {
            table_name: table_name.to_string(),
            condition: condition.map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::Assignments, schema::Catalog, types::{DataType, Literal}};

    use super::{with_condition, AttributeBuilder, ProductionEngine};

    #[test]
    fn test_abort_leaves_record_empty() {
        let mut attr = AttributeBuilder::new();
        attr.error("Table 't' does not exist".to_string());
        let attr = attr.abort();
        assert!(!attr.valid);
        assert_eq!(attr.code, "");
        assert_eq!(attr.table, "");
        assert!(attr.columns.is_empty());
        assert_eq!(attr.errors, vec!["Table 't' does not exist"]);

        let attr = AttributeBuilder::new().abort();
        assert!(attr.valid);
        assert!(attr.errors.is_empty());
    }

    #[test]
    fn test_missing_column_message() {
        let mut attr = AttributeBuilder::new();
        assert!(attr.require_column(&Catalog::seeded(), "usuarios", "id"));
        assert!(!attr.require_column(&Catalog::seeded(), "usuarios", "telefono"));
        attr.missing_column("usuarios", "movil");
        let attr = attr.finish("usuarios".to_string(), Vec::new(), String::new());
        assert_eq!(
            attr.errors,
            vec![
                "Column 'telefono' does not exist in 'usuarios'",
                "Column 'movil' does not exist in 'usuarios'",
            ]
        );
    }

    #[test]
    fn test_missing_table_short_circuits() {
        let engine = ProductionEngine::new();
        let results = vec![
            engine.select(["*"], "pedidos", Some("id = 1")),
            engine.insert("pedidos", ["id"], [1]),
            engine.update("pedidos", [("id", 1)].into_iter().collect(), None),
            engine.delete("pedidos", None),
        ];

        for attr in results {
            assert!(!attr.valid);
            assert_eq!(attr.errors, vec!["Table 'pedidos' does not exist".to_string()]);
            assert_eq!(attr.code, "");
            assert_eq!(attr.table, "");
            assert!(attr.columns.is_empty());
        }
    }

    #[test]
    fn test_empty_condition_is_ignored() {
        assert_eq!(with_condition("DELETE FROM t".to_string(), Some("")), "DELETE FROM t");
        assert_eq!(with_condition("DELETE FROM t".to_string(), None), "DELETE FROM t");
        assert_eq!(
            with_condition("DELETE FROM t".to_string(), Some("a = 1")),
            "DELETE FROM t WHERE a = 1"
        );
    }

    #[test]
    fn test_registered_table() {
        let mut engine = ProductionEngine::new();
        engine.register_table(
            "productos",
            [("id", DataType::Integer), ("precio", DataType::Real), ("activo", DataType::Boolean)],
        );

        let mut assignments = Assignments::new();
        assignments.set("precio", 10);
        assignments.set("activo", false);
        let attr = engine.update("productos", assignments, Some("id = 3"));
        assert!(attr.valid);
        assert_eq!(attr.code, "UPDATE productos SET precio = 10, activo = FALSE WHERE id = 3");

        let attr = engine.insert(
            "productos",
            ["id", "precio", "activo"],
            [Literal::from(1), Literal::from(9.5), Literal::from(true)],
        );
        assert!(attr.valid);
        assert_eq!(attr.code, "INSERT INTO productos (id, precio, activo) VALUES (1, 9.5, TRUE)");
    }

    #[test]
    fn test_injected_catalog() {
        let mut catalog = Catalog::new();
        catalog.register_table("logs", [("msg", DataType::Text)]);
        let engine = ProductionEngine::with_catalog(catalog);

        assert!(!engine.catalog().table_exists("usuarios"));
        assert!(!engine.delete("usuarios", None).valid);
        assert_eq!(engine.delete("logs", None).code, "DELETE FROM logs");
    }

    #[test]
    fn test_reserved_fields_unset() {
        let attr = ProductionEngine::new().select(["*"], "usuarios", None);
        assert_eq!(attr.datatype, None);
        assert_eq!(attr.value, None);
    }
}
