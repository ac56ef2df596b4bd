use crate::sql::schema::Catalog;

use super::{with_condition, Attribute, AttributeBuilder, Production};

/// SELECT production
pub struct Select {
    columns: Vec<String>,
    table_name: String,
    condition: Option<String>,
}

impl Select {
    pub fn new(columns: Vec<String>, table_name: String, condition: Option<String>) -> Box<Self> {
        Box::new(Self {
            columns,
            table_name,
            condition,
        })
    }

    fn is_wildcard(&self) -> bool {
        self.columns.len() == 1 && self.columns[0] == "*"
    }
}

impl Production for Select {
    fn produce(self: Box<Self>, catalog: &Catalog) -> Attribute {
        let mut attr = AttributeBuilder::new();
        if !attr.require_table(catalog, &self.table_name) {
            return attr.abort();
        }

        // Unknown columns are all reported but still rendered
        if !self.is_wildcard() {
            for col in &self.columns {
                attr.require_column(catalog, &self.table_name, col);
            }
        }

        let code = with_condition(
            format!("SELECT {} FROM {}", self.columns.join(", "), self.table_name),
            self.condition.as_deref(),
        );
        attr.finish(self.table_name, self.columns, code)
    }
}
