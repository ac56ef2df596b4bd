use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Result, sql::types::DataType};

/// Table schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    /// Columns in declaration order, names are unique
    pub columns: Vec<Column>,
}

impl Table {
    /// Builds a table from `(column, type)` pairs.
    ///
    /// A column named twice keeps its first position and its last type.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, DataType)>,
    ) -> Self {
        let mut table = Self {
            name: name.into(),
            columns: Vec::new(),
        };
        for (col_name, datatype) in columns {
            let col_name = col_name.into();
            match table.columns.iter_mut().find(|c| c.name == col_name) {
                Some(col) => col.datatype = datatype,
                None => table.columns.push(Column {
                    name: col_name,
                    datatype,
                }),
            }
        }
        table
    }

    /// Returns the declared type of a column, if the table has it
    pub fn column_type(&self, col_name: &str) -> Option<DataType> {
        self.columns
            .iter()
            .find(|c| c.name == col_name)
            .map(|c| c.datatype)
    }
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

/// In-memory registry of table schemas that productions validate against.
///
/// Names are exact, case-sensitive keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    tables: BTreeMap<String, Table>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding the `usuarios` seed table
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        catalog.register_table(
            "usuarios",
            [
                ("id", DataType::Integer),
                ("nombre", DataType::Text),
                ("edad", DataType::Integer),
                ("email", DataType::Text),
            ],
        );
        catalog
    }

    /// Inserts or replaces the schema of `name`
    pub fn register_table<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = (S, DataType)>,
    ) {
        let table = Table::new(name, columns);
        debug!(table = %table.name, columns = table.columns.len(), "registering table");
        self.tables.insert(table.name.clone(), table);
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// False when either the table or the column is unknown
    pub fn column_exists(&self, table: &str, column: &str) -> bool {
        self.lookup_type(table, column).is_some()
    }

    pub fn lookup_type(&self, table: &str, column: &str) -> Option<DataType> {
        self.tables.get(table)?.column_type(column)
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Registered table names in sorted order
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Serializes the catalog into a bincode snapshot
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restores a catalog from a snapshot produced by `encode`
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Writes a snapshot of the catalog to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), tables = self.tables.len(), "saving catalog snapshot");
        fs::write(path, self.encode()?)?;
        Ok(())
    }

    /// Reads a catalog snapshot written by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading catalog snapshot");
        Self::decode(&fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::{Error, Result}, sql::types::DataType};

    use super::{Catalog, Table};

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        assert!(catalog.table_exists("usuarios"));
        assert!(!catalog.table_exists("Usuarios"));
        assert_eq!(catalog.lookup_type("usuarios", "id"), Some(DataType::Integer));
        assert_eq!(catalog.lookup_type("usuarios", "nombre"), Some(DataType::Text));
        assert_eq!(catalog.lookup_type("usuarios", "edad"), Some(DataType::Integer));
        assert_eq!(catalog.lookup_type("usuarios", "email"), Some(DataType::Text));
        assert_eq!(catalog.tables().collect::<Vec<_>>(), vec!["usuarios"]);
    }

    #[test]
    fn test_missing_lookups() {
        let catalog = Catalog::seeded();
        assert!(!catalog.column_exists("usuarios", "EDAD"));
        assert!(!catalog.column_exists("pedidos", "id"));
        assert_eq!(catalog.lookup_type("usuarios", "telefono"), None);
        assert_eq!(catalog.lookup_type("pedidos", "id"), None);
        assert!(Catalog::new().get_table("usuarios").is_none());
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = Catalog::seeded();
        catalog.register_table("usuarios", [("id", DataType::Real)]);
        assert_eq!(catalog.lookup_type("usuarios", "id"), Some(DataType::Real));
        assert!(!catalog.column_exists("usuarios", "nombre"));
    }

    #[test]
    fn test_duplicate_columns() {
        let table = Table::new(
            "eventos",
            [
                ("fecha", DataType::Text),
                ("id", DataType::Integer),
                ("fecha", DataType::Date),
            ],
        );
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].name, "fecha");
        assert_eq!(table.column_type("fecha"), Some(DataType::Date));
    }

    #[test]
    fn test_snapshot() -> Result<()> {
        let mut catalog = Catalog::seeded();
        catalog.register_table("productos", [("precio", DataType::Real)]);

        let restored = Catalog::decode(&catalog.encode()?)?;
        assert_eq!(restored, catalog);

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.bin");
        catalog.save(&path)?;
        assert_eq!(Catalog::load(&path)?, catalog);

        let missing = Catalog::load(dir.path().join("missing.bin"));
        assert!(matches!(missing, Err(Error::Internal(_))));
        Ok(())
    }
}
