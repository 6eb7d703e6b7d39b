//! Column snapshots of existing tables.
//!
//! A snapshot is the ordered column list a "describe table" query would
//! return: name, declared type and nullability, in physical column order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

fn default_nullable() -> bool {
    true
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable,
        }
    }

    /// Definition text used when the column is carried over unmodified.
    ///
    /// `"<TYPE> NOT NULL"` for non-nullable columns, `"<TYPE>"` otherwise.
    pub fn definition(&self) -> String {
        match (self.nullable, self.type_name.is_empty()) {
            (true, _) => self.type_name.clone(),
            (false, true) => "NOT NULL".to_string(),
            (false, false) => format!("{} NOT NULL", self.type_name),
        }
    }
}

/// Ordered columns of a single table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSnapshot {
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

impl ColumnSnapshot {
    pub fn new(columns: Vec<ColumnInfo>) -> Self {
        Self { columns }
    }

    /// Append a column, builder style
    pub fn column(mut self, name: &str, type_name: &str, nullable: bool) -> Self {
        self.columns.push(ColumnInfo::new(name, type_name, nullable));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter()
    }
}

impl FromIterator<ColumnInfo> for ColumnSnapshot {
    fn from_iter<I: IntoIterator<Item = ColumnInfo>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Snapshots of every table found in a schema dump, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    tables: Vec<(String, ColumnSnapshot)>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous snapshot with the same name
    pub fn insert(&mut self, table: impl Into<String>, snapshot: ColumnSnapshot) {
        let table = table.into();
        match self.tables.iter_mut().find(|(name, _)| *name == table) {
            Some(entry) => entry.1 = snapshot,
            None => self.tables.push((table, snapshot)),
        }
    }

    /// Snapshot for `table`. Unknown tables yield an empty snapshot.
    pub fn snapshot(&self, table: &str) -> ColumnSnapshot {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, snapshot)| snapshot.clone())
            .unwrap_or_default()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
