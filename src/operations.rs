//! Requested structural changes for one table.

use serde::{Deserialize, Serialize};

/// A column name paired with the definition text to use for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// The full set of changes requested for a table.
///
/// Every list is applied in the order given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlterOperations {
    #[serde(default)]
    pub rename_table: Option<String>,

    #[serde(default)]
    pub add_columns: Vec<ColumnChange>,

    #[serde(default)]
    pub delete_columns: Vec<String>,

    #[serde(default)]
    pub modify_columns: Vec<ColumnChange>,

    #[serde(default)]
    pub rename_columns: Vec<ColumnRename>,
}

impl AlterOperations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_table(mut self, new_name: impl Into<String>) -> Self {
        self.rename_table = Some(new_name.into());
        self
    }

    pub fn add_column(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.add_columns.push(ColumnChange {
            name: name.into(),
            definition: definition.into(),
        });
        self
    }

    pub fn delete_column(mut self, name: impl Into<String>) -> Self {
        self.delete_columns.push(name.into());
        self
    }

    pub fn modify_column(mut self, name: impl Into<String>, definition: impl Into<String>) -> Self {
        self.modify_columns.push(ColumnChange {
            name: name.into(),
            definition: definition.into(),
        });
        self
    }

    pub fn rename_column(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.rename_columns.push(ColumnRename {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Whether the table has to be recreated and its rows copied.
    ///
    /// SQLite can add columns and rename tables in place; anything else needs a rebuild.
    pub fn requires_rebuild(&self) -> bool {
        !self.delete_columns.is_empty()
            || !self.modify_columns.is_empty()
            || !self.rename_columns.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.rename_table.is_none() && self.add_columns.is_empty() && !self.requires_rebuild()
    }
}
