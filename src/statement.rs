//! SQL statements emitted by the planner.
//!
//! Every statement renders through `Display` into a complete, independently
//! executable SQLite statement without a trailing terminator. Table and column
//! names are always double-quoted; column definitions are written verbatim.

use derive_more::Display;
use std::fmt;

/// A column of a `CREATE TABLE` statement: quoted name followed by its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub definition: String,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
        }
    }
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_identifier(&self.name))?;
        // Typeless nullable columns have no definition at all
        if !self.definition.is_empty() {
            write!(f, " {}", self.definition)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Statement {
    #[display("CREATE TABLE {} ({})", quote_identifier(table), join(columns))]
    CreateTable {
        table: String,
        columns: Vec<ColumnDefinition>,
    },

    /// Copy rows between tables. `columns` and `source_columns` are positionally aligned.
    #[display(
        "INSERT INTO {} ({}) SELECT {} FROM {}",
        quote_identifier(table),
        quote_list(columns),
        quote_list(source_columns),
        quote_identifier(source_table)
    )]
    InsertSelect {
        table: String,
        columns: Vec<String>,
        source_table: String,
        source_columns: Vec<String>,
    },

    #[display(
        "ALTER TABLE {} ADD COLUMN {}",
        quote_identifier(table),
        column
    )]
    AddColumn {
        table: String,
        column: ColumnDefinition,
    },

    #[display(
        "ALTER TABLE {} RENAME TO {}",
        quote_identifier(table),
        quote_identifier(new_name)
    )]
    RenameTable { table: String, new_name: String },

    #[display("DROP TABLE {}", quote_identifier(table))]
    DropTable { table: String },
}

impl Statement {
    /// Short operation label, used by the text output
    pub fn operation(&self) -> &'static str {
        match self {
            Self::CreateTable { .. } => "CREATE TABLE",
            Self::InsertSelect { .. } => "INSERT INTO",
            Self::AddColumn { .. } => "ADD COLUMN",
            Self::RenameTable { .. } => "RENAME TO",
            Self::DropTable { .. } => "DROP TABLE",
        }
    }
}

/// Quote an identifier with double quotes, doubling any embedded quote.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn quote_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn join(columns: &[ColumnDefinition]) -> String {
    columns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
