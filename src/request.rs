//! Alter request files.
//!
//! A request names one table and the operations to apply to it:
//!
//! ```toml
//! table = "users"
//! rename_table = "people"
//! delete_columns = ["legacy"]
//! add_columns = [{ name = "age", definition = "INTEGER" }]
//! modify_columns = [{ name = "email", definition = "TEXT NOT NULL" }]
//! rename_columns = [{ from = "name", to = "full_name" }]
//! ```
//!
//! JSON files with the same keys are accepted as well.

use crate::error::{AlterError, Result};
use crate::operations::{AlterOperations, ColumnChange, ColumnRename};
use camino::Utf8Path;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RequestFile")]
pub struct AlterRequest {
    pub table: String,
    pub operations: AlterOperations,
}

/// On-disk layout of a request. Unknown keys are rejected so a misspelled
/// operation list fails instead of planning nothing.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestFile {
    table: String,
    #[serde(default)]
    rename_table: Option<String>,
    #[serde(default)]
    add_columns: Vec<ColumnChange>,
    #[serde(default)]
    delete_columns: Vec<String>,
    #[serde(default)]
    modify_columns: Vec<ColumnChange>,
    #[serde(default)]
    rename_columns: Vec<ColumnRename>,
}

impl From<RequestFile> for AlterRequest {
    fn from(file: RequestFile) -> Self {
        Self {
            table: file.table,
            operations: AlterOperations {
                rename_table: file.rename_table,
                add_columns: file.add_columns,
                delete_columns: file.delete_columns,
                modify_columns: file.modify_columns,
                rename_columns: file.rename_columns,
            },
        }
    }
}

impl AlterRequest {
    pub fn new(table: impl Into<String>, operations: AlterOperations) -> Self {
        Self {
            table: table.into(),
            operations,
        }
    }

    /// Load a request, picking the format from the file extension
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(path.as_str(), is_json(path), &contents)
    }

    fn parse(path: &str, json: bool, contents: &str) -> Result<Self> {
        let request: Self = if json {
            serde_json::from_str(contents).map_err(|e| AlterError::request_error(path, e.to_string()))?
        } else {
            toml::from_str(contents).map_err(|e| AlterError::request_error(path, e.to_string()))?
        };

        if request.table.trim().is_empty() {
            return Err(AlterError::request_error(path, "`table` must not be empty"));
        }

        Ok(request)
    }
}

/// Whether a file is a request file this tool understands
pub fn is_request_file(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("toml") | Some("json"))
}

fn is_json(path: &Utf8Path) -> bool {
    path.extension() == Some("json")
}
