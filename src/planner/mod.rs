//! Planning of extended `ALTER TABLE` changes for SQLite.
//!
//! SQLite only supports `ALTER TABLE ... RENAME TO` and `ALTER TABLE ... ADD COLUMN`
//! natively. Deleting, modifying or renaming columns is emulated by creating a
//! replacement table with the desired layout and copying every row into it.
//!
//! The planner is a pure function of the table's column snapshot and the requested
//! operations. It never touches a database; the caller executes the returned
//! statements in order, ideally inside a transaction.
//!
//! Statement order is always:
//!
//! 1. `CREATE TABLE` for the replacement table and `INSERT INTO ... SELECT` copying
//!    the rows (only when a rebuild is required), followed by `DROP TABLE` and
//!    `RENAME TO` when [`PlannerOptions::finalize_rebuild`] is set
//! 2. one `ADD COLUMN` per added column, in request order
//! 3. `RENAME TO` for the table rename, if requested
//!
//! Without `finalize_rebuild` the caller must drop the original table and rename
//! the replacement table (see [`AlterPlanner::temp_table_name`]) after running the
//! rebuild statements.

mod column_order;

pub use column_order::ColumnOrder;

use crate::config::Config;
use crate::error::{AlterError, Result};
use crate::operations::AlterOperations;
use crate::schema::{ColumnInfo, ColumnSnapshot};
use crate::statement::{ColumnDefinition, Statement};
use std::collections::HashMap;

const DELETE_COLUMN: &str = "DELETE COLUMN";
const MODIFY_COLUMN: &str = "MODIFY COLUMN";
const RENAME_COLUMN: &str = "RENAME COLUMN";
const ADD_COLUMN: &str = "ADD COLUMN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerOptions {
    /// Prepended to the table name to build the replacement table name
    pub temp_table_prefix: String,
    /// Appended to the table name to build the replacement table name
    pub temp_table_suffix: String,
    /// Emit `DROP TABLE` + `RENAME TO` to swap the replacement table in
    pub finalize_rebuild: bool,
    /// Reject rename targets that collide with names already introduced in the same plan
    pub strict_names: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            temp_table_prefix: "_".to_string(),
            temp_table_suffix: "_tmp".to_string(),
            finalize_rebuild: false,
            strict_names: true,
        }
    }
}

impl From<&Config> for PlannerOptions {
    fn from(config: &Config) -> Self {
        Self {
            temp_table_prefix: config.temp_table_prefix.clone(),
            temp_table_suffix: config.temp_table_suffix.clone(),
            finalize_rebuild: config.finalize_rebuild,
            strict_names: config.strict_names,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlterPlanner {
    options: PlannerOptions,
}

impl AlterPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn with_config(config: &Config) -> Self {
        Self::with_options(PlannerOptions::from(config))
    }

    /// Name of the replacement table built during a rebuild
    pub fn temp_table_name(&self, table: &str) -> String {
        format!(
            "{}{}{}",
            self.options.temp_table_prefix, table, self.options.temp_table_suffix
        )
    }

    /// Plan the alteration and render every statement to SQL text
    pub fn plan(
        &self,
        table: &str,
        snapshot: &ColumnSnapshot,
        operations: &AlterOperations,
    ) -> Result<Vec<String>> {
        Ok(self
            .plan_statements(table, snapshot, operations)?
            .iter()
            .map(ToString::to_string)
            .collect())
    }

    /// Plan the alteration as typed statements.
    ///
    /// Fails without producing any statement if an operation references a missing
    /// column, collides with an existing one, or if the snapshot is empty.
    pub fn plan_statements(
        &self,
        table: &str,
        snapshot: &ColumnSnapshot,
        operations: &AlterOperations,
    ) -> Result<Vec<Statement>> {
        if snapshot.is_empty() {
            return Err(AlterError::TableNotFound {
                table: table.to_string(),
            });
        }

        let original = ColumnOrder::from_snapshot(snapshot);
        let mut order = original.clone();
        let mut statements = vec![];

        if operations.requires_rebuild() {
            let mut overrides: HashMap<&str, &str> = HashMap::new();
            let mut renamed_from: HashMap<&str, &str> = HashMap::new();

            for name in &operations.delete_columns {
                if order.remove(name).is_none() {
                    return Err(column_not_found(table, name, DELETE_COLUMN));
                }
            }

            for change in &operations.modify_columns {
                if !order.contains(&change.name) {
                    return Err(column_not_found(table, &change.name, MODIFY_COLUMN));
                }
                overrides.insert(&change.name, &change.definition);
            }

            for rename in &operations.rename_columns {
                if !original.contains(&rename.from) {
                    return Err(AlterError::OriginalColumnNotFound {
                        table: table.to_string(),
                        column: rename.from.clone(),
                        operation: RENAME_COLUMN,
                    });
                }
                if original.contains(&rename.to)
                    || (self.options.strict_names && order.contains(&rename.to))
                {
                    return Err(already_exists(table, &rename.to, RENAME_COLUMN));
                }
                // The source was deleted or already renamed earlier in this plan
                let Some(ordinal) = order.remove(&rename.from) else {
                    return Err(column_not_found(table, &rename.from, RENAME_COLUMN));
                };
                order.insert(rename.to.as_str(), ordinal);
                renamed_from.insert(&rename.to, &rename.from);
            }

            // Columns added afterwards are not part of the replacement table
            if order.is_empty() {
                return Err(AlterError::NoColumnsLeft {
                    table: table.to_string(),
                });
            }

            statements.extend(self.rebuild(table, snapshot, &order, &overrides, &renamed_from)?);
        }

        for change in &operations.add_columns {
            if order.contains(&change.name) {
                return Err(already_exists(table, &change.name, ADD_COLUMN));
            }
            order.push(change.name.as_str());
            statements.push(Statement::AddColumn {
                table: table.to_string(),
                column: ColumnDefinition::new(&change.name, &change.definition),
            });
        }

        if let Some(new_name) = &operations.rename_table {
            statements.push(Statement::RenameTable {
                table: table.to_string(),
                new_name: new_name.clone(),
            });
        }

        Ok(statements)
    }

    /// Create the replacement table and copy rows into it.
    ///
    /// Target columns follow `order`; each is fed from its rename source, or from the
    /// column of the same name.
    fn rebuild(
        &self,
        table: &str,
        snapshot: &ColumnSnapshot,
        order: &ColumnOrder,
        overrides: &HashMap<&str, &str>,
        renamed_from: &HashMap<&str, &str>,
    ) -> Result<Vec<Statement>> {
        let originals: HashMap<&str, &ColumnInfo> = snapshot
            .iter()
            .map(|column| (column.name.as_str(), column))
            .collect();

        let temp_table = self.temp_table_name(table);
        let names = order.names_in_order();
        let mut columns = Vec::with_capacity(names.len());
        let mut targets = Vec::with_capacity(names.len());
        let mut sources = Vec::with_capacity(names.len());

        for name in names {
            let source = renamed_from.get(name).copied().unwrap_or(name);
            let definition = match overrides.get(source) {
                Some(definition) => definition.to_string(),
                None => originals
                    .get(source)
                    .map(|column| column.definition())
                    .ok_or_else(|| column_not_found(table, source, RENAME_COLUMN))?,
            };

            columns.push(ColumnDefinition::new(name, definition));
            targets.push(name.to_string());
            sources.push(source.to_string());
        }

        let mut statements = vec![
            Statement::CreateTable {
                table: temp_table.clone(),
                columns,
            },
            Statement::InsertSelect {
                table: temp_table.clone(),
                columns: targets,
                source_table: table.to_string(),
                source_columns: sources,
            },
        ];

        if self.options.finalize_rebuild {
            statements.push(Statement::DropTable {
                table: table.to_string(),
            });
            statements.push(Statement::RenameTable {
                table: temp_table,
                new_name: table.to_string(),
            });
        }

        Ok(statements)
    }
}

fn column_not_found(table: &str, column: &str, operation: &'static str) -> AlterError {
    AlterError::ColumnNotFound {
        table: table.to_string(),
        column: column.to_string(),
        operation,
    }
}

fn already_exists(table: &str, column: &str, operation: &'static str) -> AlterError {
    AlterError::ColumnAlreadyExists {
        table: table.to_string(),
        column: column.to_string(),
        operation,
    }
}
