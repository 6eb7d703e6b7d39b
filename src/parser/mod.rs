use crate::error::{AlterError, Result};
use crate::schema::{ColumnInfo, ColumnSnapshot, SchemaCatalog};
use sqlparser::ast::{ColumnDef, ColumnOption, CreateTable, ObjectName, ObjectNamePart, Statement};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

pub struct SqlParser {
    dialect: SQLiteDialect,
}

impl SqlParser {
    pub fn new() -> Self {
        Self {
            dialect: SQLiteDialect {},
        }
    }

    /// Parse SQL string into AST statements
    pub fn parse(&self, sql: &str) -> Result<Vec<Statement>> {
        Parser::parse_sql(&self.dialect, sql).map_err(|e| AlterError::parse_error(e.to_string()))
    }

    /// Build column snapshots from a schema dump.
    ///
    /// Every `CREATE TABLE` statement contributes one table; other statements
    /// (indexes, triggers, views) are skipped.
    pub fn parse_schema(&self, sql: &str) -> Result<SchemaCatalog> {
        let mut catalog = SchemaCatalog::new();

        for stmt in self.parse(sql)? {
            let Statement::CreateTable(CreateTable { name, columns, .. }) = stmt else {
                continue;
            };

            let snapshot: ColumnSnapshot = columns.iter().map(column_info).collect();
            catalog.insert(table_name(&name), snapshot);
        }

        Ok(catalog)
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Unquoted name of the table itself, without any schema qualifier
fn table_name(name: &ObjectName) -> String {
    match name.0.last() {
        Some(ObjectNamePart::Identifier(ident)) => ident.value.clone(),
        _ => name.to_string(),
    }
}

/// Nullability follows the declaration: only an explicit NOT NULL makes a column non-nullable
fn column_info(column: &ColumnDef) -> ColumnInfo {
    let not_null = column
        .options
        .iter()
        .any(|def| matches!(def.option, ColumnOption::NotNull));

    ColumnInfo::new(
        column.name.value.clone(),
        column.data_type.to_string(),
        !not_null,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_table() {
        let parser = SqlParser::new();
        let result = parser.parse("CREATE TABLE users (id INTEGER NOT NULL, name TEXT);");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_invalid_sql() {
        let parser = SqlParser::new();
        let result = parser.parse("CREATE TABLE users (id INTEGER");
        assert!(matches!(result, Err(AlterError::ParseError { .. })));
    }

    #[test]
    fn test_parse_schema_columns() {
        let parser = SqlParser::new();
        let catalog = parser
            .parse_schema(
                r#"
CREATE TABLE users (
    id INTEGER NOT NULL PRIMARY KEY,
    name TEXT,
    email VARCHAR(255) NOT NULL UNIQUE
);
                "#,
            )
            .unwrap();

        let snapshot = catalog.snapshot("users");
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.columns[0], ColumnInfo::new("id", "INTEGER", false));
        assert_eq!(snapshot.columns[1], ColumnInfo::new("name", "TEXT", true));
        assert_eq!(snapshot.columns[2].name, "email");
        assert_eq!(snapshot.columns[2].type_name, "VARCHAR(255)");
        assert!(!snapshot.columns[2].nullable);
    }

    #[test]
    fn test_parse_schema_multiple_tables_and_other_statements() {
        let parser = SqlParser::new();
        let catalog = parser
            .parse_schema(
                r#"
CREATE TABLE users (id INTEGER NOT NULL);
CREATE INDEX idx_users_id ON users (id);
CREATE TABLE "blog posts" (id INTEGER, title TEXT NOT NULL);
                "#,
            )
            .unwrap();

        assert_eq!(catalog.table_names(), vec!["users", "blog posts"]);
        assert_eq!(catalog.snapshot("blog posts").len(), 2);
    }

    #[test]
    fn test_parse_schema_empty() {
        let catalog = SqlParser::new().parse_schema("").unwrap();
        assert!(catalog.is_empty());
    }
}
