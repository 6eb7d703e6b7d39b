use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::{AlterError, Result};
use crate::parser::SqlParser;
use crate::planner::AlterPlanner;
use crate::request::{is_request_file, AlterRequest};
use crate::schema::{ColumnInfo, ColumnSnapshot, SchemaCatalog};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::fs;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Statements planned for a single request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedAlter {
    pub table: String,
    pub statements: Vec<String>,
}

/// Plans alter requests against a known schema.
pub struct AlterSession {
    catalog: SchemaCatalog,
    planner: AlterPlanner,
    /// Canonical path of the schema file, skipped when planning directories
    schema_path: Option<Utf8PathBuf>,
}

impl AlterSession {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self::with_config(catalog, &Config::default())
    }

    pub fn with_config(catalog: SchemaCatalog, config: &Config) -> Self {
        Self {
            catalog,
            planner: AlterPlanner::with_config(config),
            schema_path: None,
        }
    }

    /// Build a session from a schema file.
    ///
    /// `.sql` files are parsed as CREATE TABLE dumps; `.toml` and `.json` files hold a
    /// single table as `table` plus `[[columns]]`.
    pub fn from_schema_file(path: &Utf8Path, config: &Config) -> Result<Self> {
        let catalog = load_schema(path)?;
        info!(path = %path, tables = catalog.len(), "loaded schema");

        let mut session = Self::with_config(catalog, config);
        session.schema_path = path.canonicalize_utf8().ok();
        Ok(session)
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    /// Plan a single request
    pub fn plan_request(&self, request: &AlterRequest) -> Result<PlannedAlter> {
        let snapshot = self.catalog.snapshot(&request.table);
        let statements = self
            .planner
            .plan(&request.table, &snapshot, &request.operations)?;

        debug!(
            table = %request.table,
            statements = statements.len(),
            rebuild = request.operations.requires_rebuild(),
            "planned alter request"
        );

        Ok(PlannedAlter {
            table: request.table.clone(),
            statements,
        })
    }

    /// Plan a single request file
    pub fn plan_file(&self, path: &Utf8Path) -> Result<PlannedAlter> {
        let request = AlterRequest::load(path)?;
        self.plan_request(&request)
    }

    /// Plan every request file under a directory, in path order
    pub fn plan_directory(&self, dir: &Utf8Path) -> Result<Vec<(String, PlannedAlter)>> {
        let mut files = vec![];

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                continue;
            };
            if is_request_file(&path) && !self.is_support_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        debug!(dir = %dir, files = files.len(), "collected alter requests");

        files
            .iter()
            .map(|path| {
                self.plan_file(path)
                    .map(|planned| (path.to_string(), planned))
            })
            .collect()
    }

    /// The tool's own config file and the schema file share the request extensions
    fn is_support_file(&self, path: &Utf8Path) -> bool {
        if path.file_name() == Some(CONFIG_FILE_NAME) {
            return true;
        }

        match &self.schema_path {
            Some(schema) => path.canonicalize_utf8().ok().as_ref() == Some(schema),
            None => false,
        }
    }

    /// Plan a path (file or directory)
    pub fn plan_path(&self, path: &Utf8Path) -> Result<Vec<(String, PlannedAlter)>> {
        if path.is_dir() {
            self.plan_directory(path)
        } else {
            Ok(vec![(path.to_string(), self.plan_file(path)?)])
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TableSchema {
    table: String,
    #[serde(default)]
    columns: Vec<ColumnInfo>,
}

fn load_schema(path: &Utf8Path) -> Result<SchemaCatalog> {
    let contents = fs::read_to_string(path)?;

    let table: TableSchema = match path.extension() {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| AlterError::request_error(path.as_str(), e.to_string()))?,
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| AlterError::request_error(path.as_str(), e.to_string()))?,
        _ => {
            return SqlParser::new()
                .parse_schema(&contents)
                .map_err(|e| e.with_file_context(path.as_str(), contents));
        }
    };

    let mut catalog = SchemaCatalog::new();
    catalog.insert(table.table, ColumnSnapshot::new(table.columns));
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::AlterOperations;

    fn session() -> AlterSession {
        let catalog = SqlParser::new()
            .parse_schema("CREATE TABLE users (id INTEGER NOT NULL, name TEXT);")
            .unwrap();
        AlterSession::new(catalog)
    }

    #[test]
    fn test_plan_request() {
        let planned = session()
            .plan_request(&AlterRequest::new(
                "users",
                AlterOperations::new().add_column("age", "INT"),
            ))
            .unwrap();

        assert_eq!(planned.table, "users");
        assert_eq!(
            planned.statements,
            vec![r#"ALTER TABLE "users" ADD COLUMN "age" INT"#]
        );
    }

    #[test]
    fn test_plan_request_unknown_table() {
        let err = session()
            .plan_request(&AlterRequest::new(
                "posts",
                AlterOperations::new().rename_table("articles"),
            ))
            .unwrap_err();

        assert!(matches!(err, AlterError::TableNotFound { ref table } if table == "posts"));
    }

    #[test]
    fn test_session_uses_config() {
        let catalog = SqlParser::new()
            .parse_schema("CREATE TABLE users (id INTEGER NOT NULL, name TEXT);")
            .unwrap();
        let config = Config {
            finalize_rebuild: true,
            ..Default::default()
        };
        let planned = AlterSession::with_config(catalog, &config)
            .plan_request(&AlterRequest::new(
                "users",
                AlterOperations::new().delete_column("name"),
            ))
            .unwrap();

        assert_eq!(planned.statements.len(), 4);
        assert_eq!(
            planned.statements[3],
            r#"ALTER TABLE "_users_tmp" RENAME TO "users""#
        );
    }
}
