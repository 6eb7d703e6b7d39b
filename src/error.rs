use miette::{Diagnostic, NamedSource, SourceOffset, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum AlterError {
    #[error("Table '{table}' not found (no columns in schema snapshot)")]
    #[diagnostic(
        code(sqlite_alter::table_not_found),
        help("Check the table name and that the schema file contains its CREATE TABLE statement")
    )]
    TableNotFound { table: String },

    #[error("Alteration would leave table '{table}' without any columns")]
    #[diagnostic(
        code(sqlite_alter::no_columns_left),
        help("SQLite tables need at least one column; drop the table instead, or keep or add a column")
    )]
    NoColumnsLeft { table: String },

    #[error("{operation}: column '{column}' not found in table '{table}'")]
    #[diagnostic(
        code(sqlite_alter::column_not_found),
        help("Only columns still present after earlier deletions can be deleted or modified")
    )]
    ColumnNotFound {
        table: String,
        column: String,
        operation: &'static str,
    },

    #[error("{operation}: column '{column}' does not exist in the original definition of table '{table}'")]
    #[diagnostic(
        code(sqlite_alter::original_column_not_found),
        help("Rename sources must name columns of the table as it exists before the alteration")
    )]
    OriginalColumnNotFound {
        table: String,
        column: String,
        operation: &'static str,
    },

    #[error("{operation}: column '{column}' already exists in table '{table}'")]
    #[diagnostic(
        code(sqlite_alter::column_already_exists),
        help("Pick a column name that is not used by the table")
    )]
    ColumnAlreadyExists {
        table: String,
        column: String,
        operation: &'static str,
    },

    #[error("Failed to parse SQL: {msg}")]
    #[diagnostic(
        code(sqlite_alter::parse_error),
        help("Check that your schema file contains valid SQLite CREATE TABLE statements"),
        url("https://www.sqlite.org/lang_createtable.html")
    )]
    ParseError {
        msg: String,
        #[source_code]
        src: Option<NamedSource<String>>,
        #[label("problematic SQL")]
        span: Option<SourceSpan>,
    },

    #[error("Invalid alter request '{path}': {msg}")]
    #[diagnostic(
        code(sqlite_alter::request_error),
        help("Alter requests are TOML or JSON files with a `table` key and operation lists")
    )]
    RequestError { path: String, msg: String },

    #[error("Failed to read file")]
    #[diagnostic(
        code(sqlite_alter::io_error),
        help("Ensure the file exists and you have read permissions")
    )]
    IoError(#[from] std::io::Error),

    #[error("Failed to traverse directory")]
    #[diagnostic(
        code(sqlite_alter::walkdir_error),
        help("Check directory permissions and path validity")
    )]
    WalkDirError(#[from] walkdir::Error),

    #[error("Configuration error")]
    #[diagnostic(
        code(sqlite_alter::config_error),
        help("Run 'sqlite-alter init' to create a valid configuration file")
    )]
    ConfigError(#[from] crate::config::ConfigError),
}

impl AlterError {
    /// Create a simple parse error with just a message
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError {
            msg: msg.into(),
            src: None,
            span: None,
        }
    }

    pub fn request_error(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::RequestError {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// Attach file context to an existing error.
    ///
    /// For parse errors, this adds the source code with filename and computes
    /// the span from any line/column info in the error message.
    pub fn with_file_context(self, path: &str, source: String) -> Self {
        match self {
            Self::ParseError { msg, .. } => {
                let span = parse_location(&msg)
                    .map(|(line, col)| SourceOffset::from_location(&source, line, col).into());

                Self::ParseError {
                    msg,
                    src: Some(NamedSource::new(path, source)),
                    span,
                }
            }
            other => other,
        }
    }

    /// Name of the column an alteration error refers to, if any
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::ColumnNotFound { column, .. }
            | Self::OriginalColumnNotFound { column, .. }
            | Self::ColumnAlreadyExists { column, .. } => Some(column),
            _ => None,
        }
    }
}

/// Parse line and column from sqlparser error messages.
///
/// Format: `"... at Line: {line}, Column: {column}"`
fn parse_location(msg: &str) -> Option<(usize, usize)> {
    let (_, after_line) = msg.split_once("at Line: ")?;
    let (line_str, col_str) = after_line.split_once(", Column: ")?;

    let line = line_str.parse().ok()?;
    let col = col_str.trim_end().parse().ok()?;

    Some((line, col))
}

pub type Result<T> = std::result::Result<T, AlterError>;
