pub mod config;
pub mod error;
pub mod operations;
pub mod output;
pub mod parser;
pub mod planner;
pub mod request;
pub mod schema;
pub mod session;
pub mod statement;

pub use config::{Config, ConfigError};
pub use error::{AlterError, Result};
pub use operations::AlterOperations;
pub use planner::{AlterPlanner, PlannerOptions};
pub use request::AlterRequest;
pub use schema::{ColumnInfo, ColumnSnapshot, SchemaCatalog};
pub use session::{AlterSession, PlannedAlter};
pub use statement::Statement;
