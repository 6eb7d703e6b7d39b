use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use sqlite_alter::config::CONFIG_FILE_NAME;
use sqlite_alter::output::OutputFormatter;
use sqlite_alter::{AlterSession, Config};
use std::fs;
use std::process::exit;
use tracing_subscriber::EnvFilter;

const CONFIG_TEMPLATE: &str = include_str!("../sqlite-alter.toml.example");

#[derive(Parser)]
#[command(name = "sqlite-alter")]
#[command(version, about = "Plan full ALTER TABLE changes for SQLite as rebuild-and-copy statements", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the SQL statements for alter request files
    Plan {
        /// Path to an alter request file or a directory of them
        path: Utf8PathBuf,

        /// Schema of the database: CREATE TABLE dump (.sql) or a single table (.toml/.json)
        #[arg(long)]
        schema: Utf8PathBuf,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Initialize sqlite-alter configuration file
    Init {
        /// Overwrite existing config file if it exists
        #[arg(long)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            path,
            schema,
            format,
        } => {
            let config = match Config::load() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error loading configuration: {}", e);
                    eprintln!("Using default configuration.");
                    Config::default()
                }
            };

            let session = match AlterSession::from_schema_file(&schema, &config) {
                Ok(session) => session,
                Err(e) => {
                    eprintln!("{:?}", miette::Report::new(e));
                    exit(1);
                }
            };

            let results = match session.plan_path(&path) {
                Ok(results) => results,
                Err(e) => {
                    eprintln!("{:?}", miette::Report::new(e));
                    exit(1);
                }
            };

            let total_statements: usize = results.iter().map(|(_, p)| p.statements.len()).sum();

            match format.as_str() {
                "json" => {
                    println!("{}", OutputFormatter::format_json(&results));
                }
                _ => {
                    // text format
                    for (file_path, planned) in &results {
                        print!("{}", OutputFormatter::format_text(file_path, planned));
                    }
                    OutputFormatter::print_summary(results.len(), total_statements);
                }
            }
        }

        Commands::Init { force } => {
            let config_path = Utf8PathBuf::from(CONFIG_FILE_NAME);

            let file_existed = config_path.exists();
            if file_existed && !force {
                eprintln!("Error: {} already exists in current directory", CONFIG_FILE_NAME);
                eprintln!("Use --force to overwrite the existing file");
                exit(1);
            }

            match fs::write(&config_path, CONFIG_TEMPLATE) {
                Ok(_) => {
                    if file_existed {
                        println!("✓ Overwrote {}", CONFIG_FILE_NAME);
                    } else {
                        println!("✓ Created {}", CONFIG_FILE_NAME);
                    }
                    println!();
                    println!("Next steps:");
                    println!("1. Edit {} to customize your configuration", CONFIG_FILE_NAME);
                    println!("2. Run 'sqlite-alter plan <path> --schema <schema.sql>' to plan your changes");
                }
                Err(e) => {
                    eprintln!("Error: Failed to write config file: {}", e);
                    exit(1);
                }
            }
        }
    }
}
