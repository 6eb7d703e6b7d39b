use crate::session::PlannedAlter;
use colored::*;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Format planned statements as colored text for terminal
    pub fn format_text(file_path: &str, planned: &PlannedAlter) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {} {}\n\n",
            "-- Table".cyan().bold(),
            planned.table.yellow().bold(),
            format!("({})", file_path).dimmed()
        ));

        if planned.statements.is_empty() {
            output.push_str(&format!("{}\n\n", "-- nothing to do".dimmed()));
            return output;
        }

        for statement in &planned.statements {
            output.push_str(&format!("{};\n", statement));
        }

        output.push('\n');
        output
    }

    /// Format planned statements as JSON
    pub fn format_json(results: &[(String, PlannedAlter)]) -> String {
        serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".into())
    }

    /// Print summary
    pub fn print_summary(total_requests: usize, total_statements: usize) {
        if total_requests == 0 {
            println!("{}", "No alter requests found".yellow().bold());
        } else {
            println!(
                "{} {} statement(s) planned for {} request(s)",
                "✓".green(),
                total_statements.to_string().green().bold(),
                total_requests
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned() -> PlannedAlter {
        PlannedAlter {
            table: "users".to_string(),
            statements: vec![r#"ALTER TABLE "users" ADD COLUMN "age" INT"#.to_string()],
        }
    }

    #[test]
    fn test_format_text_terminates_statements() {
        colored::control::set_override(false);
        let text = OutputFormatter::format_text("001_users.toml", &planned());

        assert!(text.starts_with("-- Table users (001_users.toml)"));
        assert!(text.contains("ALTER TABLE \"users\" ADD COLUMN \"age\" INT;\n"));
    }

    #[test]
    fn test_format_text_empty_plan() {
        colored::control::set_override(false);
        let planned = PlannedAlter {
            table: "users".to_string(),
            statements: vec![],
        };
        let text = OutputFormatter::format_text("001_users.toml", &planned);
        assert!(text.contains("-- nothing to do"));
    }

    #[test]
    fn test_format_json() {
        let json = OutputFormatter::format_json(&[("001_users.toml".to_string(), planned())]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0][0], "001_users.toml");
        assert_eq!(value[0][1]["table"], "users");
        assert_eq!(value[0][1]["statements"].as_array().unwrap().len(), 1);
    }
}
