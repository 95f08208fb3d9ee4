//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a table from a list of items
pub fn print_table<T: Tabled + Serialize>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", "No items found".yellow());
                return;
            }
            let table = Table::new(items).with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&items) {
                println!("{}", json);
            }
        }
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format a 0-1 ratio with three decimals
pub fn format_ratio(value: f64) -> String {
    format!("{:.3}", value)
}

/// Color a 0-1 score based on value
pub fn color_score(value: f64) -> String {
    let formatted = format_ratio(value);
    if value >= 0.6 {
        formatted.green().to_string()
    } else if value >= 0.3 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.5), "0.500");
        assert_eq!(format_ratio(2.0 / 3.0), "0.667");
    }

    #[test]
    fn test_color_score_keeps_value() {
        colored::control::set_override(false);
        assert_eq!(color_score(0.75), "0.750");
        assert_eq!(color_score(0.1), "0.100");
    }
}
