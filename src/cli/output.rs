//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Error, Result, tictactoe::Grid};

fn styled(pb: ProgressBar, template: &str) -> Result<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template(template)
        .map_err(|e| Error::ProgressBarTemplate {
            message: e.to_string(),
        })?
        .progress_chars("=>-");
    pb.set_style(style);
    Ok(pb)
}

/// Create a progress bar counting training batches
pub fn create_training_progress(total_batches: u64) -> Result<ProgressBar> {
    styled(
        ProgressBar::new(total_batches),
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches ({msg})",
    )
}

/// Create a progress bar counting games
pub fn create_game_progress(total_games: u64) -> Result<ProgressBar> {
    styled(
        ProgressBar::new(total_games),
        "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games",
    )
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print a grid indented under the current section
pub fn print_grid(grid: &Grid) {
    for line in grid.to_string().lines() {
        println!("  {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(20000), "20,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_progress_templates_are_valid() {
        assert!(create_training_progress(6).is_ok());
        assert!(create_game_progress(10).is_ok());
    }
}
