//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;
use std::time::Duration;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");

/// Analysis parameters shown in the configuration card
pub struct ConfigCard<'a> {
    pub input: &'a Path,
    pub feature: &'a str,
    pub target: &'a str,
    pub test_size: f64,
    pub seed: u64,
    pub regularization: f64,
}

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     █████╗ ██╗██████╗ ██╗      ██████╗  ██████╗ ██╗████████╗
    ██╔══██╗██║██╔══██╗██║     ██╔═══██╗██╔════╝ ██║╚══██╔══╝
    ███████║██║██████╔╝██║     ██║   ██║██║  ███╗██║   ██║
    ██╔══██║██║██╔══██╗██║     ██║   ██║██║   ██║██║   ██║
    ██║  ██║██║██║  ██║███████╗╚██████╔╝╚██████╔╝██║   ██║
    ╚═╝  ╚═╝╚═╝╚═╝  ╚═╝╚══════╝ ╚═════╝  ╚═════╝ ╚═╝   ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("σ").magenta().bold(),
        style("Passenger satisfaction, one rating at a time").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(card: &ConfigCard<'_>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:   {:<38}│",
        FOLDER,
        truncate_path(card.input, 37)
    );
    println!(
        "    │  {} Feature: {:<38}│",
        CHART,
        truncate_string(card.feature, 37)
    );
    println!(
        "    │  {} Target:  {:<38}│",
        TARGET,
        truncate_string(card.target, 37)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Holdout fraction:  {:<28}│",
        DICE,
        style(format!("{:.0}% (seed {})", card.test_size * 100.0, card.seed)).yellow()
    );
    println!(
        "    │  {} Regularization C:  {:<28}│",
        GEAR,
        style(format!("{}", card.regularization)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print how long a step took
pub fn print_step_time(elapsed: Duration) {
    println!(
        "      {}",
        style(format!("⏱ {}", format_duration(elapsed))).dim()
    );
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Airlogit analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Render a duration as `850ms` or `2.31s`
pub fn format_duration(elapsed: Duration) -> String {
    if elapsed.as_secs() == 0 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_string("satisfaction", 20), "satisfaction");
    }

    #[test]
    fn test_truncate_keeps_tail() {
        let out = truncate_string("/very/long/path/to/Invistico_Airline.csv", 15);
        assert_eq!(out.chars().count(), 15);
        assert!(out.starts_with("..."));
        assert!(out.ends_with("Airline.csv"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(850)), "850ms");
        assert_eq!(format_duration(Duration::from_millis(2310)), "2.31s");
    }
}
