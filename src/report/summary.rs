//! Run summary report

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::utils::format_duration;

/// Row counts and step timings collected over one run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_loaded: usize,
    pub rows_dropped: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub timings: Vec<(String, Duration)>,
}

impl RunSummary {
    pub fn new(rows_loaded: usize) -> Self {
        Self {
            rows_loaded,
            ..Default::default()
        }
    }

    pub fn set_rows_dropped(&mut self, rows: usize) {
        self.rows_dropped = rows;
    }

    pub fn set_split(&mut self, train_rows: usize, test_rows: usize) {
        self.train_rows = train_rows;
        self.test_rows = test_rows;
    }

    pub fn add_timing(&mut self, step: &str, elapsed: Duration) {
        self.timings.push((step.to_string(), elapsed));
    }

    /// Rows surviving the cleaning step
    pub fn rows_cleaned(&self) -> usize {
        self.rows_loaded.saturating_sub(self.rows_dropped)
    }

    pub fn total_time(&self) -> Duration {
        self.timings.iter().map(|(_, d)| *d).sum()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Rows Loaded"), Cell::new(self.rows_loaded)]);

        table.add_row(vec![
            Cell::new("🗑️  Dropped (Missing)"),
            Cell::new(self.rows_dropped).fg(if self.rows_dropped == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("✅ Rows Modeled"),
            Cell::new(self.rows_cleaned())
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("🏋️  Training Rows"), Cell::new(self.train_rows)]);
        table.add_row(vec![Cell::new("🧪 Holdout Rows"), Cell::new(self.test_rows)]);

        for (step, elapsed) in &self.timings {
            table.add_row(vec![
                Cell::new(format!("⏱  {}", step)),
                Cell::new(format_duration(*elapsed)).fg(Color::Cyan),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("RUN SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.to_table().to_string().lines() {
            println!("    {}", line);
        }
    }
}
