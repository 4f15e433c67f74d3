//! Terminal-rendered diagnostic plots
//!
//! Both plots are presentation only: the regression curve draws the cleaned
//! feature/label scatter with the fitted sigmoid on top, the confusion matrix
//! is a styled table.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{ConfusionMatrix, FittedModel, LabelEncoding};

/// Plot area size in character cells
#[derive(Debug, Clone, Copy)]
pub struct PlotSize {
    pub width: usize,
    pub height: usize,
}

impl Default for PlotSize {
    fn default() -> Self {
        Self {
            width: 56,
            height: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mark {
    Empty,
    Curve,
    Points(usize),
}

/// Render the feature/label scatter with the fitted logistic curve.
///
/// Returns one string per output line; rows run from P=1 at the top to
/// P=0 at the bottom.
pub fn render_regression_curve(
    feature: &[f64],
    labels: &[f64],
    model: &FittedModel,
    feature_name: &str,
    target_name: &str,
    size: PlotSize,
) -> Vec<String> {
    let width = size.width.max(2);
    let height = size.height.max(3);

    let (x_min, x_max) = x_range(feature);
    let col_of = |x: f64| -> usize {
        let t = (x - x_min) / (x_max - x_min);
        ((t * (width - 1) as f64).round() as usize).min(width - 1)
    };

    let mut grid = vec![vec![Mark::Empty; width]; height];

    for col in 0..width {
        let x = x_min + (x_max - x_min) * col as f64 / (width - 1) as f64;
        let p = model.probability_at(&[x]);
        let row = ((1.0 - p) * (height - 1) as f64).round() as usize;
        grid[row.min(height - 1)][col] = Mark::Curve;
    }

    for (&x, &y) in feature.iter().zip(labels) {
        let row = if y >= 0.5 { 0 } else { height - 1 };
        let col = col_of(x);
        grid[row][col] = match grid[row][col] {
            Mark::Points(n) => Mark::Points(n + 1),
            _ => Mark::Points(1),
        };
    }

    let densest = grid
        .iter()
        .flatten()
        .filter_map(|m| match m {
            Mark::Points(n) => Some(*n),
            _ => None,
        })
        .max()
        .unwrap_or(1);

    let mut lines = Vec::with_capacity(height + 3);
    lines.push(format!(
        "{} vs. {} (fitted logistic curve)",
        style(target_name).bold(),
        style(feature_name).bold()
    ));

    for (row, cells) in grid.iter().enumerate() {
        let axis = if row == 0 {
            " 1.0 ┤"
        } else if row == height - 1 {
            " 0.0 ┤"
        } else if row == (height - 1) / 2 {
            " 0.5 ┤"
        } else {
            "     │"
        };

        let body: String = cells.iter().map(|m| render_mark(*m, densest)).collect();
        lines.push(format!("{}{}", style(axis).dim(), body));
    }

    lines.push(format!("     └{}", "─".repeat(width)));

    let left = format!("{:.1}", x_min);
    let right = format!("{:.1}", x_max);
    let gap = width.saturating_sub(left.len() + right.len());
    lines.push(format!("      {}{}{}", left, " ".repeat(gap), right));

    lines
}

fn render_mark(mark: Mark, densest: usize) -> String {
    match mark {
        Mark::Empty => " ".to_string(),
        Mark::Curve => style("•").cyan().to_string(),
        Mark::Points(n) => {
            let ch = if n * 3 <= densest {
                "·"
            } else if n * 3 <= densest * 2 {
                "o"
            } else {
                "●"
            };
            style(ch).yellow().to_string()
        }
    }
}

fn x_range(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        (0.0, 1.0)
    } else if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// Build the confusion matrix table, rows actual, columns predicted
pub fn render_confusion_matrix(cm: &ConfusionMatrix, encoding: Option<&LabelEncoding>) -> Table {
    let names: Vec<String> = cm
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| match encoding {
            Some(enc) => {
                let category = if i == 0 { &enc.negative } else { &enc.positive };
                format!("{} ({})", label, category)
            }
            None => format!("{}", label),
        })
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("Actual \\ Predicted").add_attribute(Attribute::Bold)];
    header.extend(
        names
            .iter()
            .map(|n| Cell::new(n).add_attribute(Attribute::Bold)),
    );
    table.set_header(header);

    for (i, row) in cm.counts.iter().enumerate() {
        let mut cells = vec![Cell::new(&names[i]).add_attribute(Attribute::Bold)];
        for (j, count) in row.iter().enumerate() {
            let color = if i == j { Color::Green } else { Color::Red };
            cells.push(
                Cell::new(count)
                    .fg(color)
                    .set_alignment(CellAlignment::Right),
            );
        }
        table.add_row(cells);
    }

    table
}
