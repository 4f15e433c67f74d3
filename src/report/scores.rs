//! Plain-text metric lines

use crate::pipeline::ClassificationMetrics;

/// The four metric lines, each value to six decimal places
pub fn metric_lines(metrics: &ClassificationMetrics) -> [String; 4] {
    [
        format!("Accuracy: {:.6}", metrics.accuracy),
        format!("Precision: {:.6}", metrics.precision),
        format!("Recall: {:.6}", metrics.recall),
        format!("F1 Score: {:.6}", metrics.f1),
    ]
}

pub fn print_metrics(metrics: &ClassificationMetrics) {
    for line in metric_lines(metrics) {
        println!("{}", line);
    }
}
