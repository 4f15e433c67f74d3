//! Airlogit: Logistic Regression CLI Tool
//!
//! Loads a passenger survey, cleans it, fits a one-feature logistic
//! regression on a seeded 70/30 split, and reports holdout metrics.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use airlogit::cli::Cli;
use airlogit::pipeline::{
    analyze_missing_values, clean_dataset, column_types, confusion_matrix, evaluate,
    extract_features, label_value_counts, load_dataset, require_columns, total_missing,
    train_test_split, DatasetStats, LogisticRegression,
};
use airlogit::report::{
    export_run, print_metrics, render_confusion_matrix, render_regression_curve, DataSummary,
    ExportParams, PlotSize, RunExport, RunSummary,
};
use airlogit::utils::{
    abandon, create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, ConfigCard,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let feature = cli.feature.as_str();
    let target = cli.target.as_str();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&ConfigCard {
        input: &cli.input,
        feature,
        target,
        test_size: cli.test_size,
        seed: cli.seed,
        regularization: cli.regularization,
    });

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading dataset...");
    let df = load_dataset(&cli.input, cli.infer_schema_length)
        .inspect_err(|_| abandon(&spinner))
        .context("Loader stage failed")?;
    finish_with_success(&spinner, "Dataset loaded");

    let stats = DatasetStats::of(&df);
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", stats.rows);
    println!("      Columns: {}", stats.columns);
    println!("      Estimated memory: {:.2} MB", stats.memory_mb);

    require_columns(&df, &[feature, target]).context("Loader stage failed")?;

    let mut summary = RunSummary::new(stats.rows);
    let elapsed = step_start.elapsed();
    summary.add_timing("Load", elapsed);
    print_step_time(elapsed);

    // Step 2: Explore and clean
    print_step_header(2, "Clean Dataset");
    let step_start = Instant::now();

    println!("\n    {} Column Types:", style("✧").cyan());
    for (name, dtype) in column_types(&df) {
        println!("      {:<36} {}", name, style(dtype).dim());
    }

    println!("\n    {} '{}' Value Counts:", style("✧").cyan(), target);
    for (value, count) in label_value_counts(&df, target).context("Cleaner stage failed")? {
        let value = value.unwrap_or_else(|| "<missing>".to_string());
        println!("      {:<36} {}", value, count);
    }

    let missing = analyze_missing_values(&df);
    let with_missing: Vec<_> = missing.iter().filter(|m| m.nulls > 0).collect();
    println!();
    if with_missing.is_empty() {
        print_info("No missing values found");
    } else {
        print_count(
            "column(s) with missing values",
            with_missing.len(),
            Some(&format!("({} cells)", total_missing(&missing))),
        );
        for m in &with_missing {
            println!(
                "        {} {}: {} ({:.2}%)",
                style("•").dim(),
                m.column,
                m.nulls,
                m.ratio * 100.0
            );
        }
    }

    let cleaned = clean_dataset(&df, feature, target).context("Cleaner stage failed")?;
    summary.set_rows_dropped(cleaned.rows_dropped);
    print_success(&format!(
        "Dropped {} incomplete row(s), {} remain",
        cleaned.rows_dropped,
        cleaned.df.height()
    ));
    print_success(&format!(
        "Encoded '{}': {} → 0, {} → 1",
        target, cleaned.encoding.negative, cleaned.encoding.positive
    ));

    if cli.preview_rows > 0 {
        println!();
        println!("{}", cleaned.df.head(Some(cli.preview_rows)));
    }

    let elapsed = step_start.elapsed();
    summary.add_timing("Clean", elapsed);
    print_step_time(elapsed);

    // Step 3: Train/test split
    print_step_header(3, "Train/Test Split");
    let step_start = Instant::now();
    let data = extract_features(&cleaned.df, &[feature], target).context("Splitter stage failed")?;
    let split = train_test_split(&data, cli.test_size, cli.seed).context("Splitter stage failed")?;
    summary.set_split(split.y_train.len(), split.y_test.len());
    print_success(&format!(
        "{} training row(s), {} holdout row(s)",
        split.y_train.len(),
        split.y_test.len()
    ));
    let elapsed = step_start.elapsed();
    summary.add_timing("Split", elapsed);
    print_step_time(elapsed);

    // Step 4: Fit
    print_step_header(4, "Fit Logistic Regression");
    let step_start = Instant::now();
    let spinner = create_spinner("Optimizing...");
    let estimator = LogisticRegression::new(cli.solver_config());
    let model = estimator
        .fit(&split.x_train, &split.y_train)
        .inspect_err(|_| abandon(&spinner))
        .context("Estimator stage failed")?;
    finish_with_success(
        &spinner,
        &format!("Converged after {} iteration(s)", model.n_iter()),
    );
    println!("      Coefficient: {:.6}", model.coefficients()[0]);
    println!("      Intercept:   {:.6}", model.intercept());
    let elapsed = step_start.elapsed();
    summary.add_timing("Fit", elapsed);
    print_step_time(elapsed);

    // Step 5: Evaluate
    print_step_header(5, "Evaluate on Holdout");
    let step_start = Instant::now();
    let probabilities = model
        .predict_probability(&split.x_test)
        .context("Estimator stage failed")?;
    let y_pred = model.predict(&split.x_test).context("Estimator stage failed")?;
    let mean_probability = probabilities.iter().sum::<f64>() / probabilities.len() as f64;
    print_info(&format!(
        "Mean predicted P({}) on holdout: {:.4}",
        cleaned.encoding.positive, mean_probability
    ));

    let metrics = evaluate(&split.y_test, &y_pred).context("Estimator stage failed")?;
    let cm = confusion_matrix(&split.y_test, &y_pred, model.classes())
        .context("Estimator stage failed")?;

    println!();
    print_metrics(&metrics);

    if !cli.no_plots {
        println!();
        let feature_values = data.feature_column(0);
        for line in render_regression_curve(
            &feature_values,
            &data.labels,
            &model,
            feature,
            target,
            PlotSize::default(),
        ) {
            println!("    {}", line);
        }

        println!();
        println!("    {}", style("Confusion Matrix").white().bold());
        for line in render_confusion_matrix(&cm, Some(&cleaned.encoding))
            .to_string()
            .lines()
        {
            println!("    {}", line);
        }
    }

    let elapsed = step_start.elapsed();
    summary.add_timing("Evaluate", elapsed);
    print_step_time(elapsed);

    if let Some(path) = &cli.export {
        let input_file = cli.input.display().to_string();
        let params = ExportParams {
            input_file: &input_file,
            feature_column: feature,
            target_column: target,
            test_size: cli.test_size,
            seed: cli.seed,
            solver: cli.solver_config(),
        };
        let data_summary = DataSummary {
            rows_loaded: summary.rows_loaded,
            rows_dropped: summary.rows_dropped,
            train_rows: summary.train_rows,
            test_rows: summary.test_rows,
            label_encoding: cleaned.encoding.clone(),
        };
        let export = RunExport::new(&params, data_summary, &model, metrics, &cm);
        export_run(&export, path)?;
        println!();
        print_success(&format!("Run exported to {}", path.display()));
    }

    summary.display();
    print_completion();

    Ok(())
}
