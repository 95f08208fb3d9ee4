//! Offline fitting and held-out evaluation

use crate::output::{color_score, format_ratio, print_info, print_table, OutputFormat};
use anyhow::{Context, Result};
use delay_lib::{ClassificationReport, CsvSource, DelayClassifier, TrainingSource};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

/// One line of the classification report
#[derive(Tabled, Serialize)]
struct ReportRow {
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Precision")]
    precision: String,
    #[tabled(rename = "Recall")]
    recall: String,
    #[tabled(rename = "F1")]
    f1_score: String,
    #[tabled(rename = "Support")]
    support: usize,
}

fn report_rows(report: &ClassificationReport) -> Vec<ReportRow> {
    [("on time (0)", &report.on_time), ("delayed (1)", &report.delayed)]
        .into_iter()
        .map(|(class, m)| ReportRow {
            class: class.to_string(),
            precision: format_ratio(m.precision),
            recall: color_score(m.recall),
            f1_score: color_score(m.f1_score),
            support: m.support,
        })
        .collect()
}

pub fn run(repo_root: &Path, data: Option<&Path>, format: OutputFormat) -> Result<()> {
    let source = match data {
        Some(path) => CsvSource::new(path),
        None => CsvSource::from_root(repo_root),
    };

    let records = source
        .load()
        .with_context(|| format!("Failed to load {}", source.describe()))?;

    let mut classifier = DelayClassifier::new();
    let prepared = classifier
        .preprocess(&records, true)
        .context("Failed to preprocess training data")?;
    let target = prepared.target.unwrap_or_default();
    classifier
        .fit(&prepared.features, &target)
        .context("Failed to fit classifier")?;
    let report = classifier.evaluate().context("Failed to evaluate classifier")?;

    match format {
        OutputFormat::Table => {
            print_info(&format!(
                "Fitted on {} flights, scale_pos_weight {:.3}",
                records.len(),
                classifier.params().scale_pos_weight
            ));
            print_table(&report_rows(&report), format);
            print_info(&format!(
                "Held-out accuracy {} over {} flights",
                format_ratio(report.accuracy),
                report.rows
            ));
        }
        OutputFormat::Json => {
            let out = serde_json::json!({
                "rows": records.len(),
                "hyperparameters": classifier.params(),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
