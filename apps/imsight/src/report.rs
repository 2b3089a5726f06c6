//! Console report
//!
//! Plain text sections printed to stdout after a run. The wording is for
//! people; the JSON report carries the same numbers for programs.

use std::fmt::Write;

use imsight_io::Table;
use imsight_stats::{ColumnSummary, OutlierReport};

use crate::pipeline::AnalysisReport;

/// Render every section in order
pub fn render(table: &Table, report: &AnalysisReport, head_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&head_section(table, head_rows));
    out.push_str(&info_section(report));
    out.push_str(&missing_section(report));
    out.push_str(&describe_section(&report.summaries));
    out.push_str(&insights_section(&report.summaries));
    out.push_str(&checks_section(&report.outliers));
    out
}

fn header(title: &str) -> String {
    format!("\n--- {} ---\n", title)
}

/// First `n` rows with a leading row index
pub fn head_section(table: &Table, n: usize) -> String {
    let mut out = header(&format!("First {} Rows", n));

    let mut rows = Vec::with_capacity(n + 1);
    let mut names = vec![String::new()];
    names.extend(table.column_names().iter().map(|s| s.to_string()));
    rows.push(names);
    for (i, row) in table.head(n).into_iter().enumerate() {
        let mut cells = vec![i.to_string()];
        cells.extend(row);
        rows.push(cells);
    }

    out.push_str(&align(&rows));
    out
}

/// Row count, column count, and per-column non-null count and type
pub fn info_section(report: &AnalysisReport) -> String {
    let (rows, cols) = report.shape;
    let mut out = header("Dataset Info");
    let _ = writeln!(out, "{} entries, {} columns", rows, cols);

    let mut lines = vec![vec![
        "#".to_string(),
        "Column".to_string(),
        "Non-Null Count".to_string(),
        "Dtype".to_string(),
    ]];
    for (i, info) in report.columns.iter().enumerate() {
        lines.push(vec![
            i.to_string(),
            info.name.clone(),
            format!("{} non-null", info.non_null),
            info.dtype.clone(),
        ]);
    }
    out.push_str(&align(&lines));
    out
}

/// Missing-value count per column
pub fn missing_section(report: &AnalysisReport) -> String {
    let mut out = header("Missing Values");
    let lines: Vec<Vec<String>> = report
        .missing
        .iter()
        .map(|m| vec![m.column.clone(), m.missing.to_string()])
        .collect();
    out.push_str(&align(&lines));
    out
}

/// Describe table: one row per numeric column
pub fn describe_section(summaries: &[ColumnSummary]) -> String {
    let mut out = header("Summary Statistics");
    if summaries.is_empty() {
        out.push_str("(no numeric columns)\n");
        return out;
    }

    let mut lines = vec![["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()];
    for s in summaries {
        let mut row = vec![s.column.clone(), s.count.to_string()];
        row.extend(
            [s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max]
                .iter()
                .map(|v| format!("{:.3}", v)),
        );
        lines.push(row);
    }
    out.push_str(&align(&lines));
    out
}

/// One line of moments per numeric column
pub fn insights_section(summaries: &[ColumnSummary]) -> String {
    let mut out = header("Numeric Column Insights");
    for s in summaries {
        let _ = writeln!(
            out,
            "{}: Mean={:.2}, Median={:.2}, Std={:.2}, Skew={:.2}, Kurt={:.2}",
            s.column, s.mean, s.median, s.std_dev, s.skewness, s.kurtosis
        );
    }
    out
}

/// Skew flags and outlier counts; columns with neither are omitted
pub fn checks_section(reports: &[OutlierReport]) -> String {
    let mut out = header("Outlier & Skewness Check");
    for r in reports {
        if r.high_skew {
            let _ = writeln!(out, "{}: High skew → might need transformation", r.column);
        }
        if r.has_outliers() {
            let _ = writeln!(
                out,
                "{}: {} potential outliers detected",
                r.column, r.outlier_count
            );
        }
    }
    out
}

/// Lay out rows as space-separated, right-aligned columns
fn align(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; width];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:>w$}", cell, w = widths[i]))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
