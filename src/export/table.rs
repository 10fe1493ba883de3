//! Tabular rendering of a series: delimited files and plain-text tables

use crate::projection::{MonthlySeries, MONTH_LABEL};
use crate::report::Report;
use std::io::Write;

/// Write the series as a delimited table: `Month` then every column label,
/// one row per month with amounts to two decimals
pub fn write_delimited<W: Write>(series: &MonthlySeries, writer: W, delimiter: u8) -> anyhow::Result<()> {
    let mut out = csv::WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    let columns = series.columns();
    let mut header = vec![MONTH_LABEL.to_string()];
    header.extend(columns.iter().map(|&c| series.label(c)));
    out.write_record(&header)?;

    for record in series {
        let mut row = vec![record.date.format("%Y-%m-%d").to_string()];
        row.extend(columns.iter().map(|&c| format!("{:.2}", record.value(c))));
        out.write_record(&row)?;
    }

    out.flush()?;
    Ok(())
}

/// Plain-text table of the series, columns right-aligned
pub fn render_table(series: &MonthlySeries) -> String {
    let columns = series.columns();
    let labels: Vec<String> = columns.iter().map(|&c| series.label(c)).collect();
    let cells: Vec<Vec<String>> = series
        .iter()
        .map(|r| columns.iter().map(|&c| format_amount(r.value(c))).collect())
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            cells
                .iter()
                .map(|row| row[idx].len())
                .chain(std::iter::once(label.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |first: String, fields: &[String]| -> String {
        let padded: String = fields
            .iter()
            .zip(widths.iter().copied())
            .map(|(field, width)| format!("  {field:>width$}"))
            .collect();
        format!("{first:<10}{padded}")
    };

    let total_width = 10 + widths.iter().map(|w| w + 2).sum::<usize>();
    let mut lines = vec![line(MONTH_LABEL.to_string(), &labels), "-".repeat(total_width)];
    lines.extend(
        series
            .iter()
            .zip(&cells)
            .map(|(record, row)| line(record.date.format("%Y-%m-%d").to_string(), row)),
    );

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// KPI block: totals, margins, payback and best/worst months
pub fn render_summary(report: &Report) -> String {
    let totals = &report.totals;
    [
        format!("Total Revenue:   {}", format_amount(totals.total_revenue)),
        format!("Total Outflow:   {}", format_amount(totals.total_outflow)),
        format!("Total Profit:    {}", format_amount(totals.operating_profit)),
        format!("Average Margin:  {:.2}%", report.average_margin * 100.0),
        format!("Payback:         {}", report.payback),
        format!("Best Month:      {}", report.best_month),
        format!("Worst Month:     {}", report.worst_month),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

/// Two decimals with thousands separators, e.g. `-12,345.60`
fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
