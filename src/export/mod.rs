//! Writers turning a projected series and its report into files or text

mod table;
mod workbook;

pub use table::{render_summary, render_table, write_delimited};
pub use workbook::{write_workbook, SHEET_NAME};

use crate::projection::MonthlySeries;
use crate::report::Report;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Output format for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Excel workbook (.xlsx)
    #[value(aliases = ["excel", "xlsx"])]
    Spreadsheet,
    /// Series and report as pretty-printed JSON
    Json,
    /// Print to stdout only
    None,
}

impl ExportFormat {
    /// Default file name for the format, if it writes a file
    pub fn default_path(&self) -> Option<PathBuf> {
        let name = match self {
            ExportFormat::Csv => "cashflow.csv",
            ExportFormat::Spreadsheet => "cashflow.xlsx",
            ExportFormat::Json => "cashflow.json",
            ExportFormat::None => return None,
        };
        Some(PathBuf::from(name))
    }
}

#[derive(Serialize)]
struct JsonExport<'a> {
    series: &'a MonthlySeries,
    rows: Vec<crate::projection::FlatRecord>,
    report: &'a Report,
}

pub fn write_csv<P: AsRef<Path>>(series: &MonthlySeries, path: P) -> anyhow::Result<()> {
    write_file(path.as_ref(), |w| write_delimited(series, w, b','))
}

pub fn write_json<P: AsRef<Path>>(series: &MonthlySeries, report: &Report, path: P) -> anyhow::Result<()> {
    let export = JsonExport {
        series,
        rows: series.rows(),
        report,
    };
    write_file(path.as_ref(), |w| {
        serde_json::to_writer_pretty(&mut *w, &export)?;
        Ok(())
    })
}

/// Write `series` (and `report` for JSON) in `format`
///
/// Returns the path written, or `None` for [`ExportFormat::None`].
pub fn export(
    series: &MonthlySeries,
    report: &Report,
    format: ExportFormat,
    path: Option<&Path>,
) -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = path.map(Path::to_path_buf).or_else(|| format.default_path()) else {
        return Ok(None);
    };

    match format {
        ExportFormat::Csv => write_csv(series, &path)?,
        ExportFormat::Spreadsheet => write_workbook(series, &path)?,
        ExportFormat::Json => write_json(series, report, &path)?,
        ExportFormat::None => return Ok(None),
    }

    log::info!("wrote {:?} export to {}", format, path.display());
    Ok(Some(path))
}

fn write_file<F>(path: &Path, body: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    body(&mut writer)?;
    writer.flush()?;
    Ok(())
}
