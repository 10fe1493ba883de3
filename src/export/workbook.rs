//! Excel workbook export

use crate::projection::{MonthlySeries, MONTH_LABEL};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

/// Worksheet holding the projection table
pub const SHEET_NAME: &str = "Cash Flow";

const AMOUNT_FORMAT: &str = "#,##0.00";
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Write the series to an `.xlsx` workbook: a bold header row, the month as a
/// date cell and every amount as a number cell formatted `#,##0.00`
pub fn write_workbook<P: AsRef<Path>>(series: &MonthlySeries, path: P) -> anyhow::Result<()> {
    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let columns = series.columns();
    sheet.write_string_with_format(0, 0, MONTH_LABEL, &header_format)?;
    sheet.set_column_width(0, 12.0)?;
    for (idx, &column) in columns.iter().enumerate() {
        let col = u16::try_from(idx + 1)?;
        let label = series.label(column);
        sheet.write_string_with_format(0, col, &label, &header_format)?;
        sheet.set_column_width(col, label.len().max(12) as f64 + 2.0)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    for (idx, record) in series.iter().enumerate() {
        let row = u32::try_from(idx + 1)?;
        sheet.write_datetime_with_format(row, 0, &excel_date(record.date)?, &date_format)?;
        for (col_idx, &column) in columns.iter().enumerate() {
            let col = u16::try_from(col_idx + 1)?;
            sheet.write_number_with_format(row, col, record.value(column), &amount_format)?;
        }
    }

    workbook.save(path.as_ref())?;
    Ok(())
}

fn excel_date(date: NaiveDate) -> anyhow::Result<ExcelDateTime> {
    let year = u16::try_from(date.year())?;
    // Month and day always fit in a u8
    Ok(ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{Config, ExpenseItem, ExpenseList};
    use crate::projection::project;
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::tempdir;

    fn number(cell: &Data) -> f64 {
        match cell {
            Data::Float(f) => *f,
            Data::Int(i) => *i as f64,
            Data::DateTime(dt) => dt.as_f64(),
            other => panic!("expected a numeric cell, got {other:?}"),
        }
    }

    #[test]
    fn test_workbook_reads_back() {
        let config = Config {
            revenue_club: 1000.0,
            revenue_non_members: 500.0,
            months: 3,
            tax_rate: 0.1,
            contingency_rate: 0.05,
            revenue_growth_annual: 0.0,
            capex: 0.0,
        };
        let expenses = ExpenseList::from_items([ExpenseItem::flat("rent", 200.0)]).unwrap();
        let series = project(&config, &expenses, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()).unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("cashflow.xlsx");
        write_workbook(&series, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        let rows: Vec<&[Data]> = range.rows().collect();
        assert_eq!(rows.len(), 4);

        let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        assert_eq!(header[0], "Month");
        assert_eq!(header[1], "Club Revenue");
        assert!(header.contains(&"Taxes (10%)".to_string()));
        assert_eq!(header.last().map(String::as_str), Some("Cumulative Cash Flow"));

        // Excel serial dates: 2025-08-01 is day 45870
        assert_eq!(number(&rows[1][0]), 45870.0);
        assert_eq!(number(&rows[3][0]), 45931.0);

        assert_eq!(number(&rows[1][1]), 1000.0);
        assert_eq!(number(&rows[1][3]), 1500.0);
        assert_eq!(number(&rows[3][header.len() - 1]), 3420.0);
    }
}
