//! Row models: the untyped input table and the typed canonical row.

use crate::amount::Amount;
use crate::columns::{CanonicalField, ColumnMap};
use crate::error::RowError;
use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

/// An untyped input table: one header row plus data rows of text cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        RawTable { headers, rows }
    }
}

/// A validated input row in the canonical schema.
///
/// Text fields are already cleaned with [`clean_text`] and `amount` is never
/// negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRow {
    pub pay_type: String,
    pub till: String,
    pub date: NaiveDate,
    pub detail: String,
    pub amount: Amount,
    pub user: String,
}

impl CanonicalRow {
    /// Builds a canonical row from raw cells using the resolved column map.
    ///
    /// Cells missing from short rows read as empty.
    pub fn from_cells(
        cells: &[String],
        columns: &ColumnMap,
        day_first: bool,
    ) -> Result<Self, RowError> {
        let cell = |field: CanonicalField| {
            cells
                .get(columns.index_of(field))
                .map(String::as_str)
                .unwrap_or_default()
        };

        let date = parse_date(cell(CanonicalField::TransactionDate), day_first)?;
        let amount = parse_amount(cell(CanonicalField::TransactedAmount))?;

        Ok(CanonicalRow {
            pay_type: clean_text(cell(CanonicalField::PayType)),
            till: clean_text(cell(CanonicalField::TillNo)),
            date,
            detail: clean_text(cell(CanonicalField::Detail)),
            amount: amount.abs(),
            user: clean_text(cell(CanonicalField::UserName)),
        })
    }
}

/// Strips double quotes and folds line breaks and tabs into spaces so the
/// value cannot break a tab-delimited IIF line.
pub fn clean_text(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '"')
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Returns `true` when every cell is blank.
pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}

const ISO_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// Two-digit years go first: chrono's %Y would happily read "24" as year 24.
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%m-%d-%Y", "%m.%d.%Y"];

const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

const NAMED_MONTH_FORMATS: &[&str] = &[
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a transaction date written in any of the common textual layouts.
///
/// Numeric dates are read month-first unless `day_first` is set; the other
/// order is tried as a fallback so `25/12/2024` still parses month-first.
pub fn parse_date(value: &str, day_first: bool) -> Result<NaiveDate, RowError> {
    let s = value.trim();
    if s.is_empty() {
        return Err(RowError::InvalidDate(s.to_string()));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    // Drop a trailing time-of-day such as "01/05/2024 00:00:00".
    let date_part = match s.split_once(' ') {
        Some((head, tail)) if tail.contains(':') => head,
        _ => s,
    };

    let numeric: &[&[&str]] = if year_leads(date_part) {
        &[ISO_FORMATS]
    } else if day_first {
        &[DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS]
    } else {
        &[MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS]
    };

    numeric
        .iter()
        .flat_map(|formats| formats.iter())
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .or_else(|| {
            NAMED_MONTH_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
        .ok_or_else(|| RowError::InvalidDate(s.to_string()))
}

fn year_leads(s: &str) -> bool {
    s.chars().take_while(|c| c.is_ascii_digit()).count() == 4
}

/// Parses a transacted amount cell.
///
/// Accepts thousands separators, common currency markers and accounting
/// parentheses. The sign is preserved; callers take the absolute value.
pub fn parse_amount(value: &str) -> Result<Amount, RowError> {
    let s = value.trim();
    let (negative, inner) = if s.starts_with('(') && s.ends_with(')') && s.len() >= 2 {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };

    let mut cleaned = inner.to_string();
    for marker in ["KSh", "Ksh", "KES", "$"] {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.retain(|c| c != ',' && !c.is_whitespace());

    if cleaned.is_empty() {
        return Err(RowError::InvalidAmount(s.to_string()));
    }

    let amount = Amount::from_str(&cleaned).map_err(|_| RowError::InvalidAmount(s.to_string()))?;
    Ok(if negative { -amount } else { amount })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::resolve_columns;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  say \"hi\"\nthere\t "), "say hi there");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_parse_date_iso_and_datetime() {
        assert_eq!(parse_date("2024-01-05", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05 00:00:00", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05T13:45:00", false).unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_date_fractional_seconds() {
        assert_eq!(parse_date("2024-01-05T10:00:00.000", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("2024-01-05 10:00:00.123456", false).unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_date_month_first_by_default() {
        assert_eq!(parse_date("01/05/2024", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("01/05/2024 00:00:00", false).unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_date_day_first() {
        assert_eq!(parse_date("01/05/2024", true).unwrap(), ymd(2024, 5, 1));
    }

    #[test]
    fn test_parse_date_falls_back_to_other_order() {
        assert_eq!(parse_date("25/12/2024", false).unwrap(), ymd(2024, 12, 25));
        assert_eq!(parse_date("12/25/2024", true).unwrap(), ymd(2024, 12, 25));
    }

    #[test]
    fn test_parse_date_named_months() {
        assert_eq!(parse_date("05-Jan-2024", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("5 January 2024", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("Jan 5, 2024", false).unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(
            parse_date("N/A", false),
            Err(RowError::InvalidDate("N/A".to_string()))
        );
        assert!(parse_date("", false).is_err());
        assert!(parse_date("02/30/2024", false).is_err());
    }

    #[test]
    fn test_parse_date_two_digit_year() {
        assert_eq!(parse_date("01/05/24", false).unwrap(), ymd(2024, 1, 5));
        assert_eq!(parse_date("05-Jan-24", false).unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_parse_amount_variants() {
        assert_eq!(parse_amount("500").unwrap().to_string(), "500.00");
        assert_eq!(parse_amount("1,234.50").unwrap().to_string(), "1234.50");
        assert_eq!(parse_amount("KES 20,000").unwrap().to_string(), "20000.00");
        assert_eq!(parse_amount("$99.99").unwrap().to_string(), "99.99");
        assert_eq!(parse_amount("(75.25)").unwrap().to_string(), "-75.25");
        assert_eq!(parse_amount("-50").unwrap().to_string(), "-50.00");
    }

    #[test]
    fn test_parse_amount_rejects_blank_and_text() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("five hundred").is_err());
        assert!(parse_amount("()").is_err());
    }

    #[test]
    fn test_from_cells_builds_clean_absolute_row() {
        let columns = resolve_columns(&strings(&[
            "Pay Type",
            "Till No",
            "Transaction Date",
            "Detail",
            "Transacted Amount",
            "User Name",
        ]))
        .unwrap();
        let cells = strings(&["Petty Cash", " T1 ", "2024-01-05", "fare \"to\" town", "-500", "Jane"]);

        let row = CanonicalRow::from_cells(&cells, &columns, false).unwrap();
        assert_eq!(row.pay_type, "Petty Cash");
        assert_eq!(row.till, "T1");
        assert_eq!(row.date, ymd(2024, 1, 5));
        assert_eq!(row.detail, "fare to town");
        assert_eq!(row.amount.to_string(), "500.00");
        assert_eq!(row.user, "Jane");
    }

    #[test]
    fn test_from_cells_short_row_reads_empty() {
        let columns = resolve_columns(&strings(&[
            "Transaction Date",
            "Transacted Amount",
            "Pay Type",
            "Till No",
            "Detail",
            "User Name",
        ]))
        .unwrap();
        let cells = strings(&["2024-01-05", "20000", "Cash Pickup"]);

        let row = CanonicalRow::from_cells(&cells, &columns, false).unwrap();
        assert_eq!(row.till, "");
        assert_eq!(row.detail, "");
        assert_eq!(row.user, "");
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(is_blank_row(&strings(&["", "  ", ""])));
        assert!(is_blank_row(&[]));
        assert!(!is_blank_row(&strings(&["", "x"])));
    }
}
