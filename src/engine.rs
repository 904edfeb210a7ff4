//! Conversion driver.
//!
//! Runs the whole pipeline for one input table: resolve columns, then for
//! each row normalize, classify and build a ledger entry. Schema problems
//! abort the run; bad rows are skipped with a warning. The sequence counter
//! used for document numbers lives in the [`Converter`] so every run starts
//! again at 1.

use crate::amount::Amount;
use crate::classify::{classify, Category};
use crate::columns::{resolve_columns, ColumnMap};
use crate::config::Config;
use crate::error::{Result, RowError, RowWarning};
use crate::iif::write_iif;
use crate::ledger::{build_entry, LedgerEntry};
use crate::record::{is_blank_row, CanonicalRow, RawTable};
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};

/// Result of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    pub entries: Vec<LedgerEntry>,
    pub warnings: Vec<RowWarning>,
}

impl Conversion {
    /// Writes the entries as an IIF document.
    pub fn write_iif<W: Write>(&self, writer: W) -> Result<()> {
        write_iif(writer, &self.entries)
    }

    pub fn to_iif_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write_iif(&mut out)?;
        // Every field passed through `String`, so the bytes are UTF-8.
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Counts and totals per category.
    pub fn summary(&self) -> Summary {
        let mut by_category = BTreeMap::new();
        for entry in &self.entries {
            let slot = by_category
                .entry(entry.category)
                .or_insert((0usize, Amount::ZERO));
            slot.0 += 1;
            slot.1 += entry.spl.amount;
        }
        Summary {
            by_category,
            skipped: self.warnings.len(),
        }
    }
}

/// Per-category counts and totals of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub by_category: BTreeMap<Category, (usize, Amount)>,
    pub skipped: usize,
}

impl Summary {
    pub fn entries(&self) -> usize {
        self.by_category.values().map(|(count, _)| count).sum()
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).map_or(0, |(count, _)| *count)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} entries", self.entries())?;
        for category in Category::ALL {
            if let Some((count, total)) = self.by_category.get(&category) {
                write!(f, ", {category}: {count} ({total})")?;
            }
        }
        write!(f, ", {} rows skipped", self.skipped)
    }
}

/// Converts petty cash rows into ledger entries for a single run.
pub struct Converter<'a> {
    config: &'a Config,
    columns: ColumnMap,
    next_seq: u32,
    conversion: Conversion,
}

impl<'a> Converter<'a> {
    /// Resolves the headers up front; fails if any required column is
    /// missing.
    pub fn new(headers: &[String], config: &'a Config) -> Result<Self> {
        let columns = resolve_columns(headers)?;
        debug!("Resolved columns: {:?}", columns);
        Ok(Converter {
            config,
            columns,
            next_seq: 1,
            conversion: Conversion::default(),
        })
    }

    /// Processes one raw row. `row` is its 1-based line number in the
    /// source, used in warnings.
    pub fn push_row(&mut self, cells: &[String], row: usize) {
        if is_blank_row(cells) {
            debug!("Row {}: blank, skipping", row);
            return;
        }

        match self.convert_row(cells) {
            Ok(entry) => {
                debug!(
                    "Row {}: {} {} -> {}",
                    row, entry.category, entry.spl.amount, entry.spl.account
                );
                self.conversion.entries.push(entry);
            }
            Err(error) => self.push_warning(row, error),
        }
    }

    /// Records a skipped row.
    pub fn push_warning(&mut self, row: usize, error: RowError) {
        let warning = RowWarning { row, error };
        warn!("{}", warning);
        self.conversion.warnings.push(warning);
    }

    fn convert_row(&mut self, cells: &[String]) -> std::result::Result<LedgerEntry, RowError> {
        let canonical = CanonicalRow::from_cells(cells, &self.columns, self.config.input.day_first)?;
        let classification = classify(&canonical, &self.config.accounts);
        let entry = build_entry(&canonical, &classification, self.next_seq);
        self.next_seq += 1;
        Ok(entry)
    }

    pub fn finish(self) -> Conversion {
        self.conversion
    }
}

/// Converts an in-memory table.
///
/// Data row `i` (0-based) is reported as line `i + 2`, the header being
/// line 1.
pub fn convert_table(table: &RawTable, config: &Config) -> Result<Conversion> {
    let mut converter = Converter::new(&table.headers, config)?;
    for (idx, cells) in table.rows.iter().enumerate() {
        converter.push_row(cells, idx + 2);
    }
    Ok(converter.finish())
}

/// Reads CSV from `reader` and converts it.
///
/// Records are processed as they are read. A record the CSV parser rejects,
/// such as one with invalid UTF-8, is skipped with a warning; only header
/// and I/O errors are fatal.
pub fn convert_csv<R: Read>(reader: R, config: &Config) -> Result<Conversion> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(config.input.delimiter_byte()?)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let mut converter = Converter::new(&headers, config)?;

    for (row_idx, result) in csv_reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row_num = record
                    .position()
                    .map_or(row_idx + 2, |pos| pos.line() as usize);
                let cells: Vec<String> = record.iter().map(str::to_string).collect();
                converter.push_row(&cells, row_num);
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let row_num = e.position().map_or(row_idx + 2, |pos| pos.line() as usize);
                converter.push_warning(row_num, RowError::Unreadable(e.to_string()));
            }
        }
    }

    Ok(converter.finish())
}
