//! Double-entry ledger entries built from classified rows.
//!
//! Every entry is a TRNS/SPL pair. The TRNS leg takes money out of the
//! source account (negative amount) and the SPL leg puts the same amount
//! into the target account, so each entry nets to zero by construction.

use crate::amount::Amount;
use crate::classify::{Category, Classification};
use crate::record::{clean_text, CanonicalRow};
use chrono::NaiveDate;
use std::fmt;

/// QuickBooks transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrnsType {
    Check,
    Transfer,
}

impl TrnsType {
    /// Cash pickups move money between accounts; everything else is spend.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::CashPickup => TrnsType::Transfer,
            _ => TrnsType::Check,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrnsType::Check => "CHECK",
            TrnsType::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for TrnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which leg of the transaction a line is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Trns,
    Spl,
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LineKind::Trns => "TRNS",
            LineKind::Spl => "SPL",
        }
    }
}

/// Document number `{till}-{YYYYMMDD}-{seq:03}`.
///
/// `seq` counts entries within one run, starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocNum {
    pub till: String,
    pub date: NaiveDate,
    pub seq: u32,
}

impl fmt::Display for DocNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{:03}", self.till, self.date.format("%Y%m%d"), self.seq)
    }
}

/// One line of an IIF transaction block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerLine {
    pub kind: LineKind,
    pub trns_type: TrnsType,
    pub date: NaiveDate,
    pub account: String,
    pub name: String,
    /// Signed amount; negative on the TRNS leg.
    pub amount: Amount,
    pub memo: String,
    pub docnum: DocNum,
    /// Always `false`: no reconciliation state is tracked.
    pub cleared: bool,
}

impl LedgerLine {
    /// Date as QuickBooks expects it, `MM/DD/YYYY`.
    pub fn formatted_date(&self) -> String {
        format_qb_date(self.date)
    }

    pub fn clear_flag(&self) -> &'static str {
        if self.cleared {
            "Y"
        } else {
            "N"
        }
    }
}

/// A balanced TRNS/SPL pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub category: Category,
    pub trns: LedgerLine,
    pub spl: LedgerLine,
}

impl LedgerEntry {
    /// Returns `true` if the two legs cancel out.
    pub fn is_balanced(&self) -> bool {
        self.trns.amount == -self.spl.amount
    }
}

/// Formats a date as `MM/DD/YYYY`.
pub fn format_qb_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Builds the ledger entry for a classified row.
pub fn build_entry(row: &CanonicalRow, classification: &Classification, seq: u32) -> LedgerEntry {
    let trns_type = TrnsType::for_category(classification.category);
    let docnum = DocNum {
        till: row.till.clone(),
        date: row.date,
        seq,
    };
    let name = clean_text(&classification.name);
    let memo = clean_text(&classification.memo);

    let line = |kind: LineKind, account: &str, amount: Amount| LedgerLine {
        kind,
        trns_type,
        date: row.date,
        account: clean_text(account),
        name: name.clone(),
        amount,
        memo: memo.clone(),
        docnum: docnum.clone(),
        cleared: false,
    };

    LedgerEntry {
        category: classification.category,
        trns: line(LineKind::Trns, &classification.source_account, -row.amount),
        spl: line(LineKind::Spl, &classification.target_account, row.amount),
    }
}
