//! IIF (Intuit Interchange Format) writer.
//!
//! QuickBooks splits IIF lines on tab characters only, so every field is
//! joined with `\t` and every line ends with `\n`.

use crate::error::Result;
use crate::ledger::{LedgerEntry, LedgerLine};
use std::io::Write;

/// Column order shared by the header and every TRNS/SPL line.
pub const FIELDS: [&str; 8] = [
    "TRNSTYPE", "DATE", "ACCNT", "NAME", "AMOUNT", "MEMO", "DOCNUM", "CLEAR",
];

/// Writes the header block followed by one block per entry.
pub fn write_iif<W: Write>(mut writer: W, entries: &[LedgerEntry]) -> Result<()> {
    write_header(&mut writer)?;

    for entry in entries {
        write_line(&mut writer, &entry.trns)?;
        write_line(&mut writer, &entry.spl)?;
        writer.write_all(b"ENDTRNS\n")?;
    }

    writer.flush()?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    let fields = FIELDS.join("\t");
    writeln!(writer, "!TRNS\t{fields}")?;
    writeln!(writer, "!SPL\t{fields}")?;
    writeln!(writer, "!ENDTRNS")?;
    Ok(())
}

fn write_line<W: Write>(writer: &mut W, line: &LedgerLine) -> Result<()> {
    let docnum = line.docnum.to_string();
    let amount = line.amount.to_string();
    let date = line.formatted_date();
    let record = [
        line.kind.as_str(),
        line.trns_type.as_str(),
        date.as_str(),
        line.account.as_str(),
        line.name.as_str(),
        amount.as_str(),
        line.memo.as_str(),
        docnum.as_str(),
        line.clear_flag(),
    ];
    writeln!(writer, "{}", record.join("\t"))?;
    Ok(())
}
