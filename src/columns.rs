//! Header resolution from loosely named input columns to the canonical schema.

use crate::error::{ConvertError, Result};

/// The six input fields every conversion needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    PayType,
    TillNo,
    TransactionDate,
    Detail,
    TransactedAmount,
    UserName,
}

impl CanonicalField {
    /// All fields in resolution order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::PayType,
        CanonicalField::TillNo,
        CanonicalField::TransactionDate,
        CanonicalField::Detail,
        CanonicalField::TransactedAmount,
        CanonicalField::UserName,
    ];

    /// Human readable name, used in schema error messages.
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::PayType => "pay type",
            CanonicalField::TillNo => "till no",
            CanonicalField::TransactionDate => "transaction date",
            CanonicalField::Detail => "detail",
            CanonicalField::TransactedAmount => "transacted amount",
            CanonicalField::UserName => "user name",
        }
    }

    /// Known header spellings, highest priority first. The first alias also
    /// drives the word-containment fallback.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::PayType => &["pay type", "paytype", "type", "pay_type"],
            CanonicalField::TillNo => &["till no", "till", "till number", "till_no", "tillno"],
            CanonicalField::TransactionDate => {
                &["transaction date", "date", "txn date", "trans date", "txndate"]
            }
            CanonicalField::Detail => &["detail", "details", "description", "memo", "narration"],
            CanonicalField::TransactedAmount => &[
                "transacted amount",
                "amount",
                "amt",
                "value",
                "transaction amount",
            ],
            CanonicalField::UserName => &[
                "user name",
                "username",
                "user",
                "cashier",
                "handled by",
                "handledby",
            ],
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Lowercases, trims and collapses every run of non-alphanumeric characters
/// into a single space.
///
/// ```
/// use petty_cash_iif::columns::normalize;
///
/// assert_eq!(normalize("  PAY_TYPE "), "pay type");
/// assert_eq!(normalize("Till--No."), "till no");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Column index for each canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 6],
}

impl ColumnMap {
    /// Position of `field` in the raw row.
    pub fn index_of(&self, field: CanonicalField) -> usize {
        self.indices[field.index()]
    }
}

/// Maps raw headers onto the canonical fields.
///
/// Exact alias matches are tried first, in alias priority order. A field
/// with no exact match falls back to the first header containing every word
/// of its primary alias. If any field stays unresolved the whole input is
/// rejected with [`ConvertError::MissingColumns`].
pub fn resolve_columns(headers: &[String]) -> Result<ColumnMap> {
    let mut normalized: Vec<(String, usize)> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let key = normalize(header);
        // A later header with the same key takes over the earlier one's slot.
        match normalized.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = idx,
            None => normalized.push((key, idx)),
        }
    }

    let mut indices = [0usize; 6];
    let mut missing = Vec::new();

    for field in CanonicalField::ALL {
        match find_column(field, &normalized) {
            Some(idx) => indices[field.index()] = idx,
            None => missing.push(field.name().to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ConvertError::MissingColumns {
            missing,
            found: headers.to_vec(),
        });
    }

    Ok(ColumnMap { indices })
}

fn find_column(field: CanonicalField, normalized: &[(String, usize)]) -> Option<usize> {
    let exact = field.aliases().iter().find_map(|alias| {
        let alias = normalize(alias);
        normalized
            .iter()
            .find(|(key, _)| *key == alias)
            .map(|(_, idx)| *idx)
    });
    if exact.is_some() {
        return exact;
    }

    let primary = normalize(field.aliases()[0]);
    let words: Vec<&str> = primary.split(' ').collect();
    normalized
        .iter()
        .find(|(key, _)| words.iter().all(|w| key.contains(w)))
        .map(|(_, idx)| *idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_collapses_punctuation() {
        assert_eq!(normalize("Pay Type"), "pay type");
        assert_eq!(normalize("PAY_TYPE"), "pay type");
        assert_eq!(normalize("pay-type"), "pay type");
        assert_eq!(normalize("  Transacted   Amount (KES) "), "transacted amount kes");
        assert_eq!(normalize("***"), "");
    }

    #[test]
    fn test_resolves_standard_headers() {
        let map = resolve_columns(&headers(&[
            "Pay Type",
            "Till No",
            "Transaction Date",
            "Detail",
            "Transacted Amount",
            "User Name",
        ]))
        .unwrap();

        assert_eq!(map.index_of(CanonicalField::PayType), 0);
        assert_eq!(map.index_of(CanonicalField::TillNo), 1);
        assert_eq!(map.index_of(CanonicalField::TransactionDate), 2);
        assert_eq!(map.index_of(CanonicalField::Detail), 3);
        assert_eq!(map.index_of(CanonicalField::TransactedAmount), 4);
        assert_eq!(map.index_of(CanonicalField::UserName), 5);
    }

    #[test]
    fn test_pay_type_variants_resolve_to_same_field() {
        for variant in ["PAY_TYPE", "Pay Type", "pay-type", "paytype"] {
            let map = resolve_columns(&headers(&[
                "User", "Amount", "Memo", "Date", "Till", variant,
            ]))
            .unwrap();
            assert_eq!(map.index_of(CanonicalField::PayType), 5, "variant {variant}");
        }
    }

    #[test]
    fn test_alias_priority_beats_column_order() {
        // "amount" outranks "value" even though "value" comes first.
        let map = resolve_columns(&headers(&[
            "Value", "Amount", "Type", "Till", "Date", "Details", "Cashier",
        ]))
        .unwrap();
        assert_eq!(map.index_of(CanonicalField::TransactedAmount), 1);
        assert_eq!(map.index_of(CanonicalField::UserName), 6);
    }

    #[test]
    fn test_word_containment_fallback() {
        let map = resolve_columns(&headers(&[
            "Pay Type Code",
            "Till No.",
            "Transaction Date (dd/mm)",
            "Detail",
            "Transacted Amount KES",
            "User Name Full",
        ]))
        .unwrap();
        assert_eq!(map.index_of(CanonicalField::PayType), 0);
        assert_eq!(map.index_of(CanonicalField::TransactionDate), 2);
        assert_eq!(map.index_of(CanonicalField::TransactedAmount), 4);
        assert_eq!(map.index_of(CanonicalField::UserName), 5);
    }

    #[test]
    fn test_duplicate_normalized_headers_keep_last() {
        let map = resolve_columns(&headers(&[
            "Amount", "AMOUNT", "Type", "Till", "Date", "Detail", "User",
        ]))
        .unwrap();
        assert_eq!(map.index_of(CanonicalField::TransactedAmount), 1);

        // The fallback search also sees the later header.
        let map = resolve_columns(&headers(&[
            "Pay Type",
            "Till No",
            "Transaction Date (local)",
            "Detail",
            "Amount",
            "User",
            "transaction date local",
        ]))
        .unwrap();
        assert_eq!(map.index_of(CanonicalField::TransactionDate), 6);
    }

    #[test]
    fn test_missing_user_column_is_reported() {
        let err = resolve_columns(&headers(&[
            "Pay Type",
            "Till No",
            "Transaction Date",
            "Detail",
            "Transacted Amount",
        ]))
        .unwrap_err();

        match err {
            ConvertError::MissingColumns { missing, found } => {
                assert_eq!(missing, vec!["user name".to_string()]);
                assert_eq!(found.len(), 5);
                assert_eq!(found[0], "Pay Type");
            }
            other => panic!("Expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_every_missing_field_is_listed() {
        let err = resolve_columns(&headers(&["Foo", "Bar"])).unwrap_err();
        match err {
            ConvertError::MissingColumns { missing, .. } => assert_eq!(missing.len(), 6),
            other => panic!("Expected MissingColumns, got {other:?}"),
        }
    }
}
