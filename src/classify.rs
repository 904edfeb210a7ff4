//! Row classification into ledger categories.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. pay type says "cash pickup" → [`Category::CashPickup`]
//! 2. detail mentions a delivery → [`Category::Delivery`]
//! 3. detail mentions fare or transport → [`Category::InterbranchTransport`]
//! 4. anything else → [`Category::OtherPettyCash`]
//!
//! Pickups are signalled by the pay type column rather than free text, so
//! they take precedence over the detail-based rules.

use crate::columns::normalize;
use crate::config::Accounts;
use crate::record::CanonicalRow;
use std::fmt;

/// Substring shared by "delivery", "deliver", "delivered" and friends.
const DELIVERY_STEM: &str = "deliv";

/// Common misspellings are listed alongside the real words.
const DELIVERY_TYPOS: &[&str] = &["deivery", "dilivery"];

const TRANSPORT_LEXICON: &[&str] = &["fare", "fair", "transport", "trasport"];

/// Ledger category of one petty cash row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Cash taken from the till for a bank deposit.
    CashPickup,
    Delivery,
    InterbranchTransport,
    OtherPettyCash,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::CashPickup,
        Category::Delivery,
        Category::InterbranchTransport,
        Category::OtherPettyCash,
    ];

    /// Picks the category from already normalized pay type and detail text.
    pub fn detect(pay_type: &str, detail: &str) -> Category {
        if is_cash_pickup(pay_type) {
            Category::CashPickup
        } else if detail.contains(DELIVERY_STEM) || DELIVERY_TYPOS.iter().any(|t| detail.contains(t))
        {
            Category::Delivery
        } else if TRANSPORT_LEXICON.iter().any(|t| detail.contains(t)) {
            Category::InterbranchTransport
        } else {
            Category::OtherPettyCash
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::CashPickup => "cash pickup",
            Category::Delivery => "delivery",
            Category::InterbranchTransport => "interbranch transport",
            Category::OtherPettyCash => "other petty cash",
        };
        f.write_str(label)
    }
}

fn is_cash_pickup(pay_type: &str) -> bool {
    // "cash pick up" has no "pickup" token, so also look at the joined form.
    let joined: String = pay_type.split(' ').collect();
    (pay_type.contains("cash") && pay_type.contains("pickup"))
        || (joined.contains("cash") && joined.contains("pickup"))
}

/// Outcome of classifying one row: category, account pair, counter-party
/// and memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Account credited on the TRNS line.
    pub source_account: String,
    /// Account debited on the SPL line.
    pub target_account: String,
    pub name: String,
    pub memo: String,
}

/// Classifies a canonical row against the configured account names.
pub fn classify(row: &CanonicalRow, accounts: &Accounts) -> Classification {
    let pay_type = normalize(&row.pay_type);
    let detail = normalize(&row.detail);
    let category = Category::detect(&pay_type, &detail);
    let date = row.date.format("%m/%d/%Y");

    let (target_account, name, memo) = match category {
        Category::CashPickup => (
            accounts.bank.clone(),
            accounts.bank.clone(),
            format!("Cash pick up for deposit on {date}"),
        ),
        Category::Delivery => (
            accounts.deliveries.clone(),
            row.user.clone(),
            format!("Delivery expense on behalf of customer on {date}"),
        ),
        Category::InterbranchTransport => (
            accounts.transport.clone(),
            row.user.clone(),
            format!("Interbranch transport by {} on {date}", row.user),
        ),
        Category::OtherPettyCash => {
            let vendor = if row.detail.is_empty() {
                accounts.default_vendor.clone()
            } else {
                title_case(&row.detail)
            };
            (
                accounts.payable.clone(),
                vendor,
                format!("Petty cash by {} for {} on {date}", row.user, row.detail),
            )
        }
    };

    Classification {
        category,
        source_account: accounts.cash.clone(),
        target_account,
        name,
        memo,
    }
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `"o'neil stores"` becomes `"O'Neil Stores"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}
