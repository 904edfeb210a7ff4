//! Run configuration: ledger account names and input parsing options.
//!
//! Every key is optional, so an empty TOML document yields the defaults.

use crate::error::{ConvertError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// QuickBooks account names used on the emitted ledger lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Accounts {
    /// Source account for every entry (the till).
    pub cash: String,
    /// Destination of cash pickups.
    pub bank: String,
    pub deliveries: String,
    pub transport: String,
    /// Offset account for any other petty cash spend.
    pub payable: String,
    /// Counter-party name when a petty cash row has no detail text.
    pub default_vendor: String,
}

impl Default for Accounts {
    fn default() -> Self {
        Self {
            cash: "Cash in Drawer".to_string(),
            bank: "Diamond Trust Bank".to_string(),
            deliveries: "COGS:Customer Deliveries".to_string(),
            transport: "Expense:Interbranch Transport Cost".to_string(),
            payable: "Accounts Payable".to_string(),
            default_vendor: "Vendor".to_string(),
        }
    }
}

/// How the input table is read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputOptions {
    pub delimiter: String,
    /// Read ambiguous numeric dates such as `05/01/2024` as day/month/year.
    pub day_first: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: ",".to_string(),
            day_first: false,
        }
    }
}

impl InputOptions {
    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ if self.delimiter == "\\t" => Ok(b'\t'),
            _ => Err(ConvertError::InvalidDelimiter(self.delimiter.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub accounts: Accounts,
    pub input: InputOptions,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConvertError::Config(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
