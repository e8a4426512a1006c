use serde::{Deserialize, Serialize};
use time::Date;

use super::{office::Office, transaction_line::TransactionLine};
use crate::utils::wire::wire_format;

/// Whether a transaction is stored as a draft or booked directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destiny {
    #[default]
    Temporary,
    Final,
}

wire_format!(Destiny, "destiny");

/// A journal, memorial, purchase or sales transaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    pub office: Option<Office>,
    /// Daybook code.
    pub code: Option<String>,
    /// Transaction number, assigned by Twinfield.
    pub number: Option<String>,
    pub currency: Option<String>,
    pub date: Option<Date>,
    /// Period in `YYYY/MM` notation.
    pub period: Option<String>,
    pub destiny: Destiny,
    pub raise_warning: Option<bool>,
    pub lines: Vec<TransactionLine>,
}

impl Transaction {
    #[must_use]
    pub fn new(office: Office, code: impl Into<String>) -> Self {
        Self {
            office: Some(office),
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn add_line(&mut self, line: TransactionLine) -> &mut Self {
        self.lines.push(line);
        self
    }
}
