use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use super::office::Office;
use crate::utils::wire::wire_format;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Concept,
    Final,
}

wire_format!(Status, "invoice status");

/// Whether a line concerns services or goods, relevant for intra-community VAT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceType {
    Services,
    Goods,
}

wire_format!(PerformanceType, "performance type");

/// A sales invoice line. Amounts calculated by Twinfield are only readable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvoiceLine {
    pub id: Option<String>,
    pub article: Option<String>,
    pub sub_article: Option<String>,
    pub quantity: Option<Decimal>,
    pub units: Option<u32>,
    pub units_price_excl: Option<Decimal>,
    pub allow_discount_or_premium: Option<bool>,
    pub description: Option<String>,
    pub vat_code: Option<String>,
    pub free_text_1: Option<String>,
    pub free_text_2: Option<String>,
    pub free_text_3: Option<String>,
    pub dim1: Option<String>,
    pub performance_type: Option<PerformanceType>,
    pub performance_date: Option<Date>,
    pub(crate) value_excl: Option<Decimal>,
    pub(crate) vat_value: Option<Decimal>,
    pub(crate) value_inc: Option<Decimal>,
}

impl InvoiceLine {
    #[must_use]
    pub fn new(article: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            article: Some(article.into()),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn value_excl(&self) -> Option<Decimal> {
        self.value_excl
    }

    #[must_use]
    pub fn vat_value(&self) -> Option<Decimal> {
        self.vat_value
    }

    #[must_use]
    pub fn value_inc(&self) -> Option<Decimal> {
        self.value_inc
    }

    pub(crate) fn set_calculated_values(
        &mut self,
        value_excl: Option<Decimal>,
        vat_value: Option<Decimal>,
        value_inc: Option<Decimal>,
    ) {
        self.value_excl = value_excl;
        self.vat_value = vat_value;
        self.value_inc = value_inc;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    value_excl: Option<Decimal>,
    value_inc: Option<Decimal>,
}

impl Totals {
    pub(crate) fn new(value_excl: Option<Decimal>, value_inc: Option<Decimal>) -> Self {
        Self {
            value_excl,
            value_inc,
        }
    }

    #[must_use]
    pub fn value_excl(&self) -> Option<Decimal> {
        self.value_excl
    }

    #[must_use]
    pub fn value_inc(&self) -> Option<Decimal> {
        self.value_inc
    }
}

/// A sales invoice.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Invoice {
    pub office: Option<Office>,
    /// Invoice type code, e.g. `FACTUUR`.
    pub invoice_type: Option<String>,
    /// Invoice number, assigned by Twinfield when the invoice is created.
    pub invoice_number: Option<String>,
    pub invoice_date: Option<Date>,
    pub due_date: Option<Date>,
    pub bank: Option<String>,
    pub invoice_address_number: Option<u32>,
    pub deliver_address_number: Option<u32>,
    /// Customer code.
    pub customer: Option<String>,
    /// Period in `YYYY/MM` notation.
    pub period: Option<String>,
    pub currency: Option<String>,
    pub status: Option<Status>,
    pub payment_method: Option<String>,
    pub header_text: Option<String>,
    pub footer_text: Option<String>,
    pub lines: Vec<InvoiceLine>,
    pub(crate) totals: Option<Totals>,
}

impl Invoice {
    #[must_use]
    pub fn new(office: Office, invoice_type: impl Into<String>, customer: impl Into<String>) -> Self {
        Self {
            office: Some(office),
            invoice_type: Some(invoice_type.into()),
            customer: Some(customer.into()),
            ..Self::default()
        }
    }

    pub fn add_line(&mut self, line: InvoiceLine) -> &mut Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn totals(&self) -> Option<&Totals> {
        self.totals.as_ref()
    }

    pub(crate) fn set_totals(&mut self, totals: Option<Totals>) {
        self.totals = totals;
    }
}
