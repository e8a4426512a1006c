use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::wire::wire_format,
};

/// The discriminator of a transaction line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Total,
    Detail,
    Vat,
}

wire_format!(LineType, "line type");

/// Payment status of a line, set by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Available,
    Matched,
    Proposed,
    NotMatchable,
}

wire_format!(MatchStatus, "match status");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebitCredit {
    #[default]
    Debit,
    Credit,
}

wire_format!(DebitCredit, "debit/credit");

/// Fields whose legality depends on the line type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineField {
    VatCode,
    VatValue,
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VatCode => "vatCode",
            Self::VatValue => "vatValue",
        })
    }
}

/// The conditional fields that may be set on a line of the given type.
#[must_use]
pub fn allowed_fields(line_type: LineType) -> &'static [LineField] {
    match line_type {
        LineType::Total => &[],
        LineType::Detail => &[LineField::VatCode, LineField::VatValue],
        LineType::Vat => &[LineField::VatCode],
    }
}

fn ensure_allowed(field: LineField, line_type: LineType) -> Result<()> {
    if allowed_fields(line_type).contains(&field) {
        Ok(())
    } else {
        Err(Error::InvalidFieldForLineType { field, line_type })
    }
}

/// Value and side of a line. The value is stored unsigned; the sign lives in `debit_credit`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueFields {
    debit_credit: DebitCredit,
    value: Option<Decimal>,
}

impl ValueFields {
    #[must_use]
    pub fn debit_credit(&self) -> DebitCredit {
        self.debit_credit
    }

    pub fn set_debit_credit(&mut self, debit_credit: DebitCredit) {
        self.debit_credit = debit_credit;
    }

    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Stores the absolute amount; a negative amount books the line as credit. `None` clears the
    /// value and keeps the side.
    pub fn set_value(&mut self, value: Option<Decimal>) {
        if let Some(value) = value {
            self.debit_credit = if value.is_sign_negative() && !value.is_zero() {
                DebitCredit::Credit
            } else {
                DebitCredit::Debit
            };
        }
        self.value = value.map(|value| value.abs());
    }

    /// The value with credit amounts negated.
    #[must_use]
    pub fn signed_value(&self) -> Option<Decimal> {
        self.value.map(|value| match self.debit_credit {
            DebitCredit::Debit => value,
            DebitCredit::Credit => -value,
        })
    }

    pub(crate) fn set_raw(&mut self, debit_credit: DebitCredit, value: Option<Decimal>) {
        self.debit_credit = debit_credit;
        self.value = value;
    }
}

/// Amounts computed by the service. Read-only outside this crate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineAmounts {
    base_value: Option<Decimal>,
    rate: Option<f64>,
    rep_value: Option<Decimal>,
    rep_rate: Option<f64>,
    base_value_open: Option<Decimal>,
}

impl LineAmounts {
    /// Amount in the base currency.
    #[must_use]
    pub fn base_value(&self) -> Option<Decimal> {
        self.base_value
    }

    /// Exchange rate used to calculate the base amount.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    /// Amount in the reporting currency.
    #[must_use]
    pub fn rep_value(&self) -> Option<Decimal> {
        self.rep_value
    }

    /// Exchange rate used to calculate the reporting amount.
    #[must_use]
    pub fn rep_rate(&self) -> Option<f64> {
        self.rep_rate
    }

    /// Open amount in the base currency; meaning differs per transaction type.
    #[must_use]
    pub fn base_value_open(&self) -> Option<Decimal> {
        self.base_value_open
    }

    pub(crate) fn set_base_value(&mut self, base_value: Option<Decimal>) {
        self.base_value = base_value;
    }

    pub(crate) fn set_rate(&mut self, rate: Option<f64>) {
        self.rate = rate;
    }

    pub(crate) fn set_rep_value(&mut self, rep_value: Option<Decimal>) {
        self.rep_value = rep_value;
    }

    pub(crate) fn set_rep_rate(&mut self, rep_rate: Option<f64>) {
        self.rep_rate = rep_rate;
    }

    pub(crate) fn set_base_value_open(&mut self, base_value_open: Option<Decimal>) {
        self.base_value_open = base_value_open;
    }
}

/// A single line of a transaction.
///
/// `dim1` and `dim2` mean different things per transaction type (balance sheet or profit and
/// loss account, customer, supplier, cost center). The description is limited to 40 characters
/// by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionLine {
    line_type: LineType,
    id: Option<String>,
    dim1: Option<String>,
    dim2: Option<String>,
    value: ValueFields,
    amounts: LineAmounts,
    description: Option<String>,
    match_status: Option<MatchStatus>,
    match_level: Option<u32>,
    vat_code: Option<String>,
    vat_value: Option<Decimal>,
}

impl TransactionLine {
    #[must_use]
    pub fn new(line_type: LineType) -> Self {
        Self {
            line_type,
            id: None,
            dim1: None,
            dim2: None,
            value: ValueFields::default(),
            amounts: LineAmounts::default(),
            description: None,
            match_status: None,
            match_level: None,
            vat_code: None,
            vat_value: None,
        }
    }

    #[must_use]
    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Changes the line type. Fails, leaving the line untouched, when a conditional field that is
    /// already set would become illegal.
    pub fn set_line_type(&mut self, line_type: LineType) -> Result<&mut Self> {
        if self.vat_code.is_some() {
            ensure_allowed(LineField::VatCode, line_type)?;
        }
        if self.vat_value.is_some() {
            ensure_allowed(LineField::VatValue, line_type)?;
        }
        self.line_type = line_type;
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) -> &mut Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn dim1(&self) -> Option<&str> {
        self.dim1.as_deref()
    }

    pub fn set_dim1(&mut self, dim1: Option<String>) -> &mut Self {
        self.dim1 = dim1;
        self
    }

    #[must_use]
    pub fn dim2(&self) -> Option<&str> {
        self.dim2.as_deref()
    }

    pub fn set_dim2(&mut self, dim2: Option<String>) -> &mut Self {
        self.dim2 = dim2;
        self
    }

    #[must_use]
    pub fn value_fields(&self) -> &ValueFields {
        &self.value
    }

    pub fn value_fields_mut(&mut self) -> &mut ValueFields {
        &mut self.value
    }

    #[must_use]
    pub fn amounts(&self) -> &LineAmounts {
        &self.amounts
    }

    pub(crate) fn amounts_mut(&mut self) -> &mut LineAmounts {
        &mut self.amounts
    }

    #[must_use]
    pub fn base_value(&self) -> Option<Decimal> {
        self.amounts.base_value()
    }

    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        self.amounts.rate()
    }

    #[must_use]
    pub fn rep_value(&self) -> Option<Decimal> {
        self.amounts.rep_value()
    }

    #[must_use]
    pub fn rep_rate(&self) -> Option<f64> {
        self.amounts.rep_rate()
    }

    #[must_use]
    pub fn base_value_open(&self) -> Option<Decimal> {
        self.amounts.base_value_open()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) -> &mut Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn match_status(&self) -> Option<MatchStatus> {
        self.match_status
    }

    pub fn set_match_status(&mut self, match_status: Option<MatchStatus>) -> &mut Self {
        self.match_status = match_status;
        self
    }

    #[must_use]
    pub fn match_level(&self) -> Option<u32> {
        self.match_level
    }

    pub fn set_match_level(&mut self, match_level: Option<u32>) -> &mut Self {
        self.match_level = match_level;
        self
    }

    #[must_use]
    pub fn vat_code(&self) -> Option<&str> {
        self.vat_code.as_deref()
    }

    /// Only detail and vat lines carry a VAT code.
    pub fn set_vat_code(&mut self, vat_code: Option<String>) -> Result<&mut Self> {
        if vat_code.is_some() {
            ensure_allowed(LineField::VatCode, self.line_type)?;
        }
        self.vat_code = vat_code;
        Ok(self)
    }

    #[must_use]
    pub fn vat_value(&self) -> Option<Decimal> {
        self.vat_value
    }

    /// Only detail lines carry a VAT amount.
    pub fn set_vat_value(&mut self, vat_value: Option<Decimal>) -> Result<&mut Self> {
        if vat_value.is_some() {
            ensure_allowed(LineField::VatValue, self.line_type)?;
        }
        self.vat_value = vat_value;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn legality_table() {
        assert!(allowed_fields(LineType::Total).is_empty());
        assert_eq!(
            allowed_fields(LineType::Detail),
            &[LineField::VatCode, LineField::VatValue]
        );
        assert_eq!(allowed_fields(LineType::Vat), &[LineField::VatCode]);
    }

    #[test]
    fn total_line_rejects_vat_fields() {
        let mut line = TransactionLine::new(LineType::Total);
        let err = line.set_vat_code(Some("VH".into())).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFieldForLineType {
                field: LineField::VatCode,
                line_type: LineType::Total
            }
        ));
        assert!(line.set_vat_value(Some(dec!(21))).is_err());
        assert_eq!(line.vat_code(), None);
        assert_eq!(line.vat_value(), None);
    }

    #[test]
    fn clearing_is_always_allowed() {
        let mut line = TransactionLine::new(LineType::Total);
        line.set_vat_code(None).unwrap();
        line.set_vat_value(None).unwrap();
    }

    #[test]
    fn changing_type_revalidates_conditional_fields() {
        let mut line = TransactionLine::new(LineType::Detail);
        line.set_vat_code(Some("VH".into()))
            .unwrap()
            .set_vat_value(Some(dec!(2.10)))
            .unwrap();

        let err = line.set_line_type(LineType::Vat).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFieldForLineType {
                field: LineField::VatValue,
                line_type: LineType::Vat
            }
        ));
        assert_eq!(line.line_type(), LineType::Detail);

        line.set_vat_value(None).unwrap();
        line.set_line_type(LineType::Vat).unwrap();
        assert_eq!(line.line_type(), LineType::Vat);
        assert!(line.set_line_type(LineType::Total).is_err());
    }

    #[test]
    fn negative_value_books_credit() {
        let mut fields = ValueFields::default();
        fields.set_value(Some(dec!(-12.50)));
        assert_eq!(fields.debit_credit(), DebitCredit::Credit);
        assert_eq!(fields.value(), Some(dec!(12.50)));
        assert_eq!(fields.signed_value(), Some(dec!(-12.50)));

        fields.set_value(Some(dec!(3)));
        assert_eq!(fields.debit_credit(), DebitCredit::Debit);
        assert_eq!(fields.signed_value(), Some(dec!(3)));
    }

    #[test]
    fn value_can_be_cleared() {
        let mut line = TransactionLine::new(LineType::Detail);
        line.value_fields_mut().set_value(Some(dec!(-40)));
        line.value_fields_mut().set_value(None);

        assert_eq!(line.value_fields().value(), None);
        assert_eq!(line.value_fields().signed_value(), None);
        assert_eq!(line.value_fields().debit_credit(), DebitCredit::Credit);
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("detail".parse::<LineType>().unwrap(), LineType::Detail);
        assert_eq!(
            "notmatchable".parse::<MatchStatus>().unwrap(),
            MatchStatus::NotMatchable
        );
        assert!("DETAIL".parse::<LineType>().is_err());
    }
}
