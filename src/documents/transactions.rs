use super::Document;
use crate::{
    entities::{Transaction, TransactionLine},
    error::Result,
    utils::date_format::format_date,
    xml::XmlWriter,
};

/// Write document carrying one or more transactions, in insertion order.
#[derive(Debug, Default)]
pub struct TransactionsDocument<'a> {
    transactions: Vec<&'a Transaction>,
}

impl<'a> TransactionsDocument<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transaction(&mut self, transaction: &'a Transaction) {
        self.transactions.push(transaction);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Document for TransactionsDocument<'_> {
    fn to_xml(&self) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer.start("transactions", &[])?;
        for transaction in &self.transactions {
            write_transaction(&mut writer, transaction)?;
        }
        writer.end("transactions")?;
        writer.finish()
    }
}

fn write_transaction(writer: &mut XmlWriter, transaction: &Transaction) -> Result<()> {
    let destiny = transaction.destiny.to_string();
    let raise_warning = transaction.raise_warning.map(|raise| raise.to_string());
    let mut attributes = vec![("destiny", destiny.as_str())];
    if let Some(raise_warning) = raise_warning.as_deref() {
        attributes.push(("raisewarning", raise_warning));
    }
    writer.start("transaction", &attributes)?;

    writer.start("header", &[])?;
    writer.optional("office", transaction.office.as_ref().map(|office| office.code()))?;
    writer.optional("code", transaction.code.as_ref())?;
    writer.optional("number", transaction.number.as_ref())?;
    writer.optional("currency", transaction.currency.as_ref())?;
    writer.optional("date", transaction.date.map(format_date).transpose()?)?;
    writer.optional("period", transaction.period.as_ref())?;
    writer.end("header")?;

    writer.start("lines", &[])?;
    for line in &transaction.lines {
        write_line(writer, line)?;
    }
    writer.end("lines")?;

    writer.end("transaction")
}

// Base/reporting values, rates and match information are calculated by Twinfield.
fn write_line(writer: &mut XmlWriter, line: &TransactionLine) -> Result<()> {
    let line_type = line.line_type().to_string();
    let mut attributes = vec![("type", line_type.as_str())];
    if let Some(id) = line.id() {
        attributes.push(("id", id));
    }
    writer.start("line", &attributes)?;
    writer.optional("dim1", line.dim1())?;
    writer.optional("dim2", line.dim2())?;
    writer.element("debitcredit", line.value_fields().debit_credit())?;
    writer.optional("value", line.value_fields().value())?;
    writer.optional("description", line.description())?;
    writer.optional("vatcode", line.vat_code())?;
    writer.optional("vatvalue", line.vat_value())?;
    writer.end("line")
}
