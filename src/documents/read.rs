use serde::{Deserialize, Serialize};

use super::Document;
use crate::{error::Result, utils::wire::wire_format, xml::XmlWriter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadType {
    SalesInvoice,
    Transaction,
}

wire_format!(ReadType, "read type");

impl ReadType {
    fn number_element(self) -> &'static str {
        match self {
            Self::SalesInvoice => "invoicenumber",
            Self::Transaction => "number",
        }
    }
}

/// Looks up a single object by office, code and number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadRequest {
    read_type: ReadType,
    office: String,
    code: String,
    number: String,
}

impl ReadRequest {
    #[must_use]
    pub fn sales_invoice(office: &str, code: &str, invoice_number: &str) -> Self {
        Self::new(ReadType::SalesInvoice, office, code, invoice_number)
    }

    /// `code` is the daybook the transaction was booked in.
    #[must_use]
    pub fn transaction(office: &str, code: &str, number: &str) -> Self {
        Self::new(ReadType::Transaction, office, code, number)
    }

    fn new(read_type: ReadType, office: &str, code: &str, number: &str) -> Self {
        Self {
            read_type,
            office: office.to_string(),
            code: code.to_string(),
            number: number.to_string(),
        }
    }

    #[must_use]
    pub fn read_type(&self) -> ReadType {
        self.read_type
    }

    #[must_use]
    pub fn office(&self) -> &str {
        &self.office
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }
}

impl Document for ReadRequest {
    fn to_xml(&self) -> Result<String> {
        let mut writer = XmlWriter::new();
        writer.start("read", &[])?;
        writer.element("type", self.read_type)?;
        writer.element("office", &self.office)?;
        writer.element("code", &self.code)?;
        writer.element(self.read_type.number_element(), &self.number)?;
        writer.end("read")?;
        writer.finish()
    }
}
