//! Request documents sent through the `ProcessXml` operation.
//!
//! A document is built for a single request, serialized once and dropped when the call returns.
//! Fields that Twinfield calculates itself are never serialized.

pub mod invoices;
pub mod read;
pub mod transactions;

pub use invoices::InvoicesDocument;
pub use read::{ReadRequest, ReadType};
pub use transactions::TransactionsDocument;

use crate::error::Result;

/// Anything that can be sent as the body of a `ProcessXmlString` call.
pub trait Document {
    fn to_xml(&self) -> Result<String>;
}
