use super::ProcessXmlApiConnector;
use crate::{
    documents::{InvoicesDocument, ReadRequest},
    entities::{Invoice, Office},
    error::{Error, Result},
    mappers::InvoiceMapper,
    transport::Transport,
};

/// Reads and writes sales invoices.
///
/// For finer control over the request, build a document from [`crate::documents`] and send it
/// through [`ProcessXmlApiConnector::send_document`].
#[derive(Debug)]
pub struct InvoiceApiConnector<'a, T> {
    connector: ProcessXmlApiConnector<'a, T>,
}

impl<'a, T: Transport> InvoiceApiConnector<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T) -> Self {
        Self {
            connector: ProcessXmlApiConnector::new(transport),
        }
    }

    /// Retrieves an invoice by invoice type code and number.
    ///
    /// An unknown invoice surfaces as [`Error::Remote`] carrying Twinfield's own message.
    #[instrument(skip(self, office), fields(office = office.code()))]
    pub async fn get(&self, code: &str, invoice_number: &str, office: &Office) -> Result<Invoice> {
        let request = ReadRequest::sales_invoice(office.code(), code, invoice_number);
        let response = self.connector.send_document(&request).await?;
        InvoiceMapper::map(&response)
    }

    /// Creates or updates a single invoice.
    #[instrument(skip(self, invoice))]
    pub async fn send(&self, invoice: &Invoice) -> Result<()> {
        self.send_all(std::slice::from_ref(invoice)).await
    }

    /// Creates or updates all invoices in one request.
    #[instrument(skip(self, invoices), fields(count = invoices.len()))]
    pub async fn send_all(&self, invoices: &[Invoice]) -> Result<()> {
        if invoices.is_empty() {
            return Err(Error::EmptyBatch { entity: "Invoice" });
        }

        let mut document = InvoicesDocument::new();
        for invoice in invoices {
            document.add_invoice(invoice);
        }

        self.connector.send_document(&document).await?;
        Ok(())
    }
}
