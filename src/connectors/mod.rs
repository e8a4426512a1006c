//! Facades that translate domain operations into `ProcessXml` round trips.

pub mod invoice;
pub mod transaction;

pub use invoice::InvoiceApiConnector;
pub use transaction::TransactionApiConnector;

use crate::{documents::Document, error::Result, response::Response, transport::Transport};

/// Shared send path: serialize, transmit, parse and check the response.
#[derive(Debug)]
pub struct ProcessXmlApiConnector<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> ProcessXmlApiConnector<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Sends a document and returns the response, failing when Twinfield rejected any part of it.
    #[instrument(skip(self, document))]
    pub async fn send_document<D: Document>(&self, document: &D) -> Result<Response> {
        let request = document.to_xml()?;
        trace!(%request, "sending document");

        let raw = self.transport.process_xml(&request).await?;
        debug!("response document size: {} bytes", raw.len());
        trace!("response document:\n{}", raw);

        let response = Response::from_xml(&raw)?;
        for message in response.warning_messages() {
            warn!(%message, "twinfield returned a warning");
        }
        response.assert_successful()?;
        Ok(response)
    }
}
