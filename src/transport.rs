use crate::error::Result;

/// Sends a serialized request document to Twinfield and returns the raw response document.
///
/// [`crate::Client`] is the production implementation. Implementations must not interpret the
/// response; success checking and mapping happen in the connectors.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn process_xml(&self, document: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    async fn process_xml(&self, document: &str) -> Result<String> {
        (**self).process_xml(document).await
    }
}
