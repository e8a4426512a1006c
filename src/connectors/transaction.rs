use super::ProcessXmlApiConnector;
use crate::{
    documents::{ReadRequest, TransactionsDocument},
    entities::{Office, Transaction},
    error::{Error, Result},
    mappers::TransactionMapper,
    transport::Transport,
};

/// Reads and writes transactions.
#[derive(Debug)]
pub struct TransactionApiConnector<'a, T> {
    connector: ProcessXmlApiConnector<'a, T>,
}

impl<'a, T: Transport> TransactionApiConnector<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T) -> Self {
        Self {
            connector: ProcessXmlApiConnector::new(transport),
        }
    }

    /// Retrieves a transaction by daybook code and transaction number.
    #[instrument(skip(self, office), fields(office = office.code()))]
    pub async fn get(&self, code: &str, number: &str, office: &Office) -> Result<Transaction> {
        let request = ReadRequest::transaction(office.code(), code, number);
        let response = self.connector.send_document(&request).await?;
        TransactionMapper::map(&response)
    }

    #[instrument(skip(self, transaction))]
    pub async fn send(&self, transaction: &Transaction) -> Result<()> {
        self.send_all(std::slice::from_ref(transaction)).await
    }

    #[instrument(skip(self, transactions), fields(count = transactions.len()))]
    pub async fn send_all(&self, transactions: &[Transaction]) -> Result<()> {
        if transactions.is_empty() {
            return Err(Error::EmptyBatch {
                entity: "Transaction",
            });
        }

        let mut document = TransactionsDocument::new();
        for transaction in transactions {
            document.add_transaction(transaction);
        }

        self.connector.send_document(&document).await?;
        Ok(())
    }
}
