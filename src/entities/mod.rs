pub mod invoice;
pub mod office;
pub mod transaction;
pub mod transaction_line;

pub use invoice::{Invoice, InvoiceLine};
pub use office::Office;
pub use transaction::{Destiny, Transaction};
pub use transaction_line::{
    DebitCredit, LineAmounts, LineField, LineType, MatchStatus, TransactionLine, ValueFields,
    allowed_fields,
};
