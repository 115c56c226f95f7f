pub mod transaction;

pub use transaction::{
    CreateTransactionBody, Transaction, TransactionView, UpdateTransactionBody, STATUS_FAILED,
    STATUS_PENDING, STATUS_SUCCESS,
};
