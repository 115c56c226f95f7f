pub mod transactions;

pub use transactions::{MongoTransactionRepository, SweepOutcome, TransactionRepository};
