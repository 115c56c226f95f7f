pub mod payments;

pub use payments::{MongoPaymentRepository, PaymentRepository};
