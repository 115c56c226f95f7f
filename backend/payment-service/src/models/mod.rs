pub mod payment;

pub use payment::{CreatePaymentBody, Payment, PaymentView, UpdatePaymentBody};
