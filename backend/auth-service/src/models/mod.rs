pub mod user;

pub use user::{Credentials, Registration, User};
