pub mod auth;

pub use auth::{configure, json_config, login, register};
