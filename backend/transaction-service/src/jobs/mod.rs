/// Background jobs
pub mod expiry_sweeper;

pub use expiry_sweeper::{run_expiry_sweeper, sweep_once, STALE_AFTER_MINUTES, SWEEP_INTERVAL};
