//! Resilience patterns for Storefront services
//!
//! Every store call is bounded by a timeout, and a timed-out call is
//! reported the same way as a failed one. Retries and circuit breaking are
//! intentionally absent.
//!
//! # Example: Store Call with Timeout
//!
//! ```rust,no_run
//! use resilience::{with_timeout_result, TimeoutError};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), TimeoutError<std::io::Error>> {
//! let rows = with_timeout_result(Duration::from_secs(5), async {
//!     // Your database query
//!     Ok::<_, std::io::Error>(3)
//! })
//! .await?;
//! assert_eq!(rows, 3);
//! # Ok(())
//! # }
//! ```

pub mod timeout;

pub use timeout::{with_timeout_result, TimeoutError};
