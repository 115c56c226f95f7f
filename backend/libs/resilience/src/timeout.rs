//! Timeout wrapper for async operations
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Debug, thiserror::Error)]
pub enum TimeoutError<E> {
    #[error("Operation timed out after {0:?}")]
    Elapsed(Duration),
    #[error("Operation failed: {0}")]
    OperationFailed(#[source] E),
}

/// Execute a fallible future with timeout, keeping the operation's own error
pub async fn with_timeout_result<F, T, E>(duration: Duration, future: F) -> Result<T, TimeoutError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match timeout(duration, future).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(TimeoutError::OperationFailed(e)),
        Err(_) => {
            tracing::warn!(timeout_ms = duration.as_millis() as u64, "Operation timed out");
            Err(TimeoutError::Elapsed(duration))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_result_success() {
        let result = with_timeout_result(Duration::from_secs(1), async { Ok::<_, String>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_result_keeps_operation_error() {
        let result = with_timeout_result(Duration::from_secs(1), async {
            Err::<i32, _>(std::io::Error::new(std::io::ErrorKind::Other, "operation failed"))
        })
        .await;

        match result {
            Err(TimeoutError::OperationFailed(e)) => assert_eq!(e.to_string(), "operation failed"),
            other => panic!("expected operation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_result_elapsed() {
        let result = with_timeout_result(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, std::io::Error>(())
        })
        .await;

        assert!(matches!(result, Err(TimeoutError::Elapsed(d)) if d == Duration::from_millis(10)));
    }
}
