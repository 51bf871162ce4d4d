//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap backend calls with a deadline
//! - Clamp configured deadlines to the fixed ceiling
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other transport errors

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::{TempoError, TempoResult};

/// Upper bound on the duration of any single backend request.
pub const MAX_REQUEST_DURATION: Duration = Duration::from_secs(30);

/// Clamp a requested deadline into `(0, MAX_REQUEST_DURATION]`.
pub fn effective_deadline(requested: Duration) -> Duration {
    if requested.is_zero() {
        MAX_REQUEST_DURATION
    } else {
        requested.min(MAX_REQUEST_DURATION)
    }
}

/// Run `fut`, failing with [`TempoError::Timeout`] if it outlives `limit`.
pub async fn with_deadline<F, T>(limit: Duration, fut: F) -> TempoResult<T>
where
    F: Future<Output = TempoResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(TempoError::Timeout(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_deadline() {
        assert_eq!(effective_deadline(Duration::ZERO), MAX_REQUEST_DURATION);
        assert_eq!(effective_deadline(Duration::from_secs(5)), Duration::from_secs(5));
        assert_eq!(effective_deadline(Duration::from_secs(300)), MAX_REQUEST_DURATION);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let result: TempoResult<()> = with_deadline(Duration::from_millis(20), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(TempoError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline(Duration::from_secs(1), async { Ok::<_, TempoError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
