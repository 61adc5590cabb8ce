use crate::gateway::AttemptError;
use std::future::Future;
use std::time::Duration;

/// Wall-clock budget for a single provider attempt.
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Bounds one attempt with a deadline. On expiry the attempt future is
/// dropped, which aborts the in-flight request and releases its connection;
/// a late resolution therefore cannot overwrite the recorded outcome. The
/// deadline timer is dropped on every exit path.
pub async fn with_deadline<T>(
    deadline: Duration,
    attempt: impl Future<Output = Result<T, AttemptError>>,
) -> Result<T, AttemptError> {
    match tokio::time::timeout(deadline, attempt).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => Err(AttemptError::Timeout),
    }
}
