//! Upper bound on how long a single store or cache call may run.
//!
//! Each request carries one budget. Calls that exceed it are abandoned by
//! dropping their future, which releases any pooled connection they held.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Budget applied when configuration does not supply one.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(100);

/// Raised when an operation outlives its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{operation} exceeded its {budget:?} deadline")]
pub struct DeadlineExceeded {
    pub operation: &'static str,
    pub budget: Duration,
}

/// Per-operation time budget.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use taskboard::domain::{DeadlineExceeded, OperationDeadline};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let deadline = OperationDeadline::new(Duration::from_millis(5));
/// let result: Result<(), DeadlineExceeded> = deadline
///     .run("sleepy", async {
///         tokio::time::sleep(Duration::from_secs(1)).await;
///         Ok(())
///     })
///     .await;
/// assert!(result.is_err());
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationDeadline(Duration);

impl OperationDeadline {
    pub fn new(budget: Duration) -> Self {
        Self(budget)
    }

    pub fn budget(self) -> Duration {
        self.0
    }

    /// Drive `fut` to completion or abandon it once the budget elapses.
    pub async fn run<T, E, Fut>(self, operation: &'static str, fut: Fut) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: From<DeadlineExceeded>,
    {
        match tokio::time::timeout(self.0, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, budget_ms = self.0.as_millis(), "operation deadline exceeded");
                Err(DeadlineExceeded {
                    operation,
                    budget: self.0,
                }
                .into())
            }
        }
    }
}

impl Default for OperationDeadline {
    fn default() -> Self {
        Self(DEFAULT_OPERATION_TIMEOUT)
    }
}
