//! Update reconciliation.
//!
//! A zero-row update is ambiguous: either no row has that id, or the row already holds the
//! submitted values. The existence check separates the two.

use crate::error::AppError;
use std::future::Future;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one column changed.
    Changed,
    /// The row exists and already held the submitted values.
    Unchanged,
}

/// Resolve an update result. `exists` only runs when `affected == 0`; `not_found` builds the
/// error returned when the row is absent.
pub async fn reconcile<F, Fut>(
    affected: u64,
    exists: F,
    not_found: impl FnOnce() -> AppError,
) -> Result<UpdateOutcome, AppError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<bool, AppError>>,
{
    if affected > 0 {
        return Ok(UpdateOutcome::Changed);
    }
    if exists().await? {
        Ok(UpdateOutcome::Unchanged)
    } else {
        Err(not_found())
    }
}
