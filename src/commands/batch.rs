//! Per-plan batch execution for commands taking several plan ids

use crate::error::{ConveyorError, Result};
use crate::output;
use std::future::Future;

/// What happened across a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub total: usize,
    /// `(id, error message)` per failed item
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.total - self.failures.len()
    }

    /// Fail with `message` only when nothing succeeded
    pub fn ensure_any_succeeded(&self, message: &str) -> Result<()> {
        if self.total > 0 && self.failures.len() == self.total {
            return Err(ConveyorError::command(message));
        }
        Ok(())
    }

    /// Fail with `message` when anything failed
    pub fn ensure_all_succeeded(&self, message: &str) -> Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(ConveyorError::command(message))
    }
}

/// Run `op` on every id in order. A failure is reported and does not stop
/// the remaining items.
pub async fn run_batch<'i, F, Fut>(ids: &'i [String], verb: &str, mut op: F) -> BatchReport
where
    F: FnMut(&'i str) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut failures = Vec::new();

    for id in ids {
        if let Err(e) = op(id).await {
            let message = e.to_string();
            tracing::warn!("{} for plan {} failed: {}", verb, id, message);
            output::print_error(&format!("{} for plan {} failed: {}", verb, id, message));
            failures.push((id.clone(), message));
        }
    }

    BatchReport {
        total: ids.len(),
        failures,
    }
}
