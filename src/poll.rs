//! Status polling
//!
//! Blocks while a server-side action runs, re-querying a status field at a
//! fixed interval and printing progress.

use crate::error::Result;
use std::future::Future;
use std::io::Write;
use std::time::Duration;

/// Status reported by one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: String,
    /// Percent complete, when the server reports it
    pub progress: Option<u64>,
}

/// How a poll loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Finished,
    Errored,
}

/// Poll until the status reaches one of `final_ok_states` or `error`.
///
/// There is no timeout: a status that never settles polls forever. Errors
/// from `fetch` end the loop and are returned unchanged.
pub async fn poll_for_status<F, Fut, W>(
    mut fetch: F,
    id: &str,
    action: &str,
    final_ok_states: &[&str],
    period: Duration,
    show_progress: bool,
    out: &mut W,
) -> Result<PollOutcome>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<StatusSnapshot>>,
    W: Write,
{
    writeln!(out)?;

    loop {
        let snapshot = fetch(id.to_string()).await?;
        let status = snapshot.status.to_lowercase();
        tracing::debug!("poll {} {}: status={}", action, id, status);

        if final_ok_states.contains(&status.as_str()) {
            print_progress(out, action, 100, show_progress)?;
            writeln!(out, "\nFinished")?;
            return Ok(PollOutcome::Finished);
        }

        if status == "error" {
            writeln!(out, "\nError {} plan", action)?;
            return Ok(PollOutcome::Errored);
        }

        print_progress(out, action, snapshot.progress.unwrap_or(0), show_progress)?;
        tokio::time::sleep(period).await;
    }
}

fn print_progress<W: Write>(out: &mut W, action: &str, progress: u64, show: bool) -> Result<()> {
    if show {
        write!(out, "\rPlan {}... {}% complete", action, progress)?;
    } else {
        write!(out, "\rPlan {}...", action)?;
    }
    out.flush()?;
    Ok(())
}
