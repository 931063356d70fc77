//! Sequential per-user batch runs with an explicit failure policy

use mobility_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{info, warn};

/// What a batch does after one user fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and go on with the next user
    #[default]
    Continue,
    /// Stop at the first failure; remaining users are reported as not run
    Abort,
}

/// Result of one user's run
#[derive(Debug)]
pub struct BatchOutcome<K, T> {
    pub id: K,
    pub result: Result<T>,
}

/// Per-user outcomes of a batch, in input order
#[derive(Debug)]
pub struct BatchReport<K, T> {
    pub outcomes: Vec<BatchOutcome<K, T>>,
    /// Users never attempted because the batch aborted
    pub not_run: Vec<K>,
}

impl<K, T> BatchReport<K, T> {
    pub fn succeeded(&self) -> impl Iterator<Item = (&K, &T)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|v| (&o.id, v)))
    }

    pub fn failed(&self) -> impl Iterator<Item = (&K, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e)))
    }

    pub fn aborted(&self) -> bool {
        !self.not_run.is_empty()
    }

    pub fn is_complete_success(&self) -> bool {
        self.not_run.is_empty() && self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Run `task` for every id in order.
///
/// Users are independent; the policy only decides whether a failure stops
/// the remaining ones.
pub fn run_batch<K, T, I, F>(ids: I, policy: FailurePolicy, mut task: F) -> BatchReport<K, T>
where
    K: Display,
    I: IntoIterator<Item = K>,
    F: FnMut(&K) -> Result<T>,
{
    let mut outcomes = Vec::new();
    let mut ids = ids.into_iter();

    for id in ids.by_ref() {
        info!(user = %id, "summarizing user");
        let result = task(&id);
        let failed = match &result {
            Ok(_) => false,
            Err(err) => {
                warn!(user = %id, %err, "user failed");
                true
            }
        };
        outcomes.push(BatchOutcome { id, result });
        if failed && policy == FailurePolicy::Abort {
            break;
        }
    }

    let not_run: Vec<K> = ids.collect();
    if !not_run.is_empty() {
        warn!(remaining = not_run.len(), "batch aborted");
    }
    info!(
        done = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        "batch finished"
    );
    BatchReport { outcomes, not_run }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &&str) -> Result<usize> {
        if id.starts_with("bad") {
            Err(Error::InvalidInput(format!("no data for {id}")))
        } else {
            Ok(id.len())
        }
    }

    #[test]
    fn test_continue_runs_everyone() {
        let report = run_batch(["a", "bad1", "ccc"], FailurePolicy::Continue, task);
        assert_eq!(report.outcomes.len(), 3);
        assert!(!report.aborted());
        assert_eq!(report.succeeded().map(|(_, v)| *v).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(report.failed().map(|(id, _)| *id).collect::<Vec<_>>(), vec!["bad1"]);
        assert!(!report.is_complete_success());
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let report = run_batch(["a", "bad1", "ccc", "dd"], FailurePolicy::Abort, task);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.aborted());
        assert_eq!(report.not_run, vec!["ccc", "dd"]);
    }

    #[test]
    fn test_policy_from_json() {
        let policy: FailurePolicy = serde_json::from_str("\"abort\"").unwrap();
        assert_eq!(policy, FailurePolicy::Abort);
        assert_eq!(FailurePolicy::default(), FailurePolicy::Continue);
    }
}
