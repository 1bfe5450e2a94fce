//! Commit history validation
//!
//! Validates that every commit in a revision range (or the whole history)
//! carries a well-formed conventional commit message. Fail-fast is the
//! default contract; [check_history_report] collects all message failures
//! instead, for callers that want statistics over a noisy history.

use crate::domain::ConventionalCommit;
use crate::error::{ConventionError, Result};
use crate::git::{short_id, Repository};
use git2::Oid;

/// A resolved `START..END` revision range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevRange {
    /// Lower bound, exclusive
    pub start: Oid,
    /// Upper bound, inclusive
    pub end: Oid,
}

/// Parse and resolve a revision range in the format `START..END`.
///
/// Both endpoints must resolve to commits in the repository.
pub fn parse_rev_range<R: Repository>(repo: &R, spec: &str) -> Result<RevRange> {
    let (start, end) = spec.split_once("..").ok_or_else(|| {
        ConventionError::revision(format!(
            "invalid revision range: {}. Expected format: START..END",
            spec
        ))
    })?;

    Ok(RevRange {
        start: repo.rev_parse(start)?,
        end: repo.rev_parse(end)?,
    })
}

/// A single commit that failed validation
#[derive(Debug)]
pub struct CheckFailure {
    /// Abbreviated hash of the offending commit
    pub id: String,
    /// First line of the offending message
    pub summary: String,
    pub error: ConventionError,
}

/// Outcome of a non-fail-fast validation run
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of commits examined
    pub checked: usize,
    pub failures: Vec<CheckFailure>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Validate every commit in the range, stopping at the first failure.
///
/// With no range, validates the whole history reachable from HEAD. An
/// empty repository validates zero commits. Returns the number of commits
/// checked.
pub fn check_history<R: Repository>(repo: &R, range: Option<&RevRange>) -> Result<usize> {
    run_check(repo, range, true).map(|report| report.checked)
}

/// Validate every commit in the range, collecting all message failures.
///
/// Infrastructure errors (git failures, non-text messages) still surface
/// immediately; only conventional-commit violations are collected.
pub fn check_history_report<R: Repository>(
    repo: &R,
    range: Option<&RevRange>,
) -> Result<CheckReport> {
    run_check(repo, range, false)
}

fn run_check<R: Repository>(
    repo: &R,
    range: Option<&RevRange>,
    fail_fast: bool,
) -> Result<CheckReport> {
    let (from, until) = match range {
        Some(range) => (Some(range.end), Some(range.start)),
        None => (repo.head_commit()?, None),
    };
    let from = match from {
        Some(from) => from,
        None => return Ok(CheckReport::default()),
    };

    let mut report = CheckReport::default();
    for item in repo.walk(from, until, None)? {
        let info = item?;
        report.checked += 1;

        if let Err(e) = ConventionalCommit::from_message(&info.message) {
            if fail_fast || !e.is_message_failure() {
                return Err(ConventionError::for_commit(&info.hash, e));
            }
            report.failures.push(CheckFailure {
                id: short_id(&info.hash).to_string(),
                summary: info.message.lines().next().unwrap_or_default().to_string(),
                error: e,
            });
        }
    }

    Ok(report)
}
