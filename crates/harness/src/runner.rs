//! Check execution and reporting.
//!
//! Checks run strictly in the given order. A failure is recorded and the
//! suite moves on - one broken check never hides what the others would
//! have found. The [`Report`] is the single externally observable
//! decision point: exit code 0 only when every check passed.

use clustervet_core::Result;
use serde::Serialize;
use tracing::{error, info};

use crate::harness::Harness;

/// A verification routine.
pub type CheckFn = fn(&mut Harness) -> Result<()>;

/// A named check in the suite.
#[derive(Debug, Clone)]
pub struct Check {
    name: &'static str,
    run: CheckFn,
}

impl Check {
    /// Pair a name with a check function.
    pub fn new(name: &'static str, run: CheckFn) -> Self {
        Self { name, run }
    }

    /// The check's name, used in outcomes and logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Execute the check against the harness.
    pub fn run(&self, harness: &mut Harness) -> Result<()> {
        (self.run)(harness)
    }
}

/// Pass/fail status of one executed check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check ran to completion without a violation.
    Passed,
    /// The check failed; the string is the rendered failure.
    Failed(String),
}

/// The recorded result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Check name.
    pub name: String,
    /// Pass/fail plus failure detail.
    pub status: CheckStatus,
}

impl CheckOutcome {
    /// True when the check passed.
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }

    /// Failure detail, if the check failed.
    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            CheckStatus::Passed => None,
            CheckStatus::Failed(detail) => Some(detail),
        }
    }
}

/// Aggregated outcomes of one suite run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// One outcome per executed check, in order.
    pub outcomes: Vec<CheckOutcome>,
}

impl Report {
    /// Number of checks executed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of checks that passed.
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of checks that did not pass.
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// True when every check passed.
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status: 0 only when every check passed.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    /// Machine-readable rendering of the report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Execute `checks` in order against `harness`.
///
/// Every error a check surfaces - connection, query, timeout, assertion -
/// is caught here and converted into a failed [`CheckOutcome`]; nothing
/// propagates past the runner and later checks always still execute.
pub fn run_all(harness: &mut Harness, checks: &[Check]) -> Report {
    let mut outcomes = Vec::with_capacity(checks.len());

    for check in checks {
        info!(check = check.name(), "running");
        let status = match check.run(harness) {
            Ok(()) => {
                info!(check = check.name(), "passed");
                CheckStatus::Passed
            }
            Err(err) => {
                error!(check = check.name(), error = %err, "failed");
                CheckStatus::Failed(err.to_string())
            }
        };
        outcomes.push(CheckOutcome {
            name: check.name().to_string(),
            status,
        });
    }

    let report = Report { outcomes };
    if report.all_passed() {
        info!(total = report.total(), "all checks passed");
    } else {
        error!(
            passed = report.passed(),
            failed = report.failed(),
            "check suite failed"
        );
    }
    report
}
