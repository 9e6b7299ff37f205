//! Error taxonomy for the harness.
//!
//! Four runtime kinds map to the four ways a check can go wrong:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Connection` | A session could not be established |
//! | `Query` | A live session failed to execute a statement |
//! | `Timeout` | A poll predicate never held within its window |
//! | `Assertion` | An observed cluster fact did not match the expected one |
//!
//! `Config` covers resolution failures before any check runs. All of
//! these are caught at the check boundary and recorded as a failed
//! outcome; nothing propagates past the runner.

use crate::config::NodeId;
use crate::row::QueryResult;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while verifying a cluster.
#[derive(Debug, Error)]
pub enum Error {
    /// A session could not be established or reused.
    #[error("connection to node {node} ({address}) failed: {reason}")]
    Connection {
        /// Node the connection was addressed to.
        node: NodeId,
        /// Target `host:port`.
        address: String,
        /// Underlying client failure.
        reason: String,
    },

    /// A well-formed session failed to execute a statement.
    #[error("query on node {node} failed: {reason} (statement: {statement})")]
    Query {
        /// Node the statement ran on.
        node: NodeId,
        /// The statement text.
        statement: String,
        /// Underlying client failure.
        reason: String,
    },

    /// A poll's predicate never held within the allotted window.
    ///
    /// Distinct from [`Error::Query`]: the statements all executed, the
    /// cluster just never converged to the expected state. Carries the
    /// last observed result for diagnosis.
    #[error(
        "node {node} did not converge within {elapsed:?} ({attempts} attempts; last result had {} row(s))",
        .last.len()
    )]
    Timeout {
        /// Node that was being polled.
        node: NodeId,
        /// Wall time spent polling.
        elapsed: Duration,
        /// Number of times the statement was executed.
        attempts: u32,
        /// The last result observed before giving up.
        last: QueryResult,
    },

    /// An expected invariant about cluster state did not hold.
    #[error("assertion failed: {subject}: expected {expected}, observed {actual}")]
    Assertion {
        /// What was being checked, including the node involved.
        subject: String,
        /// Expected value.
        expected: String,
        /// Observed value.
        actual: String,
    },

    /// Configuration could not be resolved or is inconsistent.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What is wrong with the configuration.
        reason: String,
    },
}

impl Error {
    /// Build an [`Error::Assertion`].
    pub fn assertion(
        subject: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Error::Assertion {
            subject: subject.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Build an [`Error::Config`].
    pub fn config(reason: impl Into<String>) -> Self {
        Error::Config {
            reason: reason.into(),
        }
    }

    /// True for [`Error::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// True for [`Error::Assertion`].
    pub fn is_assertion(&self) -> bool {
        matches!(self, Error::Assertion { .. })
    }
}
