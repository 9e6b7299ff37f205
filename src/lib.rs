//! clustervet - black-box verification harness for multi-node database
//! clusters.
//!
//! The harness validates the externally observable behavior of an
//! already-running, eventually-synchronous cluster - connectivity,
//! membership, replication, consistency - through ordinary client
//! queries. It implements no consensus or replication itself; it only
//! observes and asserts.
//!
//! # Quick Start
//!
//! ```ignore
//! use clustervet::{checks, run_all, Harness};
//!
//! let mut harness = Harness::new(config, connector)?;
//! let report = run_all(&mut harness, &checks::default_suite());
//! harness.close();
//! std::process::exit(report.exit_code());
//! ```
//!
//! # Architecture
//!
//! Sessions are cached per `(node, role)` by the registry and opened
//! lazily. Checks run strictly in order with per-check failure isolation;
//! eventually-consistent assertions go through a bounded
//! poll-with-timeout primitive instead of fixed sleeps. The concrete
//! database client stays behind the [`Connector`]/[`Session`] seam, which
//! is also what the test suite's fake cluster plugs into.

pub use clustervet_core::{
    is_safe_identifier, scratch_table_name, unique_suffix, ClusterConfig, Connector,
    Credentials, Error, NodeConfig, NodeId, QueryResult, Result, Role, Row, Session, Statement,
    Value,
};
pub use clustervet_harness::{
    checks, poll_until, run_all, Check, CheckFn, CheckOutcome, CheckStatus, Clock, Executor,
    Harness, NodeRegistry, PollConfig, Report, SystemClock,
};
