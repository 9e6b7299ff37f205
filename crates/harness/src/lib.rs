//! # clustervet-harness
//!
//! Black-box verification of an already-running, eventually-synchronous
//! database cluster. The harness contains no distributed-systems logic of
//! its own; it only observes a cluster through ordinary client queries
//! and asserts properties about what it sees.
//!
//! Layers, leaf first:
//!
//! - [`NodeRegistry`] - one lazily-opened session per `(node, role)` pair
//! - [`Executor`] - statement execution against a named node
//! - [`poll_until`] - bounded poll-with-timeout for eventually-consistent
//!   assertions
//! - [`checks`] - the verification routines themselves
//! - [`run_all`] - ordered execution with per-check failure isolation,
//!   producing a [`Report`]
//!
//! ```ignore
//! use clustervet_harness::{checks, run_all, Harness};
//!
//! let mut harness = Harness::new(config, connector)?;
//! let report = run_all(&mut harness, &checks::default_suite());
//! harness.close();
//! std::process::exit(report.exit_code());
//! ```

pub mod checks;
mod executor;
mod harness;
mod poll;
mod registry;
mod runner;

pub use executor::Executor;
pub use harness::Harness;
pub use poll::{poll_until, Clock, PollConfig, SystemClock};
pub use registry::NodeRegistry;
pub use runner::{run_all, Check, CheckFn, CheckOutcome, CheckStatus, Report};
