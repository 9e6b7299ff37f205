//! # clustervet-core
//!
//! Shared foundation for the clustervet harness:
//!
//! - [`Value`] / [`Row`] / [`QueryResult`] - the shape of query results
//! - [`Statement`] - parameterized statement construction
//! - [`NodeConfig`] / [`ClusterConfig`] - resolved cluster topology
//! - [`Connector`] / [`Session`] - the seam to the real database client
//! - [`Error`] - the harness error taxonomy
//!
//! This crate knows nothing about any concrete wire protocol or SQL
//! driver. Concrete clients live behind the [`Connector`] trait so the
//! harness can be exercised against a fake cluster in tests.

pub mod client;
pub mod config;
pub mod error;
pub mod row;
pub mod statement;
pub mod value;

pub use client::{Connector, Session};
pub use config::{ClusterConfig, Credentials, NodeConfig, NodeId, Role};
pub use error::{Error, Result};
pub use row::{QueryResult, Row};
pub use statement::{is_safe_identifier, scratch_table_name, unique_suffix, Statement};
pub use value::Value;
