//! Test support: an in-memory fake cluster behind the connector seam.
//!
//! The fake interprets exactly the statements the checks issue (echo,
//! status reads, scratch DDL/DML) against shared per-node views. Writes
//! become visible on the origin node immediately and on other nodes only
//! after `replication_delay` further statement executions, which is what
//! lets the poller's convergence behavior be exercised without a real
//! cluster or real waits. Health facts can be overridden per node, and
//! nodes can be made unreachable, query-failing, or non-convergent.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clustervet::{
    ClusterConfig, Clock, Connector, Credentials, Error, Harness, NodeConfig, NodeId,
    QueryResult, Result, Role, Row, Session, Statement, Value,
};

// ============================================================================
// Manual clock
// ============================================================================

/// A clock that only advances when slept on. Cloned handles share time.
#[derive(Clone)]
pub struct ManualClock {
    base: Instant,
    advanced: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            advanced: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Total time slept so far.
    pub fn elapsed(&self) -> Duration {
        self.advanced.get()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.advanced.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advanced.set(self.advanced.get() + duration);
    }
}

// ============================================================================
// Fake cluster
// ============================================================================

struct FakeNode {
    name: String,
    address: String,
    overrides: HashMap<String, String>,
    replicates: bool,
    reachable: bool,
    failing: bool,
}

struct ScratchRow {
    origin_node: NodeId,
    origin: String,
    payload: String,
    inserted_at: u64,
}

struct State {
    cluster_name: String,
    nodes: Vec<(NodeId, FakeNode)>,
    tables: HashMap<String, Vec<ScratchRow>>,
    created: Vec<String>,
    dropped: Vec<String>,
    ticks: u64,
    replication_delay: u64,
    connects: usize,
}

impl State {
    fn node(&self, id: &NodeId) -> &FakeNode {
        self.nodes
            .iter()
            .find(|(nid, _)| nid == id)
            .map(|(_, node)| node)
            .expect("fake node exists")
    }

    fn node_mut(&mut self, id: &NodeId) -> &mut FakeNode {
        self.nodes
            .iter_mut()
            .find(|(nid, _)| nid == id)
            .map(|(_, node)| node)
            .expect("fake node exists")
    }

    fn status_value(&self, id: &NodeId, variable: &str) -> Option<String> {
        let node = self.node(id);
        if let Some(value) = node.overrides.get(variable) {
            return Some(value.clone());
        }
        match variable {
            "wsrep_cluster_size" => Some(self.nodes.len().to_string()),
            "wsrep_local_state_comment" => Some("Synced".to_string()),
            "wsrep_ready" => Some("ON".to_string()),
            "wsrep_cluster_name" => Some(self.cluster_name.clone()),
            "wsrep_node_name" => Some(node.name.clone()),
            "wsrep_node_address" => Some(node.address.clone()),
            _ => None,
        }
    }

    fn visible(&self, row: &ScratchRow, observer: &NodeId) -> bool {
        if &row.origin_node == observer {
            return true;
        }
        self.node(observer).replicates
            && self.ticks >= row.inserted_at + self.replication_delay
    }
}

/// Handle to the shared fake cluster; hand its [`connector`] to a harness.
///
/// [`connector`]: FakeCluster::connector
pub struct FakeCluster {
    state: Rc<RefCell<State>>,
}

impl FakeCluster {
    /// A healthy cluster matching `config`: every node synced, ready,
    /// uniquely named `galera-{id}`, advertising its configured address.
    pub fn healthy(config: &ClusterConfig) -> Self {
        let nodes = config
            .nodes
            .iter()
            .map(|node| {
                (
                    node.id.clone(),
                    FakeNode {
                        name: format!("galera-{}", node.id),
                        address: node.address.clone(),
                        overrides: HashMap::new(),
                        replicates: true,
                        reachable: true,
                        failing: false,
                    },
                )
            })
            .collect();
        Self {
            state: Rc::new(RefCell::new(State {
                cluster_name: config.cluster_name.clone(),
                nodes,
                tables: HashMap::new(),
                created: Vec::new(),
                dropped: Vec::new(),
                ticks: 0,
                replication_delay: 2,
                connects: 0,
            })),
        }
    }

    pub fn connector(&self) -> Box<dyn Connector> {
        Box::new(FakeConnector {
            state: self.state.clone(),
        })
    }

    /// Override a status variable on one node.
    pub fn set_status(&self, node: &NodeId, variable: &str, value: &str) {
        self.state
            .borrow_mut()
            .node_mut(node)
            .overrides
            .insert(variable.to_string(), value.to_string());
    }

    /// Rows written elsewhere never become visible on this node.
    pub fn halt_replication(&self, node: &NodeId) {
        self.state.borrow_mut().node_mut(node).replicates = false;
    }

    /// Connection attempts against this node fail.
    pub fn make_unreachable(&self, node: &NodeId) {
        self.state.borrow_mut().node_mut(node).reachable = false;
    }

    /// Every statement on this node fails.
    pub fn fail_queries(&self, node: &NodeId) {
        self.state.borrow_mut().node_mut(node).failing = true;
    }

    /// How many replicated statement executions a write needs before it
    /// becomes visible on other nodes.
    pub fn set_replication_delay(&self, ticks: u64) {
        self.state.borrow_mut().replication_delay = ticks;
    }

    /// Tables created and not yet dropped.
    pub fn live_tables(&self) -> Vec<String> {
        self.state.borrow().tables.keys().cloned().collect()
    }

    /// Every table name ever created.
    pub fn created_tables(&self) -> Vec<String> {
        self.state.borrow().created.clone()
    }

    /// Every table name ever dropped.
    pub fn dropped_tables(&self) -> Vec<String> {
        self.state.borrow().dropped.clone()
    }

    /// Number of sessions opened through the connector.
    pub fn connect_count(&self) -> usize {
        self.state.borrow().connects
    }
}

struct FakeConnector {
    state: Rc<RefCell<State>>,
}

impl Connector for FakeConnector {
    fn connect(&self, node: &NodeConfig, _role: Role) -> Result<Box<dyn Session>> {
        let mut state = self.state.borrow_mut();
        state.connects += 1;
        if !state.node(&node.id).reachable {
            return Err(Error::Connection {
                node: node.id.clone(),
                address: format!("{}:{}", node.address, node.port),
                reason: "connection refused".to_string(),
            });
        }
        Ok(Box::new(FakeSession {
            state: self.state.clone(),
            node: node.id.clone(),
        }))
    }
}

struct FakeSession {
    state: Rc<RefCell<State>>,
    node: NodeId,
}

impl FakeSession {
    fn query_err(&self, statement: &Statement, reason: &str) -> Error {
        Error::Query {
            node: self.node.clone(),
            statement: statement.text().to_string(),
            reason: reason.to_string(),
        }
    }
}

fn table_name(after_keyword: &str) -> &str {
    after_keyword
        .split(|c: char| c == ' ' || c == '(')
        .next()
        .unwrap_or("")
}

fn text_param(statement: &Statement, index: usize) -> String {
    statement
        .params()
        .get(index)
        .map(|v| v.to_text())
        .unwrap_or_default()
}

impl Session for FakeSession {
    fn execute(&mut self, statement: &Statement) -> Result<QueryResult> {
        let mut state = self.state.borrow_mut();
        state.ticks += 1;

        if state.node(&self.node).failing {
            drop(state);
            return Err(self.query_err(statement, "injected failure"));
        }

        let text = statement.text();

        if text == "SELECT ? AS echo" {
            let mut row = Row::new();
            row.push(
                "echo",
                statement.params().first().cloned().unwrap_or(Value::Null),
            );
            return Ok(vec![row]);
        }

        if let Some(rest) = text.strip_prefix("SHOW GLOBAL STATUS LIKE '") {
            let variable = rest.trim_end_matches('\'');
            return Ok(match state.status_value(&self.node, variable) {
                Some(value) => {
                    let mut row = Row::new();
                    row.push("Variable_name", Value::Text(variable.to_string()));
                    row.push("Value", Value::Text(value));
                    vec![row]
                }
                // Unknown variables come back as zero rows, like the server.
                None => Vec::new(),
            });
        }

        if let Some(rest) = text.strip_prefix("CREATE TABLE ") {
            let table = table_name(rest).to_string();
            if state.tables.contains_key(&table) {
                drop(state);
                return Err(self.query_err(statement, "table already exists"));
            }
            state.tables.insert(table.clone(), Vec::new());
            state.created.push(table);
            return Ok(Vec::new());
        }

        if let Some(rest) = text.strip_prefix("DROP TABLE IF EXISTS ") {
            let table = table_name(rest).to_string();
            state.tables.remove(&table);
            state.dropped.push(table);
            return Ok(Vec::new());
        }

        if let Some(rest) = text.strip_prefix("INSERT INTO ") {
            let table = table_name(rest).to_string();
            let origin = text_param(statement, 0);
            let payload = text_param(statement, 1);
            let inserted_at = state.ticks;
            let origin_node = self.node.clone();
            match state.tables.get_mut(&table) {
                Some(rows) => {
                    rows.push(ScratchRow {
                        origin_node,
                        origin,
                        payload,
                        inserted_at,
                    });
                    return Ok(Vec::new());
                }
                None => {
                    drop(state);
                    return Err(self.query_err(statement, "no such table"));
                }
            }
        }

        if let Some(rest) = text.strip_prefix("SELECT COUNT(*) AS n FROM ") {
            let (table, origin) = match rest.split_once(" WHERE origin = ?") {
                Some((table, _)) => (table.trim(), Some(text_param(statement, 0))),
                None => (rest.trim(), None),
            };
            let Some(rows) = state.tables.get(table) else {
                drop(state);
                return Err(self.query_err(statement, "no such table"));
            };
            let count = rows
                .iter()
                .filter(|row| state.visible(row, &self.node))
                .filter(|row| origin.as_deref().map_or(true, |o| row.origin == o))
                .count() as i64;
            let mut row = Row::new();
            row.push("n", Value::Int(count));
            return Ok(vec![row]);
        }

        if let Some(rest) = text.strip_prefix("SELECT origin, payload FROM ") {
            let Some((table, _)) = rest.split_once(" WHERE origin = ? ORDER BY id") else {
                drop(state);
                return Err(self.query_err(statement, "unsupported select"));
            };
            let origin = text_param(statement, 0);
            let Some(rows) = state.tables.get(table.trim()) else {
                drop(state);
                return Err(self.query_err(statement, "no such table"));
            };
            let result = rows
                .iter()
                .filter(|row| state.visible(row, &self.node) && row.origin == origin)
                .map(|row| {
                    let mut out = Row::new();
                    out.push("origin", Value::Text(row.origin.clone()));
                    out.push("payload", Value::Text(row.payload.clone()));
                    out
                })
                .collect();
            return Ok(result);
        }

        drop(state);
        Err(self.query_err(statement, "unsupported statement"))
    }
}

// ============================================================================
// Builders
// ============================================================================

/// A `node1..nodeN` topology on 10.87.2.2x, Galera-style defaults.
pub fn cluster_config(node_count: usize) -> ClusterConfig {
    let nodes = (1..=node_count)
        .map(|index| NodeConfig {
            id: NodeId::new(format!("node{index}")),
            address: format!("10.87.2.{}", 21 + index),
            port: 3306,
            standard: Credentials {
                username: "appuser".to_string(),
                password: "apppw".to_string(),
            },
            privileged: Credentials {
                username: "root".to_string(),
                password: "rootpw".to_string(),
            },
            database: "appdb".to_string(),
        })
        .collect();
    ClusterConfig {
        cluster_name: "test_galera_cluster".to_string(),
        nodes,
    }
}

/// A harness over the fake cluster, driven by a manual clock so polls
/// never really sleep. Returns the clock handle for timing assertions.
pub fn manual_harness(cluster: &FakeCluster, config: ClusterConfig) -> (Harness, ManualClock) {
    let clock = ManualClock::new();
    let harness = Harness::with_clock(config, cluster.connector(), Box::new(clock.clone()))
        .expect("valid test topology");
    (harness, clock)
}
