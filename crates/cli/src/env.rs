//! Environment configuration loader.
//!
//! The harness itself never reads configuration storage; this module
//! resolves everything into a [`ClusterConfig`] before any check runs.
//!
//! Variables (a `.env` file in the working directory is honored):
//!
//! - `HOST1_IP`, `HOST2_IP`, ... - one per node, scanned from 1 until the
//!   first gap; at least two are required
//! - `DB_PORT` - optional, defaults to 3306
//! - `MYSQL_USER` / `MYSQL_PASSWORD` - standard role
//! - `MYSQL_ROOT_PASSWORD` - privileged role (user `root`)
//! - `MYSQL_DATABASE` - database to bind sessions to
//! - `CLUSTER_NAME` - the name every node must report
//!
//! Compose-style files escape `$` as `$$`; passwords are unescaped here.

use clustervet_core::{ClusterConfig, Credentials, Error, NodeConfig, NodeId, Result};

const DEFAULT_PORT: u16 = 3306;

/// Load the cluster configuration from the process environment,
/// honoring a `.env` file if one is present.
pub fn load() -> Result<ClusterConfig> {
    let _ = dotenvy::dotenv();
    from_env(|key| std::env::var(key).ok())
}

/// Resolve a [`ClusterConfig`] through an arbitrary variable lookup.
pub fn from_env<F>(get: F) -> Result<ClusterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let username = require(&get, "MYSQL_USER")?;
    let password = unescape(&require(&get, "MYSQL_PASSWORD")?);
    let root_password = unescape(&require(&get, "MYSQL_ROOT_PASSWORD")?);
    let database = require(&get, "MYSQL_DATABASE")?;
    let cluster_name = require(&get, "CLUSTER_NAME")?;

    let port = match get("DB_PORT") {
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::config(format!("DB_PORT is not a valid port: {raw}")))?,
        None => DEFAULT_PORT,
    };

    let mut nodes = Vec::new();
    for index in 1.. {
        let Some(address) = get(&format!("HOST{index}_IP")) else {
            break;
        };
        nodes.push(NodeConfig {
            id: NodeId::new(format!("node{index}")),
            address,
            port,
            standard: Credentials {
                username: username.clone(),
                password: password.clone(),
            },
            privileged: Credentials {
                username: "root".to_string(),
                password: root_password.clone(),
            },
            database: database.clone(),
        });
    }

    let config = ClusterConfig {
        cluster_name,
        nodes,
    };
    config.validate()?;
    Ok(config)
}

fn require<F>(get: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(key)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::config(format!("{key} is not set")))
}

fn unescape(raw: &str) -> String {
    raw.replace("$$", "$")
}
