//! MySQL/MariaDB client behind the harness's connector seam.
//!
//! One [`mysql::Conn`] per `(node, role)` pair, opened by the registry on
//! first use. Statements without parameters go over the text protocol
//! (SHOW and DDL are not always preparable); parameterized statements are
//! prepared and executed with positional binds.

use clustervet_core::{
    Connector, Error, NodeConfig, NodeId, QueryResult, Result, Role, Row, Session, Statement,
    Value,
};
use mysql::prelude::Queryable;
use mysql::{Conn, OptsBuilder, Params};

/// Opens MySQL sessions against cluster nodes.
pub struct MysqlConnector;

impl Connector for MysqlConnector {
    fn connect(&self, node: &NodeConfig, role: Role) -> Result<Box<dyn Session>> {
        let credentials = node.credentials(role);
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(node.address.clone()))
            .tcp_port(node.port)
            .user(Some(credentials.username.clone()))
            .pass(Some(credentials.password.clone()))
            .db_name(Some(node.database.clone()));

        let conn = Conn::new(opts).map_err(|err| Error::Connection {
            node: node.id.clone(),
            address: format!("{}:{}", node.address, node.port),
            reason: err.to_string(),
        })?;

        Ok(Box::new(MysqlSession {
            node: node.id.clone(),
            conn,
        }))
    }
}

struct MysqlSession {
    node: NodeId,
    conn: Conn,
}

impl Session for MysqlSession {
    fn execute(&mut self, statement: &Statement) -> Result<QueryResult> {
        let outcome = if statement.params().is_empty() {
            self.conn.query::<mysql::Row, _>(statement.text())
        } else {
            let params =
                Params::Positional(statement.params().iter().map(to_driver).collect());
            self.conn
                .exec::<mysql::Row, _, _>(statement.text(), params)
        };

        let rows = outcome.map_err(|err| Error::Query {
            node: self.node.clone(),
            statement: statement.text().to_string(),
            reason: err.to_string(),
        })?;

        Ok(rows.into_iter().map(to_row).collect())
    }
}

fn to_driver(value: &Value) -> mysql::Value {
    match value {
        Value::Null => mysql::Value::NULL,
        Value::Bool(b) => mysql::Value::Int(i64::from(*b)),
        Value::Int(i) => mysql::Value::Int(*i),
        Value::Float(f) => mysql::Value::Double(*f),
        Value::Text(s) => mysql::Value::Bytes(s.clone().into_bytes()),
        Value::Bytes(b) => mysql::Value::Bytes(b.clone()),
    }
}

fn to_row(row: mysql::Row) -> Row {
    let columns = row.columns();
    let mut out = Row::new();
    for (index, column) in columns.iter().enumerate() {
        let value = row
            .as_ref(index)
            .cloned()
            .map(from_driver)
            .unwrap_or(Value::Null);
        out.push(column.name_str().into_owned(), value);
    }
    out
}

fn from_driver(value: mysql::Value) -> Value {
    match value {
        mysql::Value::NULL => Value::Null,
        mysql::Value::Int(i) => Value::Int(i),
        mysql::Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Text(u.to_string()),
        },
        mysql::Value::Float(f) => Value::Float(f64::from(f)),
        mysql::Value::Double(d) => Value::Float(d),
        mysql::Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Value::Text(text),
            Err(err) => Value::Bytes(err.into_bytes()),
        },
        mysql::Value::Date(year, month, day, hour, minute, second, micros) => Value::Text(
            format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"),
        ),
        mysql::Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = u32::from(hours) + days * 24;
            Value::Text(format!(
                "{sign}{hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
            ))
        }
    }
}
