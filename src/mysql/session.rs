// ABOUTME: Session abstraction over a single live server connection
// ABOUTME: Catalog queries, statement execution and row streaming used by every command

use crate::mysql::catalog::{self, Column, Schema, Table};
use crate::mysql::values::{self, Record};
use anyhow::{Context, Result};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Row};

/// Everything a command needs from a live connection
///
/// Implemented by [`MySqlSession`] for real servers. One session is opened
/// per command and used sequentially; the `&mut` receivers keep session-level
/// state such as `foreign_key_checks` exclusive to one caller at a time.
#[async_trait]
pub trait Session: Send {
    /// All user schemas, ordered by name
    async fn list_schemas(&mut self) -> Result<Vec<Schema>>;

    /// Base tables (views excluded) of `schema`, ordered by name
    async fn list_tables(&mut self, schema: &str) -> Result<Vec<Table>>;

    /// Columns of `table`, ordered by ordinal position
    async fn list_columns(&mut self, table: &Table) -> Result<Vec<Column>>;

    /// Collations supported by the server, sorted
    async fn list_collations(&mut self) -> Result<Vec<String>>;

    /// Storage engines available on the server, sorted
    async fn list_engines(&mut self) -> Result<Vec<String>>;

    /// Run a statement, discarding any result set
    async fn execute(&mut self, sql: &str) -> Result<()>;

    /// Stream the rows of a query into `sink`, returning the number of rows seen
    ///
    /// Rows are not buffered; `sink` is called once per row as it arrives.
    async fn for_each_record(
        &mut self,
        sql: &str,
        sink: &mut (dyn FnMut(Record) -> Result<()> + Send),
    ) -> Result<u64>;
}

/// A session on a MariaDB/MySQL server
pub struct MySqlSession {
    conn: Conn,
}

impl MySqlSession {
    pub fn new(conn: Conn) -> Self {
        Self { conn }
    }

    /// Close the connection gracefully
    pub async fn disconnect(self) -> Result<()> {
        self.conn
            .disconnect()
            .await
            .context("Failed to close the database connection")
    }
}

#[async_trait]
impl Session for MySqlSession {
    async fn list_schemas(&mut self) -> Result<Vec<Schema>> {
        let rows: Vec<Row> = self
            .conn
            .query(catalog::LIST_SCHEMAS)
            .await
            .context("Failed to list schemas")?;

        Ok(rows.iter().map(Schema::from_row).collect())
    }

    async fn list_tables(&mut self, schema: &str) -> Result<Vec<Table>> {
        let rows: Vec<Row> = self
            .conn
            .exec(catalog::LIST_TABLES, (schema, catalog::BASE_TABLE))
            .await
            .with_context(|| format!("Failed to list tables of schema '{}'", schema))?;

        Ok(rows.iter().map(Table::from_row).collect())
    }

    async fn list_columns(&mut self, table: &Table) -> Result<Vec<Column>> {
        let rows: Vec<Row> = self
            .conn
            .exec(
                catalog::LIST_COLUMNS,
                (table.schema.as_str(), table.name.as_str()),
            )
            .await
            .with_context(|| {
                format!(
                    "Failed to list columns of table '{}'",
                    table.qualified_name(catalog::Quoting::Bare)
                )
            })?;

        Ok(rows.iter().map(Column::from_row).collect())
    }

    async fn list_collations(&mut self) -> Result<Vec<String>> {
        let rows: Vec<Row> = self
            .conn
            .query(catalog::LIST_COLLATIONS)
            .await
            .context("Failed to list collations")?;

        let mut collations: Vec<String> = rows
            .iter()
            .map(|row| catalog::text(row, "Collation"))
            .filter(|name| !name.is_empty())
            .collect();
        collations.sort();
        Ok(collations)
    }

    async fn list_engines(&mut self) -> Result<Vec<String>> {
        let rows: Vec<Row> = self
            .conn
            .query(catalog::LIST_ENGINES)
            .await
            .context("Failed to list storage engines")?;

        let mut engines: Vec<String> = rows
            .iter()
            .filter(|row| !catalog::text(row, "Support").eq_ignore_ascii_case("NO"))
            .map(|row| catalog::text(row, "Engine"))
            .filter(|name| !name.is_empty())
            .collect();
        engines.sort();
        Ok(engines)
    }

    async fn execute(&mut self, sql: &str) -> Result<()> {
        tracing::debug!("Executing: {}", sql);
        self.conn
            .query_drop(sql)
            .await
            .with_context(|| format!("Statement failed: {}", sql))
    }

    async fn for_each_record(
        &mut self,
        sql: &str,
        sink: &mut (dyn FnMut(Record) -> Result<()> + Send),
    ) -> Result<u64> {
        // The binary protocol keeps numbers and dates typed
        let mut result = self
            .conn
            .exec_iter(sql, ())
            .await
            .with_context(|| format!("Query failed: {}", sql))?;

        let mut count = 0u64;
        while let Some(row) = result
            .next()
            .await
            .with_context(|| format!("Failed to read a row of: {}", sql))?
        {
            sink(values::row_to_record(&row))?;
            count += 1;
        }

        Ok(count)
    }
}
