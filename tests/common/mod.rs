// ABOUTME: In-memory Session used by the integration tests
// ABOUTME: Serves a scripted catalog, records statements and applies ALTER TABLE effects

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use mysql_admin_tools::mysql::catalog::{BASE_TABLE, VIEW};
use mysql_admin_tools::mysql::{Column, Quoting, Record, Schema, Session, Table};
use std::collections::HashMap;

#[derive(Default)]
pub struct FakeSession {
    pub schemas: Vec<Schema>,
    pub tables: Vec<Table>,
    pub columns: Vec<Column>,
    /// Rows keyed by bare qualified table name
    pub rows: HashMap<String, Vec<Record>>,
    pub collations: Vec<String>,
    pub engines: Vec<String>,
    /// Every statement passed to `execute`, in order
    pub statements: Vec<String>,
    /// `execute` fails for statements containing any of these texts
    pub fail_on: Vec<String>,
    /// Number of catalog or row queries served
    pub queries: usize,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(mut self, name: &str) -> Self {
        self.schemas.push(Schema {
            name: name.to_string(),
            charset: "latin1".to_string(),
            collation: "latin1_swedish_ci".to_string(),
        });
        self
    }

    pub fn with_table(mut self, schema: &str, name: &str, engine: &str, collation: &str) -> Self {
        self.tables.push(Table {
            schema: schema.to_string(),
            name: name.to_string(),
            engine: engine.to_string(),
            collation: collation.to_string(),
            table_type: BASE_TABLE.to_string(),
        });
        self
    }

    pub fn with_view(mut self, schema: &str, name: &str) -> Self {
        self.tables.push(Table {
            schema: schema.to_string(),
            name: name.to_string(),
            engine: String::new(),
            collation: String::new(),
            table_type: VIEW.to_string(),
        });
        self
    }

    pub fn with_columns(mut self, schema: &str, table: &str, names: &[&str]) -> Self {
        for (idx, name) in names.iter().enumerate() {
            self.columns.push(Column {
                schema: schema.to_string(),
                table: table.to_string(),
                name: name.to_string(),
                position: idx as u32 + 1,
            });
        }
        self
    }

    pub fn with_rows(mut self, schema: &str, table: &str, rows: Vec<serde_json::Value>) -> Self {
        let records = rows
            .into_iter()
            .map(|row| row.as_object().cloned().unwrap_or_default())
            .collect();
        self.rows.insert(format!("{}.{}", schema, table), records);
        self
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on.push(text.to_string());
        self
    }

    /// Statements starting with `prefix`
    pub fn statements_starting_with(&self, prefix: &str) -> Vec<String> {
        self.statements
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn table(&self, schema: &str, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.schema == schema && t.name == name)
    }

    fn apply_alter(&mut self, sql: &str) {
        for table in &mut self.tables {
            let target = format!("ALTER TABLE {} ", table.qualified_name(Quoting::Backtick));
            if !sql.starts_with(&target) {
                continue;
            }
            if let Some((_, collation)) = sql.split_once(" COLLATE ") {
                table.collation = collation.trim().to_string();
            }
            if let Some((_, engine)) = sql.split_once(" ENGINE = ") {
                table.engine = engine.trim().to_string();
            }
        }
    }
}

#[async_trait]
impl Session for FakeSession {
    async fn list_schemas(&mut self) -> Result<Vec<Schema>> {
        self.queries += 1;
        let mut schemas = self.schemas.clone();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(schemas)
    }

    async fn list_tables(&mut self, schema: &str) -> Result<Vec<Table>> {
        self.queries += 1;
        let mut tables: Vec<Table> = self
            .tables
            .iter()
            .filter(|t| t.schema == schema && !t.is_view())
            .cloned()
            .collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tables)
    }

    async fn list_columns(&mut self, table: &Table) -> Result<Vec<Column>> {
        self.queries += 1;
        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .filter(|c| c.schema == table.schema && c.table == table.name)
            .cloned()
            .collect();
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    async fn list_collations(&mut self) -> Result<Vec<String>> {
        self.queries += 1;
        Ok(self.collations.clone())
    }

    async fn list_engines(&mut self) -> Result<Vec<String>> {
        self.queries += 1;
        Ok(self.engines.clone())
    }

    async fn execute(&mut self, sql: &str) -> Result<()> {
        self.statements.push(sql.to_string());
        if self.fail_on.iter().any(|text| sql.contains(text.as_str())) {
            bail!("Simulated failure: {}", sql);
        }
        if sql.starts_with("ALTER TABLE ") {
            self.apply_alter(sql);
        }
        Ok(())
    }

    async fn for_each_record(
        &mut self,
        sql: &str,
        sink: &mut (dyn FnMut(Record) -> Result<()> + Send),
    ) -> Result<u64> {
        self.queries += 1;
        let table = self
            .tables
            .iter()
            .find(|t| sql == format!("SELECT * FROM {}", t.qualified_name(Quoting::Backtick)))
            .map(|t| t.qualified_name(Quoting::Bare));
        let Some(table) = table else {
            bail!("Table not found for query: {}", sql);
        };

        let rows = self.rows.get(&table).cloned().unwrap_or_default();
        let count = rows.len() as u64;
        for record in rows {
            sink(record)?;
        }
        Ok(count)
    }
}
