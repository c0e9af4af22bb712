// ABOUTME: Schema and table selection for backup and bulk maintenance commands
// ABOUTME: Validates filters up front and resolves them into concrete tables

use crate::error::ValidationError;
use crate::mysql::{Schema, Session, Table};
use anyhow::Result;

/// Which schemas and tables a command operates on
///
/// - no schema: every user schema from the catalog
/// - no tables: every base table of each selected schema, from the catalog
/// - tables: the named tables of the schema, taken as given (no catalog lookup)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    schema: Option<String>,
    tables: Vec<String>,
}

impl Selection {
    /// Validate a schema filter and table filters
    ///
    /// A blank schema counts as no schema.
    ///
    /// # Errors
    ///
    /// [`ValidationError::TableRequiresSchema`] if tables are named without a schema,
    /// since a bare table name is ambiguous across schemas.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mysql_admin_tools::filters::Selection;
    /// assert!(Selection::new(Some("shop".into()), vec!["orders".into()]).is_ok());
    /// assert!(Selection::new(None, vec!["orders".into()]).is_err());
    /// ```
    pub fn new(schema: Option<String>, tables: Vec<String>) -> Result<Self, ValidationError> {
        let schema = schema.filter(|name| !name.trim().is_empty());
        let tables: Vec<String> = tables
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .collect();

        if schema.is_none() {
            if let Some(table) = tables.first() {
                return Err(ValidationError::TableRequiresSchema(table.clone()));
            }
        }

        Ok(Self { schema, tables })
    }

    /// Every base table of every user schema
    pub fn all() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Name of the artifact produced for `schema`: `schema.table` when exactly one table is named,
    /// `schema` otherwise
    pub fn entity_name(&self, schema: &Schema) -> String {
        match self.tables.as_slice() {
            [table] => format!("{}.{}", schema.name, table),
            _ => schema.name.clone(),
        }
    }

    /// Selected schemas, in catalog order
    pub async fn schemas<S: Session>(&self, session: &mut S) -> Result<Vec<Schema>> {
        match &self.schema {
            Some(name) => Ok(vec![Schema::named(name.clone())]),
            None => session.list_schemas().await,
        }
    }

    /// Selected tables of `schema`
    pub async fn tables_in<S: Session>(&self, session: &mut S, schema: &Schema) -> Result<Vec<Table>> {
        if self.tables.is_empty() {
            session.list_tables(&schema.name).await
        } else {
            Ok(self
                .tables
                .iter()
                .map(|name| Table::named(schema.name.clone(), name.clone()))
                .collect())
        }
    }

    /// Every selected table across every selected schema, schema by schema
    pub async fn resolve<S: Session>(&self, session: &mut S) -> Result<Vec<Table>> {
        let mut tables = Vec::new();
        for schema in self.schemas(session).await? {
            tables.extend(self.tables_in(session, &schema).await?);
        }

        tracing::debug!("Selection resolved to {} table(s)", tables.len());
        Ok(tables)
    }
}
