// ABOUTME: Typed views of the information_schema catalog tables
// ABOUTME: Schema, table and column value objects plus the queries that read them

use mysql_async::Row;

/// Schemas owned by the server itself, never listed
pub const SYSTEM_SCHEMAS: [&str; 4] = ["information_schema", "mysql", "performance_schema", "sys"];

/// `TABLE_TYPE` of a regular table
pub const BASE_TABLE: &str = "BASE TABLE";

/// `TABLE_TYPE` of a view
pub const VIEW: &str = "VIEW";

pub(crate) const LIST_SCHEMAS: &str = "
    SELECT SCHEMA_NAME, DEFAULT_CHARACTER_SET_NAME, DEFAULT_COLLATION_NAME
    FROM information_schema.SCHEMATA
    WHERE SCHEMA_NAME NOT IN ('information_schema', 'mysql', 'performance_schema', 'sys')
    ORDER BY SCHEMA_NAME";

pub(crate) const LIST_TABLES: &str = "
    SELECT TABLE_SCHEMA, TABLE_NAME, TABLE_TYPE, ENGINE, TABLE_COLLATION
    FROM information_schema.TABLES
    WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = ?
    ORDER BY TABLE_NAME";

pub(crate) const LIST_COLUMNS: &str = "
    SELECT TABLE_SCHEMA, TABLE_NAME, COLUMN_NAME, ORDINAL_POSITION
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
    ORDER BY ORDINAL_POSITION";

pub(crate) const LIST_COLLATIONS: &str = "SHOW COLLATION";

pub(crate) const LIST_ENGINES: &str = "SHOW ENGINES";

/// A database schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub charset: String,
    pub collation: String,
}

impl Schema {
    /// A schema known only by name, without a catalog lookup
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn from_row(row: &Row) -> Self {
        Self {
            name: text(row, "SCHEMA_NAME"),
            charset: text(row, "DEFAULT_CHARACTER_SET_NAME"),
            collation: text(row, "DEFAULT_COLLATION_NAME"),
        }
    }
}

/// How identifiers are rendered in a qualified name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// `schema.table`, used for file names and messages
    Bare,
    /// `` `schema`.`table` ``, used in SQL text
    Backtick,
}

/// A table or view of a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub schema: String,
    pub name: String,
    /// Storage engine, empty for views and for tables not read from the catalog
    pub engine: String,
    /// Default collation, empty for views and for tables not read from the catalog
    pub collation: String,
    pub table_type: String,
}

impl Table {
    /// A table known only by name, without a catalog lookup
    ///
    /// Its engine and collation are unknown (empty), so bulk conversions
    /// never skip it. A misspelled name only fails once a statement reaches the server.
    pub fn named(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            engine: String::new(),
            collation: String::new(),
            table_type: BASE_TABLE.to_string(),
        }
    }

    pub fn qualified_name(&self, quoting: Quoting) -> String {
        match quoting {
            Quoting::Bare => format!("{}.{}", self.schema, self.name),
            Quoting::Backtick => format!(
                "{}.{}",
                quote_identifier(&self.schema),
                quote_identifier(&self.name)
            ),
        }
    }

    pub fn is_view(&self) -> bool {
        self.table_type == VIEW
    }

    pub(crate) fn from_row(row: &Row) -> Self {
        let table_type = text(row, "TABLE_TYPE");
        Self {
            schema: text(row, "TABLE_SCHEMA"),
            name: text(row, "TABLE_NAME"),
            engine: text(row, "ENGINE"),
            collation: text(row, "TABLE_COLLATION"),
            table_type: if table_type.is_empty() {
                BASE_TABLE.to_string()
            } else {
                table_type
            },
        }
    }
}

/// A column of a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Column {
    pub schema: String,
    pub table: String,
    pub name: String,
    /// 1-based ordinal position, 0 when unknown
    pub position: u32,
}

impl Column {
    pub(crate) fn from_row(row: &Row) -> Self {
        Self {
            schema: text(row, "TABLE_SCHEMA"),
            table: text(row, "TABLE_NAME"),
            name: text(row, "COLUMN_NAME"),
            position: match row.get_opt::<Option<u32>, _>("ORDINAL_POSITION") {
                Some(Ok(Some(position))) => position,
                _ => 0,
            },
        }
    }
}

/// Quote an identifier with backticks, doubling embedded backticks
pub fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

/// Character set named by a collation (the part before the first underscore)
///
/// ```
/// # use mysql_admin_tools::mysql::catalog::charset_of;
/// assert_eq!(charset_of("utf8mb4_unicode_ci"), "utf8mb4");
/// assert_eq!(charset_of("binary"), "binary");
/// ```
pub fn charset_of(collation: &str) -> &str {
    collation.split('_').next().unwrap_or(collation)
}

/// Read a text column, defaulting to an empty string when absent or NULL
pub(crate) fn text(row: &Row, column: &str) -> String {
    match row.get_opt::<Option<String>, _>(column) {
        Some(Ok(Some(value))) => value,
        _ => String::new(),
    }
}
