// ABOUTME: Backup and restore of schema contents
// ABOUTME: JSON Lines and SQL dump exporters plus the SQL dump importer

pub mod dump;
pub mod jsonl;
pub mod restore;

pub use dump::{dump_args, dump_sql};
pub use jsonl::{export_table, missing_columns, TableExport};
pub use restore::{collect_dump_files, restore_file};

/// Output format of a backup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BackupFormat {
    /// One `<schema>.<table>.jsonl` file per table, read over the live connection
    #[value(name = "jsonl", alias = "jsonlines")]
    JsonLines,
    /// One `<entity>.sql` file per schema (or named table) written by mysqldump
    #[default]
    #[value(name = "sql", alias = "sqldump")]
    SqlDump,
}

impl BackupFormat {
    /// File extension of the artifacts this format writes
    pub fn extension(self) -> &'static str {
        match self {
            Self::JsonLines => jsonl::JSONL_EXTENSION,
            Self::SqlDump => dump::SQL_EXTENSION,
        }
    }
}

/// File name of an artifact: `<entity>.<extension>`
pub fn artifact_name(entity: &str, extension: &str) -> String {
    format!("{}.{}", entity, extension)
}
