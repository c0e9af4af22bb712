// ABOUTME: Typed error taxonomy for validation and external process failures
// ABOUTME: Maps any error chain to the process exit code reported by the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful command
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for input that was rejected before touching the network
pub const EXIT_VALIDATION: u8 = 1;
/// Exit code for every other failure (I/O, connection, subprocess)
pub const EXIT_FAILURE: u8 = 2;

/// Input rejected before any connection is opened
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The connection string must be an absolute URI: {0}")]
    InvalidUri(String),

    #[error("The connection string only supports the 'mariadb' or 'mysql' scheme, got '{0}'")]
    UnsupportedScheme(String),

    #[error("The connection string requires full credentials to be specified (user:password)")]
    MissingCredentials,

    #[error("The table \"{0}\" requires that a schema be specified")]
    TableRequiresSchema(String),

    #[error("Unable to locate the specified file or directory: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Invalid {kind} name: '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("No connection string given. Use --dsn, MYSQL_ADMIN_DSN or the 'dsn' key of the config file")]
    MissingDsn,
}

/// Failure of an external dump/load program
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to start the \"{program}\" process: {source}")]
    Start {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("The \"{program}\" process failed with exit code {}: {stderr}", display_code(.code))]
    Exit {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

/// Exit code for a command outcome
///
/// A [`ValidationError`] anywhere in the chain yields [`EXIT_VALIDATION`];
/// every other error yields [`EXIT_FAILURE`].
pub fn exit_code(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) if err.chain().any(|cause| cause.is::<ValidationError>()) => EXIT_VALIDATION,
        Err(_) => EXIT_FAILURE,
    }
}
