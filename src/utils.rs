// ABOUTME: Utility functions for input validation and environment checks
// ABOUTME: Provides identifier validation and client program discovery

use crate::error::{ProcessError, ValidationError};
use which::which;

/// Validate a name that is interpolated into SQL text (collation, engine, charset)
///
/// Only ASCII letters, digits and underscores are accepted; these names are
/// keywords to the server and cannot be passed as bound parameters.
///
/// # Examples
///
/// ```
/// # use mysql_admin_tools::utils::validate_identifier;
/// assert!(validate_identifier("collation", "utf8mb4_unicode_ci").is_ok());
/// assert!(validate_identifier("engine", "InnoDB").is_ok());
/// assert!(validate_identifier("engine", "InnoDB; DROP TABLE x").is_err());
/// assert!(validate_identifier("engine", "").is_err());
/// ```
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty()
        || !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }

    Ok(())
}

/// Check that the client programs needed by a command are on the search path
///
/// # Errors
///
/// Returns [`ProcessError::Start`] for the first program that cannot be found,
/// with installation hints in the message.
pub fn check_required_tools(programs: &[&str]) -> Result<(), ProcessError> {
    for program in programs {
        if let Err(e) = which(program) {
            return Err(ProcessError::Start {
                program: program.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!(
                        "{}\n\
                         \n\
                         Please install the MariaDB/MySQL client tools:\n\
                         - Ubuntu/Debian: sudo apt-get install mariadb-client\n\
                         - macOS: brew install mariadb\n\
                         - RHEL/CentOS: sudo yum install mariadb",
                        e
                    ),
                ),
            });
        }
    }

    Ok(())
}

/// Mask the value of every `--password=` argument for display
pub fn redact_args(args: &[String]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            if arg.starts_with("--password=") {
                "--password=****".to_string()
            } else {
                arg.clone()
            }
        })
        .collect()
}
