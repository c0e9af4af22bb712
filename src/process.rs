// ABOUTME: Gateway for running the external dump and load programs
// ABOUTME: Captures output and turns launch failures and non-zero exits into typed errors

use crate::error::ProcessError;
use crate::utils;
use std::process::{Command, Stdio};

/// Captured output of a successful process run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` and wait for it to exit
///
/// The process gets no console window on Windows and no stdin; stdout and
/// stderr are captured. There is no timeout: a hung program blocks the caller.
///
/// # Errors
///
/// - [`ProcessError::Start`] if the program cannot be launched (not found, not executable)
/// - [`ProcessError::Exit`] if it exits with a non-zero status, carrying its trimmed stderr
pub fn run(program: &str, args: &[String]) -> Result<ProcessOutput, ProcessError> {
    tracing::debug!("Running: {} {}", program, utils::redact_args(args).join(" "));

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    let output = command.output().map_err(|source| ProcessError::Start {
        program: program.to_string(),
        source,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        return Err(ProcessError::Exit {
            program: program.to_string(),
            code: output.status.code(),
            stderr,
        });
    }

    Ok(ProcessOutput { stdout, stderr })
}
