use eco9_core::{canonical, ExitCode, MachineError, ResultExt};
use serde::Serialize;

use crate::state::AppError;

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", message),
        }
    }

    pub(crate) fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }
}

impl From<AppError> for CliError {
    fn from(value: AppError) -> Self {
        Self {
            exit_code: value.exit_code(),
            machine: value.to_machine(),
        }
    }
}

impl From<eco9_core::Error> for CliError {
    fn from(value: eco9_core::Error) -> Self {
        AppError::from(value).into()
    }
}

impl From<eco9_store::StoreError> for CliError {
    fn from(value: eco9_store::StoreError) -> Self {
        AppError::from(value).into()
    }
}

/// Canonical single-line JSON with `--json`, pretty JSON otherwise.
pub(crate) fn emit_ok<T: Serialize>(output_mode: OutputMode, payload: &T) -> Result<(), CliError> {
    let text = if output_mode.json {
        let bytes = canonical::stable_json_bytes(payload)
            .with_context("encode command output")
            .map_err(|e| CliError::internal(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| CliError::internal(e.to_string()))?
    } else {
        serde_json::to_string_pretty(payload)
            .with_context("encode command output")
            .map_err(|e| CliError::internal(e.to_string()))?
    };
    println!("{text}");
    Ok(())
}

pub(crate) fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
