// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use eco9_core::{ExitCode, MachineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    NotFound,
    Validation,
    Conflict,
    Io,
    Unsupported,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Validation => "validation_error",
            Self::Conflict => "conflict",
            Self::Io => "io_error",
            Self::Unsupported => "unsupported",
            Self::Internal => "internal_error",
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::NotFound | Self::Validation | Self::Conflict => ExitCode::Validation,
            Self::Io => ExitCode::DependencyFailure,
            Self::Unsupported => ExitCode::Usage,
            Self::Internal => ExitCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: impl Display) -> Self {
        Self::new(StoreErrorCode::NotFound, format!("activity {id} does not exist"))
    }

    #[must_use]
    pub fn to_machine(&self) -> MachineError {
        MachineError::new(self.code.as_str(), &self.message)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        let code = match &value {
            rusqlite::Error::QueryReturnedNoRows => StoreErrorCode::NotFound,
            rusqlite::Error::SqliteFailure(err, _) => match err.code {
                rusqlite::ErrorCode::ConstraintViolation => StoreErrorCode::Conflict,
                rusqlite::ErrorCode::CannotOpen
                | rusqlite::ErrorCode::PermissionDenied
                | rusqlite::ErrorCode::ReadOnly
                | rusqlite::ErrorCode::DiskFull
                | rusqlite::ErrorCode::SystemIoFailure
                | rusqlite::ErrorCode::DatabaseBusy
                | rusqlite::ErrorCode::DatabaseLocked => StoreErrorCode::Io,
                _ => StoreErrorCode::Internal,
            },
            _ => StoreErrorCode::Internal,
        };
        Self::new(code, value.to_string())
    }
}
