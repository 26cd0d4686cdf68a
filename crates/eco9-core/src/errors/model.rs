// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExitCode {
    Success = 0,
    Usage = 2,
    Validation = 3,
    DependencyFailure = 4,
    Internal = 10,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Usage => "usage",
            Self::Validation => "validation",
            Self::DependencyFailure => "dependency_failure",
            Self::Internal => "internal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigPathScope {
    User,
    Workspace,
}

#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    SerdeJson(serde_json::Error),
    Io {
        path: String,
        source: std::io::Error,
    },
    DecodeCursor(String),
    Config(String),
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },
    InvalidArgument {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    InvalidTable(String),
}

impl Error {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SerdeJson(_) => "decode_error",
            Self::Io { .. } => "io_error",
            Self::DecodeCursor(_) => "invalid_cursor",
            Self::Config(_) => "config_error",
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::InvalidTable(_) => "invalid_table",
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io { .. } => ExitCode::DependencyFailure,
            Self::SerdeJson(_) | Self::Config(_) => ExitCode::Usage,
            Self::DecodeCursor(_)
            | Self::InvalidIdentifier { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidTable(_) => ExitCode::Validation,
        }
    }

    pub fn io(path: impl fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    #[must_use]
    pub fn to_machine(&self) -> MachineError {
        let machine = MachineError::new(self.code(), &self.to_string());
        match self {
            Self::Io { path, .. } => machine.with_detail("path", path),
            Self::InvalidIdentifier { kind, value, .. } => {
                machine.with_detail("kind", kind).with_detail("value", value)
            }
            Self::InvalidArgument { field, value, .. } => {
                machine.with_detail("field", field).with_detail("value", value)
            }
            _ => machine,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerdeJson(err) => write!(f, "serde json error: {err}"),
            Self::Io { path, source } => write!(f, "i/o error on {path}: {source}"),
            Self::DecodeCursor(message) => write!(f, "cursor decode failed: {message}"),
            Self::Config(message) => write!(f, "configuration error: {message}"),
            Self::InvalidIdentifier {
                kind,
                value,
                reason,
            } => write!(f, "invalid {kind} `{value}`: {reason}"),
            Self::InvalidArgument {
                field,
                value,
                reason,
            } => write!(f, "invalid argument {field}=`{value}`: {reason}"),
            Self::InvalidTable(message) => write!(f, "invalid multiplier table: {message}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SerdeJson(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::DecodeCursor(_)
            | Self::Config(_)
            | Self::InvalidIdentifier { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidTable(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::SerdeJson(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl MachineError {
    #[must_use]
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_detail(mut self, key: &str, value: &str) -> Self {
        self.details.insert(key.to_string(), value.to_string());
        self
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for MachineError {}
