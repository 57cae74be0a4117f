//! Error types for scanning, profiles, tree mutation and export.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::NodeId;

/// Errors that can occur while listing a directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory.
    ReadError,
}

/// Non-fatal warning encountered during a scan.
///
/// A warning always concerns a single directory; the rest of the scan
/// carries on without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Directory where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Build a warning from a listing error.
    pub fn from_error(path: impl Into<PathBuf>, error: &ScanError) -> Self {
        let kind = match error {
            ScanError::PermissionDenied { .. } => WarningKind::PermissionDenied,
            _ => WarningKind::ReadError,
        };
        Self::new(path, error.to_string(), kind)
    }
}

/// Errors from the profile store.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The reserved profile cannot be saved or deleted.
    #[error("The \"{name}\" profile is read-only")]
    ReadOnly { name: String },

    /// Profile names must contain something besides whitespace.
    #[error("Profile name cannot be empty")]
    EmptyName,

    /// No profile with this name is stored.
    #[error("Unknown profile \"{name}\"")]
    Unknown { name: String },

    /// Reading or writing the profile file failed.
    #[error("Failed to write profiles to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile map could not be serialized.
    #[error("Failed to serialize profiles: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors from structural tree mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The referenced node does not exist in this tree.
    #[error("Unknown node id {0:?}")]
    UnknownNode(NodeId),
}

/// Errors from writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));

        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_warning_from_error() {
        let err = ScanError::PermissionDenied {
            path: PathBuf::from("/locked"),
        };
        let warning = ScanWarning::from_error("/locked", &err);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("Permission denied"));

        let err = ScanError::io("/x", std::io::Error::other("boom"));
        assert_eq!(ScanWarning::from_error("/x", &err).kind, WarningKind::ReadError);
    }

    #[test]
    fn test_read_only_message() {
        let err = ProfileError::ReadOnly {
            name: "Default".into(),
        };
        assert_eq!(err.to_string(), "The \"Default\" profile is read-only");
    }
}
