use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(hinagata::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

/// Reasons a manifest entry is refused before anything touches the disk.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum PathViolation {
    #[error("path is empty")]
    Empty,
    #[error("absolute paths are not allowed")]
    Absolute,
    #[error("path climbs above the root")]
    EscapesRoot,
    #[error("path resolves to the root itself")]
    IsRoot,
    #[error("path leads through a link outside the root")]
    LinkEscapesRoot,
}
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
#[error("Invalid path '{entry}': {reason}")]
#[diagnostic(
    code(hinagata::invalid_path),
    help("Manifest entries must be relative paths that stay inside the destination root")
)]
pub struct PathError {
    pub entry: String,
    pub reason: PathViolation,
}
impl PathError {
    pub fn new(entry: &str, reason: PathViolation) -> Self {
        Self {
            entry: entry.to_string(),
            reason,
        }
    }
}
