use crate::{
    errors::{FileOperation, IoError, PathError},
    manifest::{DirectorySpec, FileSpec, Manifest},
    paths::{resolve_file_within, resolve_within},
};
use colored::Colorize;
use miette::Diagnostic;
use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MaterializeError {
    #[error("Permission denied: {operation} on path '{path}'")]
    #[diagnostic(
        code(hinagata::materialize::permission_denied),
        help("Check that the destination is writable and that no directory occupies a file path")
    )]
    PermissionDenied {
        operation: FileOperation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidPath(#[from] PathError),

    #[error("I/O error within materialize domain")]
    #[diagnostic(code(hinagata::materialize::io))]
    Io(#[from] IoError),
}
impl MaterializeError {
    fn from_io(operation: FileOperation, path: &Path, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                operation,
                path: path.to_path_buf(),
                source: error,
            }
        } else {
            Self::Io(IoError::new(operation, path.to_path_buf(), error))
        }
    }
}

/// Receives one event per directory ensured and per file written.
pub trait Reporter {
    fn directory(&mut self, path: &Path);
    fn file(&mut self, path: &Path);
}

/// Prints colored progress lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleReporter;
impl Reporter for ConsoleReporter {
    fn directory(&mut self, path: &Path) {
        println!("{} {}", "mkdir".blue(), path.display());
    }

    fn file(&mut self, path: &Path) {
        println!("{} {}", "create".green(), path.display());
    }
}

#[derive(Debug, Default)]
pub struct SilentReporter;
impl Reporter for SilentReporter {
    fn directory(&mut self, _path: &Path) {}
    fn file(&mut self, _path: &Path) {}
}

/// Counts of what a run touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub directories: usize,
    pub files: usize,
}

/// Realizes manifest entries under a single root.
///
/// Every entry is resolved through [`resolve_within`] first, so nothing is created
/// outside `root`. There is no rollback: the first failure is returned and whatever was
/// created before it stays on disk.
pub struct Materializer<'r, R: Reporter> {
    root: PathBuf,
    reporter: &'r mut R,
    summary: Summary,
}
impl<'r, R: Reporter> Materializer<'r, R> {
    pub fn new<P: Into<PathBuf>>(root: P, reporter: &'r mut R) -> Self {
        Self {
            root: root.into(),
            reporter,
            summary: Summary::default(),
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Creates every listed directory along with its missing ancestors.
    ///
    /// Directories that already exist are left alone.
    ///
    /// # Errors
    ///
    /// Returns a [`MaterializeError`] if:
    ///
    /// - An entry is absolute or escapes the root.
    /// - The OS refuses the creation.
    /// - A non-directory already occupies the path.
    pub fn ensure_directories(
        &mut self,
        directories: &DirectorySpec,
    ) -> Result<(), MaterializeError> {
        for entry in &directories.0 {
            let path = resolve_within(&self.root, entry)?;

            log::debug!("ensuring directory '{}' at {}", entry, path.display());

            create_directory(&path)?;

            self.reporter.directory(&path);
            self.summary.directories += 1;
        }

        Ok(())
    }

    /// Writes every file, creating parents that are not there yet and replacing any
    /// previous content.
    ///
    /// # Errors
    ///
    /// Returns a [`MaterializeError`] if:
    ///
    /// - An entry is absolute, escapes the root or names the root itself.
    /// - A directory occupies the file path, or the OS refuses the write.
    /// - Any other I/O failure occurs while creating parents or writing.
    pub fn write_files(&mut self, files: &FileSpec) -> Result<(), MaterializeError> {
        for (entry, contents) in &files.0 {
            let path = resolve_file_within(&self.root, entry)?;

            log::debug!("writing file '{}' at {}", entry, path.display());

            if let Some(parent) = path.parent() {
                create_directory(parent)?;
            }

            write_file(&path, contents)?;

            self.reporter.file(&path);
            self.summary.files += 1;
        }

        Ok(())
    }
}

/// Ensures the directories of `manifest` and then writes its files.
///
/// An empty manifest succeeds without touching the filesystem, including the root.
pub fn materialize<R: Reporter>(
    manifest: &Manifest,
    reporter: &mut R,
) -> Result<Summary, MaterializeError> {
    let mut materializer = Materializer::new(&manifest.root, reporter);

    materializer.ensure_directories(&manifest.directories)?;
    materializer.write_files(&manifest.files)?;

    let summary = materializer.summary();

    log::info!(
        "materialized {} directories and {} files under {}",
        summary.directories,
        summary.files,
        manifest.root.display()
    );

    Ok(summary)
}

fn create_directory(path: &Path) -> Result<(), MaterializeError> {
    std::fs::create_dir_all(path)
        .map_err(|error| MaterializeError::from_io(FileOperation::Mkdir, path, error))
}

fn write_file(path: &Path, contents: &str) -> Result<(), MaterializeError> {
    if path.is_dir() {
        return Err(MaterializeError::PermissionDenied {
            operation: FileOperation::Write,
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::PermissionDenied,
                "a directory occupies the file path",
            ),
        });
    }

    std::fs::write(path, contents)
        .map_err(|error| MaterializeError::from_io(FileOperation::Write, path, error))
}
