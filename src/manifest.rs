use crate::errors::{FileOperation, IoError};
use indexmap::IndexMap;
use miette::Diagnostic;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ManifestError {
    #[error("I/O error within manifest domain")]
    #[diagnostic(code(hinagata::manifest::io))]
    Io(#[from] IoError),

    #[error("Unable to parse manifest '{origin}': {source}")]
    #[diagnostic(
        code(hinagata::manifest::parse_toml),
        help("A manifest holds an optional `root`, a `directories` list and a `[files]` table")
    )]
    ParseToml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Directories to ensure, in the order they are listed.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectorySpec(pub Vec<String>);

/// Relative file path mapped to the full content the file should hold.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct FileSpec(pub IndexMap<String, String>);

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// On-disk shape of a manifest descriptor.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default = "default_root")]
    root: PathBuf,
    #[serde(default)]
    directories: DirectorySpec,
    #[serde(default)]
    files: FileSpec,
}

/// A declarative description of a tree, plus the root it is materialized under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub root: PathBuf,
    pub directories: DirectorySpec,
    pub files: FileSpec,
}
impl Manifest {
    pub fn new<P: Into<PathBuf>>(root: P, directories: DirectorySpec, files: FileSpec) -> Self {
        Self {
            root: root.into(),
            directories,
            files,
        }
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ManifestError> {
        let parsed: ManifestFile =
            toml::from_str(content).map_err(|err| ManifestError::ParseToml {
                origin: origin.to_string(),
                source: err,
            })?;

        Ok(Self {
            root: parsed.root,
            directories: parsed.directories,
            files: parsed.files,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .map_err(|error| IoError::new(FileOperation::Read, path.to_path_buf(), error))?;

        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Replaces the root, typically with a destination given on the command line.
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.directories.0.is_empty() && self.files.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_descriptor() {
        let content = r#"
root = "out"
directories = ["a/b", "a/c"]

[files]
"a/b/x.txt" = "hello"
".gitignore" = """
node_modules/
dist/
"""
"#;
        let manifest = Manifest::from_toml_str(content, "inline").unwrap();

        assert_eq!(manifest.root, PathBuf::from("out"));
        assert_eq!(manifest.directories.0, vec!["a/b", "a/c"]);
        assert_eq!(manifest.files.0["a/b/x.txt"], "hello");
        assert_eq!(manifest.files.0[".gitignore"], "node_modules/\ndist/\n");
    }

    #[test]
    fn keeps_file_order() {
        let content = r#"
[files]
"z.txt" = ""
"a.txt" = ""
"m.txt" = ""
"#;
        let manifest = Manifest::from_toml_str(content, "inline").unwrap();
        let keys: Vec<&str> = manifest.files.0.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["z.txt", "a.txt", "m.txt"]);
    }

    #[test]
    fn empty_descriptor_is_empty_manifest() {
        let manifest = Manifest::from_toml_str("", "inline").unwrap();

        assert!(manifest.is_empty());
        assert_eq!(manifest.root, PathBuf::from("."));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = Manifest::from_toml_str("dirs = []", "inline").unwrap_err();

        assert!(matches!(err, ManifestError::ParseToml { .. }));
    }

    #[test]
    fn reports_missing_file_as_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = Manifest::from_file(dir.path().join("missing.toml")).unwrap_err();

        assert!(matches!(
            err,
            ManifestError::Io(IoError {
                operation: FileOperation::Read,
                ..
            })
        ));
    }

    #[test]
    fn with_root_overrides_descriptor_root() {
        let manifest = Manifest::from_toml_str("root = \"a\"", "inline")
            .unwrap()
            .with_root("b");

        assert_eq!(manifest.root, PathBuf::from("b"));
    }
}
