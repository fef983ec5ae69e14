use crate::manifest::{Manifest, ManifestError};
use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("Unable to load manifest from: '{reference}'")]
    #[diagnostic(
        code(hinagata::source::manifest),
        help("Pass a built-in name (see `hinagata list`) or a path to a manifest file")
    )]
    Manifest {
        reference: String,
        #[source]
        #[diagnostic_source]
        source: ManifestError,
    },
}

/// A manifest shipped inside the binary.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub description: &'static str,
    pub descriptor: &'static str,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "dashboard",
        description: "Web dashboard project skeleton with placeholder sources",
        descriptor: include_str!("../manifests/dashboard.toml"),
    },
    Builtin {
        name: "deploy",
        description: "Container build, compose and reverse-proxy configuration",
        descriptor: include_str!("../manifests/deploy.toml"),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Builtin(&'static str),
    Local(std::path::PathBuf),
}
impl Source {
    pub fn builtins() -> &'static [Builtin] {
        BUILTINS
    }

    fn find_builtin(name: &str) -> Option<&'static Builtin> {
        BUILTINS.iter().find(|builtin| builtin.name == name)
    }

    /// Built-in names win over a file of the same name in the working directory.
    pub fn parse(reference: &str) -> Self {
        match Self::find_builtin(reference) {
            Some(builtin) => Self::Builtin(builtin.name),
            None => Self::Local(Path::new(reference).to_path_buf()),
        }
    }

    pub fn load(&self) -> Result<Manifest, ManifestError> {
        match self {
            Self::Builtin(name) => {
                let descriptor = Self::find_builtin(name)
                    .map(|builtin| builtin.descriptor)
                    .unwrap_or_default();

                Manifest::from_toml_str(descriptor, name)
            }
            Self::Local(path) => Manifest::from_file(path),
        }
    }

    pub fn resolve(reference: &str) -> Result<Manifest, SourceError> {
        let source = Self::parse(reference);

        log::debug!("resolving manifest reference '{}' as {:?}", reference, source);

        source.load().map_err(|err| SourceError::Manifest {
            reference: reference.to_string(),
            source: err,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn every_builtin_parses() {
        for builtin in Source::builtins() {
            let manifest = Source::resolve(builtin.name).unwrap();
            assert!(!manifest.is_empty(), "{} is empty", builtin.name);
        }
    }

    #[test]
    fn deploy_holds_exactly_three_files() {
        let manifest = Source::resolve("deploy").unwrap();
        let keys: Vec<&str> = manifest.files.0.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["Dockerfile", "docker-compose.yml", "nginx.conf"]);
        assert!(manifest.directories.0.is_empty());
    }

    #[test]
    fn dashboard_keeps_placeholder_content() {
        let manifest = Source::resolve("dashboard").unwrap();

        assert!(manifest.directories.0.contains(&"src/components/modals".to_string()));
        assert_eq!(manifest.files.0[".gitignore"], "node_modules/\ndist/\n.env\n");
        assert_eq!(manifest.files.0["public/favicon.ico"], "");
        assert_eq!(manifest.files.0.len(), 18);
    }

    #[test]
    fn unknown_reference_is_a_local_path() {
        assert_eq!(
            Source::parse("blueprint.toml"),
            Source::Local("blueprint.toml".into())
        );
    }

    #[test]
    fn loads_local_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.toml");
        fs::write(&path, "directories = [\"a\"]\n").unwrap();

        let manifest = Source::resolve(path.to_str().unwrap()).unwrap();

        assert_eq!(manifest.directories.0, vec!["a"]);
    }

    #[test]
    fn missing_local_descriptor_is_reported() {
        let err = Source::resolve("definitely/not/here.toml").unwrap_err();

        let SourceError::Manifest { source, .. } = err;
        assert!(matches!(source, ManifestError::Io(_)));
    }
}
