use crate::errors::{PathError, PathViolation};
use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a manifest entry into a path relative to the root.
///
/// `.` components are dropped and `..` pops the previous component. Unlike a plain
/// normalization, a `..` with nothing left to pop is an error rather than a no-op, as is any
/// absolute path or drive prefix.
pub fn normalize_relative(entry: &str) -> Result<PathBuf, PathError> {
    if entry.trim().is_empty() {
        return Err(PathError::new(entry, PathViolation::Empty));
    }

    let mut new_path = PathBuf::new();

    for component in Path::new(entry).components() {
        match component {
            Component::CurDir => {}

            Component::ParentDir => {
                if !new_path.pop() {
                    return Err(PathError::new(entry, PathViolation::EscapesRoot));
                }
            }

            Component::RootDir | Component::Prefix(_) => {
                return Err(PathError::new(entry, PathViolation::Absolute));
            }

            Component::Normal(segment) => new_path.push(segment),
        }
    }

    Ok(new_path)
}

/// Resolves `entry` against `root` and confirms the result stays inside it.
///
/// When the root already exists, the deepest existing ancestor of the target is
/// canonicalized so that a symlinked directory pointing elsewhere is caught before any
/// write goes through it.
pub fn resolve_within(root: &Path, entry: &str) -> Result<PathBuf, PathError> {
    let relative = normalize_relative(entry)?;
    let target = root.join(&relative);

    let Ok(canonical_root) = root.canonicalize() else {
        // nothing below a missing root can be a link yet
        return Ok(target);
    };

    // dangling links count as existing so they fail canonicalization below
    let existing = target
        .ancestors()
        .find(|ancestor| ancestor.symlink_metadata().is_ok());

    if let Some(existing) = existing {
        let canonical = existing
            .canonicalize()
            .map_err(|_| PathError::new(entry, PathViolation::LinkEscapesRoot))?;

        if !canonical.starts_with(&canonical_root) {
            log::debug!(
                "entry '{}' resolves through '{}' outside '{}'",
                entry,
                canonical.display(),
                canonical_root.display()
            );
            return Err(PathError::new(entry, PathViolation::LinkEscapesRoot));
        }
    }

    Ok(target)
}

/// Like [`resolve_within`], but the entry must name something below the root.
pub fn resolve_file_within(root: &Path, entry: &str) -> Result<PathBuf, PathError> {
    if normalize_relative(entry)?.as_os_str().is_empty() {
        return Err(PathError::new(entry, PathViolation::IsRoot));
    }

    resolve_within(root, entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_current_dir_markers() {
        assert_eq!(
            normalize_relative("./src/./pages").unwrap(),
            PathBuf::from("src/pages")
        );
    }

    #[test]
    fn parent_dir_pops_within_entry() {
        assert_eq!(
            normalize_relative("src/hooks/../utils/logger.js").unwrap(),
            PathBuf::from("src/utils/logger.js")
        );
    }

    #[test]
    fn rejects_climbing_above_root() {
        let err = normalize_relative("a/../../x").unwrap_err();
        assert_eq!(err.reason, PathViolation::EscapesRoot);

        let err = normalize_relative("../x").unwrap_err();
        assert_eq!(err.reason, PathViolation::EscapesRoot);
    }

    #[test]
    fn rejects_absolute_paths() {
        let err = normalize_relative("/etc/x").unwrap_err();
        assert_eq!(err.reason, PathViolation::Absolute);
    }

    #[test]
    fn rejects_empty_entries() {
        assert_eq!(
            normalize_relative("  ").unwrap_err().reason,
            PathViolation::Empty
        );
    }

    #[test]
    fn root_itself_normalizes_to_empty() {
        assert_eq!(normalize_relative("a/..").unwrap(), PathBuf::new());
    }

    #[test]
    fn file_entries_cannot_name_the_root() {
        let dir = tempfile::tempdir().unwrap();

        let err = resolve_file_within(dir.path(), "a/..").unwrap_err();

        assert_eq!(err.reason, PathViolation::IsRoot);
        assert!(resolve_file_within(dir.path(), "a/../b.txt").is_ok());
    }

    #[test]
    fn resolves_under_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("not-yet");

        let resolved = resolve_within(&root, "a/b.txt").unwrap();

        assert_eq!(resolved, root.join("a/b.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_symlink_leading_outside_root() {
        let outside = tempfile::tempdir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let err = resolve_within(dir.path(), "link/secret.txt").unwrap_err();

        assert_eq!(err.reason, PathViolation::LinkEscapesRoot);
    }

    #[cfg(unix)]
    #[test]
    fn accepts_symlink_staying_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();

        assert!(resolve_within(dir.path(), "alias/file.txt").is_ok());
    }
}
