//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_lexical` - resolve `.`/`..` segments without touching the fs
//! - `absolutize` - anchor relative paths at the current directory
//! - `relative_to` - relative path between two paths (may contain `..`)
//! - `to_url_path` - forward-slash form for public references

use anyhow::{Result, anyhow};
use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically: drop `.` segments and resolve `..` against
/// preceding components.
///
/// Never consults the file system, so it works for output paths that do
/// not exist yet and stays deterministic across symlinks. A `..` at the
/// root is a no-op; a leading `..` on a relative path is preserved.
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Make a path absolute, anchoring relative paths at the current directory.
///
/// Deliberately avoids `canonicalize()`: the target may not exist yet and
/// symlink resolution would make output routes depend on the machine.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexical(path)
    } else {
        std::env::current_dir().map_or_else(
            |_| normalize_lexical(path),
            |cwd| normalize_lexical(&cwd.join(path)),
        )
    }
}

/// Compute `path` relative to `base`, allowing `..` segments when `path`
/// lies outside `base`.
pub fn relative_to(path: &Path, base: &Path) -> Result<PathBuf> {
    pathdiff::diff_paths(path, base).ok_or_else(|| {
        anyhow!(
            "cannot express `{}` relative to `{}`",
            path.display(),
            base.display()
        )
    })
}

/// Convert a relative path to its public URL form (forward slashes).
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(
            normalize_lexical(Path::new("/a/./b/./c")),
            PathBuf::from("/a/b/c")
        );
    }

    #[test]
    fn test_normalize_resolves_parent() {
        assert_eq!(
            normalize_lexical(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(
            normalize_lexical(Path::new("out/ns/../shared/base.html")),
            PathBuf::from("out/shared/base.html")
        );
    }

    #[test]
    fn test_normalize_parent_at_root() {
        assert_eq!(normalize_lexical(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_normalize_leading_parent_kept() {
        assert_eq!(
            normalize_lexical(Path::new("../a/b")),
            PathBuf::from("../a/b")
        );
        assert_eq!(
            normalize_lexical(Path::new("a/../../b")),
            PathBuf::from("../b")
        );
    }

    #[test]
    fn test_absolutize() {
        assert!(absolutize(Path::new("relative/file.html")).is_absolute());
        assert_eq!(
            absolutize(Path::new("/abs/./x")),
            PathBuf::from("/abs/x")
        );
    }

    #[test]
    fn test_relative_to_inside() {
        let rel = relative_to(Path::new("/ctx/foo/bar.js"), Path::new("/ctx")).unwrap();
        assert_eq!(rel, PathBuf::from("foo/bar.js"));
    }

    #[test]
    fn test_relative_to_outside() {
        let rel = relative_to(Path::new("/shared/base.html"), Path::new("/ctx/widget")).unwrap();
        assert_eq!(rel, PathBuf::from("../../shared/base.html"));
    }

    #[test]
    fn test_to_url_path() {
        assert_eq!(to_url_path(Path::new("index.html/index.html")), "index.html/index.html");
        assert_eq!(to_url_path(Path::new("a/b/c.js")), "a/b/c.js");
    }
}
