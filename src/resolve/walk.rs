//! The resolver walk: recursive extraction of local resource references.

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::resolve::RefKind;
use crate::utils::path::{absolutize, normalize_lexical};

/// Remote references (scheme-prefixed or protocol-relative) are never copied.
/// Scheme matching is case-insensitive; schemes are ASCII, so the class is
/// spelled out instead of relying on Unicode case folding.
static REMOTE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-zA-Z]+:)?//").expect("valid remote path pattern"));

/// Check whether a reference points at a remote resource
/// (`http://...`, `HTTPS://...`, `//cdn.example.com/...`).
pub fn is_remote_path(reference: &str) -> bool {
    REMOTE_PATH.is_match(reference)
}

/// A single file that must be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    /// Absolute, lexically normalized path of the referenced file.
    pub path: PathBuf,
    /// Kind, fixed at creation time.
    pub kind: RefKind,
    /// Directory of the document that referenced this file.
    pub origin: PathBuf,
}

/// Resolve all local dependencies of an HTML document.
///
/// References are returned in discovery order: `<link>` elements in
/// document order, recursing into `rel="import"` targets depth-first
/// before continuing with siblings, then `<script>` elements. Duplicate
/// references are kept; only import recursion is deduplicated so that
/// circular imports terminate.
///
/// Malformed HTML is tolerated: whatever `<link>`/`<script>` elements the
/// lenient parser finds are used. A `rel="import"` target that cannot be
/// read is a fatal error.
pub fn resolve_local_dependencies(html: &str, base_dir: &Path) -> Result<Vec<SourceRef>> {
    let base_dir = absolutize(base_dir);
    let mut visited = FxHashSet::default();
    let mut refs = Vec::new();
    walk(html, &base_dir, &mut visited, &mut refs)?;
    Ok(refs)
}

/// Resolve the dependencies of an entry HTML file on disk.
///
/// Seeds the visited set with the entry's own path so an import cycle
/// leading back to the entry terminates without re-listing it.
pub fn resolve_file(entry: &Path) -> Result<Vec<SourceRef>> {
    let entry = absolutize(entry);
    let html = fs::read_to_string(&entry)
        .with_context(|| format!("failed to read entry file `{}`", entry.display()))?;
    let base_dir = entry.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

    let mut visited = FxHashSet::default();
    visited.insert(entry);
    let mut refs = Vec::new();
    walk(&html, &base_dir, &mut visited, &mut refs)?;
    Ok(refs)
}

/// One level of the walk. `visited` spans the whole resolution so a file
/// is recursed into at most once.
fn walk(
    html: &str,
    base_dir: &Path,
    visited: &mut FxHashSet<PathBuf>,
    refs: &mut Vec<SourceRef>,
) -> Result<()> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        // Parse failed outright: nothing to extract
        return Ok(());
    };

    // <link> pass: document order, depth-first into imports
    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else { continue };
        if !tag.name().as_utf8_str().eq_ignore_ascii_case("link") {
            continue;
        }
        let Some(href) = attr(tag, "href") else { continue };
        if href.trim().is_empty() || is_remote_path(&href) {
            continue;
        }

        let path = resolve_reference(base_dir, &href);
        let is_import = attr(tag, "rel").is_some_and(|rel| rel.eq_ignore_ascii_case("import"));

        if is_import {
            // Cycle guard: each file enters the manifest and is recursed
            // into at most once per resolution
            if !visited.insert(path.clone()) {
                continue;
            }
            refs.push(SourceRef {
                path: path.clone(),
                kind: RefKind::Html,
                origin: base_dir.to_path_buf(),
            });

            let child_html = fs::read_to_string(&path)
                .with_context(|| format!("failed to read imported file `{}`", path.display()))?;
            let child_base = path
                .parent()
                .map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);
            walk(&child_html, &child_base, visited, refs)?;
        } else {
            refs.push(SourceRef {
                kind: RefKind::from_path(&path),
                origin: base_dir.to_path_buf(),
                path,
            });
        }
    }

    // <script> pass: script content is never parsed as HTML
    for node in dom.nodes() {
        let Some(tag) = node.as_tag() else { continue };
        if !tag.name().as_utf8_str().eq_ignore_ascii_case("script") {
            continue;
        }
        let Some(src) = attr(tag, "src") else { continue };
        if src.trim().is_empty() || is_remote_path(&src) {
            continue;
        }
        refs.push(SourceRef {
            path: resolve_reference(base_dir, &src),
            kind: RefKind::Script,
            origin: base_dir.to_path_buf(),
        });
    }

    Ok(())
}

/// Resolve an href/src against the directory of the referencing document.
fn resolve_reference(base_dir: &Path, reference: &str) -> PathBuf {
    normalize_lexical(&base_dir.join(reference))
}

/// Read an attribute value, treating a valueless attribute as empty.
fn attr(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    for (key, value) in tag.attributes().iter() {
        let key_str: &str = key.as_ref();
        if key_str.eq_ignore_ascii_case(name) {
            return Some(value.map(|v| v.to_string()).unwrap_or_default());
        }
    }
    None
}
