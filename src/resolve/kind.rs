//! Reference kind definitions.

use std::path::Path;

/// Kind of a resolved resource reference.
///
/// Determined once when the reference is created; minifier dispatch keys
/// off this variant instead of re-deriving it from the path at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// HTML document (entry file or `rel="import"` target).
    Html,
    /// Linked stylesheet.
    Stylesheet,
    /// Script file referenced via `<script src>`.
    Script,
    /// Anything else linked from the document (fonts, data files, ...).
    Other,
}

impl RefKind {
    /// Derive a kind from the file extension.
    ///
    /// Extension matching is case-sensitive; `.HTML` is not `.html`.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("html") => Self::Html,
            Some("css") => Self::Stylesheet,
            Some("js") | Some("mjs") => Self::Script,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(RefKind::from_path(Path::new("a/b.html")), RefKind::Html);
        assert_eq!(RefKind::from_path(Path::new("style.css")), RefKind::Stylesheet);
        assert_eq!(RefKind::from_path(Path::new("widget.js")), RefKind::Script);
        assert_eq!(RefKind::from_path(Path::new("mod.mjs")), RefKind::Script);
        assert_eq!(RefKind::from_path(Path::new("font.woff2")), RefKind::Other);
        assert_eq!(RefKind::from_path(Path::new("no_extension")), RefKind::Other);
    }

    #[test]
    fn test_from_path_case_sensitive() {
        assert_eq!(RefKind::from_path(Path::new("A.HTML")), RefKind::Other);
        assert_eq!(RefKind::from_path(Path::new("B.Css")), RefKind::Other);
    }
}
