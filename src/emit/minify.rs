//! Per-kind asset minification.
//!
//! Uses minify-html for HTML, oxc for JavaScript and lightningcss for CSS.
//! All three are treated as opaque text-to-text transforms; a failed parse
//! means the content passes through unchanged.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use std::path::Path;

use crate::resolve::RefKind;

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = Minifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

/// Minify an HTML document.
///
/// Collapses whitespace, strips comments and optional tags, and minifies
/// embedded CSS/JS. Purely textual: the parsed semantics of the document
/// are preserved.
pub fn minify_html_doc(source: &str) -> String {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    let minified = minify_html::minify(source.as_bytes(), &cfg);
    String::from_utf8_lossy(&minified).into_owned()
}

/// Minify content based on its reference kind.
///
/// Returns `Some(minified)` if minification succeeded, `None` for kinds
/// with no registered minifier or when the minifier rejects the input.
pub fn minify_by_kind(kind: RefKind, source: &str) -> Option<String> {
    match kind {
        RefKind::Html => Some(minify_html_doc(source)),
        RefKind::Stylesheet => minify_css(source),
        RefKind::Script => minify_js(source),
        RefKind::Other => None,
    }
}

/// Files shipped pre-minified (`*.min.js`, `*.min.css`) pass through.
pub fn is_preminified(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(".min"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JS_FIXTURE: &str = r#"
        // a comment that should disappear
        function greet(name) {
            const message = "hello, " + name;
            return message;
        }
        export { greet };
    "#;

    const CSS_FIXTURE: &str = r#"
        /* base styles */
        .widget {
            color: #ff0000;
            margin: 0px 0px 0px 0px;
        }
    "#;

    const HTML_FIXTURE: &str = r#"
        <!-- header -->
        <div   class="widget">
            <p>
                hello
            </p>
        </div>
    "#;

    #[test]
    fn test_minify_js_shrinks() {
        let out = minify_js(JS_FIXTURE).unwrap();
        assert!(out.len() < JS_FIXTURE.len());
        assert!(!out.contains("comment"));
    }

    #[test]
    fn test_minify_js_invalid_input() {
        assert!(minify_js("function {{{{").is_none());
    }

    #[test]
    fn test_minify_css_shrinks() {
        let out = minify_css(CSS_FIXTURE).unwrap();
        assert!(out.len() < CSS_FIXTURE.len());
        assert!(!out.contains("base styles"));
    }

    #[test]
    fn test_minify_html_shrinks_and_strips_comments() {
        let out = minify_html_doc(HTML_FIXTURE);
        assert!(out.len() < HTML_FIXTURE.len());
        assert!(!out.contains("header"));
        assert!(out.contains("hello"));
    }

    #[test]
    fn test_minify_by_kind_dispatch() {
        assert!(minify_by_kind(RefKind::Script, JS_FIXTURE).is_some());
        assert!(minify_by_kind(RefKind::Stylesheet, CSS_FIXTURE).is_some());
        assert!(minify_by_kind(RefKind::Html, HTML_FIXTURE).is_some());
        assert!(minify_by_kind(RefKind::Other, "arbitrary bytes").is_none());
    }

    #[test]
    fn test_preminified_detection() {
        assert!(is_preminified(Path::new("vendor/jquery.min.js")));
        assert!(is_preminified(Path::new("theme.min.css")));
        assert!(!is_preminified(Path::new("widget.js")));
        assert!(!is_preminified(Path::new("minify.js")));
    }
}
