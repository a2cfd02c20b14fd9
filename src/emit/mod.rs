//! The emission pipeline: output route computation, minification, writing.

mod minify;
mod pipeline;
mod route;

pub use minify::{minify_by_kind, minify_css, minify_html_doc, minify_js};
pub use pipeline::{Emitter, OutputReference};
pub use route::{EmitRoute, Manifest};
