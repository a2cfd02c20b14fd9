//! Local dependency resolution for web component HTML files.
//!
//! Walks `<link>` and `<script>` elements, recursing depth-first into
//! `rel="import"` targets, and produces an ordered manifest of the local
//! files that must be emitted.

mod kind;
mod walk;

pub use kind::RefKind;
pub use walk::{SourceRef, is_remote_path, resolve_file, resolve_local_dependencies};
