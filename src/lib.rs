//! wcpack - a build-time packer for HTML web components.
//!
//! Given an HTML entry file, wcpack resolves every locally-referenced
//! resource (imported HTML fragments, linked stylesheets, linked scripts),
//! copies them into an output tree that mirrors their relative source
//! layout, optionally minifying and/or transforming them, and returns a
//! module reference to the emitted entry file.
//!
//! The two halves of the core:
//! - [`resolve`] walks `<link>`/`<script>` references recursively
//!   (depth-first into `rel="import"` targets, with a cycle guard).
//! - [`emit`] maps each resolved file to an output route and writes it.

pub mod cli;
pub mod config;
pub mod emit;
pub mod logger;
pub mod resolve;
pub mod transform;
pub mod utils;
