//! The emission pipeline: reads, transforms, minifies and writes each
//! file of a manifest, then derives the public output reference.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::EmitConfig;
use crate::debug;
use crate::emit::minify::{is_preminified, minify_by_kind};
use crate::emit::route::Manifest;
use crate::resolve::{RefKind, SourceRef};
use crate::transform::ScriptTransform;
use crate::utils::path::{normalize_lexical, relative_to, to_url_path};

/// The public reference to the emitted entry HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputReference {
    /// Public path: prefix + entry output path relative to the output root.
    pub public_path: String,
}

impl OutputReference {
    /// The generated module statement exporting the public path, the form
    /// handed back to a JS-based host build tool.
    pub fn module_export(&self) -> String {
        format!("module.exports = '{}'", self.public_path)
    }
}

/// Writes a resolved component to the output tree.
///
/// Collects one dependency registration per emitted source file so the
/// host's rebuild-on-change tracking can pick them up; no callback into
/// the host happens from inside the pipeline.
pub struct Emitter<'a> {
    config: &'a EmitConfig,
    transform: Option<&'a dyn ScriptTransform>,
    dependencies: Vec<PathBuf>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a EmitConfig) -> Self {
        Self {
            config,
            transform: None,
            dependencies: Vec::new(),
        }
    }

    /// Attach a script transform, applied to script files before minification.
    pub fn with_transform(mut self, transform: &'a dyn ScriptTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Emit the entry file plus every resolved reference.
    ///
    /// Any missing referenced file is fatal and aborts the remaining
    /// manifest. Directory creation is idempotent; concurrent invocations
    /// writing into the same output tree never race on `create_dir_all`.
    pub fn emit(&mut self, entry: &Path, refs: &[SourceRef]) -> Result<OutputReference> {
        let manifest = Manifest::build(entry, refs, self.config)?;

        for route in manifest.routes() {
            if let Some(parent) = route.output.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory `{}`", parent.display())
                })?;
            }

            let bytes = fs::read(&route.source)
                .with_context(|| format!("failed to read `{}`", route.source.display()))?;

            // Transforms and minifiers operate on text; binary content
            // (fonts, images) is copied verbatim
            let content = match String::from_utf8(bytes) {
                Ok(text) => {
                    let text = match self.transform {
                        Some(transform) if route.kind == RefKind::Script => {
                            transform.apply(&text).with_context(|| {
                                format!("transform failed for `{}`", route.source.display())
                            })?
                        }
                        _ => text,
                    };
                    let text = if self.config.minify && !is_preminified(&route.source) {
                        minify_by_kind(route.kind, &text).unwrap_or(text)
                    } else {
                        text
                    };
                    text.into_bytes()
                }
                Err(err) => err.into_bytes(),
            };

            fs::write(&route.output, content)
                .with_context(|| format!("failed to write `{}`", route.output.display()))?;

            self.dependencies.push(route.source.clone());
            debug!("emit"; "{} -> {}", route.source.display(), route.output.display());
        }

        let output_root = normalize_lexical(&self.config.output_root);
        let entry_relative = relative_to(&manifest.root().output, &output_root)?;
        Ok(OutputReference {
            public_path: format!(
                "{}{}",
                self.config.public_path_prefix,
                to_url_path(&entry_relative)
            ),
        })
    }

    /// Source files to register with the host's rebuild tracking, one per
    /// emitted file, in emission order.
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }
}
