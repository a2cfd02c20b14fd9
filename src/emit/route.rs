//! Output route computation for resolved references.

use anyhow::{Result, bail};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

use crate::config::EmitConfig;
use crate::log;
use crate::resolve::{RefKind, SourceRef};
use crate::utils::path::{absolutize, normalize_lexical, relative_to};

/// Mapping of one source file to its output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitRoute {
    /// Absolute source path.
    pub source: PathBuf,
    /// Output path under the output root.
    pub output: PathBuf,
    /// Kind, carried over from resolution (the entry file is Html).
    pub kind: RefKind,
}

/// Ordered emission manifest: the entry file first, then every resolved
/// reference in discovery order.
#[derive(Debug, Clone)]
pub struct Manifest {
    routes: Vec<EmitRoute>,
}

impl Manifest {
    /// Compute output routes for the entry file plus its resolution result.
    ///
    /// Each file's output path is the file's path relative to the context
    /// directory, mirrored under `output_root/<namespace>/`. The relative
    /// path may climb out of the namespace directory (`../shared/...`),
    /// but never out of the output root; a route that would escape the
    /// root is an error.
    ///
    /// Distinct sources colliding at one output path are logged as a
    /// warning; the last writer wins.
    pub fn build(entry: &Path, refs: &[SourceRef], config: &EmitConfig) -> Result<Self> {
        let entry = absolutize(entry);
        let namespace = config.namespace.segment(&entry)?;
        let namespace_root = config.output_root.join(&namespace);
        let output_root = normalize_lexical(&config.output_root);

        let mut routes = Vec::with_capacity(refs.len() + 1);
        let mut seen: FxHashMap<PathBuf, PathBuf> = FxHashMap::default();

        let entry_route = EmitRoute {
            output: route_output(&entry, config, &namespace_root, &output_root)?,
            source: entry,
            kind: RefKind::Html,
        };
        seen.insert(entry_route.output.clone(), entry_route.source.clone());
        routes.push(entry_route);

        for reference in refs {
            let output = route_output(&reference.path, config, &namespace_root, &output_root)?;
            if let Some(previous) = seen.insert(output.clone(), reference.path.clone())
                && previous != reference.path
            {
                log!("warning"; "output collision at `{}`: `{}` overwrites `{}`",
                    output.display(), reference.path.display(), previous.display());
            }
            routes.push(EmitRoute {
                source: reference.path.clone(),
                output,
                kind: reference.kind,
            });
        }

        Ok(Self { routes })
    }

    /// All routes, entry file first.
    pub fn routes(&self) -> &[EmitRoute] {
        &self.routes
    }

    /// The entry file's route.
    pub fn root(&self) -> &EmitRoute {
        &self.routes[0]
    }
}

/// Compute one output path and verify it stays under the output root.
fn route_output(
    source: &Path,
    config: &EmitConfig,
    namespace_root: &Path,
    output_root: &Path,
) -> Result<PathBuf> {
    let relative = relative_to(source, &config.context_dir)?;
    let output = normalize_lexical(&namespace_root.join(&relative));
    if !output.starts_with(output_root) {
        bail!(
            "`{}` resolves outside the output root `{}`",
            source.display(),
            output_root.display()
        );
    }
    Ok(output)
}
