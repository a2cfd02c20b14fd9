//! The `pack` command: resolve, emit, print the module reference.

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::PackArgs;
use crate::config::{EmitConfig, PackOptions};
use crate::emit::Emitter;
use crate::resolve::resolve_file;
use crate::transform::CommandTransform;
use crate::utils::path::absolutize;
use crate::{debug, log};

/// Run the pack command for one entry file.
pub fn run(entry: &Path, args: &PackArgs) -> Result<()> {
    let entry = absolutize(entry);

    let file_options = match &args.config {
        Some(path) => PackOptions::load(path)
            .with_context(|| format!("failed to load config `{}`", path.display()))?,
        None => PackOptions::load_for_entry(&entry)?,
    };
    let options = file_options.merge(cli_options(args));
    let config = EmitConfig::from_options(&entry, &options)?;

    let refs = resolve_file(&entry)?;
    debug!("resolve"; "{} local dependenc{} found", refs.len(),
        if refs.len() == 1 { "y" } else { "ies" });

    let transform = options
        .transform_script
        .filter(|argv| !argv.is_empty())
        .map(CommandTransform::new)
        .transpose()?;

    let mut emitter = Emitter::new(&config);
    if let Some(transform) = &transform {
        emitter = emitter.with_transform(transform);
    }
    let reference = emitter.emit(&entry, &refs)?;

    log!("pack"; "emitted {} file(s) under `{}`",
        emitter.dependencies().len(), config.output_root.display());
    for dependency in emitter.dependencies() {
        debug!("deps"; "{}", dependency.display());
    }

    // The module reference is the command's only stdout output
    println!("{}", reference.module_export());
    Ok(())
}

/// Lift CLI flags into an option bag for merging with the config file.
fn cli_options(args: &PackArgs) -> PackOptions {
    PackOptions {
        output: args.output.clone(),
        output_path: args.output_path.clone(),
        public_path: args.public_path.clone(),
        minify: args.minify.then_some(true),
        namespace: args.namespace.clone(),
        transform_script: (!args.transform_script.is_empty())
            .then(|| args.transform_script.clone()),
    }
}
