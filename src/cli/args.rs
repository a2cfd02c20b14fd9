//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// wcpack web component packer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output (per-file emission log, dependency list)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a component's local dependencies and emit the output tree
    #[command(visible_alias = "p")]
    Pack {
        /// Entry HTML file of the component
        #[arg(value_hint = clap::ValueHint::FilePath)]
        entry: PathBuf,

        #[command(flatten)]
        args: PackArgs,
    },
}

/// Pack command arguments.
///
/// Flags override matching keys in `wcpack.toml` (looked up next to the
/// entry file, or passed via `--config`).
#[derive(clap::Args, Debug, Clone)]
pub struct PackArgs {
    /// Root directory for emitted files (legacy form)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Root directory for emitted files (override form, wins over --output)
    #[arg(long, value_hint = clap::ValueHint::DirPath)]
    pub output_path: Option<PathBuf>,

    /// Prefix prepended to the returned public reference
    #[arg(long)]
    pub public_path: Option<String>,

    /// Minify HTML/CSS/JS output
    #[arg(short, long)]
    pub minify: bool,

    /// Namespace segment: a literal, or `@dir` for the entry's directory
    /// name (defaults to the entry file name)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// External command piped over script file content before emission
    #[arg(long, num_args = 1.., value_name = "CMD")]
    pub transform_script: Vec<String>,

    /// Config file path (default: wcpack.toml next to the entry file)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
}
