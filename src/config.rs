//! Packer configuration.
//!
//! Options come from three places, lowest to highest precedence:
//! an optional `wcpack.toml` next to the entry file, then CLI flags.
//! The resolved [`EmitConfig`] is an explicit struct handed to the
//! emission pipeline; nothing reads configuration off ambient state.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils::path::absolutize;

/// Default config file name, looked up next to the entry file.
pub const CONFIG_FILE_NAME: &str = "wcpack.toml";

// ============================================================================
// Errors
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// Raw options
// ============================================================================

/// Raw option bag, as accepted from the CLI or a `wcpack.toml` file.
///
/// `output` is the legacy form, `output-path` the override form; when both
/// are present the override wins. One of the two is required.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PackOptions {
    /// Root directory for emitted files (legacy form).
    pub output: Option<PathBuf>,
    /// Root directory for emitted files (override form, wins over `output`).
    pub output_path: Option<PathBuf>,
    /// Prefix prepended to the returned public reference.
    pub public_path: Option<String>,
    /// Enable the per-kind minification pass.
    pub minify: Option<bool>,
    /// Namespace segment selector (see [`Namespace::parse`]).
    pub namespace: Option<String>,
    /// External command (argv form) piped over script file content.
    pub transform_script: Option<Vec<String>>,
}

impl PackOptions {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load options from `wcpack.toml` next to the entry file, if present.
    pub fn load_for_entry(entry: &Path) -> Result<Self, ConfigError> {
        let candidate = entry
            .parent()
            .map_or_else(|| PathBuf::from(CONFIG_FILE_NAME), |d| d.join(CONFIG_FILE_NAME));
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay `over` on top of `self`, field by field.
    pub fn merge(self, over: Self) -> Self {
        Self {
            output: over.output.or(self.output),
            output_path: over.output_path.or(self.output_path),
            public_path: over.public_path.or(self.public_path),
            minify: over.minify.or(self.minify),
            namespace: over.namespace.or(self.namespace),
            transform_script: over.transform_script.or(self.transform_script),
        }
    }
}

// ============================================================================
// Namespace
// ============================================================================

/// The output-root segment that keeps one component's files apart from
/// another's inside a shared output directory.
///
/// A pure function of configuration and the entry path, never of
/// invocation history.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Namespace {
    /// Entry file name (`index.html`), the default.
    #[default]
    Entry,
    /// Name of the directory containing the entry file.
    Dir,
    /// Fixed literal segment.
    Literal(String),
}

impl Namespace {
    /// Parse the CLI/toml form: `@dir` selects [`Namespace::Dir`], anything
    /// else is a literal segment.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "@dir" => Self::Dir,
            other => Self::Literal(other.to_string()),
        }
    }

    /// Compute the namespace segment for an entry file.
    pub fn segment(&self, entry: &Path) -> Result<String, ConfigError> {
        let segment = match self {
            Self::Entry => entry
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "entry `{}` has no usable file name",
                        entry.display()
                    ))
                })?,
            Self::Dir => entry
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    ConfigError::Validation(format!(
                        "entry `{}` has no usable parent directory name",
                        entry.display()
                    ))
                })?,
            Self::Literal(s) => s.clone(),
        };

        if segment.is_empty() {
            return Err(ConfigError::Validation(
                "namespace segment must not be empty".into(),
            ));
        }
        if segment.contains('/') || segment.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "namespace segment `{segment}` must not contain path separators"
            )));
        }
        Ok(segment)
    }
}

// ============================================================================
// Emit configuration
// ============================================================================

/// Resolved configuration for one emission run.
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// The component's source directory; output paths mirror the layout
    /// relative to this.
    pub context_dir: PathBuf,
    /// Root directory for emitted files.
    pub output_root: PathBuf,
    /// Prefix prepended to the returned public reference.
    pub public_path_prefix: String,
    /// Namespace segment selector.
    pub namespace: Namespace,
    /// Enable the per-kind minification pass.
    pub minify: bool,
}

impl EmitConfig {
    /// Resolve an option bag against an entry file.
    pub fn from_options(entry: &Path, options: &PackOptions) -> Result<Self, ConfigError> {
        let entry = absolutize(entry);
        let output_root = options
            .output_path
            .clone()
            .or_else(|| options.output.clone())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "no output directory configured (set `output` or `output-path`)".into(),
                )
            })?;

        let context_dir = entry
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

        Ok(Self {
            context_dir,
            output_root,
            public_path_prefix: options.public_path.clone().unwrap_or_default(),
            namespace: options
                .namespace
                .as_deref()
                .map_or_else(Namespace::default, Namespace::parse),
            minify: options.minify.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_cli_wins() {
        let file = PackOptions {
            output: Some(PathBuf::from("from-file")),
            minify: Some(true),
            ..Default::default()
        };
        let cli = PackOptions {
            output: Some(PathBuf::from("from-cli")),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.output, Some(PathBuf::from("from-cli")));
        // CLI silence keeps the file value
        assert_eq!(merged.minify, Some(true));
    }

    #[test]
    fn test_output_path_overrides_output() {
        let options = PackOptions {
            output: Some(PathBuf::from("legacy")),
            output_path: Some(PathBuf::from("override")),
            ..Default::default()
        };
        let config = EmitConfig::from_options(Path::new("/c/index.html"), &options).unwrap();
        assert_eq!(config.output_root, PathBuf::from("override"));
    }

    #[test]
    fn test_missing_output_rejected() {
        let err = EmitConfig::from_options(Path::new("/c/index.html"), &PackOptions::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_namespace_parse() {
        assert_eq!(Namespace::parse("@dir"), Namespace::Dir);
        assert_eq!(
            Namespace::parse("widgets"),
            Namespace::Literal("widgets".into())
        );
    }

    #[test]
    fn test_namespace_segments() {
        let entry = Path::new("/components/widget/index.html");
        assert_eq!(Namespace::Entry.segment(entry).unwrap(), "index.html");
        assert_eq!(Namespace::Dir.segment(entry).unwrap(), "widget");
        assert_eq!(
            Namespace::Literal("fixed".into()).segment(entry).unwrap(),
            "fixed"
        );
    }

    #[test]
    fn test_namespace_rejects_separators() {
        let entry = Path::new("/c/index.html");
        assert!(Namespace::Literal("a/b".into()).segment(entry).is_err());
        assert!(Namespace::Literal(String::new()).segment(entry).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let options: PackOptions = toml::from_str(
            r#"
                output = "dist/components"
                public-path = "/components/"
                minify = true
                namespace = "@dir"
                transform-script = ["babel", "--no-babelrc"]
            "#,
        )
        .unwrap();
        assert_eq!(options.output, Some(PathBuf::from("dist/components")));
        assert_eq!(options.public_path.as_deref(), Some("/components/"));
        assert_eq!(options.minify, Some(true));
        assert_eq!(options.namespace.as_deref(), Some("@dir"));
        assert_eq!(
            options.transform_script,
            Some(vec!["babel".to_string(), "--no-babelrc".to_string()])
        );
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<PackOptions, _> = toml::from_str("unknown-option = 1");
        assert!(result.is_err());
    }
}
