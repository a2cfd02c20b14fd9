//! Script transforms applied before emission.
//!
//! A transform is a text-to-text strategy applied to script files only
//! (never to HTML or stylesheets). The built-in [`CommandTransform`]
//! pipes script content through an external command, which is how
//! transpilers are hooked in without linking them.

use anyhow::{Context, Result, anyhow, bail};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Pre-emission transform for script file content.
pub trait ScriptTransform {
    /// Transform script source text, returning the replacement text.
    fn apply(&self, source: &str) -> Result<String>;
}

/// Adapter for plain `Fn(&str) -> String` transforms.
pub struct FnTransform<F>(pub F);

impl<F> ScriptTransform for FnTransform<F>
where
    F: Fn(&str) -> String,
{
    fn apply(&self, source: &str) -> Result<String> {
        Ok((self.0)(source))
    }
}

/// Pipe script content through an external command (stdin to stdout).
#[derive(Debug, Clone)]
pub struct CommandTransform {
    command: Vec<String>,
}

impl CommandTransform {
    /// Create a transform from an argv-style command line.
    pub fn new(command: Vec<String>) -> Result<Self> {
        if command.is_empty() || command[0].trim().is_empty() {
            bail!("transform command must not be empty");
        }
        Ok(Self { command })
    }
}

impl ScriptTransform for CommandTransform {
    fn apply(&self, source: &str) -> Result<String> {
        let mut child = Command::new(&self.command[0])
            .args(&self.command[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn transform command `{}`", self.command[0]))?;

        // Feed stdin from a separate thread while stdout is drained below;
        // writing everything up front deadlocks once the content exceeds
        // the pipe buffers
        let writer = child.stdin.take().map(|mut stdin| {
            let bytes = source.as_bytes().to_vec();
            // Dropping stdin at the end of the thread closes the pipe so
            // the child sees EOF
            thread::spawn(move || match stdin.write_all(&bytes) {
                // A child that exits without draining stdin is not an error
                Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
                _ => Ok(()),
            })
        });

        let output = child
            .wait_with_output()
            .with_context(|| format!("transform command `{}` did not finish", self.command[0]))?;

        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| anyhow!("transform stdin writer panicked"))?
                .context("failed to write script content to transform stdin")?;
        }

        if !output.status.success() {
            bail!(
                "transform command `{}` failed ({}): {}",
                self.command[0],
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_transform() {
        let transform = FnTransform(|s: &str| s.to_uppercase());
        assert_eq!(transform.apply("var x;").unwrap(), "VAR X;");
    }

    #[test]
    fn test_empty_command_rejected() {
        assert!(CommandTransform::new(vec![]).is_err());
        assert!(CommandTransform::new(vec![String::new()]).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_command_transform_pipes_stdin() {
        let transform = CommandTransform::new(vec!["cat".into()]).unwrap();
        assert_eq!(transform.apply("var x = 1;").unwrap(), "var x = 1;");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_transform_streams_large_input() {
        // Well past the ~64 KiB pipe buffers in each direction
        let big = "var padding_line = 1;\n".repeat(100_000);
        let transform = CommandTransform::new(vec!["cat".into()]).unwrap();
        assert_eq!(transform.apply(&big).unwrap(), big);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_transform_child_ignoring_stdin() {
        // `true` exits without reading stdin; the broken pipe must not
        // surface as a failure
        let transform = CommandTransform::new(vec!["true".into()]).unwrap();
        assert_eq!(transform.apply("var x = 1;").unwrap(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_transform_failure_is_error() {
        let transform = CommandTransform::new(vec!["false".into()]).unwrap();
        assert!(transform.apply("anything").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_command_is_error() {
        let transform =
            CommandTransform::new(vec!["wcpack-definitely-not-a-command".into()]).unwrap();
        assert!(transform.apply("x").is_err());
    }
}
