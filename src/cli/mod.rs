//! Command-line interface.

mod args;
pub mod pack;

pub use args::{Cli, Commands, PackArgs};
