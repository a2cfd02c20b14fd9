//! Utility modules for the component packer.

pub mod path;
