//! dirtally - tally folder file counts and sizes into a directory tree
//!
//! This crate provides functionality for:
//! - Building an in-memory tree of folders with direct file counts and
//!   recursive byte totals
//! - Printing that tree as a listing, a box-drawing tree, or JSON

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod scanner;
pub mod signals;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TallyError};
pub use scanner::{build, FolderNode};
