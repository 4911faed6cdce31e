//! Folder tree construction and presentation.
//!
//! This module provides:
//! - Building a `FolderNode` tree with per-folder file counts and sizes
//! - Background builds with cancellation and progress
//! - Text, tree and JSON renderings of a finished tree

mod builder;
mod formatter;
mod node;
mod options;
mod size;
mod worker;

pub use builder::{build, build_with_options};
pub use formatter::{format_banner, format_json, format_listing, format_tree, FormatOptions};
pub use node::FolderNode;
pub use options::{ScanOptions, DEFAULT_DEPTH_LIMIT};
pub use size::{format_kb, format_size};
pub use worker::{spawn_build, BuildHandle, ScanProgress};
