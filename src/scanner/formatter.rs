use std::path::Path;

use super::node::FolderNode;
use super::size::{format_kb, format_size};

const BANNER_RULE_WIDTH: usize = 74;

/// Format options for tree output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum depth to display
    pub max_depth: Option<usize>,
    /// Show direct file counts
    pub show_counts: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(3),
            show_counts: true,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_counts(mut self, show: bool) -> Self {
        self.show_counts = show;
        self
    }

    pub fn unlimited() -> Self {
        Self {
            max_depth: None,
            show_counts: true,
        }
    }
}

/// Header printed above a listing
pub fn format_banner(root: &Path) -> String {
    let rule = "-".repeat(BANNER_RULE_WIDTH);
    format!("{rule}\nFiles from directory : {}\n{rule}\n", root.display())
}

/// One line per folder, indented with a tab per nesting level.
pub fn format_listing(node: &FolderNode) -> String {
    let mut output = String::new();
    format_listing_recursive(node, &mut output, 0);
    output
}

fn format_listing_recursive(node: &FolderNode, output: &mut String, depth: usize) {
    output.push_str(&"\t".repeat(depth));
    output.push_str(&format!(
        "[{}] | Number of Files: {} | Total size of the files: {}\n",
        node.name(),
        node.direct_file_count(),
        format_kb(node.total_size())
    ));

    for child in node.children() {
        format_listing_recursive(child, output, depth + 1);
    }
}

/// Format node as a tree string
pub fn format_tree(node: &FolderNode, options: &FormatOptions) -> String {
    let mut output = String::new();
    format_tree_recursive(node, &mut output, "", true, 0, options);
    output
}

fn format_tree_recursive(
    node: &FolderNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    depth: usize,
    options: &FormatOptions,
) {
    if let Some(max_depth) = options.max_depth {
        if depth > max_depth {
            return;
        }
    }

    let connector = if depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let count_str = if options.show_counts {
        format!(" ({} files)", node.direct_file_count())
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{:>10}  {}/{}\n",
        prefix,
        connector,
        format_size(node.total_size()),
        node.name(),
        count_str
    ));

    let new_prefix = if depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let total = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        format_tree_recursive(child, output, &new_prefix, i == total - 1, depth + 1, options);
    }
}

/// Format node as JSON
pub fn format_json(node: &FolderNode, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(node)
    } else {
        serde_json::to_string(node)
    }
}
