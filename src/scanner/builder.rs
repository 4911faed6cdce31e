use std::fs;
use std::io;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, TallyError};

use super::node::FolderNode;
use super::options::ScanOptions;

/// Build the folder tree rooted at `path` with default options.
pub fn build(path: &Path) -> Result<FolderNode> {
    build_with_options(path, &ScanOptions::default())
}

/// Build the folder tree rooted at `path`.
///
/// Every directory is listed exactly once. Entries arrive contents-first, so
/// a folder is complete by the time it is attached to its parent, and the
/// traversal keeps its own stack instead of recursing. Any unreadable entry
/// aborts the whole build: callers never receive a partial tree.
pub fn build_with_options(path: &Path, options: &ScanOptions) -> Result<FolderNode> {
    let is_dir = fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false);
    if !is_dir {
        return Err(TallyError::InvalidDirectory(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), "Building folder tree");

    fold_walk(path, walker(path, options), options)
}

fn walker(path: &Path, options: &ScanOptions) -> walkdir::IntoIter {
    // One level deeper than the guard so that crossing it is observable
    WalkDir::new(path)
        .follow_links(options.follow_symlinks)
        .contents_first(true)
        .max_depth(options.depth_limit.saturating_add(1))
        .into_iter()
}

/// Fold contents-first walk entries into the tree rooted at `root`.
fn fold_walk<I>(root: &Path, entries: I, options: &ScanOptions) -> Result<FolderNode>
where
    I: IntoIterator<Item = walkdir::Result<DirEntry>>,
{
    // open[d] accumulates the contents of the folder currently open at depth d
    let mut open: Vec<FolderNode> = Vec::new();

    for result in entries {
        if options.is_cancelled() {
            tracing::debug!(path = %root.display(), "Build cancelled");
            return Err(TallyError::Cancelled);
        }

        let entry = result.map_err(|err| walk_error(root, err))?;
        let depth = entry.depth();

        if depth > options.depth_limit {
            return Err(TallyError::DepthLimitExceeded {
                path: entry.into_path(),
                limit: options.depth_limit,
            });
        }

        if entry.file_type().is_dir() {
            let contents = open.split_off(depth.min(open.len()));
            let node = contents.into_iter().next().unwrap_or_default();

            if let Some(progress) = &options.progress {
                progress.record_folder(entry.path());
            }

            if depth == 0 {
                let root = node.renamed(base_name(root));
                tracing::debug!(
                    name = root.name(),
                    size = root.total_size(),
                    folders = root.folder_count(),
                    "Folder tree complete"
                );
                return Ok(root);
            }

            let node = node.renamed(entry.file_name().to_string_lossy().into_owned());
            tracing::trace!(
                path = %entry.path().display(),
                files = node.direct_file_count(),
                size = node.total_size(),
                "Folder complete"
            );
            parent_of(&mut open, depth).add_child(node);
        } else {
            let size = entry_size(&entry)?;

            if let Some(progress) = &options.progress {
                progress.record_file();
            }

            parent_of(&mut open, depth).add_file(size);
        }
    }

    // The walker always yields the root last, so falling through means it vanished
    Err(TallyError::InvalidDirectory(root.to_path_buf()))
}

/// Byte length of a non-directory entry, read fresh from the filesystem.
fn entry_size(entry: &DirEntry) -> Result<u64> {
    entry
        .metadata()
        .map(|metadata| metadata.len())
        .map_err(|err| TallyError::Io {
            path: entry.path().to_path_buf(),
            source: io::Error::from(err),
        })
}

/// Accumulator for the folder that contains an entry at `depth` (>= 1).
fn parent_of(open: &mut Vec<FolderNode>, depth: usize) -> &mut FolderNode {
    if open.len() < depth {
        open.resize_with(depth, FolderNode::default);
    }
    &mut open[depth - 1]
}

fn walk_error(root: &Path, err: walkdir::Error) -> TallyError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    if let Some(ancestor) = err.loop_ancestor() {
        tracing::warn!(
            path = %path.display(),
            ancestor = %ancestor.display(),
            "Symlink loop while listing"
        );
    }

    TallyError::Listing {
        path,
        source: io::Error::from(err),
    }
}

/// Last path component, or the canonical one for paths like `.` and `/`.
fn base_name(path: &Path) -> String {
    if let Some(name) = path.file_name() {
        return name.to_string_lossy().into_owned();
    }

    path.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
