use serde::Serialize;

/// One folder of a scanned tree with its aggregated statistics.
///
/// Built once by the scanner and read through accessors afterwards. The only
/// mutation offered is reordering `children` for presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderNode {
    name: String,
    children: Vec<FolderNode>,
    direct_file_count: u64,
    total_size: u64,
}

impl FolderNode {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
            direct_file_count: 0,
            total_size: 0,
        }
    }

    pub(crate) fn renamed(mut self, name: String) -> Self {
        self.name = name;
        self
    }

    /// Account for one non-directory entry of `size` bytes.
    pub(crate) fn add_file(&mut self, size: u64) {
        self.direct_file_count += 1;
        self.total_size += size;
    }

    /// Attach a finished subtree. Only its size propagates upward.
    pub(crate) fn add_child(&mut self, child: FolderNode) {
        self.total_size += child.total_size;
        self.children.push(child);
    }

    /// Folder base name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Immediate subfolders
    pub fn children(&self) -> &[FolderNode] {
        &self.children
    }

    /// Non-directory entries directly inside this folder
    pub fn direct_file_count(&self) -> u64 {
        self.direct_file_count
    }

    /// Bytes of every file anywhere below this folder
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn total_size_kb(&self) -> f64 {
        self.total_size as f64 / 1024.0
    }

    /// Find an immediate child by name
    pub fn child(&self, name: &str) -> Option<&FolderNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Number of folders in this subtree, including this one
    pub fn folder_count(&self) -> u64 {
        1 + self.children.iter().map(|c| c.folder_count()).sum::<u64>()
    }

    /// Files anywhere in this subtree
    pub fn recursive_file_count(&self) -> u64 {
        self.direct_file_count
            + self
                .children
                .iter()
                .map(|c| c.recursive_file_count())
                .sum::<u64>()
    }

    /// Sort children by total size (largest first), recursively
    pub fn sort_by_size(&mut self) {
        self.children
            .sort_by(|a, b| b.total_size.cmp(&a.total_size).then_with(|| a.name.cmp(&b.name)));
        for child in &mut self.children {
            child.sort_by_size();
        }
    }

    /// Sort children alphabetically, recursively
    pub fn sort_by_name(&mut self) {
        self.children.sort_by(|a, b| a.name.cmp(&b.name));
        for child in &mut self.children {
            child.sort_by_name();
        }
    }
}
