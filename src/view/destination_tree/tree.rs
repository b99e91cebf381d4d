use super::node::{NodeId, NodeState, TreeNode};
use crate::model::filesystem::{DirEntry, EntryType, FileSystem, FsError, FsResult};
use crate::model::listing::compare_names;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Folder tree with lazy loading support
///
/// The tree starts with the root and its immediate sub-folders. Deeper
/// folders are only read when explicitly expanded via `expand_node()`.
/// The root itself is never part of the visible list.
pub struct DestinationTree {
    /// All nodes indexed by ID
    nodes: HashMap<NodeId, TreeNode>,
    root_id: NodeId,
    next_id: usize,
    /// Whether folders starting with '.' are offered
    show_hidden: bool,
    fs: Arc<dyn FileSystem>,
}

impl std::fmt::Debug for DestinationTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DestinationTree")
            .field(
                "root_path",
                &self.get_node(self.root_id).map(|n| &n.entry.path),
            )
            .field("node_count", &self.nodes.len())
            .field("show_hidden", &self.show_hidden)
            .finish()
    }
}

impl DestinationTree {
    /// Create a tree rooted at `root_path` and load its first level
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist, isn't a folder, or can't
    /// be read.
    pub fn new(root_path: PathBuf, fs: Arc<dyn FileSystem>, show_hidden: bool) -> FsResult<Self> {
        if !fs.is_folder(&root_path)? {
            return Err(FsError::NotADirectory(root_path));
        }

        let name = root_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root_path.display().to_string());
        let root_entry = DirEntry::new(root_path.clone(), name, EntryType::Directory);
        let canonical = fs.canonicalize(&root_path).ok();

        let root_id = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root_id, TreeNode::new(root_id, root_entry, canonical, None));

        let mut tree = Self {
            nodes,
            root_id,
            next_id: 1,
            show_hidden,
            fs,
        };
        tree.expand_node(root_id)?;
        Ok(tree)
    }

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    fn get_node_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&id)
    }

    /// Expand a folder node (load its sub-folders)
    ///
    /// Already expanded nodes and cycle nodes are left alone. A node that
    /// failed before is retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder cannot be read; the node is then put
    /// in the `Error` state.
    pub fn expand_node(&mut self, id: NodeId) -> FsResult<()> {
        let Some(node) = self.get_node(id) else {
            return Ok(());
        };
        if !node.can_expand() {
            return Ok(());
        }
        let path = node.entry.path.clone();

        match self.fs.read_dir_folders(&path) {
            Ok(entries) => {
                let mut folders: Vec<DirEntry> = entries
                    .into_iter()
                    .filter(|e| self.show_hidden || !e.name.starts_with('.'))
                    .collect();
                folders.sort_by(|a, b| compare_names(&a.name, &b.name));

                let ancestors = self.ancestor_canonicals(id);
                let mut child_ids = Vec::with_capacity(folders.len());
                for entry in folders {
                    let canonical = self.fs.canonicalize(&entry.path).ok();
                    let is_cycle = canonical
                        .as_ref()
                        .is_some_and(|c| ancestors.iter().any(|a| a == c));
                    let child_id = self.add_node(entry, canonical, id);
                    if is_cycle {
                        tracing::debug!("Folder {:?} loops back to an ancestor", child_id);
                        if let Some(child) = self.get_node_mut(child_id) {
                            child.state = NodeState::Cycle;
                        }
                    }
                    child_ids.push(child_id);
                }

                if let Some(node) = self.get_node_mut(id) {
                    node.children = child_ids;
                    node.state = NodeState::Expanded;
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to read folder {:?}: {}", path, e);
                if let Some(node) = self.get_node_mut(id) {
                    node.state = NodeState::Error(e.to_string());
                }
                Err(e)
            }
        }
    }

    /// Collapse a folder node, dropping its descendants from memory
    ///
    /// The root cannot be collapsed.
    pub fn collapse_node(&mut self, id: NodeId) {
        if id == self.root_id {
            return;
        }
        let Some(node) = self.get_node(id) else {
            return;
        };
        if !node.is_expanded() {
            return;
        }

        for child_id in node.children.clone() {
            self.remove_node_recursive(child_id);
        }

        if let Some(node) = self.get_node_mut(id) {
            node.children.clear();
            node.state = NodeState::Collapsed;
        }
    }

    /// Toggle node expansion (expand if collapsed, collapse if expanded)
    pub fn toggle_node(&mut self, id: NodeId) -> FsResult<()> {
        match self.get_node(id) {
            Some(node) if node.is_expanded() => {
                self.collapse_node(id);
                Ok(())
            }
            Some(_) => self.expand_node(id),
            None => Ok(()),
        }
    }

    /// All visible nodes in tree order, excluding the root
    pub fn get_visible_nodes(&self) -> Vec<NodeId> {
        let mut visible = Vec::new();
        if let Some(root) = self.get_node(self.root_id) {
            for &child_id in &root.children {
                self.collect_visible_recursive(child_id, &mut visible);
            }
        }
        visible
    }

    fn collect_visible_recursive(&self, id: NodeId, visible: &mut Vec<NodeId>) {
        visible.push(id);

        if let Some(node) = self.get_node(id) {
            if node.is_expanded() {
                for &child_id in &node.children {
                    self.collect_visible_recursive(child_id, visible);
                }
            }
        }
    }

    /// Get the parent chain for a node (from root to node)
    pub fn get_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            ancestors.push(node_id);
            current = self.get_node(node_id).and_then(|n| n.parent);
        }

        ancestors.reverse();
        ancestors
    }

    /// Indent level of a visible node (top-level folders are 0)
    pub fn get_depth(&self, id: NodeId) -> usize {
        self.get_ancestors(id).len().saturating_sub(2)
    }

    /// Canonical paths of `id` and everything above it
    fn ancestor_canonicals(&self, id: NodeId) -> Vec<PathBuf> {
        self.get_ancestors(id)
            .into_iter()
            .filter_map(|a| self.get_node(a).and_then(|n| n.canonical.clone()))
            .collect()
    }

    fn add_node(&mut self, entry: DirEntry, canonical: Option<PathBuf>, parent: NodeId) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        self.nodes
            .insert(id, TreeNode::new(id, entry, canonical, Some(parent)));

        id
    }

    fn remove_node_recursive(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child_id in node.children {
                self.remove_node_recursive(child_id);
            }
        }
    }

    /// Get number of nodes currently in memory (root included)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
