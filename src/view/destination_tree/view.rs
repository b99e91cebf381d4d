use super::node::NodeId;
use super::tree::DestinationTree;
use crate::model::filesystem::FsResult;
use std::path::Path;

/// Selection and scrolling over a `DestinationTree`
///
/// Unlike a file explorer, nothing is selected initially: the user has to
/// pick a folder before a destination can be confirmed.
#[derive(Debug)]
pub struct DestinationTreeView {
    tree: DestinationTree,
    selected_node: Option<NodeId>,
    /// Scroll offset (index into visible nodes)
    scroll_offset: usize,
    /// Last known viewport height (for scrolling calculations)
    pub(crate) viewport_height: usize,
}

impl DestinationTreeView {
    pub fn new(tree: DestinationTree) -> Self {
        Self {
            tree,
            selected_node: None,
            scroll_offset: 0,
            viewport_height: 10, // Default, will be updated during rendering
        }
    }

    /// Set the viewport height (should be called during rendering)
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
    }

    pub fn tree(&self) -> &DestinationTree {
        &self.tree
    }

    /// Visible nodes with their indent levels, for rendering
    pub fn get_display_nodes(&self) -> Vec<(NodeId, usize)> {
        self.tree
            .get_visible_nodes()
            .into_iter()
            .map(|id| (id, self.tree.get_depth(id)))
            .collect()
    }

    pub fn get_selected(&self) -> Option<NodeId> {
        self.selected_node
    }

    pub fn set_selected(&mut self, node_id: Option<NodeId>) {
        self.selected_node = node_id;
        self.update_scroll_for_selection();
    }

    /// Path of the selected folder
    pub fn get_selected_path(&self) -> Option<&Path> {
        self.selected_node
            .and_then(|id| self.tree.get_node(id))
            .map(|node| node.entry.path.as_path())
    }

    /// Move the selection by `delta` visible rows, clamped to the list.
    /// With nothing selected, any movement selects the first row.
    fn move_selection(&mut self, delta: isize) {
        let visible = self.tree.get_visible_nodes();
        if visible.is_empty() {
            return;
        }

        let new_pos = match self
            .selected_node
            .and_then(|current| visible.iter().position(|&id| id == current))
        {
            Some(pos) => pos
                .saturating_add_signed(delta)
                .min(visible.len() - 1),
            None => 0,
        };
        self.selected_node = Some(visible[new_pos]);
        self.update_scroll_for_selection();
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    /// Move selection up by a page (viewport height)
    pub fn select_page_up(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        self.move_selection(-(self.viewport_height as isize));
    }

    /// Move selection down by a page (viewport height)
    pub fn select_page_down(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        self.move_selection(self.viewport_height as isize);
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.tree.get_visible_nodes().first() {
            self.selected_node = Some(first);
            self.update_scroll_for_selection();
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.tree.get_visible_nodes().last() {
            self.selected_node = Some(last);
            self.update_scroll_for_selection();
        }
    }

    /// Select the parent of the selected node, unless that is the hidden root
    pub fn select_parent(&mut self) {
        let parent = self
            .selected_node
            .and_then(|id| self.tree.get_node(id))
            .and_then(|node| node.parent);
        if let Some(parent_id) = parent {
            if parent_id != self.tree.root_id() {
                self.selected_node = Some(parent_id);
                self.update_scroll_for_selection();
            }
        }
    }

    /// Keep the selection inside the viewport, scrolling only when it goes
    /// past an edge.
    pub fn update_scroll_for_selection(&mut self) {
        if self.viewport_height == 0 {
            return;
        }

        if let Some(pos) = self.get_selected_index() {
            if pos < self.scroll_offset {
                self.scroll_offset = pos;
            } else if pos >= self.scroll_offset + self.viewport_height {
                self.scroll_offset = pos - self.viewport_height + 1;
            }
        }
    }

    pub fn get_scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Index of the selected node in the visible list
    pub fn get_selected_index(&self) -> Option<usize> {
        let selected = self.selected_node?;
        self.tree
            .get_visible_nodes()
            .iter()
            .position(|&id| id == selected)
    }

    /// Visible node at an absolute index (not accounting for scroll)
    pub fn get_node_at_index(&self, index: usize) -> Option<NodeId> {
        self.tree.get_visible_nodes().get(index).copied()
    }

    pub fn visible_count(&self) -> usize {
        self.tree.get_visible_nodes().len()
    }

    /// Expand the selected folder
    pub fn expand_selected(&mut self) -> FsResult<()> {
        match self.selected_node {
            Some(id) => self.tree.expand_node(id),
            None => Ok(()),
        }
    }

    /// Collapse the selected folder, or move to its parent when it is
    /// already collapsed
    pub fn collapse_selected(&mut self) {
        let Some(id) = self.selected_node else {
            return;
        };
        let expanded = self.tree.get_node(id).is_some_and(|n| n.is_expanded());
        if expanded {
            self.tree.collapse_node(id);
        } else {
            self.select_parent();
        }
    }

    /// Expand or collapse `id`, keeping the selection on a visible node
    pub fn toggle(&mut self, id: NodeId) -> FsResult<()> {
        let result = self.tree.toggle_node(id);
        if let Some(selected) = self.selected_node {
            if self.tree.get_node(selected).is_none() {
                // The selection was inside the collapsed subtree
                self.selected_node = Some(id);
            }
        }
        self.update_scroll_for_selection();
        result
    }
}
