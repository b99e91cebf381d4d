use crate::model::filesystem::DirEntry;
use std::fmt;
use std::path::PathBuf;

/// Unique identifier for a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A folder in the destination tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: NodeId,
    /// Filesystem entry information
    pub entry: DirEntry,
    /// Symlink-resolved path, used to detect cycles. `None` if it could not
    /// be resolved (the node is still offered, it just cannot match).
    pub canonical: Option<PathBuf>,
    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,
    /// Child node IDs, only populated while expanded
    pub children: Vec<NodeId>,
    pub state: NodeState,
}

impl TreeNode {
    pub fn new(
        id: NodeId,
        entry: DirEntry,
        canonical: Option<PathBuf>,
        parent: Option<NodeId>,
    ) -> Self {
        Self {
            id,
            entry,
            canonical,
            parent,
            children: Vec::new(),
            state: NodeState::Collapsed,
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.state == NodeState::Expanded
    }

    pub fn is_collapsed(&self) -> bool {
        self.state == NodeState::Collapsed
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, NodeState::Error(_))
    }

    /// Check if this node leads back to one of its ancestors
    pub fn is_cycle(&self) -> bool {
        self.state == NodeState::Cycle
    }

    /// Whether expanding this node could show anything new
    pub fn can_expand(&self) -> bool {
        !self.is_expanded() && !self.is_cycle()
    }
}

/// State of a tree node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeState {
    /// Children not loaded
    Collapsed,
    /// Children loaded and shown
    Expanded,
    /// Failed to read the folder (with error message)
    Error(String),
    /// Resolves to the same folder as an ancestor; never expanded
    Cycle,
}
