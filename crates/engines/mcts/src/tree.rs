//! Index-addressed search tree.
//!
//! All nodes live in one `Vec`; a node refers to its parent and children by
//! index, so walking up for backpropagation is O(1) per step and there are
//! no ownership cycles.

use flags_core::{Move, Position, Role, legal_moves, winner};

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    /// Side to move in `position`
    pub to_move: Role,
    /// Move that led here from the parent (None at the root)
    pub mv: Option<Move>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    /// Sum of rewards, counted for the side that moved into this node
    pub total_reward: f64,
    /// Set when the game is over in this node
    pub outcome: Option<Role>,
    pub expanded: bool,
}

impl Node {
    fn new(position: Position, to_move: Role, mv: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            outcome: winner(&position, to_move),
            position,
            to_move,
            mv,
            parent,
            children: Vec::new(),
            visits: 0,
            total_reward: 0.0,
            expanded: false,
        }
    }

    /// The side whose decision created this node.
    pub fn mover(&self) -> Role {
        self.to_move.other()
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    /// UCB1 score as seen by the parent choosing among its children.
    /// Unvisited nodes are always tried first.
    pub fn ucb1(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let explore = exploration * ((parent_visits as f64).ln() / self.visits as f64).sqrt();
        self.mean_reward() + explore
    }
}

/// Reward of a finished (or abandoned) rollout for `role`: +1 win, -1 loss,
/// 0 when the rollout ended undecided.
pub fn reward(outcome: Option<Role>, role: Role) -> f64 {
    match outcome {
        Some(w) if w == role => 1.0,
        Some(_) => -1.0,
        None => 0.0,
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(position: Position, to_move: Role) -> Self {
        Self {
            nodes: vec![Node::new(position, to_move, None, None)],
        }
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Materializes every legal child of `id` at once. Terminal and already
    /// expanded nodes are left alone.
    pub fn expand(&mut self, id: NodeId) -> &[NodeId] {
        if !self.nodes[id].expanded && !self.nodes[id].is_terminal() {
            let (pos, to_move) = (self.nodes[id].position, self.nodes[id].to_move);
            for mv in legal_moves(&pos, to_move) {
                let child = self.nodes.len();
                self.nodes.push(Node::new(
                    pos.with_move(to_move, mv),
                    to_move.other(),
                    Some(mv),
                    Some(id),
                ));
                self.nodes[id].children.push(child);
            }
            self.nodes[id].expanded = true;
        }
        &self.nodes[id].children
    }

    /// Like [`Tree::expand`], but leaves `id` unexpanded when its children
    /// would grow the arena past `max_nodes`.
    pub fn expand_within(&mut self, id: NodeId, max_nodes: usize) -> &[NodeId] {
        let node = &self.nodes[id];
        if !node.expanded && !node.is_terminal() {
            let fresh = legal_moves(&node.position, node.to_move).len();
            if self.nodes.len() + fresh > max_nodes {
                return &[];
            }
        }
        self.expand(id)
    }

    /// Child of `id` with the highest UCB1 score; the first one wins ties.
    pub fn select_child(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &parent.children {
            let score = self.nodes[child].ucb1(parent.visits, exploration);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Walks from `leaf` up to the root, crediting each node with the
    /// reward for the side that moved into it.
    pub fn backpropagate(&mut self, leaf: NodeId, outcome: Option<Role>) {
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.total_reward += reward(outcome, node.mover());
            current = node.parent;
        }
    }

    /// Root child with the most visits; mean reward and then generation
    /// order break ties.
    pub fn most_visited_child(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for &child in &self.root().children {
            let node = &self.nodes[child];
            let better = match best {
                None => true,
                Some(b) => {
                    node.visits > b.visits
                        || (node.visits == b.visits && node.mean_reward() > b.mean_reward())
                }
            };
            if better {
                best = Some(node);
            }
        }
        best
    }

    /// Number of edges from the root to `id`.
    pub fn depth_of(&self, mut id: NodeId) -> u8 {
        let mut depth = 0u8;
        while let Some(parent) = self.nodes[id].parent {
            depth = depth.saturating_add(1);
            id = parent;
        }
        depth
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
