//! Search tree nodes and their win/tie tallies.

use std::hash::Hash;

use uttt_core::{Outcome, Player};

/// Handle to a node stored in a [`crate::tree::Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// Playout tallies for a single node, counted from the point of view of
/// the player who made the move into it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    pub visits: u32,
    pub wins: u32,
    pub ties: u32,
}

impl NodeStats {
    /// Counts one playout result for `mover`.
    pub fn record(&mut self, outcome: Outcome, mover: Player) {
        self.visits += 1;
        match outcome {
            Outcome::Win(winner) if winner == mover => self.wins += 1,
            Outcome::Draw => self.ties += 1,
            _ => {}
        }
    }

    /// Empirical score in `[0, 1]`: a win counts 1, a tie half.
    ///
    /// Returns 0.0 if the node has never been visited.
    pub fn score(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            (self.wins as f32 + 0.5 * self.ties as f32) / self.visits as f32
        }
    }

    /// UCB1 value seen from the parent.
    ///
    /// `score + C * sqrt(ln(parent_visits) / visits)`; unvisited nodes are
    /// infinitely attractive.
    pub fn ucb1(&self, parent_visits: u32, exploration: f32) -> f32 {
        if self.visits == 0 {
            return f32::INFINITY;
        }
        let parent = (parent_visits.max(1) as f32).ln();
        self.score() + exploration * (parent / self.visits as f32).sqrt()
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct Node<M: Copy + Eq + Hash> {
    /// Move that led to this node (None at the start of the game).
    pub mv: Option<M>,

    /// Player who made `mv`; the node's stats are from their side.
    pub mover: Player,

    pub parent: Option<NodeId>,

    /// Children: (move, node_id) pairs.
    pub children: Vec<(M, NodeId)>,

    /// Whether this node has been expanded (children generated).
    pub expanded: bool,

    /// Cached result once the node is known to be a finished game.
    pub terminal: Option<Outcome>,

    pub stats: NodeStats,
}

impl<M: Copy + Eq + Hash> Node<M> {
    /// Create a new unexpanded node.
    pub fn new(mv: Option<M>, mover: Player, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            mover,
            parent,
            children: Vec::new(),
            expanded: false,
            terminal: None,
            stats: NodeStats::default(),
        }
    }

    /// Create a root node for a position where `to_move` is next.
    pub fn root(to_move: Player) -> Self {
        Self::new(None, to_move.opposite(), None)
    }
}
