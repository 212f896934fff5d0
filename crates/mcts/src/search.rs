//! Monte Carlo Tree Search implementation.
//!
//! Plain UCB1 selection over win/tie tallies, one-child expansion and
//! random playouts. The tree survives between moves: when the position
//! handed to the next search is one move below the stored root, that
//! move's subtree is promoted and its statistics kept.

use std::hash::Hash;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};
use uttt_core::{Agent, Game, Outcome, Result, UtttError};

use crate::{
    config::MctsConfig,
    evaluator::Evaluator,
    node::{Node, NodeId},
    tree::Tree,
};

/// Statistics for one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats<M> {
    pub mv: M,
    pub visits: u32,
    /// Empirical score for the player to move at the root.
    pub score: f32,
}

/// Result of an MCTS search.
#[derive(Clone, Debug)]
pub struct SearchResult<M: Copy + Eq + Hash> {
    /// Chosen move: highest empirical score, ties broken by visits.
    pub best_move: M,

    /// Iterations run by this search (fewer than budgeted if the clock ran out).
    pub iterations: usize,

    /// Root visits, including any carried over from earlier searches.
    pub root_visits: u32,

    /// One entry per root child, in move-generation order.
    pub children: Vec<ChildStats<M>>,

    /// Whether the root was carried over from the previous search.
    pub reused: bool,

    pub elapsed: Duration,
}

impl<M: Copy + Eq + Hash> SearchResult<M> {
    /// Stats for the chosen move, if the root was expanded.
    pub fn best(&self) -> Option<&ChildStats<M>> {
        self.children.iter().find(|child| child.mv == self.best_move)
    }
}

/// Monte Carlo Tree Search with UCB1 selection.
///
/// Generic over:
/// - `G`: The game being played
/// - `E`: The leaf evaluation strategy
/// - `R`: The random number generator used for tie-breaking and fallbacks
pub struct Mcts<G: Game, E: Evaluator<G>, R: Rng> {
    config: MctsConfig,
    evaluator: E,
    rng: R,
    tree: Option<Tree<G::Move>>,
    /// Position at the stored root.
    root_state: Option<G>,
    _game: PhantomData<G>,
}

impl<G, E, R> Mcts<G, E, R>
where
    G: Game + PartialEq,
    E: Evaluator<G>,
    R: Rng,
{
    /// Create a new MCTS instance.
    pub fn new(config: MctsConfig, evaluator: E, rng: R) -> Self {
        Self {
            config,
            evaluator,
            rng,
            tree: None,
            root_state: None,
            _game: PhantomData,
        }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Number of nodes currently held in the search tree.
    pub fn tree_size(&self) -> usize {
        self.tree.as_ref().map_or(0, Tree::len)
    }

    /// Drops the stored tree.
    pub fn clear(&mut self) {
        self.tree = None;
        self.root_state = None;
    }

    /// Runs a search from `state` and reports root statistics.
    ///
    /// The tree is left rooted at `state`; [`Mcts::advance`] moves it down.
    ///
    /// # Errors
    /// Returns `NoAvailableMoves` if `state` is already decided, or an
    /// error from the evaluator or from replaying tree moves.
    pub fn search(&mut self, state: &G) -> Result<SearchResult<G::Move>> {
        if state.is_terminal() {
            return Err(UtttError::NoAvailableMoves);
        }

        let start = Instant::now();
        let reused = self.prepare_root(state);
        let ply = state.moves_played();
        let budget = self.config.effective_iterations(ply);
        let deadline = self
            .config
            .effective_time_budget(ply)
            .map(|budget| start + budget);

        let mut iterations = 0;
        while iterations < budget {
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                break;
            }
            self.iterate(state)?;
            iterations += 1;
        }

        let result = self.extract_results(state, iterations, reused, start.elapsed())?;
        debug!(
            best = ?result.best_move,
            score = result.best().map(|child| child.score),
            iterations,
            root_visits = result.root_visits,
            tree_size = self.tree_size(),
            reused,
            elapsed_ms = result.elapsed.as_millis() as u64,
            "mcts search finished"
        );
        Ok(result)
    }

    /// Moves the stored root down to the child reached by `mv`.
    ///
    /// Forgets the tree if `mv` was never expanded.
    pub fn advance(&mut self, mv: G::Move) {
        let (Some(tree), Some(root_state)) = (self.tree.as_mut(), self.root_state.as_mut()) else {
            return;
        };
        match tree.child(NodeId::ROOT, mv) {
            Some(child) if root_state.apply_move(mv).is_ok() => tree.promote(child),
            _ => self.clear(),
        }
    }

    /// Makes the stored tree's root match `state`, reusing it if possible.
    /// Returns whether anything was reused.
    fn prepare_root(&mut self, state: &G) -> bool {
        let ply = state.moves_played();
        let last = state.last_move();

        if let (Some(tree), Some(root_state)) = (self.tree.as_mut(), self.root_state.as_mut()) {
            // Same position: e.g. one instance playing both sides.
            if *root_state == *state {
                trace!(ply, "reusing root as is");
                return true;
            }
            // One move below: promote the matching child.
            if ply == root_state.moves_played() + 1 {
                let mut next = root_state.clone();
                let child = last.and_then(|mv| {
                    let child = tree.child(NodeId::ROOT, mv)?;
                    next.apply_move(mv).ok()?;
                    Some(child)
                });
                if let Some(child) = child.filter(|_| next == *state) {
                    tree.promote(child);
                    *root_state = next;
                    trace!(ply, nodes = tree.len(), "promoted opponent reply to root");
                    return true;
                }
            }
        }

        trace!(ply, "starting fresh tree");
        let mut tree = Tree::new(state.to_move());
        tree.get_mut(NodeId::ROOT).mv = last;
        self.tree = Some(tree);
        self.root_state = Some(state.clone());
        false
    }

    fn tree(&self) -> &Tree<G::Move> {
        self.tree.as_ref().expect("BUG: search tree not prepared")
    }

    fn tree_mut(&mut self) -> &mut Tree<G::Move> {
        self.tree.as_mut().expect("BUG: search tree not prepared")
    }

    /// Run a single iteration: select -> expand -> simulate -> backpropagate.
    fn iterate(&mut self, root_state: &G) -> Result<()> {
        let mut state = root_state.clone();
        let mut current = NodeId::ROOT;

        // SELECT: descend through expanded nodes by UCB1
        loop {
            let node = self.tree().get(current);
            if node.terminal.is_some() || !node.expanded {
                break;
            }
            current = self.select_child(current);
            self.play_node_move(&mut state, current)?;
        }

        // EXPAND: a leaf grows children on its second visit
        if self.tree().get(current).terminal.is_none() {
            if state.is_terminal() {
                self.tree_mut().get_mut(current).terminal = Some(state.outcome());
            } else if self.tree().get(current).stats.visits > 0 {
                self.expand(current, &state);
                current = self.select_child(current);
                self.play_node_move(&mut state, current)?;
                if state.is_terminal() {
                    self.tree_mut().get_mut(current).terminal = Some(state.outcome());
                }
            }
        }

        // SIMULATE
        let outcome = match self.tree().get(current).terminal {
            Some(outcome) => outcome,
            None => self.evaluator.evaluate(&state)?,
        };

        // BACKPROPAGATE
        self.backpropagate(current, outcome);
        Ok(())
    }

    fn play_node_move(&self, state: &mut G, id: NodeId) -> Result<()> {
        let mv = self
            .tree()
            .get(id)
            .mv
            .expect("BUG: non-root node without a move");
        state.apply_move(mv)
    }

    /// Expand a node by adding children for all legal moves.
    fn expand(&mut self, id: NodeId, state: &G) {
        let mover = state.to_move();
        let tree = self.tree_mut();
        for mv in state.available_moves() {
            let child = tree.add(Node::new(Some(mv), mover, Some(id)));
            tree.get_mut(id).children.push((mv, child));
        }
        tree.get_mut(id).expanded = true;
    }

    /// Select the child with the highest UCB1 value, breaking ties at random.
    fn select_child(&mut self, id: NodeId) -> NodeId {
        let tree = self.tree.as_ref().expect("BUG: search tree not prepared");
        let node = tree.get(id);
        let parent_visits = node.stats.visits;
        let exploration = self.config.exploration;

        let mut best_ucb = f32::NEG_INFINITY;
        let mut best: Vec<NodeId> = Vec::new();
        for &(_, child) in &node.children {
            let ucb = tree.get(child).stats.ucb1(parent_visits, exploration);
            if ucb > best_ucb {
                best_ucb = ucb;
                best.clear();
                best.push(child);
            } else if ucb == best_ucb {
                best.push(child);
            }
        }

        // INVARIANT: only called on expanded, non-terminal nodes
        *best
            .choose(&mut self.rng)
            .expect("BUG: select_child called on node without children")
    }

    /// Credit `outcome` to every node from `leaf` up to the root.
    fn backpropagate(&mut self, leaf: NodeId, outcome: Outcome) {
        let tree = self.tree_mut();
        let mut current = Some(leaf);
        while let Some(id) = current {
            let node = tree.get_mut(id);
            node.stats.record(outcome, node.mover);
            current = node.parent;
        }
    }

    /// Extract search results from the root node.
    fn extract_results(
        &mut self,
        state: &G,
        iterations: usize,
        reused: bool,
        elapsed: Duration,
    ) -> Result<SearchResult<G::Move>> {
        let tree = self.tree();
        let root = tree.root();

        let children: Vec<ChildStats<G::Move>> = root
            .children
            .iter()
            .map(|&(mv, id)| {
                let stats = &tree.get(id).stats;
                ChildStats {
                    mv,
                    visits: stats.visits,
                    score: stats.score(),
                }
            })
            .collect();
        let root_visits = root.stats.visits;

        // First child wins exact ties on both score and visits.
        let mut chosen: Option<&ChildStats<G::Move>> = None;
        for child in children.iter().filter(|child| child.visits > 0) {
            let better = match chosen {
                None => true,
                Some(best) => {
                    child.score > best.score
                        || (child.score == best.score && child.visits > best.visits)
                }
            };
            if better {
                chosen = Some(child);
            }
        }

        let best_move = match chosen {
            Some(child) => child.mv,
            None => {
                // Budget too small to expand the root.
                debug!("root unexpanded, falling back to a random move");
                *state
                    .available_moves()
                    .choose(&mut self.rng)
                    .ok_or(UtttError::NoAvailableMoves)?
            }
        };

        Ok(SearchResult {
            best_move,
            iterations,
            root_visits,
            children,
            reused,
            elapsed,
        })
    }
}

impl<G, E, R> Agent<G> for Mcts<G, E, R>
where
    G: Game + PartialEq,
    E: Evaluator<G>,
    R: Rng,
{
    fn name(&self) -> &str {
        "mcts"
    }

    fn pick_move(&mut self, state: &G) -> Result<G::Move> {
        let result = self.search(state)?;
        self.advance(result.best_move);
        Ok(result.best_move)
    }

    fn reset(&mut self) {
        self.clear();
    }
}
