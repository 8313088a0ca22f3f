//! The traits a game has to implement to be searched.
//!
//! The search itself only needs [TurnCyclingGame]. The evaluation functions in
//! [crate::evaluation] additionally lean on [ScoreGettableGame] and [PositionGettableGame].

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Identifies whose turn it is. Index `0` is always the agent we are choosing moves for
pub type AgentIndex = usize;

/// The agent we are choosing moves for
pub const CONTROLLED_AGENT: AgentIndex = 0;

/// A game where every agent takes a turn in increasing index order, and a full cycle through the
/// agents makes up one ply
///
/// Implementors are treated as immutable snapshots. [TurnCyclingGame::successor] must not modify
/// `self`, it hands back a brand new state.
pub trait TurnCyclingGame: Sized {
    /// The token an agent plays to move from one state to the next
    type Action: Clone + Debug;

    /// The actions the given agent may take from this state, in a stable order
    ///
    /// Returns an empty list if the agent can't move here
    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    /// The state reached after `agent` plays `action`
    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    /// Total number of agents, including the controlled agent
    fn num_agents(&self) -> usize;

    /// Whether the controlled agent has won
    fn is_win(&self) -> bool;

    /// Whether the controlled agent has lost
    fn is_lose(&self) -> bool;

    /// Convenience for `is_win() || is_lose()`
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game that keeps its own running score
pub trait ScoreGettableGame {
    /// The intrinsic score of this state, from the controlled agent's point of view
    fn score(&self) -> f64;
}

/// A grid game where the controlled agent chases food and capsules while avoiding adversaries
pub trait PositionGettableGame {
    /// Where the controlled agent currently is
    fn agent_position(&self) -> Position;

    /// Every food item still on the board
    fn food_positions(&self) -> Vec<Position>;

    /// Every capsule still on the board
    fn capsule_positions(&self) -> Vec<Position>;

    /// One position per adversary
    fn adversary_positions(&self) -> Vec<Position>;
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    #[allow(missing_docs)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells
    pub fn manhattan_distance(&self, other: &Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The distance from `self` to the closest of `others`, or `None` if there are none
    pub fn nearest_distance<'a>(
        &self,
        others: impl IntoIterator<Item = &'a Position>,
    ) -> Option<u32> {
        others
            .into_iter()
            .map(|other| self.manhattan_distance(other))
            .min()
    }
}
