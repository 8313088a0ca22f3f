use serde::{Deserialize, Serialize};

use crate::game::{Position, PositionGettableGame, ScoreGettableGame};

/// A frozen picture of a maze game: everything the evaluation functions look at, and nothing
/// they don't
///
/// It can't be searched since it knows nothing about movement, but it can be loaded from a
/// fixture and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeSnapshot {
    /// Where the controlled agent is standing
    pub agent: Position,
    /// Remaining food
    #[serde(default)]
    pub food: Vec<Position>,
    /// Remaining capsules
    #[serde(default)]
    pub capsules: Vec<Position>,
    /// One entry per adversary
    #[serde(default)]
    pub adversaries: Vec<Position>,
    /// The game's own score
    #[serde(default)]
    pub score: f64,
}

impl ScoreGettableGame for MazeSnapshot {
    fn score(&self) -> f64 {
        self.score
    }
}

impl PositionGettableGame for MazeSnapshot {
    fn agent_position(&self) -> Position {
        self.agent
    }

    fn food_positions(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn capsule_positions(&self) -> Vec<Position> {
        self.capsules.clone()
    }

    fn adversary_positions(&self) -> Vec<Position> {
        self.adversaries.clone()
    }
}
