//! Evaluation functions turn a game state into a single number, where higher is better for the
//! controlled agent. They are only ever called on the leaves of the search tree.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    game::{PositionGettableGame, ScoreGettableGame},
};

/// Something that can score a game state
///
/// This is the seam the search uses to score leaves. Any `Fn(&GameType) -> f64` works, so tests
/// and one-off callers can pass a closure.
pub trait Evaluator<GameType> {
    /// Score the given state. Must be a pure function of the state
    fn evaluate(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Evaluator<GameType> for FnLike {
    fn evaluate(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Passes the game's own score straight through
pub struct ScoreEvaluation;

impl<GameType: ScoreGettableGame> Evaluator<GameType> for ScoreEvaluation {
    fn evaluate(&self, game: &GameType) -> f64 {
        game.score()
    }
}

/// The raw distances the [CompositeHeuristic] is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeuristicFeatures {
    /// Distance to the closest food, `None` once all food is gone
    pub nearest_food: Option<u32>,
    /// Distance to the closest capsule, `None` once all capsules are gone
    pub nearest_capsule: Option<u32>,
    /// Distance to the closest adversary, `None` when there are no adversaries
    pub nearest_adversary: Option<u32>,
    /// How much food is left on the board
    pub food_count: usize,
}

impl HeuristicFeatures {
    /// Measure everything from the controlled agent's position
    pub fn from_game<GameType: PositionGettableGame>(game: &GameType) -> Self {
        let position = game.agent_position();
        let food = game.food_positions();

        Self {
            nearest_food: position.nearest_distance(&food),
            nearest_capsule: position.nearest_distance(&game.capsule_positions()),
            nearest_adversary: position.nearest_distance(&game.adversary_positions()),
            food_count: food.len(),
        }
    }
}

/// Each contribution to a composite score, kept apart so they can be inspected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicTerms {
    /// Pull towards the closest capsule, or the bonus for having none left to chase
    pub capsule: f64,
    /// Push away from the closest adversary
    pub adversary: f64,
    /// Pull towards the closest food
    pub food_distance: f64,
    /// Pressure to clear the board
    pub food_count: f64,
}

impl HeuristicTerms {
    /// The final score
    pub fn total(&self) -> f64 {
        self.capsule + self.adversary + self.food_distance + self.food_count
    }
}

/// A weighted mix of food, capsule and adversary distances
///
/// ```
/// use multiagent_search::{CompositeHeuristic, HeuristicFeatures};
///
/// let features = HeuristicFeatures {
///     nearest_food: Some(2),
///     nearest_capsule: Some(4),
///     nearest_adversary: Some(1),
///     food_count: 3,
/// };
///
/// // -1.5 * 2 - 20 * 3 - 20 / 4 - 2 / 1
/// assert_eq!(CompositeHeuristic::default().score_features(&features), -70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeHeuristic {
    /// Multiplied by the distance to the closest food
    pub food_distance_weight: f64,
    /// Multiplied by the amount of food left
    pub food_count_weight: f64,
    /// Divided by the distance to the closest capsule
    pub capsule_weight: f64,
    /// Awarded when the closest capsule is at distance zero, or there are none left
    pub capsule_bonus: f64,
    /// Divided by the distance to the closest adversary
    pub adversary_weight: f64,
    /// Subtracted when an adversary shares our cell
    pub caught_penalty: f64,
}

impl Default for CompositeHeuristic {
    fn default() -> Self {
        Self {
            food_distance_weight: 1.5,
            food_count_weight: 20.0,
            capsule_weight: 20.0,
            capsule_bonus: 200.0,
            adversary_weight: 2.0,
            caught_penalty: 500.0,
        }
    }
}

impl CompositeHeuristic {
    /// Break the score for the given features down into its terms
    ///
    /// Standing on a capsule and having no capsules left both earn the flat bonus: in either case
    /// there is nothing left to walk towards. Without any adversaries the adversary term is zero.
    pub fn terms(&self, features: &HeuristicFeatures) -> HeuristicTerms {
        let capsule = match features.nearest_capsule {
            Some(distance) if distance > 0 => -self.capsule_weight / f64::from(distance),
            _ => self.capsule_bonus,
        };

        let adversary = match features.nearest_adversary {
            None => 0.0,
            Some(0) => -self.caught_penalty,
            Some(distance) => -self.adversary_weight / f64::from(distance),
        };

        let food_distance =
            -self.food_distance_weight * f64::from(features.nearest_food.unwrap_or(0));
        let food_count = -self.food_count_weight * features.food_count as f64;

        HeuristicTerms {
            capsule,
            adversary,
            food_distance,
            food_count,
        }
    }

    #[allow(missing_docs)]
    pub fn score_features(&self, features: &HeuristicFeatures) -> f64 {
        self.terms(features).total()
    }
}

impl<GameType: PositionGettableGame> Evaluator<GameType> for CompositeHeuristic {
    fn evaluate(&self, game: &GameType) -> f64 {
        self.score_features(&HeuristicFeatures::from_game(game))
    }
}

/// The evaluation functions that can be picked by name when configuring a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvaluationFunction {
    /// See [ScoreEvaluation]
    Score,
    /// See [CompositeHeuristic]
    Composite(CompositeHeuristic),
}

const EVALUATION_NAMES: &str = "score, better";

impl EvaluationFunction {
    /// The canonical name for this function, which [FromStr] accepts back
    pub fn name(&self) -> &'static str {
        match self {
            EvaluationFunction::Score => "score",
            EvaluationFunction::Composite(_) => "better",
        }
    }
}

impl Default for EvaluationFunction {
    fn default() -> Self {
        EvaluationFunction::Score
    }
}

impl Display for EvaluationFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvaluationFunction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(EvaluationFunction::Score),
            "better" | "composite" | "betterEvaluationFunction" => {
                Ok(EvaluationFunction::Composite(CompositeHeuristic::default()))
            }
            other => Err(ConfigError::UnknownEvaluation {
                name: other.to_owned(),
                expected: EVALUATION_NAMES,
            }),
        }
    }
}

impl<GameType> Evaluator<GameType> for EvaluationFunction
where
    GameType: ScoreGettableGame + PositionGettableGame,
{
    fn evaluate(&self, game: &GameType) -> f64 {
        match self {
            EvaluationFunction::Score => ScoreEvaluation.evaluate(game),
            EvaluationFunction::Composite(heuristic) => heuristic.evaluate(game),
        }
    }
}
