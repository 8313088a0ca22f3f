#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate picks moves for one agent playing a turn based game against any number of
//! adversaries. You provide a game, by implementing [TurnCyclingGame], and an evaluation function
//! that turns a game state into a number. The crate does the tree search.
//!
//! Three searches are supported, see [search] for the details: plain minimax, minimax with
//! alpha-beta pruning, and expectimax for adversaries that move at random.
//!
//! The crate doesn't know anything about the game it searches. [GameTree] is a ready made game
//! built from an explicit tree, which is mostly useful for tests and for debugging.

mod config;
pub use config::SearchConfig;

mod error;
pub use error::{ConfigError, SearchError};

pub mod evaluation;
pub use evaluation::{
    CompositeHeuristic, EvaluationFunction, Evaluator, HeuristicFeatures, HeuristicTerms,
    ScoreEvaluation,
};

pub mod game;
pub use game::{
    AgentIndex, Position, PositionGettableGame, ScoreGettableGame, TurnCyclingGame,
    CONTROLLED_AGENT,
};

mod maze;
pub use maze::MazeSnapshot;

pub mod search;
pub use search::{LeafReason, NodePolicy, SearchAgent, SearchResult, SearchReturn, Strategy};

pub mod tree;
pub use tree::{GameTree, Outcome, TreeNode, TreeState};
