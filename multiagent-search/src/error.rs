//! Error types for the search crate

use thiserror::Error;

/// Problems building a [crate::SearchConfig]
///
/// These are all surfaced when the configuration is built, never in the middle of a search
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The evaluation function name didn't match any known function
    #[error("unknown evaluation function '{name}' (expected one of: {expected})")]
    UnknownEvaluation {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        expected: &'static str,
    },

    /// The strategy name didn't match any known strategy
    #[error("unknown search strategy '{name}' (expected one of: {expected})")]
    UnknownStrategy {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        expected: &'static str,
    },

    /// The depth wasn't an integer at all
    #[error("depth '{value}' is not an integer")]
    InvalidDepth {
        #[allow(missing_docs)]
        value: String,
    },

    /// Depth has to be at least one ply
    #[error("depth must be a positive integer, got {depth}")]
    NonPositiveDepth {
        #[allow(missing_docs)]
        depth: i64,
    },

    /// Weights were given for an evaluation function that doesn't take any
    #[error("evaluation function '{evaluation}' doesn't take weights, only 'better' does")]
    UnexpectedWeights {
        #[allow(missing_docs)]
        evaluation: String,
    },
}

/// Problems running a search
///
/// These are programming errors in the caller, not something a search recovers from
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SearchError {
    /// The controlled agent can't move from the root state, so there is nothing to choose from
    #[error("the controlled agent has no legal actions at the root state (is the game already over?)")]
    NoLegalActions,

    /// The root state reports zero agents
    #[error("the root state has no agents")]
    NoAgents,
}
