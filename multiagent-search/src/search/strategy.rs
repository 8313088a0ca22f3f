use std::{fmt::Display, str::FromStr};

use crate::error::ConfigError;

use super::NodePolicy;

/// Which search to run
///
/// All three share the same turn and depth bookkeeping. They only differ in how adversary nodes
/// combine their children and whether bounds are threaded through the recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Adversaries minimize, every node is visited
    #[default]
    Minimax,
    /// Adversaries minimize, with alpha-beta pruning. Picks the same move as [Strategy::Minimax]
    AlphaBeta,
    /// Adversaries pick uniformly at random, so their nodes take the mean of their children
    Expectimax,
}

const STRATEGY_NAMES: &str = "minimax, alphabeta, expectimax";

impl Strategy {
    /// Every strategy, in a fixed order
    pub const ALL: [Strategy; 3] = [Strategy::Minimax, Strategy::AlphaBeta, Strategy::Expectimax];

    /// The canonical name for this strategy, which [FromStr] accepts back
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Expectimax => "expectimax",
        }
    }

    pub(crate) fn rules(&self) -> StrategyRules {
        match self {
            Strategy::Minimax => StrategyRules {
                adversary_policy: NodePolicy::Minimize,
                prunes: false,
            },
            Strategy::AlphaBeta => StrategyRules {
                adversary_policy: NodePolicy::Minimize,
                prunes: true,
            },
            Strategy::Expectimax => StrategyRules {
                adversary_policy: NodePolicy::Average,
                prunes: false,
            },
        }
    }
}

/// The only things that change between strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StrategyRules {
    /// How every agent other than the controlled one combines its children
    pub(crate) adversary_policy: NodePolicy,
    /// Thread alpha/beta bounds and cut off siblings that can't matter
    pub(crate) prunes: bool,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(Strategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(Strategy::AlphaBeta),
            "expectimax" => Ok(Strategy::Expectimax),
            other => Err(ConfigError::UnknownStrategy {
                name: other.to_owned(),
                expected: STRATEGY_NAMES,
            }),
        }
    }
}
