use serde::Deserialize;

use crate::{
    error::ConfigError,
    evaluation::{CompositeHeuristic, EvaluationFunction},
    search::Strategy,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawSearchConfig")]
/// Everything needed to build a [crate::SearchAgent] that evaluates with a named function
///
/// A `SearchConfig` is always valid: the constructors and deserialization reject unknown names
/// and non-positive depths.
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use multiagent_search::{EvaluationFunction, SearchConfig, Strategy};
///
/// let defaults: SearchConfig = Default::default();
///
/// assert_eq!(defaults.evaluation(), EvaluationFunction::Score);
/// assert_eq!(defaults.depth(), 2);
/// assert_eq!(defaults.strategy(), Strategy::Minimax);
/// ```
pub struct SearchConfig {
    evaluation: EvaluationFunction,
    depth: usize,
    strategy: Strategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            evaluation: EvaluationFunction::Score,
            depth: 2,
            strategy: Strategy::Minimax,
        }
    }
}

impl SearchConfig {
    /// Build a config, checking that `depth` is at least one ply
    pub fn new(
        evaluation: EvaluationFunction,
        depth: i64,
        strategy: Strategy,
    ) -> Result<Self, ConfigError> {
        let depth = usize::try_from(depth)
            .ok()
            .filter(|depth| *depth > 0)
            .ok_or(ConfigError::NonPositiveDepth { depth })?;

        Ok(Self {
            evaluation,
            depth,
            strategy,
        })
    }

    /// Build a config from the names a user would type
    ///
    /// ```
    /// use multiagent_search::{SearchConfig, Strategy};
    ///
    /// let config = SearchConfig::from_names("better", "3", "expectimax").unwrap();
    /// assert_eq!(config.depth(), 3);
    /// assert_eq!(config.strategy(), Strategy::Expectimax);
    ///
    /// assert!(SearchConfig::from_names("better", "0", "expectimax").is_err());
    /// ```
    pub fn from_names(evaluation: &str, depth: &str, strategy: &str) -> Result<Self, ConfigError> {
        let depth = depth
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidDepth {
                value: depth.to_owned(),
            })?;

        Self::new(evaluation.parse()?, depth, strategy.parse()?)
    }

    #[allow(missing_docs)]
    pub fn evaluation(&self) -> EvaluationFunction {
        self.evaluation
    }

    /// Number of plies to search
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[allow(missing_docs)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

fn default_evaluation() -> String {
    EvaluationFunction::Score.name().to_owned()
}

fn default_depth() -> i64 {
    2
}

fn default_strategy() -> String {
    Strategy::Minimax.name().to_owned()
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSearchConfig {
    #[serde(default = "default_evaluation")]
    evaluation: String,
    /// Only allowed for the composite heuristic
    #[serde(default)]
    weights: Option<CompositeHeuristic>,
    #[serde(default = "default_depth")]
    depth: i64,
    #[serde(default = "default_strategy")]
    strategy: String,
}

impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        let evaluation = match (raw.evaluation.parse()?, raw.weights) {
            (EvaluationFunction::Composite(_), Some(weights)) => {
                EvaluationFunction::Composite(weights)
            }
            (evaluation, None) => evaluation,
            (evaluation, Some(_)) => {
                return Err(ConfigError::UnexpectedWeights {
                    evaluation: evaluation.name().to_owned(),
                })
            }
        };

        Self::new(evaluation, raw.depth, raw.strategy.parse()?)
    }
}
