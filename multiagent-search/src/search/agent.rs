use derivative::Derivative;
use tracing::{info_span, trace};

use crate::{
    config::SearchConfig,
    error::{ConfigError, SearchError},
    evaluation::{EvaluationFunction, Evaluator},
    game::{AgentIndex, TurnCyclingGame, CONTROLLED_AGENT},
};

use super::{
    strategy::StrategyRules, LeafReason, NodePolicy, SearchResult, SearchReturn, Strategy,
};

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a strategy, a depth and an evaluation function and picks moves
/// for the controlled agent
///
/// It also outputs traces using the [tracing] crate.
pub struct SearchAgent<EvaluatorType> {
    strategy: Strategy,
    depth: usize,
    #[derivative(Debug = "ignore")]
    evaluator: EvaluatorType,
}

impl SearchAgent<EvaluationFunction> {
    /// Construct a `SearchAgent` from a validated [SearchConfig]
    pub fn from_config(config: &SearchConfig) -> Self {
        Self {
            strategy: config.strategy(),
            depth: config.depth(),
            evaluator: config.evaluation(),
        }
    }
}

impl<EvaluatorType> SearchAgent<EvaluatorType> {
    /// Construct a new `SearchAgent`
    ///
    /// `depth` is the number of full plies to look ahead, and has to be at least one
    pub fn new(
        strategy: Strategy,
        depth: usize,
        evaluator: EvaluatorType,
    ) -> Result<Self, ConfigError> {
        if depth == 0 {
            return Err(ConfigError::NonPositiveDepth { depth: 0 });
        }

        Ok(Self {
            strategy,
            depth,
            evaluator,
        })
    }

    #[allow(missing_docs)]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[allow(missing_docs)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[allow(missing_docs)]
    pub fn evaluator(&self) -> &EvaluatorType {
        &self.evaluator
    }

    /// Pick the controlled agent's next move
    ///
    /// This is a thin wrapper over [SearchAgent::decide]
    pub fn choose_action<GameType>(&self, game: &GameType) -> Result<GameType::Action, SearchError>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        let result = self.decide(game)?;

        result.action.ok_or(SearchError::NoLegalActions)
    }

    /// Search from `game` and return the value and move for the controlled agent
    ///
    /// Unlike [SearchAgent::search] this only holds on to the line of play each node is currently
    /// choosing, so memory grows with the depth and not with the size of the tree.
    pub fn decide<GameType>(
        &self,
        game: &GameType,
    ) -> Result<SearchResult<GameType::Action>, SearchError>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        Ok(self.run(game, Recording::ChosenLine)?.result())
    }

    /// This runs the search to the configured depth, returning a struct that contains everything
    /// about the tree we searched.
    ///
    /// The root is always expanded for the controlled agent. Each of its moves enters the shared
    /// recursion at agent 1 of the first ply, and the best one wins with ties going to whichever
    /// move was enumerated first.
    ///
    /// Errors if the controlled agent can't move, since there would be nothing to choose from.
    pub fn search<GameType>(
        &self,
        game: &GameType,
    ) -> Result<SearchReturn<GameType::Action>, SearchError>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        self.run(game, Recording::EveryNode)
    }

    fn run<GameType>(
        &self,
        game: &GameType,
        recording: Recording,
    ) -> Result<SearchReturn<GameType::Action>, SearchError>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        if game.num_agents() == 0 {
            return Err(SearchError::NoAgents);
        }

        let actions = game.legal_actions(CONTROLLED_AGENT);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let span = info_span!(
            "search",
            strategy = %self.strategy,
            depth = self.depth,
            agents = game.num_agents(),
            recording = ?recording,
            chosen_value = tracing::field::Empty,
            chosen_action = tracing::field::Empty,
            leaves = tracing::field::Empty,
        );

        span.in_scope(|| {
            let result = self.expand(
                game,
                self.strategy.rules(),
                recording,
                CONTROLLED_AGENT,
                1,
                actions,
                f64::NEG_INFINITY,
                f64::INFINITY,
            );

            let current_span = tracing::Span::current();
            current_span.record("chosen_value", result.value());
            current_span.record(
                "chosen_action",
                format!("{:?}", result.best_action()).as_str(),
            );
            if recording == Recording::EveryNode {
                current_span.record("leaves", result.leaf_count());
            }

            Ok(result)
        })
    }

    fn leaf<GameType>(
        &self,
        game: &GameType,
        reason: LeafReason,
    ) -> SearchReturn<GameType::Action>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        SearchReturn::Leaf {
            value: self.evaluator.evaluate(game),
            reason,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn search_node<GameType>(
        &self,
        game: &GameType,
        rules: StrategyRules,
        recording: Recording,
        agent: AgentIndex,
        depth: usize,
        alpha: f64,
        beta: f64,
    ) -> SearchReturn<GameType::Action>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        // Everyone has moved, so this ply is over
        if agent >= game.num_agents() {
            if depth >= self.depth {
                return self.leaf(game, LeafReason::DepthLimit);
            }

            return self.search_node(
                game,
                rules,
                recording,
                CONTROLLED_AGENT,
                depth + 1,
                alpha,
                beta,
            );
        }

        if game.is_over() {
            return self.leaf(game, LeafReason::Terminal);
        }

        let actions = game.legal_actions(agent);
        if actions.is_empty() {
            return self.leaf(game, LeafReason::NoActions);
        }

        self.expand(game, rules, recording, agent, depth, actions, alpha, beta)
    }

    #[allow(clippy::too_many_arguments)]
    fn expand<GameType>(
        &self,
        game: &GameType,
        rules: StrategyRules,
        recording: Recording,
        agent: AgentIndex,
        depth: usize,
        actions: Vec<GameType::Action>,
        alpha: f64,
        beta: f64,
    ) -> SearchReturn<GameType::Action>
    where
        GameType: TurnCyclingGame,
        EvaluatorType: Evaluator<GameType>,
    {
        let mut alpha = alpha;
        let mut beta = beta;

        let policy = if agent == CONTROLLED_AGENT {
            NodePolicy::Maximize
        } else {
            rules.adversary_policy
        };

        let mut options: Vec<(GameType::Action, SearchReturn<GameType::Action>)> =
            match recording {
                Recording::EveryNode => Vec::with_capacity(actions.len()),
                Recording::ChosenLine => Vec::with_capacity(1),
            };
        let mut chosen: Option<usize> = None;
        let mut value = match policy {
            NodePolicy::Maximize => f64::NEG_INFINITY,
            NodePolicy::Minimize => f64::INFINITY,
            NodePolicy::Average => 0.0,
        };
        let mut visited = 0usize;
        let mut cutoff = false;

        for action in actions {
            let successor = game.successor(agent, &action);
            let next_return =
                self.search_node(&successor, rules, recording, agent + 1, depth, alpha, beta);
            let child_value = next_return.value();
            visited += 1;

            let improves = match policy {
                NodePolicy::Average => {
                    value += child_value;
                    false
                }
                _ => chosen.is_none() || prefers(policy, child_value, value),
            };
            if improves {
                value = child_value;
            }

            match recording {
                Recording::EveryNode => {
                    if improves {
                        chosen = Some(options.len());
                    }
                    options.push((action, next_return));
                }
                Recording::ChosenLine => {
                    if improves {
                        options.clear();
                        options.push((action, next_return));
                        chosen = Some(0);
                    }
                }
            }

            if rules.prunes {
                match policy {
                    NodePolicy::Maximize => {
                        if value > beta {
                            trace!(agent, depth, value, beta, "fail-high cutoff");
                            cutoff = true;
                            break;
                        }

                        alpha = alpha.max(value);
                    }
                    NodePolicy::Minimize => {
                        if value < alpha {
                            trace!(agent, depth, value, alpha, "fail-low cutoff");
                            cutoff = true;
                            break;
                        }

                        beta = beta.min(value);
                    }
                    NodePolicy::Average => {}
                }
            }
        }

        if policy == NodePolicy::Average {
            value /= visited as f64;
        }

        SearchReturn::Node {
            agent,
            depth,
            policy,
            options,
            chosen,
            value,
            cutoff,
        }
    }
}

/// How much of the visited tree to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recording {
    /// Every option of every node, for inspecting a search afterwards
    EveryNode,
    /// Only the option each node currently prefers. Averaging nodes keep nothing
    ChosenLine,
}

/// Whether a node with this policy would rather have `candidate` than `current`
///
/// A NaN never replaces a real value, and any real value replaces a NaN.
fn prefers(policy: NodePolicy, candidate: f64, current: f64) -> bool {
    if current.is_nan() {
        return !candidate.is_nan();
    }

    match policy {
        NodePolicy::Maximize => candidate > current,
        NodePolicy::Minimize => candidate < current,
        NodePolicy::Average => false,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::{
        evaluation::ScoreEvaluation,
        tree::{GameTree, Outcome, TreeNode},
    };

    use super::*;

    fn leaves(values: &[f64]) -> TreeNode {
        TreeNode::branches(values.iter().map(|v| TreeNode::leaf(*v)).collect())
    }

    /// The usual two ply example, three moves for us and three replies each
    fn textbook_tree() -> GameTree {
        GameTree::new(
            2,
            TreeNode::branches(vec![
                leaves(&[3.0, 12.0, 8.0]),
                leaves(&[2.0, 4.0, 6.0]),
                leaves(&[14.0, 5.0, 2.0]),
            ]),
        )
    }

    fn agent(strategy: Strategy, depth: usize) -> SearchAgent<ScoreEvaluation> {
        SearchAgent::new(strategy, depth, ScoreEvaluation).unwrap()
    }

    #[test]
    fn minimax_takes_the_best_worst_case() {
        let tree = textbook_tree();
        let result = agent(Strategy::Minimax, 1).search(&tree.root_state()).unwrap();

        assert_eq!(result.value(), 3.0);
        assert_eq!(result.best_action().map(String::as_str), Some("0"));
        assert_eq!(result.leaf_count(), 9);
        assert_eq!(result.cutoff_count(), 0);
        assert_eq!(
            result.option_values(),
            vec![(&"0".to_owned(), 3.0), (&"1".to_owned(), 2.0), (&"2".to_owned(), 2.0)]
        );
    }

    #[test]
    fn alpha_beta_agrees_with_minimax_and_visits_less() {
        let tree = textbook_tree();
        let minimax = agent(Strategy::Minimax, 1).search(&tree.root_state()).unwrap();
        let alpha_beta = agent(Strategy::AlphaBeta, 1)
            .search(&tree.root_state())
            .unwrap();

        assert_eq!(alpha_beta.result(), minimax.result());
        assert!(alpha_beta.leaf_count() < minimax.leaf_count());
        // The middle reply starts with a 2, which is already worse than the 3 we are guaranteed
        assert_eq!(alpha_beta.leaf_count(), 7);
        assert_eq!(alpha_beta.cutoff_count(), 2);
    }

    #[test]
    fn expectimax_averages_adversary_moves() {
        let tree = GameTree::new(2, TreeNode::branches(vec![leaves(&[3.0, 12.0, 8.0])]));
        let result = agent(Strategy::Expectimax, 1)
            .search(&tree.root_state())
            .unwrap();

        assert!((result.value() - 23.0 / 3.0).abs() < 1e-12);

        let (_, adversary) = result.chosen_option().unwrap();
        assert!(matches!(
            adversary,
            SearchReturn::Node {
                policy: NodePolicy::Average,
                chosen: None,
                ..
            }
        ));
    }

    #[test]
    fn expectimax_prefers_the_better_average() {
        let tree = textbook_tree();
        let result = agent(Strategy::Expectimax, 1)
            .decide(&tree.root_state())
            .unwrap();

        // Means are 7.67, 4 and 7
        assert_eq!(result.action.as_deref(), Some("0"));
    }

    #[test]
    fn one_ply_is_one_move_per_agent() {
        // Scores are the number of moves made to reach each node
        fn level(moves: u32, remaining: u32) -> TreeNode {
            if remaining == 0 {
                TreeNode::leaf(f64::from(moves))
            } else {
                TreeNode::branches(vec![
                    level(moves + 1, remaining - 1),
                    level(moves + 1, remaining - 1),
                ])
                .with_score(f64::from(moves))
            }
        }
        let tree = GameTree::new(2, level(0, 6));

        for depth in 1..=3 {
            let evaluated = RefCell::new(vec![]);
            let evaluator = |state: &crate::tree::TreeState| {
                evaluated.borrow_mut().push(state.node().score);
                state.node().score
            };
            let agent = SearchAgent::new(Strategy::Minimax, depth, evaluator).unwrap();

            let result = agent.search(&tree.root_state()).unwrap();

            let expected = (2 * depth) as f64;
            assert_eq!(result.value(), expected);
            assert_eq!(evaluated.borrow().len(), 1 << (2 * depth));
            assert!(evaluated.borrow().iter().all(|moves| *moves == expected));
        }
    }

    #[test]
    fn each_adversary_moves_once_per_ply() {
        let tree = GameTree::new(
            3,
            TreeNode::labelled([(
                "us",
                TreeNode::labelled([(
                    "first",
                    TreeNode::labelled([(
                        "second",
                        TreeNode::labelled([("us again", TreeNode::leaf(9.0))]).with_score(3.0),
                    )])
                    .with_score(2.0),
                )])
                .with_score(1.0),
            )]),
        );

        let result = agent(Strategy::Minimax, 1).search(&tree.root_state()).unwrap();

        assert_eq!(result.value(), 3.0);
        assert_eq!(
            result
                .chosen_route()
                .into_iter()
                .map(|(agent, action)| (agent, action.as_str()))
                .collect::<Vec<_>>(),
            vec![(0, "us"), (1, "first"), (2, "second")]
        );
    }

    #[test]
    fn agents_without_moves_are_scored_directly() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                ("stuck", TreeNode::leaf(4.0)),
                ("free", leaves(&[1.0, 6.0])),
            ]),
        );

        for strategy in Strategy::ALL {
            let result = agent(strategy, 5).search(&tree.root_state()).unwrap();
            let values = result.option_values();
            let (action, stuck) = values[0];

            assert_eq!(action.as_str(), "stuck");
            assert_eq!(stuck, 4.0);
        }

        let minimax = agent(Strategy::Minimax, 5).search(&tree.root_state()).unwrap();
        assert_eq!(minimax.best_action().map(String::as_str), Some("stuck"));
        assert!(matches!(
            minimax.chosen_option(),
            Some((
                _,
                SearchReturn::Leaf {
                    reason: LeafReason::NoActions,
                    ..
                }
            ))
        ));
    }

    #[test]
    fn ties_go_to_the_first_move() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                ("a", leaves(&[1.0, 5.0])),
                ("b", leaves(&[5.0, 5.0])),
                ("c", leaves(&[5.0, 6.0])),
                ("d", leaves(&[0.0])),
            ]),
        );

        for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
            let result = agent(strategy, 1).decide(&tree.root_state()).unwrap();

            assert_eq!(result.value, 5.0);
            assert_eq!(result.action.as_deref(), Some("b"));
        }
    }

    #[test]
    fn finished_games_are_leaves_for_every_strategy() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                (
                    "win",
                    TreeNode::labelled([("keep playing", TreeNode::leaf(-100.0))])
                        .with_score(50.0)
                        .with_outcome(Outcome::Win),
                ),
                ("other", leaves(&[10.0])),
            ]),
        );

        for strategy in Strategy::ALL {
            let result = agent(strategy, 2).search(&tree.root_state()).unwrap();

            assert_eq!(result.best_action().map(String::as_str), Some("win"));
            assert_eq!(result.value(), 50.0);
            assert!(matches!(
                result.chosen_option(),
                Some((
                    _,
                    SearchReturn::Leaf {
                        reason: LeafReason::Terminal,
                        ..
                    }
                ))
            ));
        }

        assert_eq!(
            agent(Strategy::Minimax, 2).decide(&tree.root_state()),
            agent(Strategy::AlphaBeta, 2).decide(&tree.root_state())
        );
    }

    #[test]
    fn undefined_averages_never_win() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                ("undefined", leaves(&[f64::INFINITY, f64::NEG_INFINITY])),
                ("plain", leaves(&[1.0])),
                ("worse", leaves(&[0.0])),
            ]),
        );

        let result = agent(Strategy::Expectimax, 1)
            .decide(&tree.root_state())
            .unwrap();

        assert_eq!(result.value, 1.0);
        assert_eq!(result.action.as_deref(), Some("plain"));
    }

    /// Four moves for everyone, with scattered leaf values
    fn bushy_tree(levels: u32) -> GameTree {
        fn node(levels: u32, next: &mut u32) -> TreeNode {
            if levels == 0 {
                *next += 1;
                return TreeNode::leaf(f64::from(*next * 37 % 101));
            }

            TreeNode::branches((0..4).map(|_| node(levels - 1, next)).collect())
        }

        GameTree::new(2, node(levels, &mut 0))
    }

    #[test]
    fn deciding_only_keeps_the_chosen_line() {
        let tree = bushy_tree(6);

        for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
            let agent = agent(strategy, 3);
            let everything = agent
                .run(&tree.root_state(), Recording::EveryNode)
                .unwrap();
            let line = agent
                .run(&tree.root_state(), Recording::ChosenLine)
                .unwrap();

            assert_eq!(line.result(), everything.result());
            assert_eq!(line.chosen_route(), everything.chosen_route());
            assert_eq!(line.node_count(), 6);
            assert_eq!(line.leaf_count(), 1);
        }

        assert_eq!(
            agent(Strategy::Minimax, 3)
                .search(&tree.root_state())
                .unwrap()
                .leaf_count(),
            4096
        );
    }

    #[test]
    fn deciding_expectimax_keeps_no_averaged_children() {
        let tree = bushy_tree(4);
        let agent = agent(Strategy::Expectimax, 2);

        let everything = agent.search(&tree.root_state()).unwrap();
        let line = agent
            .run(&tree.root_state(), Recording::ChosenLine)
            .unwrap();

        assert_eq!(line.result(), everything.result());
        assert_eq!(line.node_count(), 2);
        assert_eq!(agent.decide(&tree.root_state()), Ok(everything.result()));
    }

    #[test]
    fn infinite_values_propagate() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                ("doomed", leaves(&[f64::NEG_INFINITY, 3.0])),
                ("safe", leaves(&[1.0, 2.0])),
                ("sure win", leaves(&[f64::INFINITY])),
            ]),
        );

        for strategy in [Strategy::Minimax, Strategy::AlphaBeta] {
            let result = agent(strategy, 1).decide(&tree.root_state()).unwrap();

            assert_eq!(result.value, f64::INFINITY);
            assert_eq!(result.action.as_deref(), Some("sure win"));
        }
    }

    #[test]
    fn all_losing_moves_still_pick_one() {
        let tree = GameTree::new(
            2,
            TreeNode::labelled([
                ("a", leaves(&[f64::NEG_INFINITY])),
                ("b", leaves(&[f64::NEG_INFINITY])),
            ]),
        );

        for strategy in Strategy::ALL {
            let result = agent(strategy, 1).decide(&tree.root_state()).unwrap();

            assert_eq!(result.value, f64::NEG_INFINITY);
            assert_eq!(result.action.as_deref(), Some("a"));
        }
    }

    #[test]
    fn refuses_to_search_without_moves() {
        let tree = GameTree::new(2, TreeNode::leaf(1.0));

        assert_eq!(
            agent(Strategy::Minimax, 2).choose_action(&tree.root_state()),
            Err(SearchError::NoLegalActions)
        );
    }

    #[test]
    fn refuses_to_search_without_agents() {
        let tree = GameTree::new(0, leaves(&[1.0]));

        assert_eq!(
            agent(Strategy::Minimax, 2).search(&tree.root_state()),
            Err(SearchError::NoAgents)
        );
    }

    #[test]
    fn depth_has_to_be_positive() {
        assert!(matches!(
            SearchAgent::new(Strategy::Minimax, 0, ScoreEvaluation),
            Err(ConfigError::NonPositiveDepth { depth: 0 })
        ));
    }

    #[test]
    fn config_builds_an_agent() {
        let config = SearchConfig::from_names("score", "4", "alphabeta").unwrap();
        let agent = SearchAgent::from_config(&config);

        assert_eq!(agent.strategy(), Strategy::AlphaBeta);
        assert_eq!(agent.depth(), 4);
        assert_eq!(*agent.evaluator(), EvaluationFunction::Score);
    }
}
