use std::fmt::Debug;
use text_trees::StringTreeNode;

use crate::game::AgentIndex;

/// How a node combines the values of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePolicy {
    /// The controlled agent takes the best child
    Maximize,
    /// An adversary takes the worst child for us
    Minimize,
    /// A random adversary, we expect the mean of the children
    Average,
}

impl NodePolicy {
    fn symbol(&self) -> &'static str {
        match self {
            NodePolicy::Maximize => "max",
            NodePolicy::Minimize => "min",
            NodePolicy::Average => "avg",
        }
    }
}

/// Why a node was scored directly instead of being expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafReason {
    /// Every agent has moved `depth` times
    DepthLimit,
    /// The game was already won or lost
    Terminal,
    /// The agent whose turn it was couldn't move
    NoActions,
}

/// The value of a search, and the action that gets it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<Action> {
    /// Value of the node. Can be infinite if the evaluation function says so
    pub value: f64,
    /// The chosen action. `None` for leaves and for averaging nodes, which don't choose
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a search
/// It contains everything we visited in the game tree
pub enum SearchReturn<Action> {
    /// A node we expanded
    Node {
        /// The agent that was moving at this node
        agent: AgentIndex,
        /// The ply this node belongs to, starting from 1
        depth: usize,
        /// How the children were combined
        policy: NodePolicy,
        /// Every move we looked at, in the order they were enumerated
        /// If the node was cut off, the moves after the cutoff are missing
        options: Vec<(Action, Self)>,
        /// Index into `options` of the chosen move. Always `None` for [NodePolicy::Average]
        chosen: Option<usize>,
        /// The combined value
        value: f64,
        /// Whether alpha-beta stopped looking at siblings early
        cutoff: bool,
    },
    /// A node we scored with the evaluation function
    Leaf {
        #[allow(missing_docs)]
        value: f64,
        #[allow(missing_docs)]
        reason: LeafReason,
    },
}

impl<Action> SearchReturn<Action>
where
    Action: Debug,
{
    /// Returns the value for this node
    pub fn value(&self) -> f64 {
        match self {
            SearchReturn::Node { value, .. } => *value,
            SearchReturn::Leaf { value, .. } => *value,
        }
    }

    /// The chosen move and the subtree under it
    pub fn chosen_option(&self) -> Option<&(Action, Self)> {
        match self {
            SearchReturn::Leaf { .. } => None,
            SearchReturn::Node {
                options, chosen, ..
            } => chosen.and_then(|index| options.get(index)),
        }
    }

    /// The move to make from this node
    ///
    /// Called on the return of [crate::SearchAgent::search] this is the controlled agent's best move
    pub fn best_action(&self) -> Option<&Action> {
        self.chosen_option().map(|(action, _)| action)
    }

    /// The value and best action of this node
    pub fn result(&self) -> SearchResult<Action>
    where
        Action: Clone,
    {
        SearchResult {
            value: self.value(),
            action: self.best_action().cloned(),
        }
    }

    /// The values of every option looked at from this node, in enumeration order
    ///
    /// Under alpha-beta only the chosen option is guaranteed to carry its exact value, the others
    /// may be bounds
    pub fn option_values(&self) -> Vec<(&Action, f64)> {
        match self {
            SearchReturn::Leaf { .. } => vec![],
            SearchReturn::Node { options, .. } => options
                .iter()
                .map(|(action, result)| (action, result.value()))
                .collect(),
        }
    }

    /// Returns all the moves in the 'route' through the game tree that the search expects
    /// This is useful for debugging as it shows each of the moves we and our opponents made
    ///
    /// The route stops at the first averaging node, since those don't pick a move
    pub fn chosen_route(&self) -> Vec<(AgentIndex, &Action)> {
        let mut route = vec![];
        let mut current = self;

        while let SearchReturn::Node { agent, .. } = current {
            match current.chosen_option() {
                Some((action, next)) => {
                    route.push((*agent, action));
                    current = next;
                }
                None => break,
            }
        }

        route
    }

    /// How many times the evaluation function was called
    pub fn leaf_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 1,
            SearchReturn::Node { options, .. } => {
                options.iter().map(|(_, result)| result.leaf_count()).sum()
            }
        }
    }

    /// How many nodes were expanded
    pub fn node_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 0,
            SearchReturn::Node { options, .. } => {
                1 + options
                    .iter()
                    .map(|(_, result)| result.node_count())
                    .sum::<usize>()
            }
        }
    }

    /// How many nodes stopped early because of alpha-beta pruning
    pub fn cutoff_count(&self) -> usize {
        match self {
            SearchReturn::Leaf { .. } => 0,
            SearchReturn::Node {
                options, cutoff, ..
            } => {
                usize::from(*cutoff)
                    + options
                        .iter()
                        .map(|(_, result)| result.cutoff_count())
                        .sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that the search generated
    /// It shows the value, the moving agent and the move at each level
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            SearchReturn::Leaf { value, reason } => {
                StringTreeNode::new(format!("{label} = {value} ({reason:?})"))
            }
            SearchReturn::Node {
                agent,
                policy,
                options,
                chosen,
                value,
                cutoff,
                ..
            } => {
                let cut = if *cutoff { " [cutoff]" } else { "" };
                let mut node = StringTreeNode::new(format!(
                    "{label} = {value} ({} agent {agent}){cut}",
                    policy.symbol()
                ));

                for (index, (action, result)) in options.iter().enumerate() {
                    let marker = if *chosen == Some(index) { "*" } else { "" };
                    node.push_node(result.to_text_tree_node(format!("{marker}{action:?}")));
                }

                node
            }
        }
    }
}
