//! An explicit, hand written game tree
//!
//! Useful for checking the search against known answers, and for debugging a search on a tree
//! pulled out of a real game. The tree encodes the turn order itself: the children of a node are
//! the moves of whichever agent is up at that point.
//!
//! Trees can be built in code or deserialized. Any node can be written as
//! - a bare number: a leaf with that score
//! - an array of nodes: children labelled `"0"`, `"1"`, ...
//! - an object `{ "score": 1.5, "outcome": "win", "children": [{ "action": "left", "node": ... }] }`
//!   where every field is optional
//!
//! ```
//! use multiagent_search::{GameTree, TreeNode};
//!
//! let tree = GameTree::new(
//!     2,
//!     TreeNode::branches(vec![
//!         TreeNode::branches(vec![TreeNode::leaf(3.0), TreeNode::leaf(12.0)]),
//!         TreeNode::branches(vec![TreeNode::leaf(2.0), TreeNode::leaf(4.0)]),
//!     ]),
//! );
//!
//! assert_eq!(tree.root.children.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::game::{AgentIndex, ScoreGettableGame, TurnCyclingGame};

/// Marks a node as the end of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The controlled agent won
    Win,
    /// The controlled agent lost
    Lose,
}

/// One node of a [GameTree]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawNode")]
pub struct TreeNode {
    /// The intrinsic score of this node
    pub score: f64,
    /// Set if the game is over at this node
    pub outcome: Option<Outcome>,
    /// The labelled moves out of this node, in enumeration order
    pub children: Vec<(String, TreeNode)>,
}

impl TreeNode {
    /// A node without children
    pub fn leaf(score: f64) -> Self {
        Self {
            score,
            outcome: None,
            children: vec![],
        }
    }

    /// A node whose moves are labelled by their position
    pub fn branches(children: Vec<TreeNode>) -> Self {
        Self {
            score: 0.0,
            outcome: None,
            children: children
                .into_iter()
                .enumerate()
                .map(|(i, child)| (i.to_string(), child))
                .collect(),
        }
    }

    /// A node with named moves
    pub fn labelled<'a>(children: impl IntoIterator<Item = (&'a str, TreeNode)>) -> Self {
        Self {
            score: 0.0,
            outcome: None,
            children: children
                .into_iter()
                .map(|(label, child)| (label.to_owned(), child))
                .collect(),
        }
    }

    #[allow(missing_docs)]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    #[allow(missing_docs)]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Number of leaves below (and including) this node
    pub fn leaf_count(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(|(_, c)| c.leaf_count()).sum()
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Leaf(f64),
    Branches(Vec<TreeNode>),
    Labelled {
        #[serde(default)]
        score: f64,
        #[serde(default)]
        outcome: Option<Outcome>,
        #[serde(default)]
        children: Vec<RawEdge>,
    },
}

#[derive(Deserialize)]
struct RawEdge {
    action: String,
    node: TreeNode,
}

impl From<RawNode> for TreeNode {
    fn from(raw: RawNode) -> Self {
        match raw {
            RawNode::Leaf(score) => TreeNode::leaf(score),
            RawNode::Branches(children) => TreeNode::branches(children),
            RawNode::Labelled {
                score,
                outcome,
                children,
            } => TreeNode {
                score,
                outcome,
                children: children.into_iter().map(|e| (e.action, e.node)).collect(),
            },
        }
    }
}

/// A whole game: how many agents take turns, and the tree of moves they can make
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameTree {
    /// Number of agents, including the controlled one
    pub agents: usize,
    /// The starting node
    pub root: TreeNode,
}

impl GameTree {
    #[allow(missing_docs)]
    pub fn new(agents: usize, root: TreeNode) -> Self {
        Self { agents, root }
    }

    /// The state to start a search from
    pub fn root_state(&self) -> TreeState<'_> {
        TreeState {
            node: &self.root,
            agents: self.agents,
        }
    }
}

/// A position inside a [GameTree]. Cheap to copy, since it only borrows the tree
#[derive(Debug, Clone, Copy)]
pub struct TreeState<'tree> {
    node: &'tree TreeNode,
    agents: usize,
}

impl<'tree> TreeState<'tree> {
    /// The node this state points at
    pub fn node(&self) -> &'tree TreeNode {
        self.node
    }
}

impl<'tree> TurnCyclingGame for TreeState<'tree> {
    type Action = String;

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<String> {
        self.node
            .children
            .iter()
            .map(|(label, _)| label.clone())
            .collect()
    }

    fn successor(&self, agent: AgentIndex, action: &String) -> Self {
        let node = self
            .node
            .children
            .iter()
            .find(|(label, _)| label == action)
            .map(|(_, child)| child)
            .unwrap_or_else(|| {
                panic!("agent {agent} played '{action}', which is not a legal move")
            });

        Self {
            node,
            agents: self.agents,
        }
    }

    fn num_agents(&self) -> usize {
        self.agents
    }

    fn is_win(&self) -> bool {
        self.node.outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node.outcome == Some(Outcome::Lose)
    }
}

impl<'tree> ScoreGettableGame for TreeState<'tree> {
    fn score(&self) -> f64 {
        self.node.score
    }
}
