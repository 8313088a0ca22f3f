//! Depth limited adversarial tree search for one controlled agent against any number of
//! adversaries.
//!
//! Agents move in index order, with the controlled agent (index 0) first. One full cycle through
//! every agent is one ply, and the depth limit counts plies. The controlled agent always
//! maximizes. What the other agents do depends on the [Strategy]:
//!
//! - [Strategy::Minimax] assumes they all work together to minimize our score
//! - [Strategy::AlphaBeta] assumes the same, but skips subtrees that can't change the decision
//! - [Strategy::Expectimax] assumes they each pick uniformly at random
//!
//! A node is scored with the evaluation function instead of being expanded when the depth limit is
//! reached, when the game is over, or when the moving agent has no legal moves. The root is the
//! exception: it is always expanded as long as the controlled agent can move.
//!
//! ```rust
//! use multiagent_search::{GameTree, SearchAgent, ScoreEvaluation, Strategy, TreeNode};
//!
//! // Two agents: we pick a branch, then the adversary picks a leaf
//! let tree = GameTree::new(
//!     2,
//!     TreeNode::labelled([
//!         ("left", TreeNode::branches(vec![TreeNode::leaf(3.0), TreeNode::leaf(12.0), TreeNode::leaf(8.0)])),
//!         ("middle", TreeNode::branches(vec![TreeNode::leaf(2.0), TreeNode::leaf(4.0), TreeNode::leaf(6.0)])),
//!         ("right", TreeNode::branches(vec![TreeNode::leaf(14.0), TreeNode::leaf(5.0), TreeNode::leaf(2.0)])),
//!     ]),
//! );
//!
//! let agent = SearchAgent::new(Strategy::AlphaBeta, 1, ScoreEvaluation).unwrap();
//! let result = agent.search(&tree.root_state()).unwrap();
//!
//! assert_eq!(result.best_action().map(String::as_str), Some("left"));
//! assert_eq!(result.value(), 3.0);
//! ```

mod agent;
pub use agent::SearchAgent;

mod search_return;
pub use search_return::{LeafReason, NodePolicy, SearchResult, SearchReturn};

mod strategy;
pub use strategy::Strategy;
