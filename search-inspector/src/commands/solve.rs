use std::path::PathBuf;

use color_eyre::eyre::{bail, Result};
use itertools::Itertools;
use multiagent_search::{
    EvaluationFunction, GameTree, ScoreEvaluation, SearchAgent, SearchConfig, SearchReturn,
};
use tracing::info;

use crate::fixtures::read_json;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Game tree to search, as JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// minimax, alphabeta or expectimax
    #[clap(short, long, value_parser, default_value = "minimax")]
    strategy: String,

    /// Number of plies to search
    #[clap(short, long, value_parser, default_value = "2")]
    depth: String,

    /// Search config as JSON. Takes the place of --strategy and --depth
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Print every node the search visited
    #[clap(long)]
    tree: bool,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => read_json::<SearchConfig>(path)?,
            None => SearchConfig::from_names(
                EvaluationFunction::Score.name(),
                &self.depth,
                &self.strategy,
            )?,
        };

        if config.evaluation() != EvaluationFunction::Score {
            bail!(
                "Game trees only carry a score, so they can't be evaluated with {}",
                config.evaluation()
            );
        }

        let tree: GameTree = read_json(&self.fixture)?;
        info!(
            agents = tree.agents,
            leaves = tree.root.leaf_count(),
            "Loaded game tree"
        );

        let agent = SearchAgent::new(config.strategy(), config.depth(), ScoreEvaluation)?;
        let result = agent.search(&tree.root_state())?;

        println!(
            "{} at depth {} picks {}, worth {}",
            config.strategy(),
            config.depth(),
            result.best_action().map(String::as_str).unwrap_or("nothing"),
            result.value()
        );
        print_options(&result);
        println!("Expected line of play: {}", principal_variation(&result));
        println!(
            "Visited {} nodes and {} leaves, with {} cutoffs",
            result.node_count(),
            result.leaf_count(),
            result.cutoff_count()
        );

        if self.tree {
            println!();
            println!("{}", result.to_text_tree());
        }

        Ok(())
    }
}

fn print_options(result: &SearchReturn<String>) {
    for (action, value) in result.option_values() {
        println!("  {action}: {value}");
    }
}

/// Each move along the chosen route, tagged with the agent that makes it
pub(crate) fn principal_variation(result: &SearchReturn<String>) -> String {
    result
        .chosen_route()
        .into_iter()
        .map(|(agent, action)| format!("{agent}:{action}"))
        .join(" -> ")
}
