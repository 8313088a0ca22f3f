use std::path::PathBuf;

use color_eyre::eyre::Result;
use multiagent_search::{GameTree, ScoreEvaluation, SearchAgent, SearchConfig, Strategy};

use crate::fixtures::read_json;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Game tree to search, as JSON
    #[clap(short, long, value_parser)]
    fixture: PathBuf,

    /// Number of plies to search
    #[clap(short, long, value_parser, default_value = "2")]
    depth: String,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let depth =
            SearchConfig::from_names("score", &self.depth, Strategy::Minimax.name())?.depth();
        let tree: GameTree = read_json(&self.fixture)?;

        println!(
            "{:<12} {:>10} {:>12} {:>8} {:>8}",
            "strategy", "action", "value", "leaves", "cutoffs"
        );

        for strategy in Strategy::ALL {
            let agent = SearchAgent::new(strategy, depth, ScoreEvaluation)?;
            let result = agent.search(&tree.root_state())?;

            println!(
                "{:<12} {:>10} {:>12.3} {:>8} {:>8}",
                strategy.name(),
                result.best_action().map(String::as_str).unwrap_or("-"),
                result.value(),
                result.leaf_count(),
                result.cutoff_count()
            );
        }

        Ok(())
    }
}
