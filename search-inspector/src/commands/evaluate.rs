use std::path::PathBuf;

use color_eyre::eyre::Result;
use multiagent_search::{
    EvaluationFunction, Evaluator, HeuristicFeatures, MazeSnapshot, PositionGettableGame,
};

use crate::fixtures::read_json;

#[derive(clap::Args, Debug)]
pub(crate) struct Evaluate {
    /// Maze snapshot to score, as JSON
    #[clap(short, long, value_parser)]
    snapshot: PathBuf,

    /// score or better
    #[clap(short, long, value_parser, default_value = "better")]
    evaluation: String,
}

impl Evaluate {
    pub(crate) fn run(self) -> Result<()> {
        let evaluation: EvaluationFunction = self.evaluation.parse()?;
        let snapshot: MazeSnapshot = read_json(&self.snapshot)?;

        println!("{evaluation}: {}", evaluation.evaluate(&snapshot));

        if let EvaluationFunction::Composite(heuristic) = evaluation {
            let features = HeuristicFeatures::from_game(&snapshot);
            let terms = heuristic.terms(&features);

            println!(
                "  agent at ({}, {}), {} food left",
                snapshot.agent_position().x,
                snapshot.agent_position().y,
                features.food_count
            );
            println!("  food distance: {}", terms.food_distance);
            println!("  food count:    {}", terms.food_count);
            println!("  capsule:       {}", terms.capsule);
            println!("  adversary:     {}", terms.adversary);
        }

        Ok(())
    }
}
