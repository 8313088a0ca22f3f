pub mod compare;
pub mod evaluate;
pub mod solve;

use compare::Compare;
use evaluate::Evaluate;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Search a game tree fixture and explain the decision
    Solve(Solve),
    /// Search a game tree fixture with every strategy
    Compare(Compare),
    /// Score a maze snapshot with an evaluation function
    Evaluate(Evaluate),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Compare(c) => c.run()?,
            Command::Evaluate(e) => e.run()?,
        }

        Ok(())
    }
}
