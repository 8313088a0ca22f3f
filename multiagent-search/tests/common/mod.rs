#![allow(dead_code)]

use std::collections::HashSet;

use multiagent_search::{Position, PositionGettableGame, ScoreGettableGame, TurnCyclingGame};

pub const FOOD_REWARD: f64 = 10.0;
pub const MOVE_COST: f64 = 1.0;
pub const WIN_REWARD: f64 = 500.0;
pub const CAUGHT_PENALTY: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn apply(&self, position: Position) -> Position {
        match self {
            Direction::North => Position::new(position.x, position.y - 1),
            Direction::South => Position::new(position.x, position.y + 1),
            Direction::East => Position::new(position.x + 1, position.y),
            Direction::West => Position::new(position.x - 1, position.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won,
    Caught,
}

/// A tiny chase game on a grid. Agent 0 eats food, every other agent is a ghost. Only ghosts
/// touching the agent matter, there are no power ups: capsules are just scenery the agent can
/// pick up.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseMaze {
    walls: HashSet<Position>,
    agents: Vec<Position>,
    food: Vec<Position>,
    capsules: Vec<Position>,
    score: f64,
    outcome: Option<Outcome>,
}

impl ChaseMaze {
    /// `%` is a wall, `P` the controlled agent, `G` a ghost, `.` food and `o` a capsule
    pub fn parse(layout: &str) -> Self {
        let mut walls = HashSet::new();
        let mut player = None;
        let mut ghosts = vec![];
        let mut food = vec![];
        let mut capsules = vec![];

        for (y, row) in layout.lines().map(str::trim).filter(|r| !r.is_empty()).enumerate() {
            for (x, cell) in row.chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match cell {
                    '%' => {
                        walls.insert(position);
                    }
                    'P' => player = Some(position),
                    'G' => ghosts.push(position),
                    '.' => food.push(position),
                    'o' => capsules.push(position),
                    _ => {}
                }
            }
        }

        let mut agents = vec![player.expect("layout needs a P")];
        agents.extend(ghosts);

        Self {
            walls,
            agents,
            food,
            capsules,
            score: 0.0,
            outcome: None,
        }
    }

    pub fn position_of(&self, agent: usize) -> Position {
        self.agents[agent]
    }

    fn caught(&self) -> bool {
        self.agents[1..].contains(&self.agents[0])
    }
}

impl TurnCyclingGame for ChaseMaze {
    type Action = Direction;

    fn legal_actions(&self, agent: usize) -> Vec<Direction> {
        if self.outcome.is_some() {
            return vec![];
        }

        Direction::ALL
            .into_iter()
            .filter(|d| !self.walls.contains(&d.apply(self.agents[agent])))
            .collect()
    }

    fn successor(&self, agent: usize, action: &Direction) -> Self {
        let mut next = self.clone();
        next.agents[agent] = action.apply(self.agents[agent]);

        if agent == 0 {
            next.score -= MOVE_COST;

            let here = next.agents[0];
            if let Some(i) = next.food.iter().position(|f| *f == here) {
                next.food.remove(i);
                next.score += FOOD_REWARD;
            }
            next.capsules.retain(|c| *c != here);
        }

        if next.caught() {
            next.score -= CAUGHT_PENALTY;
            next.outcome = Some(Outcome::Caught);
        } else if next.food.is_empty() {
            next.score += WIN_REWARD;
            next.outcome = Some(Outcome::Won);
        }

        next
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }

    fn is_win(&self) -> bool {
        self.outcome == Some(Outcome::Won)
    }

    fn is_lose(&self) -> bool {
        self.outcome == Some(Outcome::Caught)
    }
}

impl ScoreGettableGame for ChaseMaze {
    fn score(&self) -> f64 {
        self.score
    }
}

impl PositionGettableGame for ChaseMaze {
    fn agent_position(&self) -> Position {
        self.agents[0]
    }

    fn food_positions(&self) -> Vec<Position> {
        self.food.clone()
    }

    fn capsule_positions(&self) -> Vec<Position> {
        self.capsules.clone()
    }

    fn adversary_positions(&self) -> Vec<Position> {
        self.agents[1..].to_vec()
    }
}
