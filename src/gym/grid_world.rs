use std::collections::HashSet;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use strum::VariantArray;
use thiserror::Error;

use crate::env::{Environment, Transition};

/// Cell coordinates `(x, y)`, with `(0, 0)` in the top left corner
pub type Pos = (i32, i32);

/// The four axis-aligned unit moves
#[derive(VariantArray, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    fn apply(self, (x, y): Pos) -> Pos {
        match self {
            Move::Up => (x, y - 1),
            Move::Down => (x, y + 1),
            Move::Left => (x - 1, y),
            Move::Right => (x + 1, y),
        }
    }
}

/// Rejected grid layouts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    Empty { width: i32, height: i32 },
    #[error("{name} cell {pos:?} lies outside the grid")]
    OutOfBounds { name: &'static str, pos: Pos },
    #[error("goal cell {0:?} is blocked")]
    BlockedGoal(Pos),
    #[error("every cell is either the goal or blocked")]
    NoFreeCell,
}

/// Configuration for a [`GridWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorldConfig {
    pub width: i32,
    pub height: i32,
    pub start: Pos,
    pub goal: Pos,
    pub obstacles: HashSet<Pos>,
    /// Paid on reaching the goal
    pub goal_reward: f64,
    /// Paid on bumping into the edge or stepping onto an obstacle
    pub obstacle_penalty: f64,
    /// Paid on every other move
    pub step_penalty: f64,
    /// Reset to a random free cell instead of `start`
    pub random_start: bool,
    /// Seed for start placement, `None` for entropy
    pub seed: Option<u64>,
}

/// A rectangular grid with a goal cell and blocked cells
///
/// Moving off the grid keeps the agent in place with the obstacle penalty. Moving onto an
/// obstacle is penalized the same way but the agent does end up on the obstacle. Reaching the
/// goal pays the goal reward and ends the episode.
#[derive(Debug, Clone)]
pub struct GridWorld {
    width: i32,
    height: i32,
    start: Pos,
    goal: Pos,
    obstacles: HashSet<Pos>,
    goal_reward: f64,
    obstacle_penalty: f64,
    step_penalty: f64,
    random_start: bool,
    free_cells: Vec<Pos>,
    pos: Pos,
    rng: StdRng,
}

impl GridWorld {
    /// Build a grid world, placing the agent on the configured start cell
    pub fn new(config: GridWorldConfig) -> Result<Self, GridError> {
        let GridWorldConfig {
            width,
            height,
            start,
            goal,
            obstacles,
            goal_reward,
            obstacle_penalty,
            step_penalty,
            random_start,
            seed,
        } = config;

        if width <= 0 || height <= 0 {
            return Err(GridError::Empty { width, height });
        }
        let in_bounds = |(x, y): Pos| x >= 0 && x < width && y >= 0 && y < height;
        for (name, pos) in [("start", start), ("goal", goal)] {
            if !in_bounds(pos) {
                return Err(GridError::OutOfBounds { name, pos });
            }
        }
        if obstacles.contains(&goal) {
            return Err(GridError::BlockedGoal(goal));
        }

        let free_cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .filter(|pos| *pos != goal && !obstacles.contains(pos))
            .collect::<Vec<_>>();
        if free_cells.is_empty() {
            return Err(GridError::NoFreeCell);
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            width,
            height,
            start,
            goal,
            obstacles,
            goal_reward,
            obstacle_penalty,
            step_penalty,
            random_start,
            free_cells,
            pos: start,
            rng,
        })
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    fn is_in_bounds(&self, (x, y): Pos) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}

impl Environment for GridWorld {
    type State = Pos;
    type Action = Move;

    fn current_state(&self) -> Pos {
        self.pos
    }

    fn actions(&self, state: &Pos) -> Vec<Move> {
        if self.is_terminal(state) {
            return Vec::new();
        }

        Move::VARIANTS
            .iter()
            .copied()
            .filter(|m| self.is_in_bounds(m.apply(*state)))
            .collect()
    }

    fn step(&mut self, action: Move) -> Transition<Pos, Move> {
        let state = self.pos;
        let target = action.apply(state);

        let (next_state, reward, terminal) = if !self.is_in_bounds(target) {
            (state, self.obstacle_penalty, false)
        } else if self.obstacles.contains(&target) {
            (target, self.obstacle_penalty, false)
        } else if target == self.goal {
            (target, self.goal_reward, true)
        } else {
            (target, self.step_penalty, false)
        };

        self.pos = next_state;
        Transition {
            state,
            action,
            reward,
            next_state,
            terminal,
        }
    }

    fn reset(&mut self) {
        self.pos = if self.random_start {
            // `free_cells` is checked non-empty on construction
            *self.free_cells.choose(&mut self.rng).unwrap_or(&self.start)
        } else {
            self.start
        };
    }

    fn is_terminal(&self, state: &Pos) -> bool {
        *state == self.goal
    }
}
