use std::fmt;

use tracing::debug;

use super::{GameView, Grid, Layout};
use crate::infra::{Direction, Position};

/// Moves a ghost stays edible after the agent eats a capsule.
pub const SCARED_TIME: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ghost {
    pub position: Position,
    pub scared_timer: i32,
}

impl Ghost {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            scared_timer: 0,
        }
    }

    pub fn scared(position: Position, scared_timer: i32) -> Self {
        Self {
            position,
            scared_timer,
        }
    }

    /// A scared ghost is harmless and can be eaten.
    pub fn is_scared(&self) -> bool {
        self.scared_timer > 0
    }
}

/// Owned snapshot of a board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub walls: Grid,
    pub food: Grid,
    pub capsules: Vec<Position>,
    pub agent: Position,
    pub ghosts: Vec<Ghost>,
}

impl GameState {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            walls: layout.walls.clone(),
            food: layout.food.clone(),
            capsules: layout.capsules.clone(),
            agent: layout.agent,
            ghosts: layout.ghosts.iter().copied().map(Ghost::new).collect(),
        }
    }

    pub fn with_scared_ghosts(mut self, scared_timer: i32) -> Self {
        for ghost in &mut self.ghosts {
            ghost.scared_timer = scared_timer;
        }
        self
    }

    /// Move the agent one step, eating whatever is on the new cell.
    ///
    /// Returns the new position, or `None` (state unchanged) if the move runs
    /// into a wall or off the board. Eating a capsule scares every ghost.
    pub fn apply_agent_move(&mut self, direction: Direction) -> Option<Position> {
        let next = self.agent.step(direction);
        if !self.walls.is_open(&next) {
            return None;
        }

        self.agent = next;
        if self.food.set(next, false) {
            debug!("Agent ate food at {}", next);
        }
        if let Some(index) = self.capsules.iter().position(|c| *c == next) {
            self.capsules.remove(index);
            debug!("Agent ate capsule at {}", next);
            for ghost in &mut self.ghosts {
                ghost.scared_timer = SCARED_TIME;
            }
        }
        Some(next)
    }

    fn tile_at(&self, pos: &Position) -> char {
        if self.walls.get(pos) {
            '%'
        } else if *pos == self.agent {
            'P'
        } else if self.ghosts.iter().any(|g| g.position == *pos) {
            'G'
        } else if self.capsules.contains(pos) {
            'o'
        } else if self.food.get(pos) {
            '.'
        } else {
            ' '
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for y in (0..self.walls.height).rev() {
            let row: String = (0..self.walls.width)
                .map(|x| self.tile_at(&Position::new(x, y)))
                .collect();
            writeln!(formatter, "{}", row)?;
        }
        Ok(())
    }
}

impl GameView for GameState {
    fn walls(&self) -> &Grid {
        &self.walls
    }

    fn food(&self) -> &Grid {
        &self.food
    }

    fn capsules(&self) -> &[Position] {
        &self.capsules
    }

    fn agent_position(&self) -> Position {
        self.agent
    }

    fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    fn state_key(&self) -> String {
        let timers: Vec<String> = self
            .ghosts
            .iter()
            .map(|g| g.scared_timer.to_string())
            .collect();
        format!("{}scared=[{}]", self, timers.join(","))
    }
}
