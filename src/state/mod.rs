mod game_state;
mod grid;
mod layout;

pub use game_state::{GameState, Ghost, SCARED_TIME};
pub use grid::Grid;
pub use layout::{Layout, LayoutError};

use crate::infra::{Direction, Position};

/// Read-only view of a board that feature extractors consume.
pub trait GameView {
    fn walls(&self) -> &Grid;

    fn food(&self) -> &Grid;

    fn capsules(&self) -> &[Position];

    fn agent_position(&self) -> Position;

    fn ghosts(&self) -> &[Ghost];

    /// Canonical text form; equal keys mean equal states.
    fn state_key(&self) -> String;

    fn scared_ghosts(&self) -> Vec<Ghost> {
        self.ghosts().iter().copied().filter(Ghost::is_scared).collect()
    }

    fn active_ghosts(&self) -> Vec<Ghost> {
        self.ghosts()
            .iter()
            .copied()
            .filter(|g| !g.is_scared())
            .collect()
    }

    /// Directions the agent can take: every open neighbor plus `Stop`.
    fn legal_actions(&self) -> Vec<Direction> {
        let agent = self.agent_position();
        Direction::ALL
            .into_iter()
            .filter(|&d| d == Direction::Stop || self.walls().is_open(&agent.step(d)))
            .collect()
    }
}
