//! Grid-aware extractor for a reflex agent.
//!
//! Features (before the final scale-down):
//! - `bias`: always 1.0
//! - `#-of-ghosts-1-step-away`: active ghosts that can reach the post-action cell next turn
//! - `eating-ghosts` / `closest-ghost`: a scared ghost is reachable, and how far
//! - `eating-capsules` / `closest-capsule`: a capsule is reachable (only without a ghost target)
//! - `eats-food`: the post-action cell has food and no ghost threatens it
//! - `closest-food`: maze distance to the nearest food (only without a ghost or capsule target)
//!
//! Distances are divided by the board area so they stay within `[0, 1]`.

use tracing::{debug, trace};

use super::{ExtractError, FeatureExtractor, Features};
use crate::infra::search;
use crate::infra::{Direction, Position};
use crate::state::{GameView, Grid};

pub const BIAS: &str = "bias";
pub const GHOSTS_ONE_STEP_AWAY: &str = "#-of-ghosts-1-step-away";
pub const EATING_GHOSTS: &str = "eating-ghosts";
pub const CLOSEST_GHOST: &str = "closest-ghost";
pub const EATING_CAPSULES: &str = "eating-capsules";
pub const CLOSEST_CAPSULE: &str = "closest-capsule";
pub const EATS_FOOD: &str = "eats-food";
pub const CLOSEST_FOOD: &str = "closest-food";

#[derive(Debug, Clone)]
pub struct SimpleExtractorConfig {
    /// Every feature is divided by this at the end.
    pub scale: f64,
    /// `eats-food` value while chasing a scared ghost or a capsule.
    pub shared_food_value: f64,
}

impl Default for SimpleExtractorConfig {
    fn default() -> Self {
        Self {
            scale: 10.0,
            shared_food_value: 0.01,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimpleExtractor {
    config: SimpleExtractorConfig,
}

impl SimpleExtractor {
    pub fn new(config: SimpleExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimpleExtractorConfig {
        &self.config
    }

    /// Active ghosts that could step onto `next` (or already stand on it).
    fn ghosts_one_step_away(state: &dyn GameView, next: Position) -> usize {
        let walls = state.walls();
        state
            .active_ghosts()
            .iter()
            .filter(|ghost| {
                ghost.position == next || walls.legal_neighbors(&ghost.position).any(|n| n == next)
            })
            .count()
    }

    /// Normalized distance to the closest reachable target, if any.
    fn closest_target(next: Position, targets: &[Position], walls: &Grid) -> Option<f64> {
        if targets.is_empty() {
            return None;
        }
        search::distances_to(next, targets, walls)
            .into_iter()
            .min()
            .map(|distance| distance as f64 / walls.area() as f64)
    }
}

impl FeatureExtractor for SimpleExtractor {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn features(&self, state: &dyn GameView, action: Direction) -> Result<Features, ExtractError> {
        let walls = state.walls();
        let food = state.food();
        let position = state.agent_position();

        let next = position.step(action);
        if !walls.is_open(&next) {
            debug!("Rejecting {} from {}: {} is blocked", action, position, next);
            return Err(ExtractError::IllegalAction { position, action });
        }

        let mut features = Features::new();
        features.set(BIAS, 1.0);

        let threats = Self::ghosts_one_step_away(state, next);
        features.set(GHOSTS_ONE_STEP_AWAY, threats as f64);

        let scared: Vec<Position> = state.scared_ghosts().iter().map(|g| g.position).collect();
        let mut eating_ghosts = false;
        if let Some(distance) = Self::closest_target(next, &scared, walls) {
            eating_ghosts = true;
            features.set(EATING_GHOSTS, 1.0);
            features.set(CLOSEST_GHOST, distance);
            debug!("{}: chasing scared ghost at distance {:.3}", action, distance);
        }

        let mut eating_capsules = false;
        if !eating_ghosts
            && let Some(distance) = Self::closest_target(next, state.capsules(), walls)
        {
            eating_capsules = true;
            features.set(EATING_CAPSULES, 1.0);
            features.set(CLOSEST_CAPSULE, distance);
            debug!("{}: heading for capsule at distance {:.3}", action, distance);
        }

        if threats == 0 && food.get(&next) {
            features.set(EATS_FOOD, 1.0);
        }

        if eating_ghosts || eating_capsules {
            features.set(EATS_FOOD, self.config.shared_food_value);
        } else if let Some(distance) = search::closest_food(next, food, walls) {
            features.set(CLOSEST_FOOD, distance as f64 / walls.area() as f64);
        }

        features.divide_all(self.config.scale);
        trace!("{} from {} -> {}", action, position, features);
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameState, Ghost, Layout};

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn open_board(width: i32, height: i32, agent: Position) -> GameState {
        GameState {
            walls: Grid::new(width, height),
            food: Grid::new(width, height),
            capsules: Vec::new(),
            agent,
            ghosts: Vec::new(),
        }
    }

    fn parse(text: &str) -> GameState {
        GameState::from_layout(&Layout::parse(text).unwrap())
    }

    #[test]
    fn test_closest_food_on_open_board() {
        let mut state = open_board(5, 5, Position::new(0, 0));
        state.food.set(Position::new(4, 4), true);

        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert!(approx(features.get(BIAS), 0.1));
        assert_eq!(features.get(GHOSTS_ONE_STEP_AWAY), 0.0);
        assert!(!features.contains(EATS_FOOD));
        assert!(approx(features.get(CLOSEST_FOOD), 0.028));
    }

    #[test]
    fn test_eats_food_when_safe() {
        let state = parse(
            "\
%%%%%%
%P.  %
%%%%%%",
        );
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert!(approx(features.get(EATS_FOOD), 0.1));
        assert!(approx(features.get(CLOSEST_FOOD), 0.0));
        assert!(features.contains(CLOSEST_FOOD));
    }

    #[test]
    fn test_threat_suppresses_eats_food() {
        let state = parse(
            "\
%%%%%%
%  G %
%P.  %
%%%%%%",
        );
        // Ghost at (3, 2) is diagonal to the food at (2, 1).
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();
        assert_eq!(features.get(GHOSTS_ONE_STEP_AWAY), 0.0);
        assert!(approx(features.get(EATS_FOOD), 0.1));

        let state = parse(
            "\
%%%%%%
% G  %
%P.  %
%%%%%%",
        );
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();
        assert!(approx(features.get(GHOSTS_ONE_STEP_AWAY), 0.1));
        assert_eq!(features.get(EATS_FOOD), 0.0);
        assert!(!features.contains(EATS_FOOD));
    }

    #[test]
    fn test_ghost_on_target_cell_counts_as_threat() {
        let mut state = open_board(3, 1, Position::new(0, 0));
        state.ghosts.push(Ghost::new(Position::new(1, 0)));
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();
        assert!(approx(features.get(GHOSTS_ONE_STEP_AWAY), 0.1));
    }

    #[test]
    fn test_scared_ghost_is_not_a_threat() {
        let state = parse(
            "\
%%%%%%
% G  %
%P.  %
%%%%%%",
        )
        .with_scared_ghosts(10);
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert_eq!(features.get(GHOSTS_ONE_STEP_AWAY), 0.0);
        assert!(approx(features.get(EATING_GHOSTS), 0.1));
        // Ghost at (2, 2) is one step from (2, 1) on a 6x4 board.
        assert!(approx(features.get(CLOSEST_GHOST), 1.0 / 24.0 / 10.0));
        assert!(approx(features.get(EATS_FOOD), 0.001));
        assert!(!features.contains(CLOSEST_FOOD));
    }

    #[test]
    fn test_capsule_without_scared_ghosts() {
        let state = parse(
            "\
%%%%%%%
%P  o.%
%%%%%%%",
        );
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert!(approx(features.get(EATING_CAPSULES), 0.1));
        assert!(approx(features.get(CLOSEST_CAPSULE), 2.0 / 21.0 / 10.0));
        assert!(!features.contains(CLOSEST_FOOD));
        assert!(!features.contains(EATING_GHOSTS));
        assert!(approx(features.get(EATS_FOOD), 0.001));
    }

    #[test]
    fn test_scared_ghost_takes_precedence_over_capsule() {
        let state = parse(
            "\
%%%%%%%
%P  oG%
%%%%%%%",
        )
        .with_scared_ghosts(3);
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert!(approx(features.get(EATING_GHOSTS), 0.1));
        assert!(approx(features.get(CLOSEST_GHOST), 3.0 / 21.0 / 10.0));
        assert!(!features.contains(EATING_CAPSULES));
        assert!(!features.contains(CLOSEST_CAPSULE));
    }

    #[test]
    fn test_unreachable_scared_ghost_falls_back_to_capsule() {
        let state = parse(
            "\
%%%%%%%%
%P o.%G%
%%%%%%%%",
        )
        .with_scared_ghosts(3);
        let features = SimpleExtractor::default()
            .features(&state, Direction::East)
            .unwrap();

        assert!(!features.contains(EATING_GHOSTS));
        assert!(approx(features.get(EATING_CAPSULES), 0.1));
        assert!(approx(features.get(CLOSEST_CAPSULE), 1.0 / 24.0 / 10.0));
    }

    #[test]
    fn test_walled_off_food_is_omitted() {
        let state = parse(
            "\
%%%%%%%
%P %..%
%  %..%
%%%%%%%",
        );
        let features = SimpleExtractor::default()
            .features(&state, Direction::South)
            .unwrap();

        assert!(!features.contains(CLOSEST_FOOD));
        assert!(!features.contains(EATS_FOOD));
        assert!(approx(features.get(BIAS), 0.1));
    }

    #[test]
    fn test_illegal_action_is_rejected() {
        let state = parse(
            "\
%%%%
%P %
%%%%",
        );
        let err = SimpleExtractor::default()
            .features(&state, Direction::North)
            .unwrap_err();
        assert_eq!(
            err,
            ExtractError::IllegalAction {
                position: Position::new(1, 1),
                action: Direction::North,
            }
        );
    }

    #[test]
    fn test_features_stay_in_normalized_range() {
        let boards = [
            "\
%%%%%%%%%%
%P . o  .%
% %% %%% %
%.  G   .%
%%%%%%%%%%",
            "\
%%%%%%%
%P.%..%
%.%%%o%
%  G .%
%%%%%%%",
        ];
        let extractor = SimpleExtractor::default();
        for board in boards {
            for scared_timer in [0, 5] {
                let state = parse(board).with_scared_ghosts(scared_timer);
                for action in state.legal_actions() {
                    let features = extractor.features(&state, action).unwrap();
                    for (key, value) in features.iter() {
                        assert!(
                            (0.0..=0.1).contains(&value),
                            "{} = {} out of range for {}",
                            key,
                            value,
                            action
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_features_are_deterministic() {
        let state = parse(
            "\
%%%%%%%
%P.%..%
%.%%%o%
%  G .%
%%%%%%%",
        );
        let extractor = SimpleExtractor::default();
        for action in state.legal_actions() {
            let first = extractor.features(&state, action).unwrap();
            assert_eq!(first, extractor.features(&state, action).unwrap());
        }
    }

    #[test]
    fn test_custom_scale() {
        let mut state = open_board(2, 1, Position::new(0, 0));
        state.food.set(Position::new(1, 0), true);
        let extractor = SimpleExtractor::new(SimpleExtractorConfig {
            scale: 1.0,
            ..SimpleExtractorConfig::default()
        });
        let features = extractor.features(&state, Direction::Stop).unwrap();
        assert_eq!(features.get(BIAS), 1.0);
        assert!(approx(features.get(CLOSEST_FOOD), 0.5));
    }
}
