use super::{ExtractError, FeatureExtractor, Features};
use crate::infra::Direction;
use crate::state::GameView;

/// One indicator per `(state, action)` pair, equivalent to a lookup table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityExtractor;

impl FeatureExtractor for IdentityExtractor {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn features(&self, state: &dyn GameView, action: Direction) -> Result<Features, ExtractError> {
        let mut features = Features::new();
        features.set(format!("{}|{}", state.state_key(), action), 1.0);
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameState, Layout};

    #[test]
    fn test_identity_distinguishes_state_and_action() {
        let mut state = GameState::from_layout(&Layout::parse("%%%%%\n%P..%\n%%%%%").unwrap());
        let east = IdentityExtractor.features(&state, Direction::East).unwrap();
        let stop = IdentityExtractor.features(&state, Direction::Stop).unwrap();

        assert_eq!(east.len(), 1);
        assert_eq!(east.iter().next().map(|(_, v)| v), Some(1.0));
        assert_ne!(east, stop);
        assert_eq!(east, IdentityExtractor.features(&state, Direction::East).unwrap());

        state.apply_agent_move(Direction::East);
        assert_ne!(east, IdentityExtractor.features(&state, Direction::East).unwrap());
    }
}
