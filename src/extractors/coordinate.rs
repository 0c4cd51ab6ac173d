use super::{ExtractError, FeatureExtractor, Features};
use crate::infra::Direction;
use crate::state::GameView;

/// Indicators on the whole state, the agent's coordinates and the action label.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateExtractor;

impl FeatureExtractor for CoordinateExtractor {
    fn name(&self) -> &'static str {
        "coordinate"
    }

    fn features(&self, state: &dyn GameView, action: Direction) -> Result<Features, ExtractError> {
        let agent = state.agent_position();
        let mut features = Features::new();
        features.set(format!("state={}", state.state_key()), 1.0);
        features.set(format!("x={}", agent.x), 1.0);
        features.set(format!("y={}", agent.y), 1.0);
        features.set(format!("action={}", action), 1.0);
        Ok(features)
    }
}
