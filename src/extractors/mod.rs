//! Feature extractors turning a `(state, action)` pair into a sparse feature
//! vector for a linear value function.
//!
//! Three interchangeable variants share one trait:
//! - `IdentityExtractor`: one indicator per exact `(state, action)` pair
//! - `CoordinateExtractor`: indicators on the state, agent coordinates and action
//! - `SimpleExtractor`: grid-aware distances and threat flags

mod coordinate;
mod features;
mod identity;
mod simple;

pub use coordinate::CoordinateExtractor;
pub use features::Features;
pub use identity::IdentityExtractor;
pub use simple::{SimpleExtractor, SimpleExtractorConfig};

use std::fmt;
use std::str::FromStr;

use crate::infra::{Direction, Position};
use crate::state::GameView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The action moves the agent into a wall or off the board.
    IllegalAction {
        position: Position,
        action: Direction,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExtractError::IllegalAction { position, action } => write!(
                formatter,
                "Illegal action {} from {}: target cell is blocked",
                action, position
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Maps a state and a candidate action to features. Implementations are pure.
pub trait FeatureExtractor {
    fn name(&self) -> &'static str;

    fn features(&self, state: &dyn GameView, action: Direction) -> Result<Features, ExtractError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    Identity,
    Coordinate,
    Simple,
}

impl ExtractorKind {
    pub fn build(self) -> Box<dyn FeatureExtractor> {
        match self {
            ExtractorKind::Identity => Box::new(IdentityExtractor),
            ExtractorKind::Coordinate => Box::new(CoordinateExtractor),
            ExtractorKind::Simple => Box::new(SimpleExtractor::default()),
        }
    }
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "identity" => Ok(ExtractorKind::Identity),
            "coordinate" => Ok(ExtractorKind::Coordinate),
            "simple" => Ok(ExtractorKind::Simple),
            other => Err(format!(
                "unknown extractor '{}' (expected identity, coordinate or simple)",
                other
            )),
        }
    }
}
