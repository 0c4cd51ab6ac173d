pub mod extractors;
pub mod infra;
pub mod state;

// Re-export commonly used types for convenience
pub use extractors::{
    CoordinateExtractor, ExtractError, ExtractorKind, FeatureExtractor, Features,
    IdentityExtractor, SimpleExtractor, SimpleExtractorConfig,
};
pub use infra::{Direction, Position};
pub use state::{GameState, GameView, Ghost, Grid, Layout, LayoutError};
