pub mod search;
mod types;

pub use search::{closest_food, closest_matching, distance_map, distances_to};
pub use types::{Direction, ParseDirectionError, Position};
