//! Breadth-first reachability over the open cells of a wall grid.
//!
//! Every step costs one move, so the first time BFS reaches a cell its
//! distance is the shortest 4-connected path length from the start. Nothing
//! is cached between calls: walls and food change from state to state.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::trace;

use crate::infra::Position;
use crate::state::Grid;

/// Distance from `start` to the nearest open cell satisfying `is_goal`.
///
/// Returns `None` when no matching cell is reachable, including when `start`
/// itself is a wall or outside the grid.
pub fn closest_matching<F>(start: Position, walls: &Grid, mut is_goal: F) -> Option<u32>
where
    F: FnMut(&Position) -> bool,
{
    if !walls.is_open(&start) {
        return None;
    }

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();

    queue.push_back((start, 0u32));
    visited.insert(start);

    while let Some((current, distance)) = queue.pop_front() {
        if is_goal(&current) {
            return Some(distance);
        }

        for next in walls.legal_neighbors(&current) {
            if visited.insert(next) {
                queue.push_back((next, distance + 1));
            }
        }
    }

    None
}

/// Distance from `start` to the nearest cell holding food.
pub fn closest_food(start: Position, food: &Grid, walls: &Grid) -> Option<u32> {
    let distance = closest_matching(start, walls, |pos| food.get(pos));
    trace!("closest food from {} -> {:?}", start, distance);
    distance
}

/// Distances from `start` to each reachable target.
///
/// Duplicate targets count once. The result follows the order in which the
/// distinct targets first appear in `targets`, skipping unreachable ones, so a
/// result shorter than the distinct target count means some were unreachable.
pub fn distances_to(start: Position, targets: &[Position], walls: &Grid) -> Vec<u32> {
    let mut order = Vec::with_capacity(targets.len());
    let mut found: HashMap<Position, Option<u32>> = HashMap::with_capacity(targets.len());
    for &target in targets {
        if !found.contains_key(&target) {
            found.insert(target, None);
            order.push(target);
        }
    }

    let reachable_targets = order.iter().filter(|t| walls.is_open(t)).count();
    let mut matched = 0;

    if walls.is_open(&start) && reachable_targets > 0 {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back((start, 0u32));
        visited.insert(start);

        while let Some((current, distance)) = queue.pop_front() {
            if let Some(slot) = found.get_mut(&current) {
                *slot = Some(distance);
                matched += 1;
                if matched == reachable_targets {
                    break;
                }
            }

            for next in walls.legal_neighbors(&current) {
                if visited.insert(next) {
                    queue.push_back((next, distance + 1));
                }
            }
        }
    }

    let distances: Vec<u32> = order
        .iter()
        .filter_map(|target| found.get(target).copied().flatten())
        .collect();
    trace!(
        "distances from {} to {} targets: {:?}",
        start,
        order.len(),
        distances
    );
    distances
}

/// Shortest distance from `start` to every reachable open cell.
pub fn distance_map(start: Position, walls: &Grid) -> HashMap<Position, u32> {
    let mut distances = HashMap::new();
    if !walls.is_open(&start) {
        return distances;
    }

    let mut queue = VecDeque::new();
    queue.push_back((start, 0u32));
    distances.insert(start, 0);

    while let Some((current, distance)) = queue.pop_front() {
        for next in walls.legal_neighbors(&current) {
            if !distances.contains_key(&next) {
                distances.insert(next, distance + 1);
                queue.push_back((next, distance + 1));
            }
        }
    }

    distances
}
