//! Text board layouts.
//!
//! `%` wall, `.` food, `o` capsule, `P` agent, `G` (or `1`-`4`) ghost, space
//! empty. The first text row is the top of the board (`y = height - 1`).

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::Grid;
use crate::infra::Position;

#[derive(Debug)]
pub enum LayoutError {
    Empty,
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    UnknownTile {
        tile: char,
        row: usize,
        column: usize,
    },
    MissingAgent,
    MultipleAgents {
        first: Position,
        second: Position,
    },
    Io(io::Error),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(formatter, "Layout has no rows"),
            LayoutError::RaggedRow {
                row,
                expected,
                found,
            } => write!(
                formatter,
                "Row {} has {} columns, expected {}",
                row, found, expected
            ),
            LayoutError::UnknownTile { tile, row, column } => write!(
                formatter,
                "Unknown tile '{}' at row {}, column {}",
                tile, row, column
            ),
            LayoutError::MissingAgent => write!(formatter, "Layout has no agent ('P')"),
            LayoutError::MultipleAgents { first, second } => write!(
                formatter,
                "Layout has more than one agent: {} and {}",
                first, second
            ),
            LayoutError::Io(err) => write!(formatter, "Failed to read layout: {}", err),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LayoutError {
    fn from(err: io::Error) -> Self {
        LayoutError::Io(err)
    }
}

/// Parsed starting board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub walls: Grid,
    pub food: Grid,
    pub capsules: Vec<Position>,
    pub agent: Position,
    pub ghosts: Vec<Position>,
}

impl Layout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!("Loaded layout from {}", path.display());
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .skip_while(|line| line.trim().is_empty())
            .collect();
        let rows: Vec<&str> = match rows.iter().rposition(|line| !line.trim().is_empty()) {
            Some(last) => rows[..=last].to_vec(),
            None => return Err(LayoutError::Empty),
        };

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut walls = Grid::new(width as i32, height as i32);
        let mut food = Grid::new(width as i32, height as i32);
        let mut capsules = Vec::new();
        let mut ghosts = Vec::new();
        let mut agent: Option<Position> = None;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            let y = (height - 1 - row) as i32;
            for (column, tile) in line.chars().enumerate() {
                let pos = Position::new(column as i32, y);
                match tile {
                    '%' => {
                        walls.set(pos, true);
                    }
                    '.' => {
                        food.set(pos, true);
                    }
                    'o' => capsules.push(pos),
                    'P' => {
                        if let Some(first) = agent {
                            return Err(LayoutError::MultipleAgents { first, second: pos });
                        }
                        agent = Some(pos);
                    }
                    'G' | '1'..='4' => ghosts.push(pos),
                    ' ' => {}
                    _ => return Err(LayoutError::UnknownTile { tile, row, column }),
                }
            }
        }

        let agent = agent.ok_or(LayoutError::MissingAgent)?;
        debug!(
            "Parsed {}x{} layout: {} food, {} capsules, {} ghosts",
            width,
            height,
            food.count(),
            capsules.len(),
            ghosts.len()
        );

        Ok(Self {
            walls,
            food,
            capsules,
            agent,
            ghosts,
        })
    }
}
