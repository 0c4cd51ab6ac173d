use crate::infra::Position;

/// Fixed-size boolean grid indexed by `(x, y)` with `0 <= x < width`, `0 <= y < height`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    fn index(&self, pos: &Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.x * self.height + pos.y) as usize)
    }

    /// Cell value; out-of-bounds cells read as false.
    pub fn get(&self, pos: &Position) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i])
    }

    /// Set a cell, returning the previous value. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Position, value: bool) -> bool {
        match self.index(&pos) {
            Some(i) => std::mem::replace(&mut self.cells[i], value),
            None => false,
        }
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Positions of all true cells, x-major.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
            .filter(|pos| self.get(pos))
    }

    /// Open 4-neighbors of `pos`, treating this grid as walls.
    pub fn legal_neighbors(&self, pos: &Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors()
            .into_iter()
            .filter(|neighbor| self.in_bounds(neighbor) && !self.get(neighbor))
    }

    /// Whether `pos` is inside the grid and not set, i.e. an open cell of a wall grid.
    pub fn is_open(&self, pos: &Position) -> bool {
        self.in_bounds(pos) && !self.get(pos)
    }
}
