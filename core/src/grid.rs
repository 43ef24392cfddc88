use chrono::{DateTime, Duration, Utc};
use ndarray::{Array2, ArrayView1};

use crate::*;

/// One round of minesweeper.
///
/// A `Game` is a value: every operation borrows it and hands back a new one, so a snapshot held by
/// the caller never changes after the fact.
#[derive(Clone, Debug, PartialEq)]
pub struct Game {
    size: Coord2,
    cells: Array2<Cell>,
    mine_count: CellCount,
    alive: bool,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Game {
    /// All-hidden, all-safe board with zero touch counts. Mines are placed by a generator.
    pub(crate) fn blank(size: Coord2, started_at: DateTime<Utc>) -> Self {
        let (width, height) = size;
        Self {
            size,
            cells: Array2::default([height.max(0) as usize, width.max(0) as usize]),
            mine_count: 0,
            alive: true,
            started_at,
            ended_at: None,
        }
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Whether the game has ended, either way.
    pub fn is_finished(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn state(&self) -> GameState {
        match (self.ended_at, self.alive) {
            (None, _) => GameState::InProgress,
            (Some(_), true) => GameState::Won,
            (Some(_), false) => GameState::Lost,
        }
    }

    /// Time spent so far, frozen once the game ends.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (self.ended_at.unwrap_or(now) - self.started_at).max(Duration::zero())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| !cell.is_hidden())
    }

    /// Safe cells still waiting to be revealed. Zero means every remaining hidden cell is a mine.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_hidden() && !cell.is_mine)
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        contains(coords, self.size)
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }

    /// Copy of the cell at `coords`, `None` when out of bounds.
    pub fn get_cell(&self, coords: Coord2) -> Option<Cell> {
        self.in_bounds(coords).then(|| self.cells[coords.to_nd_index()])
    }

    /// New game with the fields present in `update` written to the cell at `coords`.
    ///
    /// Out-of-bounds coordinates give back an unchanged copy.
    pub fn set_cell(&self, coords: Coord2, update: CellUpdate) -> Game {
        let mut next = self.clone();
        if let Some(cell) = next.cell_mut(coords) {
            *cell = cell.apply(update);
        }
        next
    }

    /// Row-major iterator over every position and its cell.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((y, x), &cell)| ((x as Coord, y as Coord), cell))
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, Cell>> {
        self.cells.rows().into_iter()
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.in_bounds(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub(crate) fn set_mine_count(&mut self, mine_count: CellCount) {
        self.mine_count = mine_count;
    }

    pub(crate) fn finish(&mut self, alive: bool, ended_at: Option<DateTime<Utc>>) {
        self.alive = alive;
        self.ended_at = ended_at;
    }

    fn count_cells(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| pred(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}
