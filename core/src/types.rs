/// Single coordinate axis used for board width, height, and positions.
///
/// Signed so that stale or edge coordinates such as `(-1, 0)` can be passed straight through and
/// answered with a no-op instead of needing a bounds check at every call site.
pub type Coord = i16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Smallest accepted board side.
pub const MIN_SIDE: Coord = 8;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

/// Grid storage is `(height, width)` so rows are contiguous, hence `[y, x]`.
impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.1 as usize, self.0 as usize]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = if a < 0 { 0 } else { a as CellCount };
    let b = if b < 0 { 0 } else { b as CellCount };
    a.saturating_mul(b)
}

/// Whether `coords` lies within `[0, width) x [0, height)`.
pub const fn contains((x, y): Coord2, (width, height): Coord2) -> bool {
    x >= 0 && x < width && y >= 0 && y < height
}

const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (Coord, Coord), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let next = (x.checked_add(dx)?, y.checked_add(dy)?);
    contains(next, bounds).then_some(next)
}

/// King-move neighbours of a cell: row above, then left and right, then row below.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
