use super::Cell;
use rand::Rng;

/// Grid is a dense, row-major store of cells with fixed dimensions.
/// Reads outside the grid see dead cells and writes outside it are ignored,
/// so neighbor counting at the edges needs no special cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Build a grid from already computed row-major cells.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    /// Parse a picture made of `#`/`O` (alive) and anything else (dead).
    /// Rows shorter than the longest one are padded with dead cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if matches!(ch, '#' | 'O') {
                    grid.set(x as isize, y as isize, Cell::Alive);
                }
            }
        }
        grid
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Cell at (x, y); dead outside the grid
    pub fn get(&self, x: isize, y: isize) -> Cell {
        self.index(x, y).map_or(Cell::Dead, |i| self.cells[i])
    }

    /// Set cell at (x, y); no-op outside the grid
    pub fn set(&mut self, x: isize, y: isize, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Count live cells among the 8 Moore neighbors, no wrap-around
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (x, y) = (x as isize, y as isize);
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter(|&(dx, dy)| self.get(x + dx, y + dy).is_alive())
            .count() as u8
    }

    /// One row of cells. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Raw row-major bytes, one per cell
    pub fn to_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.as_byte()).collect()
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Fill the grid with random cells, each alive with probability `density`
    pub fn randomize<R: Rng>(mut self, rng: &mut R, density: f64) -> Self {
        let density = density.clamp(0.0, 1.0);
        self.cells.iter_mut().for_each(|cell| {
            *cell = if rng.random_bool(density) { Cell::Alive } else { Cell::Dead };
        });
        self
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % self.width, i / self.width, cell))
    }
}
