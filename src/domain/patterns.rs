use super::{Cell, Grid};

/// A named arrangement of live cells that can be stamped onto a grid
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub description: &'static str,
    pub width: usize,
    pub height: usize,
    pub cells: Vec<(usize, usize)>, // Relative coordinates of alive cells
}

impl Pattern {
    /// Create a new pattern from alive cell coordinates
    pub fn new(name: &'static str, description: &'static str, cells: Vec<(usize, usize)>) -> Self {
        let width = cells.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
        let height = cells.iter().map(|(_, y)| *y).max().unwrap_or(0) + 1;
        Self { name, description, width, height, cells }
    }

    /// Place pattern on grid with its top-left corner at (x, y).
    /// Cells falling outside the grid are dropped.
    pub fn place_on(&self, grid: &mut Grid, x: isize, y: isize) {
        for &(dx, dy) in &self.cells {
            grid.set(x + dx as isize, y + dy as isize, Cell::Alive);
        }
    }

    /// A fresh grid with this pattern centered on it
    pub fn centered_in(&self, width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height);
        let x = (width as isize - self.width as isize) / 2;
        let y = (height as isize - self.height as isize) / 2;
        self.place_on(&mut grid, x, y);
        grid
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::new(
            "glider",
            "Moves diagonally (period 4)",
            vec![
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Horizontal blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::new("blinker", "Oscillator (period 2)", vec![(0, 0), (1, 0), (2, 0)])
    }

    pub fn toad() -> Pattern {
        Pattern::new(
            "toad",
            "Oscillator (period 2)",
            vec![
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    pub fn beacon() -> Pattern {
        Pattern::new(
            "beacon",
            "Oscillator (period 2)",
            vec![
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::new(
            "r-pentomino",
            "Methuselah - stabilizes at gen 1103",
            vec![
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::new("block", "Still life", vec![(0, 0), (1, 0), (0, 1), (1, 1)])
    }

    /// Get all available patterns
    pub fn all_patterns() -> Vec<Pattern> {
        vec![glider(), blinker(), toad(), beacon(), r_pentomino(), block()]
    }

    /// Look a preset up by its (case-insensitive) name
    pub fn by_name(name: &str) -> Option<Pattern> {
        all_patterns().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_bounds() {
        let glider = presets::glider();
        assert_eq!((glider.width, glider.height), (3, 3));
        assert_eq!(presets::blinker().height, 1);
    }

    #[test]
    fn test_centered_placement() {
        let grid = presets::blinker().centered_in(5, 5);
        assert_eq!(grid, Grid::from_rows(&[".....", ".....", ".###.", ".....", "....."]));
    }

    #[test]
    fn test_placement_clips_at_edges() {
        let mut grid = Grid::new(2, 2);
        presets::block().place_on(&mut grid, 1, 1);
        assert_eq!(grid.count_alive(), 1);
        presets::block().place_on(&mut grid, -1, -1);
        assert_eq!(grid.get(0, 0), Cell::Alive);
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(presets::by_name("Glider").map(|p| p.cells.len()), Some(5));
        assert!(presets::by_name("unknown").is_none());
    }
}
