/// Cell is one byte of grid storage: 0 = dead, 1 = alive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Any non-zero byte is a live cell
    pub const fn from_byte(value: u8) -> Self {
        if value == 0 { Cell::Dead } else { Cell::Alive }
    }

    /// Next state from the live-neighbor count:
    /// 2 keeps the previous value, 3 makes the cell alive, anything else kills it.
    pub const fn evolve(self, neighbors: u8) -> Self {
        match neighbors {
            2 => self,
            3 => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underpopulation() {
        assert_eq!(Cell::Alive.evolve(0), Cell::Dead);
        assert_eq!(Cell::Alive.evolve(1), Cell::Dead);
    }

    #[test]
    fn test_survival() {
        assert_eq!(Cell::Alive.evolve(2), Cell::Alive);
        assert_eq!(Cell::Alive.evolve(3), Cell::Alive);
    }

    #[test]
    fn test_overpopulation() {
        for n in 4..=8 {
            assert_eq!(Cell::Alive.evolve(n), Cell::Dead);
        }
    }

    #[test]
    fn test_reproduction() {
        assert_eq!(Cell::Dead.evolve(3), Cell::Alive);
        assert_eq!(Cell::Dead.evolve(2), Cell::Dead);
        assert_eq!(Cell::Dead.evolve(6), Cell::Dead);
    }

    #[test]
    fn test_byte_encoding() {
        assert_eq!(Cell::Dead.as_byte(), 0);
        assert_eq!(Cell::Alive.as_byte(), 1);
        assert_eq!(Cell::from_byte(7), Cell::Alive);
    }
}
