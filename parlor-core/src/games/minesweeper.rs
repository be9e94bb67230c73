//! # Minesweeper
//!
//! 8×8 board, ten mines, one cell revealed per click — the dashboard's
//! variant has no flags and no flood reveal, and that stays as-is. Winning
//! means revealing every safe cell; revealing a mine ends the game and turns
//! the rest of the minefield face-up.

pub const GRID: usize = 8;
pub const MINES: usize = 10;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub mine: bool,
    pub revealed: bool,
    /// Mines in the eight neighboring cells. Zero on mine cells.
    pub adjacent: u8,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Status {
    InProgress,
    Exploded,
    Won,
}

pub struct Minesweeper {
    grid: [[Cell; GRID]; GRID],
    status: Status,
}

impl Default for Minesweeper {
    fn default() -> Self {
        Self::new()
    }
}

impl Minesweeper {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }
    /// Deterministic deal for tests.
    pub fn with_rng<R: rand::Rng>(rng: &mut R) -> Self {
        let mut grid = [[Cell::default(); GRID]; GRID];
        // Mines drop uniformly, rerolling occupied cells.
        let mut placed = 0;
        while placed < MINES {
            let row = rng.gen_range(0..GRID);
            let col = rng.gen_range(0..GRID);
            if !grid[row][col].mine {
                grid[row][col].mine = true;
                placed += 1;
            }
        }
        for row in 0..GRID {
            for col in 0..GRID {
                if grid[row][col].mine {
                    continue;
                }
                grid[row][col].adjacent = neighbors(row, col)
                    .filter(|&(r, c)| grid[r][c].mine)
                    .count() as u8;
            }
        }
        Self {
            grid,
            status: Status::InProgress,
        }
    }
    pub fn reset(&mut self) {
        self.reset_with(&mut rand::thread_rng());
    }
    pub fn reset_with<R: rand::Rng>(&mut self, rng: &mut R) {
        *self = Self::with_rng(rng);
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Reveal one cell. Ignored after the game ends or on revealed cells.
    pub fn reveal(&mut self, row: usize, col: usize) {
        if self.status != Status::InProgress || self.grid[row][col].revealed {
            return;
        }
        self.grid[row][col].revealed = true;
        if self.grid[row][col].mine {
            self.status = Status::Exploded;
            // Show the player the whole minefield.
            for row in &mut self.grid {
                for cell in row {
                    if cell.mine {
                        cell.revealed = true;
                    }
                }
            }
            return;
        }
        let safe_revealed = self
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.revealed && !cell.mine)
            .count();
        if safe_revealed == GRID * GRID - MINES {
            self.status = Status::Won;
        }
    }
}

fn neighbors(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    (-1i32..=1).flat_map(move |dr| {
        (-1i32..=1).filter_map(move |dc| {
            if dr == 0 && dc == 0 {
                return None;
            }
            let r = usize::try_from(row as i32 + dr).ok()?;
            let c = usize::try_from(col as i32 + dc).ok()?;
            (r < GRID && c < GRID).then_some((r, c))
        })
    })
}

#[cfg(test)]
mod test {
    use super::{Minesweeper, Status, GRID, MINES};
    use rand::SeedableRng;

    fn board() -> Minesweeper {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        Minesweeper::with_rng(&mut rng)
    }
    fn find(board: &Minesweeper, mine: bool) -> (usize, usize) {
        for row in 0..GRID {
            for col in 0..GRID {
                if board.cell(row, col).mine == mine && !board.cell(row, col).revealed {
                    return (row, col);
                }
            }
        }
        unreachable!()
    }

    #[test]
    fn exactly_ten_mines_with_counts() {
        let board = board();
        let mut mines = 0;
        for row in 0..GRID {
            for col in 0..GRID {
                let cell = board.cell(row, col);
                assert!(!cell.revealed);
                if cell.mine {
                    mines += 1;
                } else {
                    // Adjacency never exceeds the neighborhood.
                    assert!(cell.adjacent <= 8);
                }
            }
        }
        assert_eq!(mines, MINES);
    }
    #[test]
    fn revealing_a_safe_cell_stays_in_progress() {
        let mut board = board();
        let (row, col) = find(&board, false);
        board.reveal(row, col);
        assert!(board.cell(row, col).revealed);
        assert_eq!(board.status(), Status::InProgress);
        // Single-cell reveal: exactly one cell turned over.
        let revealed = (0..GRID)
            .flat_map(|r| (0..GRID).map(move |c| (r, c)))
            .filter(|&(r, c)| board.cell(r, c).revealed)
            .count();
        assert_eq!(revealed, 1);
    }
    #[test]
    fn revealing_a_mine_explodes_and_uncovers_the_field() {
        let mut board = board();
        let (row, col) = find(&board, true);
        board.reveal(row, col);
        assert_eq!(board.status(), Status::Exploded);
        for r in 0..GRID {
            for c in 0..GRID {
                if board.cell(r, c).mine {
                    assert!(board.cell(r, c).revealed);
                }
            }
        }
        // Dead board ignores further clicks.
        let (r, c) = find(&board, false);
        board.reveal(r, c);
        assert!(!board.cell(r, c).revealed);
    }
    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut board = board();
        for row in 0..GRID {
            for col in 0..GRID {
                if !board.cell(row, col).mine {
                    board.reveal(row, col);
                }
            }
        }
        assert_eq!(board.status(), Status::Won);
    }
    #[test]
    fn reset_redeals() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(13);
        let mut board = board();
        let (row, col) = find(&board, true);
        board.reveal(row, col);
        board.reset_with(&mut rng);
        assert_eq!(board.status(), Status::InProgress);
    }
}
