//! # Tic-tac-toe
//!
//! Nine cells, X first, winner over the eight lines, draw on a full board.

#[derive(strum::AsRefStr, Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Mark {
    X,
    O,
}
impl Mark {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Status {
    InProgress,
    Won(Mark),
    Draw,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Default)]
pub struct TicTacToe {
    board: [Option<Mark>; 9],
    moves: u8,
}

impl TicTacToe {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        *self = Self::default();
    }
    #[must_use]
    pub fn board(&self) -> &[Option<Mark>; 9] {
        &self.board
    }
    /// Whose turn it is. X opens.
    #[must_use]
    pub fn next_player(&self) -> Mark {
        if self.moves % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.board[a]?;
            (self.board[b] == Some(mark) && self.board[c] == Some(mark)).then_some(mark)
        })
    }
    #[must_use]
    pub fn status(&self) -> Status {
        match self.winner() {
            Some(mark) => Status::Won(mark),
            None if self.moves == 9 => Status::Draw,
            None => Status::InProgress,
        }
    }
    /// Claim a cell. Ignored when taken or the game is decided.
    pub fn play(&mut self, index: usize) {
        if index >= 9 || self.board[index].is_some() || self.winner().is_some() {
            return;
        }
        self.board[index] = Some(self.next_player());
        self.moves += 1;
    }
}

#[cfg(test)]
mod test {
    use super::{Mark, Status, TicTacToe};

    #[test]
    fn x_opens_and_turns_alternate() {
        let mut game = TicTacToe::new();
        assert_eq!(game.next_player(), Mark::X);
        game.play(4);
        assert_eq!(game.board()[4], Some(Mark::X));
        assert_eq!(game.next_player(), Mark::O);
        // A taken cell is ignored, turn unchanged.
        game.play(4);
        assert_eq!(game.next_player(), Mark::O);
    }
    #[test]
    fn row_column_and_diagonal_wins() {
        // X takes the top row.
        let mut game = TicTacToe::new();
        for index in [0, 3, 1, 4, 2] {
            game.play(index);
        }
        assert_eq!(game.status(), Status::Won(Mark::X));
        // Decided games swallow further moves.
        game.play(8);
        assert_eq!(game.board()[8], None);

        // O takes the anti-diagonal.
        let mut game = TicTacToe::new();
        for index in [0, 2, 1, 4, 8, 6] {
            game.play(index);
        }
        assert_eq!(game.status(), Status::Won(Mark::O));
    }
    #[test]
    fn full_board_without_a_line_is_a_draw() {
        let mut game = TicTacToe::new();
        // X X O / O O X / X O X
        for index in [0, 2, 1, 4, 5, 3, 6, 7, 8] {
            game.play(index);
        }
        assert_eq!(game.winner(), None);
        assert_eq!(game.status(), Status::Draw);
    }
    #[test]
    fn reset_clears_the_board() {
        let mut game = TicTacToe::new();
        game.play(0);
        game.reset();
        assert_eq!(game.board()[0], None);
        assert_eq!(game.status(), Status::InProgress);
        assert_eq!(game.next_player(), Mark::X);
    }
}
