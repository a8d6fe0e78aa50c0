use tracing::{debug, info, instrument};

use crate::error::MoveError;
use crate::model::{Board, Move};
use crate::parser::parse_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
}

/// Outcome of one accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub action: Move,
    pub moved: usize,
    pub status: Status,
}

/// One puzzle session: owns the board and the `Playing`/`Won` state.
/// Rejected moves are reported and never change the board.
#[derive(Debug, Clone)]
pub struct Game<T> {
    board: Board<T>,
    status: Status,
    moves_made: usize,
}

impl<T: Eq> Game<T> {
    #[instrument(skip_all, fields(containers = board.len()))]
    pub fn new(board: Board<T>) -> Self {
        let status = if board.is_solved() {
            Status::Won
        } else {
            Status::Playing
        };
        debug!(?status, "game started");
        Self {
            board,
            status,
            moves_made: 0,
        }
    }

    pub fn board(&self) -> &Board<T> {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    /// Runs one turn from raw player input: parse, pour, check for a win.
    pub fn play(&mut self, raw: &str) -> Result<Turn, MoveError> {
        if self.is_won() {
            return Err(MoveError::GameOver);
        }
        let action = parse_move(raw, self.board.len())?;
        self.apply(action)
    }

    /// Applies an already decoded move.
    pub fn apply(&mut self, action: Move) -> Result<Turn, MoveError> {
        if self.is_won() {
            return Err(MoveError::GameOver);
        }
        let moved = self.board.pour(action)?;
        self.moves_made += 1;
        if self.board.is_solved() {
            self.status = Status::Won;
            info!(moves = self.moves_made, "puzzle solved");
        }
        Ok(Turn {
            action,
            moved,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ParseError, PourError};

    fn game(layout: &str, capacity: usize) -> Game<char> {
        Game::new(Board::from_layout(layout, capacity).unwrap())
    }

    #[test]
    fn test_play_accepted_move() {
        let mut g = game("AB,BA,", 2);
        let turn = g.play("13").unwrap();
        assert_eq!(turn.action, Move::new(0, 2));
        assert_eq!(turn.moved, 1);
        assert_eq!(turn.status, Status::Playing);
        assert_eq!(g.board().layout(), "A,BA,B");
        assert_eq!(g.moves_made(), 1);
    }

    #[test]
    fn test_play_reports_parse_and_pour_errors() {
        let mut g = game("AB,BA,", 2);
        let before = g.board().clone();
        assert_eq!(
            g.play("1"),
            Err(MoveError::Parse(ParseError::MalformedInput))
        );
        assert_eq!(g.play("31").unwrap_err().kind(), ErrorKind::EmptySource);
        assert_eq!(
            g.play("12"),
            Err(MoveError::Pour(PourError::FullDestination))
        );
        assert_eq!(g.play("11").unwrap_err().kind(), ErrorKind::SameContainer);
        assert_eq!(g.board(), &before);
        assert_eq!(g.moves_made(), 0);
        assert_eq!(g.status(), Status::Playing);
    }

    #[test]
    fn test_full_game_reaches_won() {
        let mut g = game("AB,BA,", 2);
        g.play("13").unwrap();
        g.play("21").unwrap();
        let turn = g.play("32").unwrap();
        assert_eq!(turn.status, Status::Won);
        assert!(g.is_won());
        assert_eq!(g.board().layout(), "AA,BB,");
        assert_eq!(g.play("12"), Err(MoveError::GameOver));
    }

    #[test]
    fn test_already_solved_board_starts_won() {
        let mut g = game("AA,BB,", 2);
        assert_eq!(g.status(), Status::Won);
        assert_eq!(g.play("13"), Err(MoveError::GameOver));
    }
}
