use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};

use crate::gameplay::Game;
use crate::layout::EMPTY_CELL;
use crate::model::{Board, Move};
use crate::palette::{FLUID_COLORS, color_index};

pub const PROMPT: &str = "Your move (FT)? :";

/// Shown with the first board of a session.
pub const RULES: &str = "\
---\tThis is the \"Water Sort\" terminal game

---\tRULES
---\tYou can only pour blocks onto the same symbol or into an empty
---\tcontainer, and only while there is space left.

---\tHOW TO PLAY
---\tAt each step enter two digits FT, where F is the container to pour
---\tfrom and T the container to pour into. Enter q to quit.
";

/// Draws a board as text, one column per container, top row first.
pub struct TerminalRenderer {
    symbols: Vec<char>,
    color: bool,
    clear: bool,
}

impl TerminalRenderer {
    pub fn new(symbols: Vec<char>, color: bool, clear: bool) -> Self {
        Self {
            symbols,
            color,
            clear,
        }
    }

    fn format_cell(&self, cell: Option<char>) -> String {
        match cell {
            None => EMPTY_CELL.to_string(),
            Some(symbol) if self.color => {
                let [r, g, b] = FLUID_COLORS[color_index(&self.symbols, symbol)];
                symbol.with(Color::Rgb { r, g, b }).bold().to_string()
            }
            Some(symbol) => symbol.to_string(),
        }
    }

    pub fn format_board(&self, board: &Board<char>) -> String {
        let mut text = String::new();
        for row in (0..board.get_max_capacity()).rev() {
            for container in board.containers() {
                let cell = container.get_cells().get(row).copied();
                text.push_str(&self.format_cell(cell));
                text.push('\t');
            }
            text.push('\n');
        }
        for index in 0..board.len() {
            text.push_str(&format!("{}\t", index + 1));
        }
        text.push('\n');
        text
    }

    pub fn format_moves(moves: &[Move]) -> String {
        if moves.is_empty() {
            return "Available moves: none".to_string();
        }
        let listed: Vec<String> = moves.iter().map(Move::to_string).collect();
        format!("Available moves: {}", listed.join(" | "))
    }

    /// Draws the board, the legal moves and an optional message, then the
    /// prompt.
    pub fn render_turn<W: Write>(
        &self,
        out: &mut W,
        game: &Game<char>,
        message: Option<&str>,
    ) -> io::Result<()> {
        if self.clear {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(out, "{}", self.format_board(game.board()))?;
        writeln!(out, "{}", Self::format_moves(&game.legal_moves()))?;
        if let Some(message) = message {
            writeln!(out, "{message}")?;
        }
        write!(out, "{PROMPT} ")?;
        out.flush()
    }

    pub fn render_win<W: Write>(&self, out: &mut W, game: &Game<char>) -> io::Result<()> {
        if self.clear {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        writeln!(out, "{}", self.format_board(game.board()))?;
        writeln!(out, "You won! ({} moves)", game.moves_made())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> TerminalRenderer {
        TerminalRenderer::new(vec!['A', 'B'], false, false)
    }

    #[test]
    fn test_format_board_rows_top_first() {
        let board = Board::from_layout("AB,BA,", 2).unwrap();
        assert_eq!(
            plain().format_board(&board),
            "B\tA\t-\t\nA\tB\t-\t\n1\t2\t3\t\n"
        );
    }

    #[test]
    fn test_format_board_partial_containers() {
        let board = Board::from_layout("A,AB,B", 2).unwrap();
        assert_eq!(
            plain().format_board(&board),
            "-\tB\t-\t\nA\tA\tB\t\n1\t2\t3\t\n"
        );
    }

    #[test]
    fn test_colored_cells_carry_escape_codes() {
        let renderer = TerminalRenderer::new(vec!['A'], true, false);
        let board = Board::from_layout("A,", 1).unwrap();
        let text = renderer.format_board(&board);
        assert!(text.contains('A'));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(text.contains('\u{1b}'));
        }
    }

    #[test]
    fn test_format_moves() {
        assert_eq!(
            TerminalRenderer::format_moves(&[Move::new(0, 2), Move::new(1, 0)]),
            "Available moves: 1 -> 3 | 2 -> 1"
        );
        assert_eq!(TerminalRenderer::format_moves(&[]), "Available moves: none");
    }

    #[test]
    fn test_render_turn_writes_board_hints_and_prompt() {
        let game = Game::new(Board::from_layout("AB,BA,", 2).unwrap());
        let mut out = Vec::new();
        plain()
            .render_turn(&mut out, &game, Some("the destination container is full"))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("B\tA\t-\t\n"));
        assert!(text.contains("Available moves: 1 -> 3 | 2 -> 3"));
        assert!(text.contains("the destination container is full"));
        assert!(text.ends_with(&format!("{PROMPT} ")));
    }
}
