//! Water sort puzzle: containers of typed blocks, poured one top run at a
//! time until every container is empty or full of a single type.

pub mod cli;
pub mod config;
pub mod error;
pub mod gameplay;
pub mod layout;
pub mod model;
pub mod palette;
pub mod parser;
pub mod renderer;

#[cfg(feature = "gui")]
pub mod gui;

pub use error::{ConfigError, ErrorKind, LayoutError, MoveError, ParseError, PourError};
pub use gameplay::{Game, Status, Turn};
pub use model::{Board, Container, Move};
pub use parser::parse_move;
