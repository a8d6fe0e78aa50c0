use std::path::PathBuf;

/// Errors produced while decoding a raw two-character move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("a move is exactly two digits, e.g. 12")]
    MalformedInput,

    #[error("'{0}' is not a container number")]
    NotANumber(char),

    /// `number` is the 1-based container number the player typed.
    #[error("there is no container {number} (containers are 1..={count})")]
    IndexOutOfRange { number: usize, count: usize },
}

/// Reasons a pour is rejected. A rejected pour never touches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PourError {
    #[error("there is no container {}", .0 + 1)]
    NoSuchContainer(usize),

    #[error("cannot pour a container into itself")]
    SameContainer,

    #[error("the source container is empty")]
    EmptySource,

    #[error("the destination container is full")]
    FullDestination,

    #[error("the top blocks do not match")]
    TypeMismatch,
}

/// Anything that can go wrong with a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Pour(#[from] PourError),

    #[error("the puzzle is already solved")]
    GameOver,
}

/// Flat identity of every recoverable error, for presentation lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    NotANumber,
    IndexOutOfRange,
    NoSuchContainer,
    SameContainer,
    EmptySource,
    FullDestination,
    TypeMismatch,
    GameOver,
}

impl MoveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveError::Parse(ParseError::MalformedInput) => ErrorKind::MalformedInput,
            MoveError::Parse(ParseError::NotANumber(_)) => ErrorKind::NotANumber,
            MoveError::Parse(ParseError::IndexOutOfRange { .. }) => ErrorKind::IndexOutOfRange,
            MoveError::Pour(PourError::NoSuchContainer(_)) => ErrorKind::NoSuchContainer,
            MoveError::Pour(PourError::SameContainer) => ErrorKind::SameContainer,
            MoveError::Pour(PourError::EmptySource) => ErrorKind::EmptySource,
            MoveError::Pour(PourError::FullDestination) => ErrorKind::FullDestination,
            MoveError::Pour(PourError::TypeMismatch) => ErrorKind::TypeMismatch,
            MoveError::GameOver => ErrorKind::GameOver,
        }
    }
}

/// Errors raised while reading a textual board layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no containers")]
    Empty,

    #[error("container capacity must be at least 1")]
    ZeroCapacity,

    #[error("'{0}' cannot be used as a block symbol")]
    InvalidSymbol(char),

    #[error("container {container} holds {len} blocks but capacity is {capacity}")]
    Overfull {
        container: usize,
        len: usize,
        capacity: usize,
    },

    #[error("symbol '{symbol}' appears {count} times, expected {capacity}")]
    Unbalanced {
        symbol: char,
        count: usize,
        capacity: usize,
    },
}

/// Errors that can occur when loading configuration. All of them are fatal
/// and happen before a board exists.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
