use crate::error::ParseError;
use crate::model::Move;

/// Decodes a player move like `"12"`: two 1-based single-digit container
/// numbers, source then destination. Whether the pour is legal is not
/// checked here.
pub fn parse_move(raw: &str, container_count: usize) -> Result<Move, ParseError> {
    let mut chars = raw.trim().chars();
    let (Some(from), Some(to), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ParseError::MalformedInput);
    };
    let from = digit(from)?;
    let to = digit(to)?;
    Ok(Move::new(
        to_index(from, container_count)?,
        to_index(to, container_count)?,
    ))
}

fn digit(ch: char) -> Result<usize, ParseError> {
    ch.to_digit(10)
        .map(|d| d as usize)
        .ok_or(ParseError::NotANumber(ch))
}

fn to_index(number: usize, count: usize) -> Result<usize, ParseError> {
    match number.checked_sub(1) {
        Some(index) if index < count => Ok(index),
        _ => Err(ParseError::IndexOutOfRange { number, count }),
    }
}
