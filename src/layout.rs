//! Text form of a board: containers separated by commas, each written as
//! its symbols from bottom to top. `"AAB,BBA,,"` is two filled containers
//! followed by two empty ones.

use std::collections::BTreeMap;

use crate::error::LayoutError;
use crate::model::{Board, Container};

pub const CONTAINER_SEPARATOR: char = ',';
/// Drawn in place of a missing block; never a valid symbol.
pub const EMPTY_CELL: char = '-';

pub fn is_valid_symbol(symbol: char) -> bool {
    symbol != CONTAINER_SEPARATOR && symbol != EMPTY_CELL && !symbol.is_whitespace()
}

impl Board<char> {
    /// Reads a layout where every container has `capacity` and every symbol
    /// occurs exactly `capacity` times.
    pub fn from_layout(repr: &str, capacity: usize) -> Result<Self, LayoutError> {
        if capacity == 0 {
            return Err(LayoutError::ZeroCapacity);
        }
        if repr.trim().is_empty() {
            return Err(LayoutError::Empty);
        }

        let mut containers = Vec::new();
        for (index, segment) in repr.split(CONTAINER_SEPARATOR).enumerate() {
            let cells: Vec<char> = segment.trim().chars().collect();
            if let Some(bad) = cells.iter().copied().find(|c| !is_valid_symbol(*c)) {
                return Err(LayoutError::InvalidSymbol(bad));
            }
            let len = cells.len();
            let container = Container::from_cells(cells, capacity).ok_or(LayoutError::Overfull {
                container: index + 1,
                len,
                capacity,
            })?;
            containers.push(container);
        }

        let mut counts: BTreeMap<char, usize> = BTreeMap::new();
        for container in &containers {
            for symbol in container.get_cells() {
                *counts.entry(*symbol).or_insert(0) += 1;
            }
        }
        if let Some((symbol, count)) = counts.into_iter().find(|(_, count)| *count != capacity) {
            return Err(LayoutError::Unbalanced {
                symbol,
                count,
                capacity,
            });
        }

        Ok(Board::from_containers(containers))
    }

    pub fn layout(&self) -> String {
        self.containers()
            .iter()
            .map(|c| c.get_cells().iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(&CONTAINER_SEPARATOR.to_string())
    }

    /// Distinct symbols in order of first appearance, bottom-up, left to right.
    pub fn symbols(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for symbol in self.containers().iter().flat_map(|c| c.get_cells()) {
            if !seen.contains(symbol) {
                seen.push(*symbol);
            }
        }
        seen
    }
}
