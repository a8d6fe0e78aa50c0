use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::PourError;

/// A fixed-capacity stack of blocks. The end of `cells` is the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container<T> {
    cells: Vec<T>,
    capacity: usize,
}

impl<T> Container<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a container from bottom-to-top cells. Returns `None` when the
    /// cells do not fit.
    pub fn from_cells(cells: Vec<T>, capacity: usize) -> Option<Self> {
        if cells.len() > capacity {
            return None;
        }
        Some(Self { cells, capacity })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn get_capacity(&self) -> usize {
        self.capacity
    }

    pub fn get_free_space(&self) -> usize {
        self.capacity - self.cells.len()
    }

    pub fn get_cells(&self) -> &[T] {
        &self.cells
    }

    pub fn get_top_block(&self) -> Option<&T> {
        self.cells.last()
    }
}

impl<T: PartialEq> Container<T> {
    /// Length of the contiguous run of the top block's type.
    pub fn get_top_run(&self) -> usize {
        let Some(top) = self.cells.last() else {
            return 0;
        };
        self.cells.iter().rev().take_while(|cell| *cell == top).count()
    }

    /// Empty, or full with a single block type.
    pub fn is_sorted(&self) -> bool {
        match self.cells.first() {
            None => true,
            Some(first) => self.is_full() && self.cells.iter().all(|cell| cell == first),
        }
    }

    /// The legality gate shared by the pour engine and the move enumerator.
    /// Checks run in a fixed order so each rejection has one reason.
    pub fn check_pour_into(&self, other: &Container<T>) -> Result<(), PourError> {
        let Some(top) = self.get_top_block() else {
            return Err(PourError::EmptySource);
        };
        if other.is_full() {
            return Err(PourError::FullDestination);
        }
        match other.get_top_block() {
            Some(other_top) if other_top != top => Err(PourError::TypeMismatch),
            _ => Ok(()),
        }
    }

    pub fn could_pour_into(&self, other: &Container<T>) -> bool {
        self.check_pour_into(other).is_ok()
    }

    /// How many blocks a pour would move right now, zero when illegal.
    pub fn get_pourable_amount(&self, other: &Container<T>) -> usize {
        if !self.could_pour_into(other) {
            return 0;
        }
        self.get_top_run().min(other.get_free_space())
    }

    /// Moves the maximal run of the top type into `other` and returns the
    /// number of blocks moved.
    pub fn pour_into(&mut self, other: &mut Container<T>) -> Result<usize, PourError> {
        self.check_pour_into(other)?;
        let mut moved = 0;
        while !other.is_full() {
            let Some(top) = self.cells.pop() else {
                break;
            };
            // The first pop always passes: the gate already matched it.
            if other.get_top_block().is_some_and(|other_top| *other_top != top) {
                self.cells.push(top);
                break;
            }
            other.cells.push(top);
            moved += 1;
        }
        Ok(moved)
    }
}

/// A candidate pour, 0-based. Displays 1-based, the way players type it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from + 1, self.to + 1)
    }
}

/// The full set of containers for one session. The number of containers
/// never changes after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board<T> {
    containers: Vec<Container<T>>,
}

impl<T> Board<T> {
    pub fn from_containers(containers: Vec<Container<T>>) -> Self {
        Self { containers }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Container<T>> {
        self.containers.get(index)
    }

    pub fn containers(&self) -> &[Container<T>] {
        &self.containers
    }

    /// Tallest container, i.e. the number of rows needed to draw the board.
    pub fn get_max_capacity(&self) -> usize {
        self.containers
            .iter()
            .map(Container::get_capacity)
            .max()
            .unwrap_or(0)
    }

    fn pair_mut(&mut self, a: usize, b: usize) -> (&mut Container<T>, &mut Container<T>) {
        if a < b {
            let (low, high) = self.containers.split_at_mut(b);
            (&mut low[a], &mut high[0])
        } else {
            let (low, high) = self.containers.split_at_mut(a);
            (&mut high[0], &mut low[b])
        }
    }
}

impl<T: Clone + Eq> Board<T> {
    /// Deals `capacity` blocks of every type into `types.len()` full
    /// containers in a uniformly random order, then appends `empty` empty
    /// containers. Always yields `types.len() + empty` containers, even for
    /// a zero capacity. The deal is not checked for solvability.
    pub fn generate<R: Rng + ?Sized>(
        types: &[T],
        capacity: usize,
        empty: usize,
        rng: &mut R,
    ) -> Self {
        let mut blocks: Vec<T> = types
            .iter()
            .flat_map(|block| std::iter::repeat_n(block.clone(), capacity))
            .collect();
        blocks.shuffle(rng);

        let mut blocks = blocks.into_iter();
        let mut containers: Vec<Container<T>> = (0..types.len())
            .map(|_| Container {
                cells: blocks.by_ref().take(capacity).collect(),
                capacity,
            })
            .collect();
        containers.extend((0..empty).map(|_| Container::new(capacity)));

        info!(
            types = types.len(),
            capacity,
            empty,
            containers = containers.len(),
            "generated board"
        );
        Self { containers }
    }
}

impl<T: PartialEq> Board<T> {
    /// Full legality check for a move, including index guards.
    pub fn check_move(&self, mv: Move) -> Result<(), PourError> {
        let from = self
            .containers
            .get(mv.from)
            .ok_or(PourError::NoSuchContainer(mv.from))?;
        let to = self
            .containers
            .get(mv.to)
            .ok_or(PourError::NoSuchContainer(mv.to))?;
        if mv.from == mv.to {
            return Err(PourError::SameContainer);
        }
        from.check_pour_into(to)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        self.check_move(mv).is_ok()
    }

    /// Pours from `mv.from` into `mv.to`. On error the board is unchanged.
    pub fn pour(&mut self, mv: Move) -> Result<usize, PourError> {
        self.check_move(mv)?;
        let (from, to) = self.pair_mut(mv.from, mv.to);
        let moved = from.pour_into(to)?;
        debug!(from = mv.from, to = mv.to, moved, "poured");
        Ok(moved)
    }

    /// Every legal move, ordered by source then destination.
    pub fn legal_moves(&self) -> Vec<Move> {
        let count = self.containers.len();
        (0..count)
            .flat_map(|from| (0..count).map(move |to| Move::new(from, to)))
            .filter(|mv| mv.from != mv.to && self.is_legal(*mv))
            .collect()
    }

    /// Legal destinations for pouring out of `from`.
    pub fn legal_targets(&self, from: usize) -> Vec<usize> {
        (0..self.containers.len())
            .filter(|to| self.is_legal(Move::new(from, *to)))
            .collect()
    }

    /// Solved when every container is empty or full of a single type.
    pub fn is_solved(&self) -> bool {
        self.containers.iter().all(Container::is_sorted)
    }

    /// How many blocks of `block` the board holds in total.
    pub fn count_of(&self, block: &T) -> usize {
        self.containers
            .iter()
            .flat_map(|c| c.cells.iter())
            .filter(|cell| *cell == block)
            .count()
    }
}
