//! Dog module - stationary rescue targets and the board's dog roster

use crate::snapshot::DogState;
use crate::types::{Color, DogIndex, Pos};

/// A dog waiting at a fixed cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    color: Color,
    pos: Pos,
    rescued: bool,
}

impl Dog {
    pub fn new(color: Color, pos: Pos) -> Self {
        Self {
            color,
            pos,
            rescued: false,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn is_rescued(&self) -> bool {
        self.rescued
    }

    /// One-way transition to rescued
    pub fn rescue(&mut self) {
        self.rescued = true;
    }

    /// True if still waiting and the colors match
    pub fn can_be_rescued_by(&self, color: Color) -> bool {
        !self.rescued && self.color == color
    }

    pub fn snapshot(&self) -> DogState {
        DogState {
            rescued: self.rescued,
        }
    }

    pub fn restore(&mut self, state: &DogState) {
        self.rescued = state.rescued;
    }
}

/// All dogs of a level, in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogRoster {
    dogs: Vec<Dog>,
}

impl DogRoster {
    pub fn new(dogs: Vec<Dog>) -> Self {
        Self { dogs }
    }

    pub fn all(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    pub fn get(&self, index: DogIndex) -> Option<&Dog> {
        self.dogs.get(index.0)
    }

    pub(crate) fn get_mut(&mut self, index: DogIndex) -> Option<&mut Dog> {
        self.dogs.get_mut(index.0)
    }

    /// Unrescued dogs with their indices
    pub fn active(&self) -> impl Iterator<Item = (DogIndex, &Dog)> {
        self.dogs
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.rescued)
            .map(|(i, d)| (DogIndex(i), d))
    }

    /// The unrescued dog at `cell`, if any
    pub fn dog_at(&self, cell: Pos) -> Option<(DogIndex, &Dog)> {
        self.active().find(|(_, d)| d.pos == cell)
    }

    pub fn remaining(&self) -> usize {
        self.dogs.iter().filter(|d| !d.rescued).count()
    }

    pub fn remaining_of(&self, color: Color) -> usize {
        self.dogs
            .iter()
            .filter(|d| !d.rescued && d.color == color)
            .count()
    }

    /// Win condition
    pub fn all_rescued(&self) -> bool {
        self.dogs.iter().all(|d| d.rescued)
    }

    pub fn snapshot(&self) -> Vec<DogState> {
        self.dogs.iter().map(Dog::snapshot).collect()
    }

    pub(crate) fn restore(&mut self, states: &[DogState]) {
        for (dog, state) in self.dogs.iter_mut().zip(states) {
            dog.restore(state);
        }
    }
}
