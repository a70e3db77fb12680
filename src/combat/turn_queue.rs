//! Speed-ordered turn queue.

use super::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    side: Side,
    speed: u32,
}

/// Participants ordered by speed, re-sorted before every turn.
///
/// The sort is stable, so equal speeds keep insertion order. A cursor
/// walks the sorted order and wraps, so sides keep alternating until the
/// battle ends.
#[derive(Debug, Clone, Default)]
pub struct TurnQueue {
    entries: Vec<Entry>,
    cursor: usize,
}

impl TurnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, side: Side, speed: u32) {
        self.entries.push(Entry { side, speed });
    }

    /// Speed modifier hook; takes effect at the next re-sort.
    pub fn set_speed(&mut self, side: Side, speed: u32) -> bool {
        match self.entries.iter_mut().find(|e| e.side == side) {
            Some(entry) => {
                entry.speed = speed;
                true
            }
            None => false,
        }
    }

    pub fn speed_of(&self, side: Side) -> Option<u32> {
        self.entries.iter().find(|e| e.side == side).map(|e| e.speed)
    }

    /// Current order, fastest first.
    pub fn order(&self) -> Vec<Side> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.speed.cmp(&a.speed));
        sorted.into_iter().map(|e| e.side).collect()
    }

    /// Re-sorts by speed and returns whose turn it is.
    pub fn next_actor(&mut self) -> Option<Side> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.sort_by(|a, b| b.speed.cmp(&a.speed));
        let actor = self.entries[self.cursor % self.entries.len()].side;
        self.cursor = (self.cursor + 1) % self.entries.len();
        Some(actor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
