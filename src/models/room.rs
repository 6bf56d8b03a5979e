//! Classroom model.
//!
//! A room is a capacity-bounded space. Which slots are booked in a room is
//! run state, tracked by [`ResourceRegistry`](crate::registry::ResourceRegistry).

use serde::{Deserialize, Serialize};

/// A room that can host course sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoom {
    /// Unique room identifier.
    pub id: String,
    /// Seats available (must be > 0).
    pub capacity: u32,
}

impl ClassRoom {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
        }
    }
}

/// Returns room indices sorted by capacity, largest first.
///
/// The sort is stable: rooms of equal capacity keep their input order.
pub fn rooms_by_capacity(rooms: &[ClassRoom]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.sort_by(|&a, &b| rooms[b].capacity.cmp(&rooms[a].capacity));
    order
}
