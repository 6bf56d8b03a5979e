//! Room and teacher booking state for one allocation run.
//!
//! Rooms are addressed by their position in [`Catalog::rooms`]; slots by
//! their position in [`Catalog::slots`]; teachers by id. All mutations are
//! append-only for the lifetime of the registry. A fresh registry is the
//! only way to reset booking state between runs.
//!
//! Every check compares by overlap, not identity: slots need not be
//! uniform, so a room booked 09:00-10:30 is busy for a 10:00-11:00 slot.

use std::collections::HashMap;

use tracing::warn;

use crate::models::{overlaps, Catalog, TimeSlot};

/// Booked slots per room and unavailable slots per teacher.
#[derive(Debug, Clone)]
pub struct ResourceRegistry<'a> {
    slots: &'a [TimeSlot],
    room_bookings: Vec<Vec<usize>>,
    teacher_busy: HashMap<String, Vec<usize>>,
}

impl<'a> ResourceRegistry<'a> {
    /// Creates an empty registry for `room_count` rooms over `slots`.
    pub fn new(slots: &'a [TimeSlot], room_count: usize) -> Self {
        Self {
            slots,
            room_bookings: vec![Vec::new(); room_count],
            teacher_busy: HashMap::new(),
        }
    }

    /// Creates a registry seeded with every teacher's declared conflicts.
    ///
    /// Conflicts naming unknown slots are skipped.
    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        let mut registry = Self::new(catalog.slots(), catalog.rooms().len());
        for teacher in catalog.teachers() {
            for slot_id in &teacher.conflicts {
                match catalog.slot_position(slot_id) {
                    Some(slot) => registry.mark_teacher_busy(&teacher.id, slot),
                    None => warn!(
                        teacher = %teacher.id,
                        slot = %slot_id,
                        "declared conflict references unknown slot"
                    ),
                }
            }
        }
        registry
    }

    /// Slot table this registry checks against.
    pub fn slots(&self) -> &'a [TimeSlot] {
        self.slots
    }

    /// Whether `slot` overlaps nothing already booked in `room`.
    pub fn is_room_free(&self, room: usize, slot: usize) -> bool {
        let Some(booked) = self.room_bookings.get(room) else {
            return false;
        };
        let candidate = &self.slots[slot];
        booked
            .iter()
            .all(|&b| b != slot && !overlaps(&self.slots[b], candidate))
    }

    /// Books `slot` in `room`.
    pub fn book_room(&mut self, room: usize, slot: usize) {
        if let Some(booked) = self.room_bookings.get_mut(room) {
            booked.push(slot);
        }
    }

    /// Whether `slot` overlaps none of the teacher's unavailable slots.
    ///
    /// A teacher with no recorded state is free.
    pub fn is_teacher_free(&self, teacher_id: &str, slot: usize) -> bool {
        let candidate = &self.slots[slot];
        self.teacher_busy.get(teacher_id).map_or(true, |busy| {
            busy.iter().all(|&b| !overlaps(&self.slots[b], candidate))
        })
    }

    /// Marks `slot` unavailable for the teacher.
    pub fn mark_teacher_busy(&mut self, teacher_id: &str, slot: usize) {
        self.teacher_busy
            .entry(teacher_id.to_string())
            .or_default()
            .push(slot);
    }

    /// Slots booked in a room, in booking order.
    pub fn room_bookings(&self, room: usize) -> &[usize] {
        self.room_bookings.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Unavailable slots of a teacher, in the order they were added.
    pub fn teacher_busy(&self, teacher_id: &str) -> &[usize] {
        self.teacher_busy.get(teacher_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total room bookings.
    pub fn booking_count(&self) -> usize {
        self.room_bookings.iter().map(Vec::len).sum()
    }
}
