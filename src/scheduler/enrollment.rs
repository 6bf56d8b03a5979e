//! Conflict-aware, capacity-bounded enrollment.
//!
//! # Algorithm
//!
//! For each lecture entry, in schedule order:
//! 1. Shuffle the course's interested pool with the supplied random source.
//! 2. Walk the shuffled pool. Stop once the lecture room (or the paired lab
//!    room) is full. Skip students whose occupied slots overlap the lecture
//!    slot or the paired lab slot.
//! 3. Admit the rest to the lecture and, if present, the lab, recording both
//!    slots as occupied.
//!
//! Rejected students are not retried elsewhere. Which students get in
//! depends on the shuffle; how many get in does not, as long as the pool
//! is conflict-free.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::models::{overlaps, Catalog, Schedule, SectionKind, TimeSlot};

/// Outcome counts of an enrollment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrollmentSummary {
    /// Students admitted (a lecture+lab pair counts once).
    pub admitted: usize,
    /// Students turned away by a time conflict.
    pub rejected_conflict: usize,
    /// Students left in the pool after the section filled.
    pub rejected_capacity: usize,
    /// Entries skipped because their course, room, or slot was not found.
    pub skipped_entries: usize,
}

/// A resolved section: where its roster lives and what bounds it.
#[derive(Debug, Clone, Copy)]
struct Section {
    entry: usize,
    slot: usize,
    capacity: usize,
}

/// Fills schedule rosters from each course's interested pool.
#[derive(Debug, Clone, Copy)]
pub struct EnrollmentSelector<'a> {
    catalog: &'a Catalog,
}

impl<'a> EnrollmentSelector<'a> {
    /// Creates a selector reading pools, rooms, and slots from the catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Enrolls students into every lecture (and its paired lab).
    ///
    /// Students already on a roster keep their seats and their slots count
    /// as occupied.
    pub fn enroll<R: Rng + ?Sized>(&self, schedule: &mut Schedule, rng: &mut R) -> EnrollmentSummary {
        let slots = self.catalog.slots();
        let mut summary = EnrollmentSummary::default();
        let mut occupied = self.occupied_slots(schedule);

        for i in 0..schedule.entries.len() {
            if schedule.entries[i].section != SectionKind::Lecture {
                continue;
            }
            let course_id = schedule.entries[i].course_id.clone();
            let Some(course) = self.catalog.course(&course_id) else {
                warn!(course = %course_id, "scheduled course not found in catalog");
                summary.skipped_entries += 1;
                continue;
            };
            let Some(lecture) = self.resolve(schedule, i) else {
                warn!(course = %course_id, "lecture room or slot not found");
                summary.skipped_entries += 1;
                continue;
            };
            let lab = if course.has_lab() {
                schedule
                    .entry_index(&course_id, SectionKind::Lab)
                    .and_then(|j| self.resolve(schedule, j))
            } else {
                None
            };

            let mut pool = course.interested.clone();
            pool.shuffle(rng);

            let before = summary.admitted;
            for (pos, student_id) in pool.iter().enumerate() {
                let full = |s: &Section| schedule.entries[s.entry].students.len() >= s.capacity;
                if full(&lecture) || lab.as_ref().is_some_and(full) {
                    summary.rejected_capacity += pool.len() - pos;
                    break;
                }

                let taken = occupied.get(student_id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
                let conflicts = |s: &Section| clashes(slots, taken, s.slot);
                if conflicts(&lecture) || lab.as_ref().is_some_and(conflicts) {
                    summary.rejected_conflict += 1;
                    continue;
                }

                let seats = occupied.entry(student_id.clone()).or_default();
                for section in std::iter::once(&lecture).chain(lab.as_ref()) {
                    schedule.entries[section.entry].students.push(student_id.clone());
                    seats.push(section.slot);
                }
                summary.admitted += 1;
            }

            debug!(
                course = %course_id,
                admitted = summary.admitted - before,
                pool = pool.len(),
                with_lab = lab.is_some(),
                "enrolled course"
            );
        }

        info!(
            admitted = summary.admitted,
            rejected_conflict = summary.rejected_conflict,
            rejected_capacity = summary.rejected_capacity,
            "enrollment finished"
        );
        summary
    }

    fn resolve(&self, schedule: &Schedule, entry: usize) -> Option<Section> {
        let e = &schedule.entries[entry];
        let slot = self.catalog.slot_position(&e.slot_id)?;
        let capacity = self.catalog.room(&e.room_id)?.capacity as usize;
        Some(Section {
            entry,
            slot,
            capacity,
        })
    }

    fn occupied_slots(&self, schedule: &Schedule) -> HashMap<String, Vec<usize>> {
        let mut occupied: HashMap<String, Vec<usize>> = HashMap::new();
        for e in &schedule.entries {
            let Some(slot) = self.catalog.slot_position(&e.slot_id) else {
                continue;
            };
            for student in &e.students {
                occupied.entry(student.clone()).or_default().push(slot);
            }
        }
        occupied
    }
}

fn clashes(slots: &[TimeSlot], taken: &[usize], slot: usize) -> bool {
    taken.iter().any(|&t| overlaps(&slots[t], &slots[slot]))
}
