//! Greedy slot allocator with deferral queues.
//!
//! # Algorithm
//!
//! 1. Sort rooms by capacity (descending, stable) and flatten the
//!    (room × slot) space into `index = room * slots_per_room + slot`.
//! 2. For each course in priority order, place its lecture:
//!    a. Drain the same-kind deferral queue (FIFO): the first index whose
//!       room and teacher are free is taken; the rest stay queued in order.
//!    b. Otherwise scan forward from the scan pointer. Every index skipped
//!       (room busy, teacher busy, wrong kind) is pushed onto the deferral
//!       queue of its own kind. The first usable index is taken.
//!    c. If the scan pointer hits the end, the section is unscheduled.
//! 3. Commit: book the room, mark the teacher busy.
//! 4. If the course has a paired lab, place it the same way using the lab
//!    teacher and lab-kind slots only, never overlapping its own lecture.
//!
//! Skipped indices are remembered and offered to the *next* course before
//! any new index is opened, which fills fragmented capacity without true
//! backtracking.
//!
//! # Complexity
//! O(c * (r * t)) index visits in the worst case, where c = courses,
//! r = rooms, t = slots per room, times the per-visit overlap checks.
//!
//! # Concurrency
//! Strictly sequential: each decision depends on every earlier booking.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::config::SchedulerConfig;
use crate::models::{
    overlaps, rooms_by_capacity, Catalog, Schedule, ScheduleEntry, SectionKind, SlotKind,
    UnscheduledReason, UnscheduledSection,
};
use crate::registry::ResourceRegistry;

/// A resource claim being placed: one teacher, a set of acceptable kinds.
#[derive(Debug, Clone, Copy)]
struct Claim<'c> {
    teacher_id: &'c str,
    accept_lecture: bool,
    accept_lab: bool,
    /// Slot the placement must not overlap (a lab's own lecture).
    avoid_slot: Option<usize>,
}

impl Claim<'_> {
    fn accepts(&self, kind: SlotKind) -> bool {
        match kind {
            SlotKind::Lecture => self.accept_lecture,
            SlotKind::Lab => self.accept_lab,
        }
    }
}

/// A committed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    /// Position in the catalog's room list.
    room: usize,
    /// Position in the catalog's slot list.
    slot: usize,
}

/// Greedy (room × slot) allocator.
///
/// One allocator instance is one run: it owns the scan pointer and both
/// deferral queues, and borrows a registry for booking state.
///
/// # Example
///
/// ```
/// use u_timetable::config::SchedulerConfig;
/// use u_timetable::models::{Catalog, ClassRoom, Course, DaySet, TimeSlot};
/// use u_timetable::registry::ResourceRegistry;
/// use u_timetable::scheduler::SlotAllocator;
///
/// let catalog = Catalog::new(
///     vec![
///         TimeSlot::new("S1", 540, 600, DaySet::WEEKDAYS),
///         TimeSlot::new("S2", 600, 660, DaySet::WEEKDAYS),
///     ],
///     vec![ClassRoom::new("R1", 30)],
///     vec![],
///     vec![Course::new("C1", "T1"), Course::new("C2", "T1")],
///     vec![],
/// );
/// let config = SchedulerConfig::default();
/// let mut registry = ResourceRegistry::from_catalog(&catalog);
/// let schedule = SlotAllocator::new(&catalog, &config).allocate(&[0, 1], &mut registry);
///
/// assert_eq!(schedule.entry_count(), 2);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug)]
pub struct SlotAllocator<'a> {
    catalog: &'a Catalog,
    config: &'a SchedulerConfig,
    /// Catalog room positions, largest capacity first.
    room_order: Vec<usize>,
    /// Kind of each catalog slot.
    slot_kinds: Vec<SlotKind>,
    next_index: usize,
    deferred_lecture: VecDeque<usize>,
    deferred_lab: VecDeque<usize>,
}

impl<'a> SlotAllocator<'a> {
    /// Creates an allocator over the catalog's rooms and slots.
    pub fn new(catalog: &'a Catalog, config: &'a SchedulerConfig) -> Self {
        let slot_kinds = catalog
            .slots()
            .iter()
            .map(|s| s.kind_with_threshold(config.lab_threshold_minutes))
            .collect();
        Self {
            catalog,
            config,
            room_order: rooms_by_capacity(catalog.rooms()),
            slot_kinds,
            next_index: 0,
            deferred_lecture: VecDeque::new(),
            deferred_lab: VecDeque::new(),
        }
    }

    /// Number of indices in the flattened (room × slot) space.
    pub fn space_size(&self) -> usize {
        self.room_order.len() * self.slot_kinds.len()
    }

    /// Scan pointer: the next never-visited flattened index.
    pub fn scan_position(&self) -> usize {
        self.next_index
    }

    /// Indices currently deferred for lecture and lab slots.
    pub fn deferred(&self) -> (&VecDeque<usize>, &VecDeque<usize>) {
        (&self.deferred_lecture, &self.deferred_lab)
    }

    /// Places courses in the given order (catalog course positions).
    ///
    /// Unknown positions are skipped. Every course that is not placed is
    /// recorded in [`Schedule::unscheduled`].
    pub fn allocate(&mut self, order: &[usize], registry: &mut ResourceRegistry<'_>) -> Schedule {
        let mut schedule = Schedule::new();
        let courses = self.catalog.courses();

        if self.space_size() == 0 || order.is_empty() {
            for course in order.iter().filter_map(|&i| courses.get(i)) {
                record_unscheduled(&mut schedule, &course.id, course.has_lab());
            }
            info!(
                rooms = self.room_order.len(),
                slots = self.slot_kinds.len(),
                courses = order.len(),
                "degenerate input, nothing to allocate"
            );
            return schedule;
        }

        for &course_idx in order {
            let Some(course) = courses.get(course_idx) else {
                continue;
            };

            let studio = self.config.is_studio(&course.department);
            let lecture_claim = Claim {
                teacher_id: &course.teacher_id,
                accept_lecture: true,
                accept_lab: studio,
                avoid_slot: None,
            };

            let Some(lecture) = self.place(lecture_claim, registry) else {
                debug!(course = %course.id, "no slot left for lecture");
                record_unscheduled(&mut schedule, &course.id, course.has_lab());
                continue;
            };
            self.commit(lecture, &course.teacher_id, registry);
            schedule.add_entry(self.entry(&course.id, SectionKind::Lecture, &course.teacher_id, lecture));
            debug!(
                course = %course.id,
                room = %self.catalog.rooms()[lecture.room].id,
                slot = %self.catalog.slots()[lecture.slot].id,
                "placed lecture"
            );

            let Some(lab) = &course.lab else {
                continue;
            };
            let lab_claim = Claim {
                teacher_id: &lab.teacher_id,
                accept_lecture: false,
                accept_lab: true,
                avoid_slot: Some(lecture.slot),
            };
            match self.place(lab_claim, registry) {
                Some(placement) => {
                    self.commit(placement, &lab.teacher_id, registry);
                    // Neither teacher may later be booked over the other section.
                    registry.mark_teacher_busy(&lab.teacher_id, lecture.slot);
                    registry.mark_teacher_busy(&course.teacher_id, placement.slot);
                    schedule.add_entry(self.entry(&course.id, SectionKind::Lab, &lab.teacher_id, placement));
                    debug!(
                        course = %course.id,
                        room = %self.catalog.rooms()[placement.room].id,
                        slot = %self.catalog.slots()[placement.slot].id,
                        "placed lab"
                    );
                }
                None => {
                    debug!(course = %course.id, "no slot left for lab");
                    schedule.add_unscheduled(UnscheduledSection::new(
                        &course.id,
                        SectionKind::Lab,
                        UnscheduledReason::SlotSpaceExhausted,
                    ));
                }
            }
        }

        info!(
            placed = schedule.entry_count(),
            unscheduled = schedule.unscheduled.len(),
            deferred_lecture = self.deferred_lecture.len(),
            deferred_lab = self.deferred_lab.len(),
            "allocation finished"
        );
        schedule
    }

    /// Finds a placement for a claim: deferred indices first, then the scan.
    fn place(&mut self, claim: Claim<'_>, registry: &ResourceRegistry<'_>) -> Option<Placement> {
        for kind in [SlotKind::Lecture, SlotKind::Lab] {
            if claim.accepts(kind) {
                if let Some(p) = self.take_deferred(kind, claim, registry) {
                    return Some(p);
                }
            }
        }
        self.scan(claim, registry)
    }

    /// Removes and returns the earliest usable index from a deferral queue.
    fn take_deferred(
        &mut self,
        kind: SlotKind,
        claim: Claim<'_>,
        registry: &ResourceRegistry<'_>,
    ) -> Option<Placement> {
        let queue = match kind {
            SlotKind::Lecture => &self.deferred_lecture,
            SlotKind::Lab => &self.deferred_lab,
        };
        let pos = queue.iter().position(|&index| {
            let p = self.decode(index);
            self.is_usable(p, claim, registry)
        })?;
        let index = match kind {
            SlotKind::Lecture => self.deferred_lecture.remove(pos),
            SlotKind::Lab => self.deferred_lab.remove(pos),
        }?;
        Some(self.decode(index))
    }

    /// Advances the scan pointer to the first usable index, deferring skips.
    fn scan(&mut self, claim: Claim<'_>, registry: &ResourceRegistry<'_>) -> Option<Placement> {
        let end = self.space_size();
        while self.next_index < end {
            let index = self.next_index;
            self.next_index += 1;

            let p = self.decode(index);
            if claim.accepts(self.slot_kinds[p.slot]) && self.is_usable(p, claim, registry) {
                return Some(p);
            }
            match self.slot_kinds[p.slot] {
                SlotKind::Lecture => self.deferred_lecture.push_back(index),
                SlotKind::Lab => self.deferred_lab.push_back(index),
            }
        }
        None
    }

    /// Room free, teacher free, and clear of the claim's avoided slot.
    fn is_usable(&self, p: Placement, claim: Claim<'_>, registry: &ResourceRegistry<'_>) -> bool {
        if let Some(avoid) = claim.avoid_slot {
            let slots = self.catalog.slots();
            if overlaps(&slots[avoid], &slots[p.slot]) {
                return false;
            }
        }
        registry.is_room_free(p.room, p.slot) && registry.is_teacher_free(claim.teacher_id, p.slot)
    }

    fn commit(&self, p: Placement, teacher_id: &str, registry: &mut ResourceRegistry<'_>) {
        registry.book_room(p.room, p.slot);
        registry.mark_teacher_busy(teacher_id, p.slot);
    }

    fn decode(&self, index: usize) -> Placement {
        let per_room = self.slot_kinds.len();
        Placement {
            room: self.room_order[index / per_room],
            slot: index % per_room,
        }
    }

    fn entry(
        &self,
        course_id: &str,
        section: SectionKind,
        teacher_id: &str,
        p: Placement,
    ) -> ScheduleEntry {
        ScheduleEntry::new(
            course_id,
            section,
            teacher_id,
            &self.catalog.rooms()[p.room].id,
            &self.catalog.slots()[p.slot].id,
        )
    }
}

fn record_unscheduled(schedule: &mut Schedule, course_id: &str, has_lab: bool) {
    schedule.add_unscheduled(UnscheduledSection::new(
        course_id,
        SectionKind::Lecture,
        UnscheduledReason::SlotSpaceExhausted,
    ));
    if has_lab {
        schedule.add_unscheduled(UnscheduledSection::new(
            course_id,
            SectionKind::Lab,
            UnscheduledReason::LectureUnscheduled,
        ));
    }
}
