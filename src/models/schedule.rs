//! Schedule (solution) model.
//!
//! A schedule maps course sections to (room, slot) pairs and carries the
//! roster of each section. Sections the allocator could not place are kept
//! alongside, so a report can always tell scheduled from unscheduled.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which part of a course an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    /// The course's main meeting.
    Lecture,
    /// The paired lab meeting.
    Lab,
}

/// A placed course section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Course id (shared by a lecture and its lab).
    pub course_id: String,
    /// Lecture or lab.
    pub section: SectionKind,
    /// Teacher running this section.
    pub teacher_id: String,
    /// Assigned room id.
    pub room_id: String,
    /// Assigned slot id.
    pub slot_id: String,
    /// Enrolled student ids, in admission order.
    pub students: Vec<String>,
}

/// Why a section could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// The (room × slot) space ran out before a usable index was found.
    SlotSpaceExhausted,
    /// The lab was not attempted because its lecture was not placed.
    LectureUnscheduled,
}

/// A section left out of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscheduledSection {
    /// Course id.
    pub course_id: String,
    /// Lecture or lab.
    pub section: SectionKind,
    /// Cause.
    pub reason: UnscheduledReason,
}

/// A complete timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed sections, in placement order.
    pub entries: Vec<ScheduleEntry>,
    /// Sections that could not be placed.
    pub unscheduled: Vec<UnscheduledSection>,
}

impl ScheduleEntry {
    /// Creates an entry with an empty roster.
    pub fn new(
        course_id: impl Into<String>,
        section: SectionKind,
        teacher_id: impl Into<String>,
        room_id: impl Into<String>,
        slot_id: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            section,
            teacher_id: teacher_id.into(),
            room_id: room_id.into(),
            slot_id: slot_id.into(),
            students: Vec::new(),
        }
    }

    /// Number of enrolled students.
    #[inline]
    pub fn enrollment(&self) -> usize {
        self.students.len()
    }

    /// Whether a student is on the roster.
    pub fn has_student(&self, student_id: &str) -> bool {
        self.students.iter().any(|s| s == student_id)
    }
}

impl UnscheduledSection {
    /// Creates an unscheduled record.
    pub fn new(
        course_id: impl Into<String>,
        section: SectionKind,
        reason: UnscheduledReason,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            section,
            reason,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a placed section.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Records an unplaced section.
    pub fn add_unscheduled(&mut self, record: UnscheduledSection) {
        self.unscheduled.push(record);
    }

    /// Whether every section was placed.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Number of placed sections.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Finds the entry for a course section.
    pub fn entry(&self, course_id: &str, section: SectionKind) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.course_id == course_id && e.section == section)
    }

    /// Index of the entry for a course section.
    pub fn entry_index(&self, course_id: &str, section: SectionKind) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.course_id == course_id && e.section == section)
    }

    /// Whether the course's lecture was placed.
    pub fn is_scheduled(&self, course_id: &str) -> bool {
        self.entry(course_id, SectionKind::Lecture).is_some()
    }

    /// Returns all entries placed in a room.
    pub fn entries_for_room(&self, room_id: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.room_id == room_id).collect()
    }

    /// Returns all entries taught by a teacher.
    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.teacher_id == teacher_id)
            .collect()
    }

    /// Returns all entries a student is enrolled in.
    pub fn entries_for_student(&self, student_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.has_student(student_id))
            .collect()
    }

    /// Total enrolled seats across all entries.
    pub fn total_enrollment(&self) -> usize {
        self.entries.iter().map(|e| e.enrollment()).sum()
    }

    /// Enrollment per course id, counting lecture sections only.
    pub fn enrollment_by_course(&self) -> HashMap<String, usize> {
        self.entries
            .iter()
            .filter(|e| e.section == SectionKind::Lecture)
            .map(|e| (e.course_id.clone(), e.enrollment()))
            .collect()
    }

    /// Removes every roster, keeping placements.
    pub fn clear_rosters(&mut self) {
        for e in &mut self.entries {
            e.students.clear();
        }
    }
}
