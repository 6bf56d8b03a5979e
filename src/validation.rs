//! Input validation for timetabling problems.
//!
//! Checks structural integrity of a [`Catalog`] before scheduling. Detects:
//! - Duplicate IDs
//! - Invalid time slots (`start >= end`, past midnight, no days)
//! - Rooms with zero capacity
//! - References to unknown teachers, slots, or courses
//!
//! Reference errors are not fatal: the scheduler skips unknown ids. The
//! remaining kinds make the input unusable; see
//! [`ValidationError::is_fatal`].

use crate::models::Catalog;
use std::collections::HashSet;

/// Minutes in a day; slot ends may not exceed it.
const DAY_MINUTES: u32 = 24 * 60;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same type share an ID.
    DuplicateId,
    /// A slot is empty, inverted, or extends past midnight.
    InvalidSlot,
    /// A room cannot seat anyone.
    InvalidCapacity,
    /// An entity references an ID that does not exist.
    UnknownReference,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the error makes the input unusable.
    pub fn is_fatal(&self) -> bool {
        self.kind != ValidationErrorKind::UnknownReference
    }
}

/// Splits errors into (fatal, recoverable).
pub fn partition_fatal(errors: Vec<ValidationError>) -> (Vec<ValidationError>, Vec<ValidationError>) {
    errors.into_iter().partition(ValidationError::is_fatal)
}

fn check_duplicates<'a>(
    what: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {what} ID: {id}"),
            ));
        }
    }
}

/// Validates a catalog.
///
/// Checks:
/// 1. No duplicate slot, room, teacher, course, or student IDs
/// 2. Every slot has `start < end <= 24:00` and at least one day
/// 3. Every room has capacity > 0
/// 4. Course lecturers and lab teachers exist
/// 5. Declared teacher conflicts name existing slots
/// 6. Student preferences (both passes) name existing courses
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    check_duplicates("slot", catalog.slots().iter().map(|s| s.id.as_str()), &mut errors);
    check_duplicates("room", catalog.rooms().iter().map(|r| r.id.as_str()), &mut errors);
    check_duplicates(
        "teacher",
        catalog.teachers().iter().map(|t| t.id.as_str()),
        &mut errors,
    );
    check_duplicates(
        "course",
        catalog.courses().iter().map(|c| c.id.as_str()),
        &mut errors,
    );
    check_duplicates(
        "student",
        catalog.students().iter().map(|s| s.id.as_str()),
        &mut errors,
    );

    for slot in catalog.slots() {
        if slot.start >= slot.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlot,
                format!("Slot '{}' does not end after it starts", slot.id),
            ));
        } else if slot.end > DAY_MINUTES {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlot,
                format!("Slot '{}' extends past midnight", slot.id),
            ));
        }
        if slot.days.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSlot,
                format!("Slot '{}' meets on no days", slot.id),
            ));
        }
    }

    for room in catalog.rooms() {
        if room.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCapacity,
                format!("Room '{}' has zero capacity", room.id),
            ));
        }
    }

    // Courses without a declared teacher record are still schedulable, but
    // a teacher list that exists and omits them signals a typo.
    let check_teachers = !catalog.teachers().is_empty();
    for course in catalog.courses() {
        let lab_teacher = course.lab.as_ref().map(|l| l.teacher_id.as_str());
        for teacher_id in std::iter::once(course.teacher_id.as_str()).chain(lab_teacher) {
            if check_teachers && catalog.teacher(teacher_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!(
                        "Course '{}' references unknown teacher '{}'",
                        course.id, teacher_id
                    ),
                ));
            }
        }
    }

    for teacher in catalog.teachers() {
        for slot_id in &teacher.conflicts {
            if catalog.slot(slot_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!(
                        "Teacher '{}' declares conflict with unknown slot '{}'",
                        teacher.id, slot_id
                    ),
                ));
            }
        }
    }

    let mut students: Vec<_> = catalog.students().iter().collect();
    if catalog.has_registrations() {
        students.extend(catalog.registrations());
    }
    for student in students {
        for course_id in &student.preferences {
            if catalog.course(course_id).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownReference,
                    format!(
                        "Student '{}' requests unknown course '{}'",
                        student.id, course_id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
