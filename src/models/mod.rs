//! Timetabling domain models.
//!
//! Provides the input entities (slots, rooms, teachers, courses, students),
//! the indexed [`Catalog`] that owns them, and the [`Schedule`] produced by
//! a run.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Course | Task |
//! | ClassRoom | Capacity-bounded resource |
//! | Teacher | Human resource |
//! | TimeSlot | Recurring time window |
//! | ScheduleEntry | Assignment |

mod catalog;
mod course;
mod room;
mod schedule;
mod student;
mod teacher;
mod time_slot;

pub use catalog::{Catalog, CatalogData, MissingReference};
pub use course::{Course, LabSection};
pub use room::{rooms_by_capacity, ClassRoom};
pub use schedule::{
    Schedule, ScheduleEntry, SectionKind, UnscheduledReason, UnscheduledSection,
};
pub use student::Student;
pub use teacher::Teacher;
pub use time_slot::{
    format_minutes, overlaps, parse_minutes, DaySet, SlotKind, TimeSlot, LAB_THRESHOLD_MINUTES,
};
