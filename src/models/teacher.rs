//! Teacher model.

use serde::{Deserialize, Serialize};

/// An instructor.
///
/// `conflicts` lists slot ids the teacher declared unavailable. Slots
/// consumed by scheduling decisions are added on top of these by the
/// [`ResourceRegistry`](crate::registry::ResourceRegistry) during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Course ids this teacher lectures or runs the lab for, in input order.
    #[serde(default)]
    pub courses: Vec<String>,
    /// Declared personal conflicts (slot ids).
    #[serde(default)]
    pub conflicts: Vec<String>,
}

impl Teacher {
    /// Creates a teacher with no courses and no conflicts.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            courses: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Adds a taught course.
    pub fn with_course(mut self, course_id: impl Into<String>) -> Self {
        self.courses.push(course_id.into());
        self
    }

    /// Adds a declared unavailable slot.
    pub fn with_conflict(mut self, slot_id: impl Into<String>) -> Self {
        self.conflicts.push(slot_id.into());
        self
    }

    /// Whether this teacher lectures the given course.
    pub fn teaches(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c == course_id)
    }
}
