//! Course model.
//!
//! A course is a unit to be placed into one (room, slot) pair. A course may
//! carry a paired lab section, which is placed as a second, independent
//! resource claim under the same course identity.

use serde::{Deserialize, Serialize};

/// A paired lab section of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabSection {
    /// Teacher running the lab (may differ from the lecturer).
    pub teacher_id: String,
}

impl LabSection {
    /// Creates a lab section taught by `teacher_id`.
    pub fn new(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
        }
    }
}

/// A course to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Lecturer.
    pub teacher_id: String,
    /// Department code (e.g. "CMSC").
    #[serde(default)]
    pub department: String,
    /// Academic level (1 = introductory).
    #[serde(default = "default_level")]
    pub level: u8,
    /// Paired lab section, if any.
    #[serde(default)]
    pub lab: Option<LabSection>,
    /// Whether the course holds a core-quota seat. Assigned, not input.
    #[serde(default, skip_deserializing)]
    pub is_core: bool,
    /// Ids of students interested in this course.
    ///
    /// Populated from preference lists; cleared and re-populated between
    /// allocation and enrollment when the two phases use different data.
    #[serde(default, skip_deserializing)]
    pub interested: Vec<String>,
}

fn default_level() -> u8 {
    1
}

impl Course {
    /// Creates a level-1 course with no department and no lab.
    pub fn new(id: impl Into<String>, teacher_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            teacher_id: teacher_id.into(),
            department: String::new(),
            level: 1,
            lab: None,
            is_core: false,
            interested: Vec::new(),
        }
    }

    /// Sets the department code.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the academic level.
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    /// Attaches a paired lab taught by `teacher_id`.
    pub fn with_lab(mut self, teacher_id: impl Into<String>) -> Self {
        self.lab = Some(LabSection::new(teacher_id));
        self
    }

    /// Adds an interested student.
    pub fn with_interested(mut self, student_id: impl Into<String>) -> Self {
        self.interested.push(student_id.into());
        self
    }

    /// Size of the interested-student pool.
    pub fn popularity(&self) -> usize {
        self.interested.len()
    }

    /// Whether the course has a paired lab.
    pub fn has_lab(&self) -> bool {
        self.lab.is_some()
    }
}
