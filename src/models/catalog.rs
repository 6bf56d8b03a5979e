//! Catalog: the loaded problem instance.
//!
//! Owns every input entity and indexes them by id. Lookups return `Option`:
//! a missing id is a legitimate outcome that callers skip, not a crash.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ClassRoom, Course, Student, Teacher, TimeSlot};

/// Serializable catalog contents.
///
/// `registrations` holds enrollment-time preference lists. When absent,
/// enrollment reuses `students` (the allocation-time popularity source).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    /// Time slots, in input order.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
    /// Rooms, in input order.
    #[serde(default)]
    pub rooms: Vec<ClassRoom>,
    /// Teachers.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Courses, in input order.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// Students whose wishes drive course popularity.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Students whose wishes drive final enrollment.
    #[serde(default)]
    pub registrations: Option<Vec<Student>>,
}

/// A student preference that names an unknown course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    /// Student holding the preference.
    pub student_id: String,
    /// Course id that was not found.
    pub course_id: String,
}

/// Indexed problem instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "CatalogData")]
pub struct Catalog {
    data: CatalogData,
    slot_index: HashMap<String, usize>,
    room_index: HashMap<String, usize>,
    teacher_index: HashMap<String, usize>,
    course_index: HashMap<String, usize>,
    student_index: HashMap<String, usize>,
}

/// First occurrence wins on duplicate ids; validation reports duplicates.
fn index_by<T>(items: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        index.entry(id(item).to_string()).or_insert(i);
    }
    index
}

impl From<CatalogData> for Catalog {
    fn from(data: CatalogData) -> Self {
        let slot_index = index_by(&data.slots, |s| &s.id);
        let room_index = index_by(&data.rooms, |r| &r.id);
        let teacher_index = index_by(&data.teachers, |t| &t.id);
        let course_index = index_by(&data.courses, |c| &c.id);
        let student_index = index_by(&data.students, |s| &s.id);
        Self {
            data,
            slot_index,
            room_index,
            teacher_index,
            course_index,
            student_index,
        }
    }
}

impl Catalog {
    /// Builds a catalog from its parts.
    pub fn new(
        slots: Vec<TimeSlot>,
        rooms: Vec<ClassRoom>,
        teachers: Vec<Teacher>,
        courses: Vec<Course>,
        students: Vec<Student>,
    ) -> Self {
        Self::from(CatalogData {
            slots,
            rooms,
            teachers,
            courses,
            students,
            registrations: None,
        })
    }

    /// Sets enrollment-time preference lists.
    pub fn with_registrations(mut self, registrations: Vec<Student>) -> Self {
        self.data.registrations = Some(registrations);
        self
    }

    /// Raw contents.
    pub fn data(&self) -> &CatalogData {
        &self.data
    }

    /// Time slots in input order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.data.slots
    }

    /// Rooms in input order.
    pub fn rooms(&self) -> &[ClassRoom] {
        &self.data.rooms
    }

    /// Teachers in input order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.data.teachers
    }

    /// Courses in input order.
    pub fn courses(&self) -> &[Course] {
        &self.data.courses
    }

    /// Mutable course access for run state (`is_core`, `interested`).
    ///
    /// Course ids must not be changed through this slice.
    pub fn courses_mut(&mut self) -> &mut [Course] {
        &mut self.data.courses
    }

    /// Allocation-time students.
    pub fn students(&self) -> &[Student] {
        &self.data.students
    }

    /// Enrollment-time students, falling back to [`Catalog::students`].
    pub fn registrations(&self) -> &[Student] {
        self.data
            .registrations
            .as_deref()
            .unwrap_or(&self.data.students)
    }

    /// Whether enrollment uses a separate preference source.
    pub fn has_registrations(&self) -> bool {
        self.data.registrations.is_some()
    }

    /// Looks up a slot by id.
    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slot_index.get(id).map(|&i| &self.data.slots[i])
    }

    /// Position of a slot in [`Catalog::slots`].
    pub fn slot_position(&self, id: &str) -> Option<usize> {
        self.slot_index.get(id).copied()
    }

    /// Looks up a room by id.
    pub fn room(&self, id: &str) -> Option<&ClassRoom> {
        self.room_index.get(id).map(|&i| &self.data.rooms[i])
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teacher_index.get(id).map(|&i| &self.data.teachers[i])
    }

    /// Looks up a course by id.
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.course_index.get(id).map(|&i| &self.data.courses[i])
    }

    /// Position of a course in [`Catalog::courses`].
    pub fn course_position(&self, id: &str) -> Option<usize> {
        self.course_index.get(id).copied()
    }

    /// Looks up an allocation-time student by id.
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.student_index.get(id).map(|&i| &self.data.students[i])
    }

    /// Empties every course's interested pool.
    pub fn clear_interest(&mut self) {
        for course in &mut self.data.courses {
            course.interested.clear();
        }
    }

    /// Fills interested pools from preference lists.
    ///
    /// A student joins each pool at most once. Preferences naming unknown
    /// courses are skipped and returned.
    pub fn populate_interest(&mut self, students: &[Student]) -> Vec<MissingReference> {
        let mut missing = Vec::new();
        for student in students {
            for course_id in &student.preferences {
                match self.course_index.get(course_id.as_str()) {
                    Some(&i) => {
                        let pool = &mut self.data.courses[i].interested;
                        if !pool.contains(&student.id) {
                            pool.push(student.id.clone());
                        }
                    }
                    None => missing.push(MissingReference {
                        student_id: student.id.clone(),
                        course_id: course_id.clone(),
                    }),
                }
            }
        }
        missing
    }

    /// Refills pools from allocation-time students.
    pub fn load_popularity(&mut self) -> Vec<MissingReference> {
        let students = std::mem::take(&mut self.data.students);
        self.clear_interest();
        let missing = self.populate_interest(&students);
        self.data.students = students;
        missing
    }

    /// Refills pools from enrollment-time students.
    pub fn load_registrations(&mut self) -> Vec<MissingReference> {
        let Some(registrations) = self.data.registrations.take() else {
            return self.load_popularity();
        };
        self.clear_interest();
        let missing = self.populate_interest(&registrations);
        self.data.registrations = Some(registrations);
        missing
    }
}
