//! Whitespace-delimited constraint and preference files.
//!
//! # Constraint file
//!
//! ```text
//! Class Times   <n>
//! [<slot id> <HH:MM> <HH:MM> <days>]   (n lines, optional)
//! Rooms         <r>
//! <room id>     <capacity>             (r lines)
//! Classes       <c>
//! Teachers      <t>
//! <course id>   <teacher id> [<dept> <level> [<lab teacher id>]]   (c lines)
//! [Conflicts    <k>
//!  <teacher id> <slot id>...           (k lines)]
//! ```
//!
//! When slot lines are omitted, `n` non-overlapping slots with ids
//! `1..=n` are synthesized, dealt round-robin over Monday to Friday.
//!
//! # Preference file
//!
//! ```text
//! Students <s>
//! <student id> <course id>...          (s lines)
//! ```
//!
//! Blank lines are ignored. Line numbers in errors are 1-based.

use tracing::{debug, warn};

use crate::error::{Result, TimetableError};
use crate::models::{
    parse_minutes, CatalogData, ClassRoom, Course, DaySet, Student, Teacher, TimeSlot,
};

/// First minute available to synthesized slots (08:00).
const DAY_START: u32 = 8 * 60;
/// Minutes available to synthesized slots per day (08:00 to 24:00).
const DAY_SPAN: u32 = 16 * 60;
/// Longest synthesized slot.
const SYNTHETIC_STEP: u32 = 60;
/// Weekdays used for synthesized slots.
const SYNTHETIC_DAYS: u32 = 5;

/// Non-blank lines split into tokens, with their line numbers.
struct Tokens<'a> {
    lines: std::iter::Peekable<Box<dyn Iterator<Item = (usize, Vec<&'a str>)> + 'a>>,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        let iter: Box<dyn Iterator<Item = (usize, Vec<&'a str>)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
                .filter(|(_, tokens)| !tokens.is_empty()),
        );
        Self {
            lines: iter.peekable(),
            last_line: 0,
        }
    }

    fn next(&mut self, expected: &str) -> Result<(usize, Vec<&'a str>)> {
        match self.lines.next() {
            Some((line, tokens)) => {
                self.last_line = line;
                Ok((line, tokens))
            }
            None => Err(TimetableError::parse(
                self.last_line + 1,
                format!("unexpected end of input, expected {expected}"),
            )),
        }
    }

    fn peek_keyword(&mut self) -> Option<&'a str> {
        self.lines.peek().map(|(_, tokens)| tokens[0])
    }

    /// Reads a `<keyword...> <count>` header line.
    fn header(&mut self, keyword: &[&str]) -> Result<usize> {
        let what = keyword.join(" ");
        let (line, tokens) = self.next(&format!("'{what}' header"))?;
        if tokens.len() != keyword.len() + 1 || tokens[..keyword.len()] != *keyword {
            return Err(TimetableError::parse(
                line,
                format!("expected '{what} <count>', found '{}'", tokens.join(" ")),
            ));
        }
        parse_number(line, tokens[keyword.len()], "count")
    }

    fn is_done(&mut self) -> bool {
        self.lines.peek().is_none()
    }
}

fn parse_number<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| TimetableError::parse(line, format!("invalid {what} '{token}'")))
}

fn expect_fields(line: usize, tokens: &[&str], allowed: &[usize], what: &str) -> Result<()> {
    if allowed.contains(&tokens.len()) {
        Ok(())
    } else {
        Err(TimetableError::parse(
            line,
            format!("malformed {what} line '{}'", tokens.join(" ")),
        ))
    }
}

/// Builds `n` pairwise non-overlapping lecture slots over the weekdays.
///
/// Slot `i` meets on weekday `i % 5`, in period `i / 5` of that day.
pub fn synthesize_slots(n: usize) -> Result<Vec<TimeSlot>> {
    let cannot_fit = || TimetableError::parse(1, format!("cannot fit {n} time slots into a week"));
    let total = u32::try_from(n).map_err(|_| cannot_fit())?;
    let per_day = total.div_ceil(SYNTHETIC_DAYS);
    let step = if per_day == 0 {
        SYNTHETIC_STEP
    } else {
        (DAY_SPAN / per_day).min(SYNTHETIC_STEP)
    };
    if step == 0 {
        return Err(cannot_fit());
    }
    Ok((0..total)
        .map(|i| {
            let start = DAY_START + (i / SYNTHETIC_DAYS) * step;
            TimeSlot::new(
                (i + 1).to_string(),
                start,
                start + step,
                DaySet::single((i % SYNTHETIC_DAYS) as usize),
            )
        })
        .collect())
}

fn parse_slot(line: usize, tokens: &[&str]) -> Result<TimeSlot> {
    expect_fields(line, tokens, &[4], "time slot")?;
    let time = |t: &str| {
        parse_minutes(t).ok_or_else(|| TimetableError::parse(line, format!("invalid time '{t}'")))
    };
    let days = DaySet::parse(tokens[3])
        .ok_or_else(|| TimetableError::parse(line, format!("invalid days '{}'", tokens[3])))?;
    Ok(TimeSlot::new(tokens[0], time(tokens[1])?, time(tokens[2])?, days))
}

fn teacher_entry<'t>(teachers: &'t mut Vec<Teacher>, id: &str) -> &'t mut Teacher {
    let pos = match teachers.iter().position(|t| t.id == id) {
        Some(pos) => pos,
        None => {
            teachers.push(Teacher::new(id));
            teachers.len() - 1
        }
    };
    &mut teachers[pos]
}

/// Parses a constraint file. Students are left empty.
pub fn parse_constraints(text: &str) -> Result<CatalogData> {
    let mut tokens = Tokens::new(text);

    let slot_count = tokens.header(&["Class", "Times"])?;
    let slots = if tokens.peek_keyword() == Some("Rooms") {
        synthesize_slots(slot_count)?
    } else {
        (0..slot_count)
            .map(|_| {
                let (line, fields) = tokens.next("a time slot")?;
                parse_slot(line, &fields)
            })
            .collect::<Result<Vec<_>>>()?
    };

    let room_count = tokens.header(&["Rooms"])?;
    let mut rooms = Vec::new();
    for _ in 0..room_count {
        let (line, fields) = tokens.next("a room")?;
        expect_fields(line, &fields, &[2], "room")?;
        rooms.push(ClassRoom::new(fields[0], parse_number(line, fields[1], "capacity")?));
    }

    let course_count = tokens.header(&["Classes"])?;
    let teacher_count = tokens.header(&["Teachers"])?;
    let mut courses = Vec::new();
    let mut teachers: Vec<Teacher> = Vec::new();
    for _ in 0..course_count {
        let (line, fields) = tokens.next("a course")?;
        expect_fields(line, &fields, &[2, 4, 5], "course")?;
        let mut course = Course::new(fields[0], fields[1]);
        if fields.len() >= 4 {
            course = course
                .with_department(fields[2])
                .with_level(parse_number(line, fields[3], "level")?);
        }
        teacher_entry(&mut teachers, fields[1])
            .courses
            .push(fields[0].to_string());
        if let Some(lab_teacher) = fields.get(4) {
            course = course.with_lab(*lab_teacher);
            teacher_entry(&mut teachers, lab_teacher)
                .courses
                .push(fields[0].to_string());
        }
        courses.push(course);
    }
    if teachers.len() > teacher_count {
        warn!(
            declared = teacher_count,
            found = teachers.len(),
            "more teachers referenced than declared"
        );
    }

    if tokens.peek_keyword() == Some("Conflicts") {
        let conflict_count = tokens.header(&["Conflicts"])?;
        for _ in 0..conflict_count {
            let (line, fields) = tokens.next("a teacher conflict")?;
            if fields.len() < 2 {
                return Err(TimetableError::parse(
                    line,
                    format!("malformed conflict line '{}'", fields.join(" ")),
                ));
            }
            teacher_entry(&mut teachers, fields[0])
                .conflicts
                .extend(fields[1..].iter().map(|s| s.to_string()));
        }
    }

    if !tokens.is_done() {
        let (line, fields) = tokens.next("end of input")?;
        return Err(TimetableError::parse(
            line,
            format!("unexpected trailing line '{}'", fields.join(" ")),
        ));
    }

    debug!(
        slots = slots.len(),
        rooms = rooms.len(),
        courses = courses.len(),
        teachers = teachers.len(),
        "parsed constraints"
    );
    Ok(CatalogData {
        slots,
        rooms,
        teachers,
        courses,
        students: Vec::new(),
        registrations: None,
    })
}

/// Parses a preference file.
pub fn parse_prefs(text: &str) -> Result<Vec<Student>> {
    let mut tokens = Tokens::new(text);
    let count = tokens.header(&["Students"])?;
    let mut students = Vec::new();
    for _ in 0..count {
        let (_, fields) = tokens.next("a student")?;
        students.push(Student::new(fields[0], fields[1..].iter().copied()));
    }
    if !tokens.is_done() {
        let (line, fields) = tokens.next("end of input")?;
        return Err(TimetableError::parse(
            line,
            format!("unexpected trailing line '{}'", fields.join(" ")),
        ));
    }
    debug!(students = students.len(), "parsed preferences");
    Ok(students)
}
