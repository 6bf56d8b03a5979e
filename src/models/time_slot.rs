//! Time slot and day-set models.
//!
//! A time slot is a named interval of the day, repeated on a set of
//! weekdays. Two slots conflict only if they share a day AND their
//! half-open minute ranges intersect.
//!
//! # Time Model
//! Times are minutes since midnight. Intervals are half-open `[start, end)`,
//! so back-to-back slots (one ending at 10:00, the next starting at 10:00)
//! do not overlap.
//!
//! # Classification
//! Slots longer than [`LAB_THRESHOLD_MINUTES`] are lab slots; all others are
//! lecture slots.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Duration (minutes) above which a slot is classified as a lab slot.
pub const LAB_THRESHOLD_MINUTES: u32 = 270;

/// Day letters in canonical order (bit position = index).
const DAY_LETTERS: [char; 7] = ['M', 'T', 'W', 'H', 'F', 'S', 'U'];

/// A set of weekdays, encoded as a bitmask.
///
/// Serialized as a day string such as `"MWF"` or `"TH"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DaySet(u8);

impl DaySet {
    /// The empty day set.
    pub const EMPTY: DaySet = DaySet(0);

    /// Monday through Friday.
    pub const WEEKDAYS: DaySet = DaySet(0b0001_1111);

    /// Parses a day string (`"MWF"`, `"TH"`, ...).
    ///
    /// Letters are case-insensitive; duplicates are ignored.
    /// Returns `None` on an unknown letter.
    pub fn parse(days: &str) -> Option<Self> {
        let mut bits = 0u8;
        for c in days.chars() {
            let upper = c.to_ascii_uppercase();
            let pos = DAY_LETTERS.iter().position(|&d| d == upper)?;
            bits |= 1 << pos;
        }
        Some(Self(bits))
    }

    /// Creates a day set containing only the day at `index` (0 = Monday).
    pub fn single(index: usize) -> Self {
        Self(1 << (index % DAY_LETTERS.len()))
    }

    /// Whether the two sets share at least one day.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether the set contains no days.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of days in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in DAY_LETTERS.iter().enumerate() {
            if self.0 & (1 << i) != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for DaySet {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid day string '{value}'"))
    }
}

impl From<DaySet> for String {
    fn from(days: DaySet) -> Self {
        days.to_string()
    }
}

/// Whether a slot is usable for lectures or labs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Regular lecture slot (duration <= threshold).
    Lecture,
    /// Long lab slot (duration > threshold).
    Lab,
}

/// A named, repeating time interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique slot identifier.
    pub id: String,
    /// Start time (minutes since midnight, inclusive).
    pub start: u32,
    /// End time (minutes since midnight, exclusive).
    pub end: u32,
    /// Days on which the slot meets.
    pub days: DaySet,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(id: impl Into<String>, start: u32, end: u32, days: DaySet) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            days,
        }
    }

    /// Duration in minutes (0 for an inverted slot).
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Classifies the slot using the default lab threshold.
    pub fn kind(&self) -> SlotKind {
        self.kind_with_threshold(LAB_THRESHOLD_MINUTES)
    }

    /// Classifies the slot: lab iff `end - start > threshold`.
    pub fn kind_with_threshold(&self, threshold_minutes: u32) -> SlotKind {
        if self.duration() > threshold_minutes {
            SlotKind::Lab
        } else {
            SlotKind::Lecture
        }
    }

    /// Whether this slot is a lab slot under the default threshold.
    pub fn is_lab(&self) -> bool {
        self.kind() == SlotKind::Lab
    }

    /// Whether two slots conflict.
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self, other)
    }

    /// Human-readable label, e.g. `"09:00-10:15 MWF"`.
    pub fn label(&self) -> String {
        format!(
            "{}-{} {}",
            format_minutes(self.start),
            format_minutes(self.end),
            self.days
        )
    }
}

/// Whether two slots share a day and their `[start, end)` ranges intersect.
///
/// Symmetric and side-effect free. Every room, teacher, and student
/// conflict check in this crate goes through this function.
///
/// # Example
/// ```
/// use u_timetable::models::{overlaps, DaySet, TimeSlot};
///
/// let mwf = DaySet::parse("MWF").unwrap();
/// let th = DaySet::parse("TH").unwrap();
/// let a = TimeSlot::new("A", 540, 600, mwf);
/// let b = TimeSlot::new("B", 570, 630, mwf);
/// let c = TimeSlot::new("C", 570, 630, th);
/// assert!(overlaps(&a, &b));
/// assert!(!overlaps(&a, &c)); // no shared day
/// ```
#[inline]
pub fn overlaps(a: &TimeSlot, b: &TimeSlot) -> bool {
    a.days.intersects(b.days) && a.start < b.end && b.start < a.end
}

/// Parses `HH:MM` into minutes since midnight.
pub fn parse_minutes(text: &str) -> Option<u32> {
    let (h, m) = text.split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if m >= 60 || h > 24 || (h == 24 && m > 0) {
        return None;
    }
    Some(h * 60 + m)
}

/// Formats minutes since midnight as `HH:MM`.
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn days(s: &str) -> DaySet {
        DaySet::parse(s).unwrap()
    }

    #[test]
    fn test_day_set_parse_and_display() {
        let d = days("fwm");
        assert_eq!(d.to_string(), "MWF");
        assert_eq!(d.len(), 3);
        assert!(DaySet::parse("MXF").is_none());
        assert!(DaySet::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_day_set_intersects() {
        assert!(days("MWF").intersects(days("F")));
        assert!(!days("MWF").intersects(days("TH")));
        assert!(!DaySet::EMPTY.intersects(DaySet::WEEKDAYS));
    }

    #[test]
    fn test_overlap_same_day() {
        let a = TimeSlot::new("a", 540, 600, days("MW"));
        let b = TimeSlot::new("b", 599, 660, days("W"));
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_slots_do_not_overlap() {
        let a = TimeSlot::new("a", 540, 600, days("MWF"));
        let b = TimeSlot::new("b", 600, 660, days("MWF"));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_no_shared_day_never_overlaps() {
        let a = TimeSlot::new("a", 0, 1440, days("MWF"));
        let b = TimeSlot::new("b", 0, 1440, days("TH"));
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_slot_kind() {
        let lecture = TimeSlot::new("l", 540, 810, days("M")); // exactly 270
        let lab = TimeSlot::new("b", 540, 811, days("M"));
        assert_eq!(lecture.kind(), SlotKind::Lecture);
        assert_eq!(lab.kind(), SlotKind::Lab);
        assert!(lab.is_lab());
        assert_eq!(lecture.kind_with_threshold(60), SlotKind::Lab);
    }

    #[test]
    fn test_minutes_round_trip() {
        assert_eq!(parse_minutes("09:30"), Some(570));
        assert_eq!(parse_minutes("24:00"), Some(1440));
        assert_eq!(parse_minutes("9:75"), None);
        assert_eq!(parse_minutes("nine"), None);
        assert_eq!(format_minutes(570), "09:30");
    }

    #[test]
    fn test_label() {
        let s = TimeSlot::new("s", 540, 615, days("TH"));
        assert_eq!(s.label(), "09:00-10:15 TH");
    }

    #[test]
    fn test_day_set_serde() {
        let s = TimeSlot::new("s", 540, 615, days("MWF"));
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"MWF\""));
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
