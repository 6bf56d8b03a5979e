//! Student model.

use serde::{Deserialize, Serialize};

/// A student and their ordered course wishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Desired course ids, most wanted first.
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl Student {
    /// Creates a student with the given preference list.
    pub fn new<I, S>(id: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_new() {
        let s = Student::new("S1", ["C1", "C2"]);
        assert_eq!(s.preferences, vec!["C1".to_string(), "C2".to_string()]);
    }
}
