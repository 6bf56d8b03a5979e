//! Input and output formats.
//!
//! - [`text`]: whitespace-delimited constraint and preference files
//! - [`table`]: tab-delimited schedule output
//! - JSON catalogs via `serde_json` ([`catalog_from_json`])
//!
//! None of this is needed to schedule: the core works on a [`Catalog`]
//! however it was built.

pub mod table;
pub mod text;

pub use table::render_table;
pub use text::{parse_constraints, parse_prefs};

use crate::error::Result;
use crate::models::Catalog;

/// Builds a catalog from a constraint file and a preference file.
///
/// `registrations`, when given, is a second preference file used for
/// enrollment only.
pub fn catalog_from_text(
    constraints: &str,
    prefs: &str,
    registrations: Option<&str>,
) -> Result<Catalog> {
    let mut data = parse_constraints(constraints)?;
    data.students = parse_prefs(prefs)?;
    data.registrations = registrations.map(parse_prefs).transpose()?;
    Ok(Catalog::from(data))
}

/// Deserializes a catalog from JSON.
pub fn catalog_from_json(json: &str) -> Result<Catalog> {
    Ok(serde_json::from_str(json)?)
}
