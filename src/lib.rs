//! Course timetabling for the U-Engine ecosystem.
//!
//! Assigns courses to (room, time-slot) pairs and enrolls students into the
//! resulting sections. Room capacity, room occupancy, and teacher
//! availability are hard constraints; popularity, level, and core quotas
//! decide who gets placed first.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `ClassRoom`, `Teacher`,
//!   `Course`, `Student`, `Catalog`, `Schedule`
//! - **`registry`**: Per-run room bookings and teacher unavailability
//! - **`dispatching`**: Priority rules and core-quota assignment
//! - **`scheduler`**: Slot allocator, enrollment selector, pipeline, KPIs
//! - **`validation`**: Input integrity checks (duplicate IDs, bad slots, references)
//! - **`io`**: Text, table, and JSON formats
//! - **`config`**: Tunable constants
//!
//! # Quick Start
//!
//! ```
//! use u_timetable::config::SchedulerConfig;
//! use u_timetable::io::{catalog_from_text, render_table};
//! use u_timetable::scheduler::Timetabler;
//!
//! let constraints = "Class Times 2\nRooms 1\nR1 2\nClasses 2\nTeachers 1\n1 1\n2 1\n";
//! let prefs = "Students 3\n1 1 2\n2 1\n3 2\n";
//!
//! let mut catalog = catalog_from_text(constraints, prefs, None).unwrap();
//! let timetabler = Timetabler::new(SchedulerConfig::default().with_seed(1));
//! let outcome = timetabler.run_seeded(&mut catalog);
//!
//! assert!(outcome.schedule.is_complete());
//! let table = render_table(&outcome.schedule, &catalog, false);
//! assert_eq!(table.lines().count(), 3);
//! ```
//!
//! # Architecture
//!
//! Data flows one way: time model → registry → prioritization → allocation
//! → enrollment. The core never fails; unplaceable sections and unknown ids
//! are reported, not raised.

pub mod config;
pub mod dispatching;
pub mod error;
pub mod io;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
