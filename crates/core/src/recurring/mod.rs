//! Recurring payment scheduling.

pub mod schedule;

pub use schedule::{next_occurrence, occurrences_between};
