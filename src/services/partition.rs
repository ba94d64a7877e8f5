//! Past/upcoming classification of shows relative to a reference time.
//!
//! A show starting exactly at the reference time counts as upcoming, so a show
//! that is just beginning is never missing from both lists.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::entities::shows;

/// Anything with a start time that can be partitioned.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for shows::Model {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time.with_timezone(&Utc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Past,
    Upcoming,
}

/// The single comparison every past/upcoming decision goes through.
pub fn classify(start_time: DateTime<Utc>, reference_time: DateTime<Utc>) -> Timing {
    if start_time >= reference_time {
        Timing::Upcoming
    } else {
        Timing::Past
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Partition<T> {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Splits `shows` into past and upcoming, keeping the input order within each
/// half. The input is left untouched.
pub fn partition<T>(shows: &[T], reference_time: DateTime<Utc>) -> Partition<T>
where
    T: Scheduled + Clone,
{
    let mut past = Vec::new();
    let mut upcoming = Vec::new();

    for show in shows {
        match classify(show.start_time(), reference_time) {
            Timing::Past => past.push(show.clone()),
            Timing::Upcoming => upcoming.push(show.clone()),
        }
    }

    Partition { past, upcoming }
}
