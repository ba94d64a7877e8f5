//! Case-insensitive name search over venues and artists.
//!
//! An empty (or all-whitespace) term matches nothing.

use serde::{Deserialize, Serialize};

use super::aggregate::EntitySummary;
use crate::db::entities::{artists, venues};

/// Something with an id and a searchable name.
pub trait Named {
    fn id(&self) -> i32;
    fn name(&self) -> &str;
}

impl Named for venues::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for artists::Model {
    fn id(&self) -> i32 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: usize,
    pub items: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn empty() -> Self {
        Self {
            count: 0,
            items: Vec::new(),
        }
    }
}

pub fn matches(name: &str, term: &str) -> bool {
    let term = term.trim();
    !term.is_empty() && name.to_lowercase().contains(&term.to_lowercase())
}

/// Filters `entities` by name, keeping their order, and attaches the upcoming
/// show count of every match.
pub fn search<T: Named>(
    entities: &[T],
    term: &str,
    upcoming: impl Fn(i32) -> usize,
) -> SearchResults {
    if term.trim().is_empty() {
        return SearchResults::empty();
    }

    let items: Vec<EntitySummary> = entities
        .iter()
        .filter(|e| matches(e.name(), term))
        .map(|e| EntitySummary {
            id: e.id(),
            name: e.name().to_string(),
            num_upcoming_shows: upcoming(e.id()),
        })
        .collect();

    SearchResults {
        count: items.len(),
        items,
    }
}
