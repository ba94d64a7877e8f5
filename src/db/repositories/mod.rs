//! Entity store for venues, artists and shows.
//!
//! Every write runs inside its own transaction. The transaction is committed
//! on success; any early return drops it, which rolls back and hands the
//! connection back to the pool. Concurrent edits of the same record are
//! last-writer-wins.

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::{ArtistRepository, ArtistUpdate, NewArtist};
pub use shows::{NewShow, ShowOwner, ShowRepository};
pub use venues::{Area, NewVenue, VenueFilter, VenueRepository, VenueUpdate};

use crate::error::{AppError, Result};

pub(crate) fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(format!("{} name is required", kind)));
    }
    Ok(())
}
