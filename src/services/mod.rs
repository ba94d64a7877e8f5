pub mod aggregate;
pub mod directory;
pub mod join;
pub mod partition;
pub mod search;

pub use aggregate::{AreaSummary, EntitySummary};
pub use directory::{ArtistDetail, VenueDetail};
pub use join::{ArtistShow, ShowListing, VenueShow};
pub use partition::{partition, Partition, Scheduled};
pub use search::SearchResults;
