pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::Entity as Artist;
pub use shows::Entity as Show;
pub use venues::Entity as Venue;
