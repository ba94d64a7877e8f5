pub mod entities;
pub mod genres;
pub mod repositories;
pub mod seed;

pub use entities::*;
pub use genres::Genres;
