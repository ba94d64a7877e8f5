use sea_orm::DatabaseConnection;

/// Per-process handles shared by every request. Holds no mutable state; the
/// connection pool hands each request its own connection.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
