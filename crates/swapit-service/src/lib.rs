use axum::Router;
use diesel::sqlite::SqliteConnection;
use std::sync::{Arc, Mutex};

pub mod errors;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod uploads;
pub mod validation;

use repositories::{ListingRepository, SqliteListingRepository};
use uploads::UploadStore;

/// Request-scoped handles the route handlers pull their dependencies from.
pub trait AppState: Clone + Send + Sync + 'static {
    type ListingRepo: ListingRepository;

    fn listing_repo(&self) -> Self::ListingRepo;
    fn upload_store(&self) -> UploadStore;
}

#[derive(Clone)]
pub struct DefaultAppState {
    db: Arc<Mutex<SqliteConnection>>,
    uploads: UploadStore,
}

impl DefaultAppState {
    pub fn new(db: Arc<Mutex<SqliteConnection>>, uploads: UploadStore) -> Self {
        Self { db, uploads }
    }
}

impl AppState for DefaultAppState {
    type ListingRepo = SqliteListingRepository;

    fn listing_repo(&self) -> SqliteListingRepository {
        SqliteListingRepository::new(self.db.clone())
    }

    fn upload_store(&self) -> UploadStore {
        self.uploads.clone()
    }
}

pub fn create_app(state: DefaultAppState) -> Router {
    let upload_root = state.upload_store().root().to_path_buf();
    routes::create_router(&upload_root).with_state(state)
}
