use super::traits::ListingRepository;
use crate::errors::ApiError;
use crate::models::{Listing, NewListing};
use crate::schema::listings;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct SqliteListingRepository {
    db: Arc<Mutex<SqliteConnection>>,
}

impl SqliteListingRepository {
    pub fn new(db: Arc<Mutex<SqliteConnection>>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ListingRepository for SqliteListingRepository {
    async fn list(&self) -> Result<Vec<Listing>, ApiError> {
        let mut conn = self.db.lock().unwrap();
        // Ties on created_at fall back to insertion order
        let result = listings::table
            .order((listings::created_at.desc(), listings::id.desc()))
            .load::<Listing>(&mut *conn)?;
        Ok(result)
    }

    async fn create(&self, listing: &NewListing) -> Result<Listing, ApiError> {
        let mut conn = self.db.lock().unwrap();
        let result = diesel::insert_into(listings::table)
            .values(listing)
            .returning(listings::all_columns)
            .get_result::<Listing>(&mut *conn)?;
        Ok(result)
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), ApiError> {
        let mut conn = self.db.lock().unwrap();
        diesel::delete(listings::table.find(id)).execute(&mut *conn)?;
        Ok(())
    }
}
