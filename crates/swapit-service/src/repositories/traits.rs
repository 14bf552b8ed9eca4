use crate::errors::ApiError;
use crate::models::{Listing, NewListing};
use async_trait::async_trait;

#[async_trait]
pub trait ListingRepository: Clone + Send + Sync + 'static {
    /// All listings, most recent `created_at` first.
    async fn list(&self) -> Result<Vec<Listing>, ApiError>;

    async fn create(&self, listing: &NewListing) -> Result<Listing, ApiError>;

    /// Removes the row if it exists. Deleting an absent id is not an error and
    /// never touches the image file.
    async fn delete_by_id(&self, id: i32) -> Result<(), ApiError>;
}
