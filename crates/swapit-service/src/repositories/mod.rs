mod listings;
mod traits;

pub use listings::SqliteListingRepository;
pub use traits::ListingRepository;
