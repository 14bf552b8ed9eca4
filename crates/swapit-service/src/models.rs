use crate::validation::ValidatedListing;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A persisted marketplace listing.
///
/// Serialized field names follow the HTTP interface: the category travels as
/// `type` and the timestamp as `createdAt`.
#[derive(Debug, Clone, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Listing {
    pub id: i32,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub category: String,
    pub name: String,
    pub contact: String,
    pub location: String,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub mode: Option<String>,
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::listings)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub category: String,
    pub name: String,
    pub contact: String,
    pub location: String,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub mode: Option<String>,
    pub image: String,
    pub created_at: chrono::NaiveDateTime,
}

impl NewListing {
    /// Builds an insertable row from a validated request and the relative path
    /// the upload handler returned for the image.
    pub fn new(listing: ValidatedListing, image_path: String) -> Self {
        NewListing {
            title: listing.title,
            description: listing.description,
            category: listing.category.to_string(),
            name: listing.name,
            contact: listing.contact,
            location: listing.location,
            condition: listing.condition.map(|c| c.to_string()),
            price: listing.price,
            mode: listing.mode.map(|m| m.to_string()),
            image: image_path,
            created_at: listing.created_at,
        }
    }
}
