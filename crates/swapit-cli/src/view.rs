use serde::Deserialize;

/// Selecting this pseudo-category disables category filtering.
pub const ALL_CATEGORIES: &str = "Alle Kategorien";

#[derive(Debug, Clone, Deserialize)]
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
    pub created_at: String,
}

/// View-model over one fetched listing collection.
///
/// Filtering happens entirely on the already-downloaded items: a
/// case-insensitive title-contains search intersected with exact category
/// equality. No server round-trip is involved.
#[derive(Debug)]
pub struct ListingBoard {
    items: Vec<Listing>,
    search: String,
    category: String,
}

impl ListingBoard {
    pub fn new(items: Vec<Listing>) -> Self {
        Self {
            items,
            search: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Drops a listing from local state, mirroring a successful delete.
    pub fn remove(&mut self, id: i32) {
        self.items.retain(|item| item.id != id);
    }

    pub fn visible(&self) -> Vec<&Listing> {
        let search = self.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| search.is_empty() || item.title.to_lowercase().contains(&search))
            .filter(|item| self.category == ALL_CATEGORIES || item.category == self.category)
            .collect()
    }
}
