use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Unknown condition: {0}")]
    UnknownCondition(String),
    #[error("Unknown mode: {0}")]
    UnknownMode(String),
    #[error("Malformed createdAt timestamp: {0}")]
    MalformedTimestamp(String),
}

/// The fixed category set offered by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Handy,
    Laptop,
    Monitor,
    Drucker,
    Software,
    Kopfhoerer,
    Konsole,
    Zubehoer,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Handy,
        Category::Laptop,
        Category::Monitor,
        Category::Drucker,
        Category::Software,
        Category::Kopfhoerer,
        Category::Konsole,
        Category::Zubehoer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Handy => "Handy",
            Category::Laptop => "Laptop",
            Category::Monitor => "Monitor",
            Category::Drucker => "Drucker",
            Category::Software => "Software",
            Category::Kopfhoerer => "Kopfhörer",
            Category::Konsole => "Konsole",
            Category::Zubehoer => "Zubehör",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Neu,
    Gut,
    Okay,
    Defekt,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Neu => "Neu",
            Condition::Gut => "Gut",
            Condition::Okay => "Okay",
            Condition::Defekt => "Defekt",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Neu" => Ok(Condition::Neu),
            "Gut" => Ok(Condition::Gut),
            "Okay" => Ok(Condition::Okay),
            "Defekt" => Ok(Condition::Defekt),
            other => Err(ValidationError::UnknownCondition(other.to_string())),
        }
    }
}

/// Whether an item is offered for sale or only for lending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleMode {
    Verkauf,
    Verleih,
}

impl SaleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleMode::Verkauf => "Verkauf",
            SaleMode::Verleih => "Verleih",
        }
    }
}

impl fmt::Display for SaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Verkauf" => Ok(SaleMode::Verkauf),
            "Verleih" => Ok(SaleMode::Verleih),
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }
}

/// Raw text fields collected from a multipart create request, before validation.
///
/// Field names match the wire form: `type` carries the category and `createdAt`
/// the optional client-side timestamp.
#[derive(Debug, Default)]
pub struct ListingForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub location: Option<String>,
    pub condition: Option<String>,
    pub price: Option<String>,
    pub mode: Option<String>,
    pub created_at: Option<String>,
}

fn require(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A create request that passed presence and enum-membership checks.
#[derive(Debug)]
pub struct ValidatedListing {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub name: String,
    pub contact: String,
    pub location: String,
    pub condition: Option<Condition>,
    pub price: Option<String>,
    pub mode: Option<SaleMode>,
    pub created_at: NaiveDateTime,
}

impl ListingForm {
    pub fn validate(self) -> Result<ValidatedListing, ValidationError> {
        let category = require(self.category, "type")?.parse::<Category>()?;

        let condition = optional(self.condition)
            .map(|s| s.parse::<Condition>())
            .transpose()?;
        let mode = optional(self.mode)
            .map(|s| s.parse::<SaleMode>())
            .transpose()?;

        let created_at = match optional(self.created_at) {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|_| ValidationError::MalformedTimestamp(raw))?
                .naive_utc(),
            None => Utc::now().naive_utc(),
        };

        Ok(ValidatedListing {
            title: require(self.title, "title")?,
            description: require(self.description, "description")?,
            category,
            name: require(self.name, "name")?,
            contact: require(self.contact, "contact")?,
            location: require(self.location, "location")?,
            condition,
            price: optional(self.price),
            mode,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ListingForm {
        ListingForm {
            title: Some("ThinkPad X220".to_string()),
            description: Some("Läuft noch einwandfrei".to_string()),
            category: Some("Laptop".to_string()),
            name: Some("Mara".to_string()),
            contact: Some("mara@example.com".to_string()),
            location: Some("Berlin".to_string()),
            condition: Some("Gut".to_string()),
            price: Some("120€".to_string()),
            mode: Some("Verkauf".to_string()),
            created_at: Some("2025-06-01T10:30:00Z".to_string()),
        }
    }

    #[test]
    fn complete_form_validates() {
        let listing = complete_form().validate().unwrap();
        assert_eq!(listing.category, Category::Laptop);
        assert_eq!(listing.condition, Some(Condition::Gut));
        assert_eq!(listing.mode, Some(SaleMode::Verkauf));
        assert_eq!(
            listing.created_at,
            DateTime::parse_from_rfc3339("2025-06-01T10:30:00Z")
                .unwrap()
                .naive_utc()
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let form = ListingForm {
            condition: None,
            price: Some("   ".to_string()),
            mode: None,
            created_at: None,
            ..complete_form()
        };
        let listing = form.validate().unwrap();
        assert_eq!(listing.condition, None);
        assert_eq!(listing.price, None);
        assert_eq!(listing.mode, None);
    }

    #[test]
    fn missing_title_is_rejected() {
        let form = ListingForm {
            title: Some("  ".to_string()),
            ..complete_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingField("title"))
        ));
    }

    #[test]
    fn missing_category_is_rejected() {
        let form = ListingForm {
            category: None,
            ..complete_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingField("type"))
        ));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let form = ListingForm {
            category: Some("Fahrrad".to_string()),
            ..complete_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::UnknownCategory(_))
        ));
    }

    #[test]
    fn unknown_condition_is_rejected() {
        let form = ListingForm {
            condition: Some("Kaputt".to_string()),
            ..complete_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::UnknownCondition(_))
        ));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let form = ListingForm {
            created_at: Some("gestern".to_string()),
            ..complete_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MalformedTimestamp(_))
        ));
    }

    #[test]
    fn umlaut_categories_parse() {
        assert_eq!("Kopfhörer".parse::<Category>().unwrap(), Category::Kopfhoerer);
        assert_eq!("Zubehör".parse::<Category>().unwrap(), Category::Zubehoer);
    }
}
