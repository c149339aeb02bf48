//! Listing data model and provider contract.
//!
//! The feed consumes an ordered sequence of [`Listing`] records from a
//! [`ListingProvider`]. Providers are asynchronous and may fail; the feed's
//! only contract with them is "an empty or failed fetch yields an empty
//! feed, never a crash."

mod provider;

pub use provider::{FileProvider, HttpProvider};

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("listing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("listing endpoint returned {status}")]
    BadStatus { status: u16 },

    #[error("failed to read listings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listing data: {0}")]
    Parse(#[from] serde_json::Error),
}

// ============================================================================
// Data Model
// ============================================================================

/// The broker attached to a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Broker {
    /// WhatsApp deep link derived from the phone number, non-digits
    /// stripped. `None` when there is no phone on record.
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self
            .phone
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return None;
        }
        Some(format!("https://wa.me/{}", digits))
    }

    /// "@handle" display form: the name with whitespace removed.
    pub fn handle(&self) -> String {
        format!("@{}", self.name.split_whitespace().collect::<String>())
    }
}

/// Property type, used both on listings and as a filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Apartment,
    Studio,
    Townhouse,
    Penthouse,
    Villa,
}

impl ListingKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Studio => "Studio",
            Self::Townhouse => "Townhouse",
            Self::Penthouse => "Penthouse",
            Self::Villa => "Villa",
        }
    }

    /// All kinds, in filter-panel display order.
    pub const ALL: [ListingKind; 5] = [
        Self::Apartment,
        Self::Studio,
        Self::Townhouse,
        Self::Penthouse,
        Self::Villa,
    ];
}

fn default_clip_seconds() -> u64 {
    15
}

/// A single rental listing ("short"). Identity is `id`; the feed treats
/// the rest as immutable display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub city: String,
    pub location: String,
    /// Monthly rent in whole currency units.
    pub price: u64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub size_sqft: u32,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Clip length driving the looping progress bar.
    #[serde(default = "default_clip_seconds")]
    pub clip_seconds: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    pub broker: Broker,
}

// ============================================================================
// Filter Criteria
// ============================================================================

/// Inclusive price range. An unbounded end is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PriceRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn contains(&self, price: u64) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The three filter dimensions: city, price range, property type.
///
/// Hashable so that provider results can be memoized per criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub city: Option<String>,
    pub price: PriceRange,
    pub kind: Option<ListingKind>,
}

impl FilterCriteria {
    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.price.is_unbounded() && self.kind.is_none()
    }

    /// Local predicate used by the file provider (and by tests); the HTTP
    /// provider pushes the same criteria to the server as query params.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(city) = &self.city {
            if !listing.city.eq_ignore_ascii_case(city) {
                return false;
            }
        }
        if !self.price.contains(listing.price) {
            return false;
        }
        if let Some(kind) = self.kind {
            if listing.kind != kind {
                return false;
            }
        }
        true
    }
}

// ============================================================================
// Provider Contract
// ============================================================================

/// Supplies the listing sequence for a set of filter criteria.
///
/// Returns a `BoxFuture` rather than an `async fn` so the app can hold the
/// provider as a trait object and hand it to spawned fetch tasks.
pub trait ListingProvider: Send + Sync {
    fn fetch(&self, filter: FilterCriteria) -> BoxFuture<'_, Result<Vec<Listing>, ProviderError>>;
}

// ============================================================================
// Test Fixtures
// ============================================================================

/// Shared listing builder for unit tests across the crate.
#[cfg(test)]
pub(crate) fn sample_listing(id: &str, city: &str, price: u64, kind: ListingKind) -> Listing {
    Listing {
        id: id.to_string(),
        title: format!("Listing {}", id),
        city: city.to_string(),
        location: format!("{} Central", city),
        price,
        currency: Some("AED".to_string()),
        kind,
        bedrooms: 2,
        bathrooms: 2,
        size_sqft: 950,
        video_url: Some(format!("https://cdn.example.com/{}.mp4", id)),
        thumbnail_url: None,
        clip_seconds: 15,
        likes: 120,
        saved: false,
        posted_at: None,
        broker: Broker {
            name: "Sara Haddad".to_string(),
            phone: Some("+971 50-123 4567".to_string()),
            photo_url: None,
            verified: true,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_url_strips_non_digits() {
        let listing = sample_listing("a", "Dubai", 4000, ListingKind::Apartment);
        assert_eq!(
            listing.broker.whatsapp_url().as_deref(),
            Some("https://wa.me/971501234567")
        );
    }

    #[test]
    fn test_whatsapp_url_none_without_phone() {
        let mut listing = sample_listing("a", "Dubai", 4000, ListingKind::Apartment);
        listing.broker.phone = None;
        assert_eq!(listing.broker.whatsapp_url(), None);
        listing.broker.phone = Some("ext.".to_string());
        assert_eq!(listing.broker.whatsapp_url(), None);
    }

    #[test]
    fn test_broker_handle_strips_whitespace() {
        let listing = sample_listing("a", "Dubai", 4000, ListingKind::Apartment);
        assert_eq!(listing.broker.handle(), "@SaraHaddad");
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&sample_listing("a", "Dubai", 1, ListingKind::Villa)));
    }

    #[test]
    fn test_city_filter_is_case_insensitive() {
        let criteria = FilterCriteria {
            city: Some("dubai".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&sample_listing("a", "Dubai", 4000, ListingKind::Apartment)));
        assert!(!criteria.matches(&sample_listing("b", "Abu Dhabi", 4000, ListingKind::Apartment)));
    }

    #[test]
    fn test_price_range_bounds_are_inclusive() {
        let criteria = FilterCriteria {
            price: PriceRange {
                min: Some(3000),
                max: Some(5000),
            },
            ..Default::default()
        };
        assert!(criteria.matches(&sample_listing("a", "Dubai", 3000, ListingKind::Apartment)));
        assert!(criteria.matches(&sample_listing("b", "Dubai", 5000, ListingKind::Apartment)));
        assert!(!criteria.matches(&sample_listing("c", "Dubai", 2999, ListingKind::Apartment)));
        assert!(!criteria.matches(&sample_listing("d", "Dubai", 5001, ListingKind::Apartment)));
    }

    #[test]
    fn test_kind_filter() {
        let criteria = FilterCriteria {
            kind: Some(ListingKind::Studio),
            ..Default::default()
        };
        assert!(criteria.matches(&sample_listing("a", "Dubai", 4000, ListingKind::Studio)));
        assert!(!criteria.matches(&sample_listing("b", "Dubai", 4000, ListingKind::Villa)));
    }

    #[test]
    fn test_listing_deserializes_with_defaults() {
        let json = r#"{
            "id": "l1",
            "title": "Marina View 2BR",
            "city": "Dubai",
            "location": "Dubai Marina",
            "price": 7500,
            "type": "apartment",
            "bedrooms": 2,
            "bathrooms": 2,
            "size_sqft": 1100,
            "broker": { "name": "Omar K" }
        }"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.kind, ListingKind::Apartment);
        assert_eq!(listing.clip_seconds, 15); // Default
        assert_eq!(listing.likes, 0);
        assert!(!listing.broker.verified);
    }
}
