use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable numeric identifier of a listing. Assigned by whichever source the
/// listing came from; never reused for the lifetime of the record.
pub type ListingId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListingType {
    Car,
    RealEstate,
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingType::Car => write!(f, "car"),
            ListingType::RealEstate => write!(f, "real-estate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarSpecs {
    pub year: i32,
    pub mileage: u32,
    pub fuel: String,
    pub transmission: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateSpecs {
    pub rooms: u32,
    /// Living area in square meters.
    pub area: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<u32>,
    pub year_built: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_area: Option<u32>,
}

/// Type-specific listing attributes.
///
/// On the wire this is the flat object the sources emit; the two variants
/// have disjoint required fields, so untagged deserialization is unambiguous.
/// In code the variant always agrees with [`Listing::kind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Specs {
    Car(CarSpecs),
    RealEstate(RealEstateSpecs),
}

/// One entry in a listing's price history, chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: u64,
    pub date: NaiveDate,
}

/// A single car or real-estate posting.
///
/// Listings are created by seed data or a remote source and only decorated
/// by this crate; nothing here creates or deletes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub price: u64,
    pub currency: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: ListingType,
    pub category: String,
    pub specs: Specs,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: String,
    pub date_posted: NaiveDate,
    /// Origin site label, e.g. "ss.com".
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_history: Option<Vec<PricePoint>>,
    /// Administrative visibility flag. Hidden listings never reach a view.
    #[serde(default)]
    pub hidden: bool,
}

impl Listing {
    pub fn car_specs(&self) -> Option<&CarSpecs> {
        match &self.specs {
            Specs::Car(specs) => Some(specs),
            Specs::RealEstate(_) => None,
        }
    }

    pub fn real_estate_specs(&self) -> Option<&RealEstateSpecs> {
        match &self.specs {
            Specs::RealEstate(specs) => Some(specs),
            Specs::Car(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    NewListing,
    PriceChange,
    System,
}

/// An alert shown to the user. `listing_id` is a weak reference: the listing
/// it points at may have been removed since the alert was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_id: Option<ListingId>,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        listing_id: Option<ListingId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            created_at: Utc::now(),
            listing_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_car() -> Listing {
        Listing {
            id: 7,
            title: "VW Golf 1.6".into(),
            price: 9500,
            currency: "EUR".into(),
            location: "Liepaja".into(),
            kind: ListingType::Car,
            category: "Hatchback".into(),
            specs: Specs::Car(CarSpecs {
                year: 2015,
                mileage: 140_000,
                fuel: "Petrol".into(),
                transmission: "Manual".into(),
                color: "Blue".into(),
            }),
            images: vec![],
            description: "One owner".into(),
            date_posted: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            source: "ss.com".into(),
            price_history: None,
            hidden: false,
        }
    }

    #[test]
    fn listing_type_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ListingType::RealEstate).unwrap(),
            "\"real-estate\""
        );
        let parsed: ListingType = serde_json::from_str("\"car\"").unwrap();
        assert_eq!(parsed, ListingType::Car);
    }

    #[test]
    fn listing_roundtrips_through_json() {
        let listing = sample_car();
        let json = serde_json::to_string(&listing).unwrap();
        let parsed: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, listing);
    }

    #[test]
    fn specs_variant_is_picked_from_the_fields() {
        let json = r#"{"rooms":3,"area":80,"floor":2,"totalFloors":5,"yearBuilt":1998}"#;
        let specs: Specs = serde_json::from_str(json).unwrap();
        assert!(matches!(specs, Specs::RealEstate(_)));

        let json = r#"{"year":2019,"mileage":65000,"fuel":"Diesel","transmission":"Manual","color":"Silver"}"#;
        let specs: Specs = serde_json::from_str(json).unwrap();
        assert!(matches!(specs, Specs::Car(_)));
    }

    #[test]
    fn real_estate_specs_tolerate_missing_optional_fields() {
        // The house seed has land area but no floor information.
        let json = r#"{"rooms":5,"area":180,"landArea":800,"yearBuilt":2005}"#;
        let specs: Specs = serde_json::from_str(json).unwrap();
        match specs {
            Specs::RealEstate(re) => {
                assert_eq!(re.land_area, Some(800));
                assert_eq!(re.floor, None);
            }
            Specs::Car(_) => panic!("parsed house specs as a car"),
        }
    }

    #[test]
    fn new_notification_starts_unread() {
        let n = Notification::new("Price drop", "now cheaper", NotificationKind::PriceChange, Some(2));
        assert!(!n.read);
        assert_eq!(n.listing_id, Some(2));
    }
}
