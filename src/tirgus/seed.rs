//! Bundled demo data: the same four postings and two alerts every fresh
//! profile starts with. Listings are deterministic; notification ids are
//! minted on each call, so callers that need equality must hold on to the
//! returned value rather than re-seeding.

use chrono::{DateTime, NaiveDate, Utc};

use crate::model::{
    CarSpecs, Listing, ListingType, Notification, NotificationKind, PricePoint, RealEstateSpecs,
    Specs,
};
use crate::remote::ListingSource;
use crate::error::Result;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed date literal")
}

/// The demo listing set.
pub fn listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "BMW X5 3.0d xDrive".into(),
            price: 25_000,
            currency: "EUR".into(),
            location: "Riga".into(),
            kind: ListingType::Car,
            category: "SUV".into(),
            specs: Specs::Car(CarSpecs {
                year: 2018,
                mileage: 95_000,
                fuel: "Diesel".into(),
                transmission: "Automatic".into(),
                color: "Black".into(),
            }),
            images: vec!["https://images.pexels.com/photos/120049/pexels-photo-120049.jpeg".into()],
            description: "Excellent condition BMW X5 with full service history".into(),
            date_posted: date(2024, 1, 15),
            source: "ss.com".into(),
            price_history: Some(vec![
                PricePoint {
                    price: 27_000,
                    date: date(2024, 1, 1),
                },
                PricePoint {
                    price: 25_000,
                    date: date(2024, 1, 15),
                },
            ]),
            hidden: false,
        },
        Listing {
            id: 2,
            title: "Modern Apartment in Old Town".into(),
            price: 150_000,
            currency: "EUR".into(),
            location: "Riga Old Town".into(),
            kind: ListingType::RealEstate,
            category: "Apartment".into(),
            specs: Specs::RealEstate(RealEstateSpecs {
                rooms: 2,
                area: 75,
                floor: Some(3),
                total_floors: Some(5),
                year_built: 2010,
                land_area: None,
            }),
            images: vec!["https://images.pexels.com/photos/439391/pexels-photo-439391.jpeg".into()],
            description: "Beautiful 2-bedroom apartment with city views".into(),
            date_posted: date(2024, 1, 10),
            source: "city24.lv".into(),
            price_history: None,
            hidden: false,
        },
        Listing {
            id: 3,
            title: "Audi A4 2.0 TDI".into(),
            price: 18_500,
            currency: "EUR".into(),
            location: "Daugavpils".into(),
            kind: ListingType::Car,
            category: "Sedan".into(),
            specs: Specs::Car(CarSpecs {
                year: 2019,
                mileage: 65_000,
                fuel: "Diesel".into(),
                transmission: "Manual".into(),
                color: "Silver".into(),
            }),
            images: vec!["https://images.pexels.com/photos/168938/pexels-photo-168938.jpeg".into()],
            description: "Well maintained Audi A4 with low mileage".into(),
            date_posted: date(2024, 1, 12),
            source: "auto24.lv".into(),
            price_history: None,
            hidden: false,
        },
        Listing {
            id: 4,
            title: "Family House with Garden".into(),
            price: 280_000,
            currency: "EUR".into(),
            location: "Jurmala".into(),
            kind: ListingType::RealEstate,
            category: "House".into(),
            specs: Specs::RealEstate(RealEstateSpecs {
                rooms: 5,
                area: 180,
                floor: None,
                total_floors: None,
                year_built: 2005,
                land_area: Some(800),
            }),
            images: vec!["https://images.pexels.com/photos/106399/pexels-photo-106399.jpeg".into()],
            description: "Spacious family house near the beach".into(),
            date_posted: date(2024, 1, 8),
            source: "ss.com".into(),
            price_history: None,
            hidden: false,
        },
    ]
}

/// The date the demo data was "posted" around; pinning the reference date to
/// this makes the dashboard's new-today figure reproducible.
pub fn reference_date() -> NaiveDate {
    date(2024, 1, 15)
}

fn timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("seed timestamp literal")
}

/// The demo notification set: one unread system alert, one already-read
/// price-change alert.
pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            read: false,
            created_at: timestamp("2024-01-15T10:30:00Z"),
            ..Notification::new(
                "Listing deleted",
                "A listing you favorited has been deleted",
                NotificationKind::System,
                Some(1),
            )
        },
        Notification {
            read: true,
            created_at: timestamp("2024-01-14T15:20:00Z"),
            ..Notification::new(
                "Price Drop Alert",
                "The price for \"Modern Apartment in Old Town\" has dropped by \u{20ac}5,000",
                NotificationKind::PriceChange,
                Some(2),
            )
        },
    ]
}

/// A [`ListingSource`] serving the bundled demo data; stands in for the
/// marketplace backend when none is configured.
#[derive(Debug, Default)]
pub struct SeedSource;

impl SeedSource {
    pub fn new() -> Self {
        Self
    }
}

impl ListingSource for SeedSource {
    fn fetch_all(&self) -> Result<Vec<Listing>> {
        Ok(listings())
    }

    fn fetch_by_id(&self, id: crate::model::ListingId) -> Result<Option<Listing>> {
        Ok(listings().into_iter().find(|l| l.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_has_two_cars_and_two_properties() {
        let listings = listings();
        assert_eq!(listings.len(), 4);
        assert_eq!(
            listings.iter().filter(|l| l.kind == ListingType::Car).count(),
            2
        );
        assert_eq!(
            listings
                .iter()
                .filter(|l| l.kind == ListingType::RealEstate)
                .count(),
            2
        );
    }

    #[test]
    fn seed_ids_are_unique() {
        let mut ids: Vec<_> = listings().iter().map(|l| l.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn seed_notifications_have_one_unread() {
        let seeded = notifications();
        assert_eq!(seeded.iter().filter(|n| !n.read).count(), 1);
    }

    #[test]
    fn seed_source_resolves_by_id() {
        let source = SeedSource::new();
        assert_eq!(source.fetch_by_id(3).unwrap().unwrap().title, "Audi A4 2.0 TDI");
        assert!(source.fetch_by_id(99).unwrap().is_none());
    }
}
