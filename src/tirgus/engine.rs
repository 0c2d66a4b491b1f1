//! # Aggregation & Filter Engine
//!
//! One pure function, [`derive_view`], turns the raw inputs (listings, the
//! favorite id set, search text, the active tab and the committed filter
//! criteria) into everything a view needs: annotated listings, the filtered
//! subset, dashboard statistics and per-tab counts.
//!
//! The engine holds no state and performs no I/O. All four outputs are
//! produced in a single call from a single set of inputs, so a renderer can
//! never pair new search text with a stale favorite set or vice versa. Empty
//! results are ordinary outputs, not errors.
//!
//! Hidden listings are dropped before anything else happens; every output,
//! including the dashboard totals and the tab badges, describes the visible
//! collection only.
//!
//! The filter pipeline runs in a fixed order over the annotated set:
//! free-text search, then tab, then advanced criteria. Statistics and tab
//! counts are computed over the *unfiltered* annotated set: the dashboard
//! reports global state, and switching tabs never changes the badge numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Listing, ListingId, ListingType, Specs};

/// The coarse type partition above the listing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    #[default]
    All,
    Cars,
    RealEstate,
}

impl Tab {
    fn admits(self, kind: ListingType) -> bool {
        match self {
            Tab::All => true,
            Tab::Cars => kind == ListingType::Car,
            Tab::RealEstate => kind == ListingType::RealEstate,
        }
    }
}

/// Committed advanced-filter criteria. Every field is optional; an unset
/// field imposes no constraint, and a listing passes only if *all* set
/// fields pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub kind: Option<ListingType>,
    pub price_min: Option<u64>,
    pub price_max: Option<u64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub mileage_max: Option<u32>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub rooms_min: Option<u32>,
    pub rooms_max: Option<u32>,
    pub area_min: Option<u32>,
    pub area_max: Option<u32>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `listing` satisfies every set field. Spec-dependent fields
    /// (year, mileage, fuel, transmission on cars; rooms, area on real
    /// estate) are a non-match when the listing's specs variant does not
    /// carry them.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(kind) = self.kind {
            if listing.kind != kind {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if listing.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if listing.price > max {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ignore_case(&listing.location, location) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !listing.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        self.matches_car_fields(listing) && self.matches_real_estate_fields(listing)
    }

    fn wants_car_fields(&self) -> bool {
        self.year_min.is_some()
            || self.year_max.is_some()
            || self.mileage_max.is_some()
            || self.fuel.is_some()
            || self.transmission.is_some()
    }

    fn matches_car_fields(&self, listing: &Listing) -> bool {
        if !self.wants_car_fields() {
            return true;
        }
        let Specs::Car(car) = &listing.specs else {
            return false;
        };
        if let Some(min) = self.year_min {
            if car.year < min {
                return false;
            }
        }
        if let Some(max) = self.year_max {
            if car.year > max {
                return false;
            }
        }
        if let Some(max) = self.mileage_max {
            if car.mileage > max {
                return false;
            }
        }
        if let Some(fuel) = &self.fuel {
            if !car.fuel.eq_ignore_ascii_case(fuel) {
                return false;
            }
        }
        if let Some(transmission) = &self.transmission {
            if !car.transmission.eq_ignore_ascii_case(transmission) {
                return false;
            }
        }
        true
    }

    fn wants_real_estate_fields(&self) -> bool {
        self.rooms_min.is_some()
            || self.rooms_max.is_some()
            || self.area_min.is_some()
            || self.area_max.is_some()
    }

    fn matches_real_estate_fields(&self, listing: &Listing) -> bool {
        if !self.wants_real_estate_fields() {
            return true;
        }
        let Specs::RealEstate(re) = &listing.specs else {
            return false;
        };
        if let Some(min) = self.rooms_min {
            if re.rooms < min {
                return false;
            }
        }
        if let Some(max) = self.rooms_max {
            if re.rooms > max {
                return false;
            }
        }
        if let Some(min) = self.area_min {
            if re.area < min {
                return false;
            }
        }
        if let Some(max) = self.area_max {
            if re.area > max {
                return false;
            }
        }
        true
    }
}

/// The user-controlled view inputs: search text, active tab and committed
/// criteria. Mutated only by the API facade; the engine just reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub search: String,
    pub tab: Tab,
    pub criteria: Option<FilterCriteria>,
}

/// A listing plus its derived per-user flags. A view, never persisted;
/// recomputed whenever the listing set or the favorite set changes.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedListing<'a> {
    pub listing: &'a Listing,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AveragePrice {
    pub cars: u64,
    pub real_estate: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total_listings: usize,
    pub new_today: usize,
    pub saved_count: usize,
    pub average_price: AveragePrice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabCounts {
    pub all: usize,
    pub cars: usize,
    pub real_estate: usize,
}

/// Everything derived in one pass. `filtered` is always a subset of
/// `annotated`; `stats` and `tab_counts` describe the full annotated set.
#[derive(Debug, Clone)]
pub struct DerivedView<'a> {
    pub annotated: Vec<AnnotatedListing<'a>>,
    pub filtered: Vec<AnnotatedListing<'a>>,
    pub stats: DashboardStats,
    pub tab_counts: TabCounts,
}

/// Recompute the four derived outputs from scratch. `today` is the reference
/// date for the dashboard's new-today figure.
pub fn derive_view<'a>(
    listings: &'a [Listing],
    favorite_ids: &[ListingId],
    view: &ViewState,
    today: NaiveDate,
) -> DerivedView<'a> {
    let annotated: Vec<AnnotatedListing<'a>> = listings
        .iter()
        .filter(|l| !l.hidden)
        .map(|listing| AnnotatedListing {
            listing,
            is_favorite: favorite_ids.contains(&listing.id),
        })
        .collect();

    let stats = dashboard_stats(&annotated, today);
    let tab_counts = count_tabs(&annotated);

    let search = view.search.to_lowercase();
    let criteria = view.criteria.as_ref().filter(|c| !c.is_empty());

    let filtered = annotated
        .iter()
        .filter(|entry| search.is_empty() || matches_search(entry.listing, &search))
        .filter(|entry| view.tab.admits(entry.listing.kind))
        .filter(|entry| criteria.map_or(true, |c| c.matches(entry.listing)))
        .copied()
        .collect();

    DerivedView {
        annotated,
        filtered,
        stats,
        tab_counts,
    }
}

/// Case-insensitive substring match over title, location and description.
/// `needle` must already be lowercased.
fn matches_search(listing: &Listing, needle: &str) -> bool {
    listing.title.to_lowercase().contains(needle)
        || listing.location.to_lowercase().contains(needle)
        || listing.description.to_lowercase().contains(needle)
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn dashboard_stats(annotated: &[AnnotatedListing<'_>], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_listings: annotated.len(),
        new_today: annotated
            .iter()
            .filter(|entry| entry.listing.date_posted == today)
            .count(),
        saved_count: annotated.iter().filter(|entry| entry.is_favorite).count(),
        average_price: AveragePrice {
            cars: mean_price(annotated, ListingType::Car),
            real_estate: mean_price(annotated, ListingType::RealEstate),
        },
    }
}

/// Arithmetic mean price of the given partition, rounded to the nearest
/// whole currency unit; 0 when the partition is empty.
fn mean_price(annotated: &[AnnotatedListing<'_>], kind: ListingType) -> u64 {
    let prices: Vec<u64> = annotated
        .iter()
        .filter(|entry| entry.listing.kind == kind)
        .map(|entry| entry.listing.price)
        .collect();
    if prices.is_empty() {
        return 0;
    }
    let sum: u64 = prices.iter().sum();
    (sum as f64 / prices.len() as f64).round() as u64
}

fn count_tabs(annotated: &[AnnotatedListing<'_>]) -> TabCounts {
    TabCounts {
        all: annotated.len(),
        cars: annotated
            .iter()
            .filter(|entry| entry.listing.kind == ListingType::Car)
            .count(),
        real_estate: annotated
            .iter()
            .filter(|entry| entry.listing.kind == ListingType::RealEstate)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn titles<'a>(entries: &'a [AnnotatedListing<'a>]) -> Vec<&'a str> {
        entries.iter().map(|e| e.listing.title.as_str()).collect()
    }

    fn view_with(search: &str, tab: Tab, criteria: Option<FilterCriteria>) -> ViewState {
        ViewState {
            search: search.to_string(),
            tab,
            criteria,
        }
    }

    #[test]
    fn annotation_reflects_the_favorite_set() {
        let listings = seed::listings();
        let favorites = vec![2, 4];
        let view = derive_view(&listings, &favorites, &ViewState::default(), seed::reference_date());

        for entry in &view.annotated {
            assert_eq!(entry.is_favorite, favorites.contains(&entry.listing.id));
        }
        assert_eq!(view.stats.saved_count, 2);
    }

    #[test]
    fn no_filters_passes_everything_through() {
        let listings = seed::listings();
        let view = derive_view(&listings, &[], &ViewState::default(), seed::reference_date());
        assert_eq!(view.filtered.len(), view.annotated.len());
    }

    #[test]
    fn search_matches_title_location_and_description() {
        let listings = seed::listings();
        let view = derive_view(
            &listings,
            &[],
            &view_with("riga", Tab::All, None),
            seed::reference_date(),
        );
        // "Riga" and "Riga Old Town" locations match; "Daugavpils" does not.
        assert_eq!(
            titles(&view.filtered),
            vec!["BMW X5 3.0d xDrive", "Modern Apartment in Old Town"]
        );

        let view = derive_view(
            &listings,
            &[],
            &view_with("BEACH", Tab::All, None),
            seed::reference_date(),
        );
        // Description match, case-insensitive.
        assert_eq!(titles(&view.filtered), vec!["Family House with Garden"]);
    }

    #[test]
    fn tab_narrows_to_one_type() {
        let listings = seed::listings();
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::Cars, None),
            seed::reference_date(),
        );
        assert_eq!(view.tab_counts.cars, 2);
        assert_eq!(
            titles(&view.filtered),
            vec!["BMW X5 3.0d xDrive", "Audi A4 2.0 TDI"]
        );
    }

    #[test]
    fn price_window_selects_exactly_the_bmw() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            price_min: Some(20_000),
            price_max: Some(30_000),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["BMW X5 3.0d xDrive"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            price_min: Some(18_500),
            price_max: Some(18_500),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["Audi A4 2.0 TDI"]);
    }

    #[test]
    fn category_matches_exactly_and_case_insensitively() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            category: Some("suv".into()),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["BMW X5 3.0d xDrive"]);
    }

    #[test]
    fn location_criterion_is_a_contains_match() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            location: Some("old town".into()),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["Modern Apartment in Old Town"]);
    }

    #[test]
    fn car_criteria_never_match_real_estate() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            mileage_max: Some(1_000_000),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(
            titles(&view.filtered),
            vec!["BMW X5 3.0d xDrive", "Audi A4 2.0 TDI"]
        );
    }

    #[test]
    fn spec_criteria_combine_with_and_semantics() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            fuel: Some("diesel".into()),
            transmission: Some("manual".into()),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["Audi A4 2.0 TDI"]);
    }

    #[test]
    fn rooms_and_area_bounds_apply_to_real_estate() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            rooms_min: Some(3),
            area_min: Some(100),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(titles(&view.filtered), vec!["Family House with Garden"]);
    }

    #[test]
    fn kind_tag_restricts_to_the_tagged_type() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            kind: Some(crate::model::ListingType::RealEstate),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(criteria)),
            seed::reference_date(),
        );
        assert_eq!(
            titles(&view.filtered),
            vec!["Modern Apartment in Old Town", "Family House with Garden"]
        );
    }

    #[test]
    fn empty_criteria_impose_no_constraint() {
        let listings = seed::listings();
        let view = derive_view(
            &listings,
            &[],
            &view_with("", Tab::All, Some(FilterCriteria::default())),
            seed::reference_date(),
        );
        assert_eq!(view.filtered.len(), 4);
    }

    #[test]
    fn filtered_is_always_a_subset_of_annotated() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            price_max: Some(100_000),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[1],
            &view_with("a", Tab::Cars, Some(criteria)),
            seed::reference_date(),
        );
        for entry in &view.filtered {
            assert!(view
                .annotated
                .iter()
                .any(|a| a.listing.id == entry.listing.id));
        }
    }

    #[test]
    fn stats_and_tab_counts_ignore_the_filters() {
        let listings = seed::listings();
        let narrow = view_with(
            "bmw",
            Tab::Cars,
            Some(FilterCriteria {
                price_max: Some(1),
                ..Default::default()
            }),
        );
        let narrowed = derive_view(&listings, &[], &narrow, seed::reference_date());
        let unfiltered = derive_view(&listings, &[], &ViewState::default(), seed::reference_date());

        assert!(narrowed.filtered.is_empty());
        assert_eq!(narrowed.stats, unfiltered.stats);
        assert_eq!(narrowed.tab_counts, unfiltered.tab_counts);
        assert_eq!(narrowed.tab_counts.all, 4);
    }

    #[test]
    fn dashboard_numbers_match_the_seed() {
        let listings = seed::listings();
        let view = derive_view(&listings, &[2], &ViewState::default(), seed::reference_date());

        assert_eq!(view.stats.total_listings, 4);
        // Only the BMW was posted on the reference date.
        assert_eq!(view.stats.new_today, 1);
        assert_eq!(view.stats.saved_count, 1);
        // (25000 + 18500) / 2 = 21750, (150000 + 280000) / 2 = 215000
        assert_eq!(view.stats.average_price.cars, 21_750);
        assert_eq!(view.stats.average_price.real_estate, 215_000);
    }

    #[test]
    fn average_price_is_zero_for_an_empty_partition() {
        let listings: Vec<_> = seed::listings()
            .into_iter()
            .filter(|l| l.kind == ListingType::RealEstate)
            .collect();
        let view = derive_view(&listings, &[], &ViewState::default(), seed::reference_date());
        assert_eq!(view.stats.average_price.cars, 0);
        assert_eq!(view.stats.average_price.real_estate, 215_000);
    }

    #[test]
    fn mean_price_rounds_to_the_nearest_unit() {
        let mut listings = seed::listings();
        // Make the car partition sum odd: (25000 + 18501) / 2 = 21750.5
        listings[2].price = 18_501;
        let view = derive_view(&listings, &[], &ViewState::default(), seed::reference_date());
        assert_eq!(view.stats.average_price.cars, 21_751);
    }

    #[test]
    fn hidden_listings_are_invisible_everywhere() {
        let mut listings = seed::listings();
        listings[0].hidden = true;
        let view = derive_view(&listings, &[1], &ViewState::default(), seed::reference_date());

        assert_eq!(view.stats.total_listings, 3);
        assert_eq!(view.tab_counts.cars, 1);
        assert_eq!(view.stats.saved_count, 0);
        assert!(view
            .filtered
            .iter()
            .all(|entry| entry.listing.id != 1));
    }

    #[test]
    fn search_tab_and_criteria_stack_up() {
        let listings = seed::listings();
        let criteria = FilterCriteria {
            price_min: Some(20_000),
            ..Default::default()
        };
        let view = derive_view(
            &listings,
            &[],
            &view_with("riga", Tab::Cars, Some(criteria)),
            seed::reference_date(),
        );
        // "riga" matches listings 1 and 2; the cars tab drops 2; the price
        // floor keeps 1.
        assert_eq!(titles(&view.filtered), vec!["BMW X5 3.0d xDrive"]);
    }
}
