//! # Filter Form State Machine
//!
//! The filter panel edits a *draft* that is invisible to the engine until it
//! is applied. The committed criteria the engine filters with live in the
//! API's view state; this module only manages the draft lifecycle:
//!
//! ```text
//! Closed ──open──▶ Open { tab, draft }
//!   ▲                 │ edits mutate the draft only
//!   │                 │ reset clears the draft, stays open
//!   ├───apply─────────┤ parses + tags the draft, returns the criteria
//!   └───close─────────┘ discards the draft
//! ```
//!
//! Draft fields are raw strings, exactly what the form inputs hold. Parsing
//! happens once, at apply time; a field that does not parse as a number is
//! treated as unset rather than reported as an error.

use crate::engine::FilterCriteria;
use crate::model::ListingType;

/// The panel's own cars/real-estate sub-tab. Applied criteria are tagged
/// with it, which makes the tag a real `kind` constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Cars,
    RealEstate,
}

impl PanelTab {
    fn kind(self) -> ListingType {
        match self {
            PanelTab::Cars => ListingType::Car,
            PanelTab::RealEstate => ListingType::RealEstate,
        }
    }

    fn for_kind(kind: ListingType) -> Self {
        match kind {
            ListingType::Car => PanelTab::Cars,
            ListingType::RealEstate => PanelTab::RealEstate,
        }
    }
}

/// Unparsed form fields. Empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub price_min: String,
    pub price_max: String,
    pub location: String,
    pub category: String,
    pub year_min: String,
    pub year_max: String,
    pub mileage_max: String,
    pub fuel: String,
    pub transmission: String,
    pub rooms_min: String,
    pub rooms_max: String,
    pub area_min: String,
    pub area_max: String,
}

impl Draft {
    /// Pre-fill the form from previously committed criteria, keeping only
    /// the fields relevant to `tab` (plus the shared ones).
    fn from_committed(criteria: &FilterCriteria, tab: PanelTab) -> Self {
        let mut draft = Draft {
            price_min: text(criteria.price_min),
            price_max: text(criteria.price_max),
            location: criteria.location.clone().unwrap_or_default(),
            category: criteria.category.clone().unwrap_or_default(),
            ..Default::default()
        };
        match tab {
            PanelTab::Cars => {
                draft.year_min = text(criteria.year_min);
                draft.year_max = text(criteria.year_max);
                draft.mileage_max = text(criteria.mileage_max);
                draft.fuel = criteria.fuel.clone().unwrap_or_default();
                draft.transmission = criteria.transmission.clone().unwrap_or_default();
            }
            PanelTab::RealEstate => {
                draft.rooms_min = text(criteria.rooms_min);
                draft.rooms_max = text(criteria.rooms_max);
                draft.area_min = text(criteria.area_min);
                draft.area_max = text(criteria.area_max);
            }
        }
        draft
    }

    /// Parse the form into criteria tagged with `tab`. Malformed numbers
    /// become unset fields.
    fn parse(&self, tab: PanelTab) -> FilterCriteria {
        FilterCriteria {
            kind: Some(tab.kind()),
            price_min: number(&self.price_min),
            price_max: number(&self.price_max),
            location: word(&self.location),
            category: word(&self.category),
            year_min: number(&self.year_min),
            year_max: number(&self.year_max),
            mileage_max: number(&self.mileage_max),
            fuel: word(&self.fuel),
            transmission: word(&self.transmission),
            rooms_min: number(&self.rooms_min),
            rooms_max: number(&self.rooms_max),
            area_min: number(&self.area_min),
            area_max: number(&self.area_max),
        }
    }
}

fn text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn number<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

fn word(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PanelState {
    Closed,
    Open { tab: PanelTab, draft: Draft },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    state: PanelState,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open { .. })
    }

    /// Show the panel, pre-filling the draft from the last committed
    /// criteria (and picking the sub-tab from their tag). Opening an
    /// already-open panel keeps the current draft.
    pub fn open(&mut self, committed: Option<&FilterCriteria>) {
        if self.is_open() {
            return;
        }
        let tab = committed
            .and_then(|c| c.kind)
            .map(PanelTab::for_kind)
            .unwrap_or_default();
        let draft = committed
            .map(|c| Draft::from_committed(c, tab))
            .unwrap_or_default();
        self.state = PanelState::Open { tab, draft };
    }

    /// Switch the cars/real-estate sub-tab; field values stay as typed.
    pub fn select_tab(&mut self, new_tab: PanelTab) {
        if let PanelState::Open { tab, .. } = &mut self.state {
            *tab = new_tab;
        }
    }

    pub fn tab(&self) -> Option<PanelTab> {
        match &self.state {
            PanelState::Open { tab, .. } => Some(*tab),
            PanelState::Closed => None,
        }
    }

    /// The editable draft, while open.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        match &mut self.state {
            PanelState::Open { draft, .. } => Some(draft),
            PanelState::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match &self.state {
            PanelState::Open { draft, .. } => Some(draft),
            PanelState::Closed => None,
        }
    }

    /// Clear every field back to empty; the panel stays open.
    pub fn reset(&mut self) {
        if let PanelState::Open { draft, .. } = &mut self.state {
            *draft = Draft::default();
        }
    }

    /// Commit: parse the draft, tag it with the sub-tab, close the panel and
    /// hand the criteria to the caller. Returns `None` if the panel was not
    /// open.
    pub fn apply(&mut self) -> Option<FilterCriteria> {
        match std::mem::replace(&mut self.state, PanelState::Closed) {
            PanelState::Open { tab, draft } => Some(draft.parse(tab)),
            PanelState::Closed => None,
        }
    }

    /// Cancel: close without committing; the draft is discarded.
    pub fn close(&mut self) {
        self.state = PanelState::Closed;
    }
}
