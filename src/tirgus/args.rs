use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use tirgus::engine::Tab;

/// Returns the version string, including git metadata for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "tirgus")]
#[command(version = get_version())]
#[command(about = "Local-first classifieds browser for cars and real estate", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted snapshots and config
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TabArg {
    #[default]
    All,
    Cars,
    RealEstate,
}

impl std::fmt::Display for TabArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabArg::All => write!(f, "all"),
            TabArg::Cars => write!(f, "cars"),
            TabArg::RealEstate => write!(f, "real-estate"),
        }
    }
}

impl From<TabArg> for Tab {
    fn from(tab: TabArg) -> Self {
        match tab {
            TabArg::All => Tab::All,
            TabArg::Cars => Tab::Cars,
            TabArg::RealEstate => Tab::RealEstate,
        }
    }
}

/// Advanced filter flags, mirroring the filter form. All values are taken
/// as typed; malformed numbers mean "no constraint".
#[derive(Args, Debug, Default, Clone)]
pub struct FilterFlags {
    /// Minimum price
    #[arg(long, value_name = "EUR")]
    pub price_min: Option<String>,

    /// Maximum price
    #[arg(long, value_name = "EUR")]
    pub price_max: Option<String>,

    /// Location contains
    #[arg(long)]
    pub location: Option<String>,

    /// Category (SUV, Sedan, Apartment, House, ...)
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum model year (cars)
    #[arg(long, value_name = "YEAR")]
    pub year_min: Option<String>,

    /// Maximum model year (cars)
    #[arg(long, value_name = "YEAR")]
    pub year_max: Option<String>,

    /// Maximum mileage in km (cars)
    #[arg(long, value_name = "KM")]
    pub mileage_max: Option<String>,

    /// Fuel type (cars)
    #[arg(long)]
    pub fuel: Option<String>,

    /// Transmission (cars)
    #[arg(long)]
    pub transmission: Option<String>,

    /// Minimum number of rooms (real estate)
    #[arg(long)]
    pub rooms_min: Option<String>,

    /// Maximum number of rooms (real estate)
    #[arg(long)]
    pub rooms_max: Option<String>,

    /// Minimum area in m2 (real estate)
    #[arg(long, value_name = "M2")]
    pub area_min: Option<String>,

    /// Maximum area in m2 (real estate)
    #[arg(long, value_name = "M2")]
    pub area_max: Option<String>,
}

impl FilterFlags {
    pub fn any(&self) -> bool {
        self.price_min.is_some()
            || self.price_max.is_some()
            || self.location.is_some()
            || self.category.is_some()
            || self.year_min.is_some()
            || self.year_max.is_some()
            || self.mileage_max.is_some()
            || self.fuel.is_some()
            || self.transmission.is_some()
            || self.rooms_min.is_some()
            || self.rooms_max.is_some()
            || self.area_min.is_some()
            || self.area_max.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List listings, optionally searched, tabbed and filtered
    #[command(alias = "ls")]
    List {
        /// Free-text search over title, location and description
        #[arg(short, long)]
        search: Option<String>,

        /// Listing tab
        #[arg(short, long, value_enum, default_value_t = TabArg::All)]
        tab: TabArg,

        #[command(flatten)]
        filters: FilterFlags,
    },

    /// Show the dashboard statistics and tab counts
    Stats,

    /// Show one listing in full
    #[command(alias = "v")]
    Show {
        /// Listing id
        id: i64,
    },

    /// Toggle a listing as favorite
    #[command(alias = "f")]
    Fav {
        /// Listing id
        id: i64,
    },

    /// List favorited listings
    Favorites,

    /// Show notifications
    #[command(alias = "n")]
    Notifications {
        /// Mark one notification read
        #[arg(long, value_name = "ID")]
        read: Option<String>,

        /// Clear all notifications
        #[arg(long)]
        clear: bool,

        /// Restore the demo notification set
        #[arg(long)]
        restore: bool,
    },

    /// Re-fetch listings from the configured source
    Refresh,

    /// Hide a listing from every view (administrative)
    Hide {
        /// Listing id
        id: i64,
    },

    /// Undo hide (administrative)
    Unhide {
        /// Listing id
        id: i64,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (user, reference-date)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
