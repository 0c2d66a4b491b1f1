use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

use tirgus::api::TirgusApi;
use tirgus::config::TirgusConfig;
use tirgus::engine::{AnnotatedListing, DashboardStats, TabCounts};
use tirgus::error::{Result, TirgusError};
use tirgus::favorites::Favorites;
use tirgus::listings::ListingBook;
use tirgus::model::{Listing, Notification, NotificationKind, Specs};
use tirgus::notifications::Notifications;
use tirgus::panel::PanelTab;
use tirgus::remote::LocalOnlySync;
use tirgus::seed::{self, SeedSource};
use tirgus::store::fs::FileStore;

mod args;
use args::{Cli, Commands, FilterFlags, TabArg};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

struct AppContext {
    api: TirgusApi<FileStore, LocalOnlySync>,
    config: TirgusConfig,
    data_dir: std::path::PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List {
            search,
            tab,
            filters,
        }) => handle_list(&mut ctx, search, tab, filters),
        Some(Commands::Stats) => handle_stats(&ctx),
        Some(Commands::Show { id }) => handle_show(&ctx, id),
        Some(Commands::Fav { id }) => handle_fav(&mut ctx, id),
        Some(Commands::Favorites) => handle_favorites(&ctx),
        Some(Commands::Notifications {
            read,
            clear,
            restore,
        }) => handle_notifications(&mut ctx, read, clear, restore),
        Some(Commands::Refresh) => handle_refresh(&mut ctx),
        Some(Commands::Hide { id }) => handle_hidden(&mut ctx, id, true),
        Some(Commands::Unhide { id }) => handle_hidden(&mut ctx, id, false),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, None, TabArg::All, FilterFlags::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("lv", "tirgus", "tirgus")
            .ok_or_else(|| TirgusError::Store("Could not determine a data directory".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = TirgusConfig::load(&data_dir).unwrap_or_default();
    let today = config
        .reference_date
        .unwrap_or_else(|| Utc::now().date_naive());

    let listings = ListingBook::open(FileStore::new(&data_dir), seed::listings());
    let favorites = Favorites::open(FileStore::new(&data_dir));
    let notifications = Notifications::open(FileStore::new(&data_dir), seed::notifications());
    let api = TirgusApi::new(
        listings,
        favorites,
        notifications,
        LocalOnlySync::new(),
        config.user.clone(),
        today,
    );

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn handle_list(
    ctx: &mut AppContext,
    search: Option<String>,
    tab: TabArg,
    filters: FilterFlags,
) -> Result<()> {
    if let Some(term) = search {
        ctx.api.set_search(term);
    }
    ctx.api.set_tab(tab.into());

    if filters.any() {
        ctx.api.open_filters();
        if tab == TabArg::RealEstate {
            ctx.api.select_filter_tab(PanelTab::RealEstate);
        }
        if let Some(draft) = ctx.api.filter_draft_mut() {
            fill_draft(draft, &filters);
        }
        ctx.api.apply_filters();
    }

    let view = ctx.api.view();
    let noun = match tab {
        TabArg::All => "listings",
        TabArg::Cars => "cars",
        TabArg::RealEstate => "properties",
    };
    println!(
        "{} {} found",
        view.filtered.len().to_string().bold(),
        noun
    );
    println!();
    print_listings(&view.filtered);
    Ok(())
}

fn fill_draft(draft: &mut tirgus::panel::Draft, filters: &FilterFlags) {
    let set = |target: &mut String, source: &Option<String>| {
        if let Some(value) = source {
            *target = value.clone();
        }
    };
    set(&mut draft.price_min, &filters.price_min);
    set(&mut draft.price_max, &filters.price_max);
    set(&mut draft.location, &filters.location);
    set(&mut draft.category, &filters.category);
    set(&mut draft.year_min, &filters.year_min);
    set(&mut draft.year_max, &filters.year_max);
    set(&mut draft.mileage_max, &filters.mileage_max);
    set(&mut draft.fuel, &filters.fuel);
    set(&mut draft.transmission, &filters.transmission);
    set(&mut draft.rooms_min, &filters.rooms_min);
    set(&mut draft.rooms_max, &filters.rooms_max);
    set(&mut draft.area_min, &filters.area_min);
    set(&mut draft.area_max, &filters.area_max);
}

fn handle_stats(ctx: &AppContext) -> Result<()> {
    let view = ctx.api.view();
    print_stats(&view.stats, &view.tab_counts);
    let unread = ctx.api.unread_count();
    if unread > 0 {
        println!();
        println!(
            "{}",
            format!("{} unread notification(s)", unread).yellow()
        );
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, id: i64) -> Result<()> {
    match ctx.api.listing(id) {
        Some(listing) => {
            print_listing_detail(listing, ctx.api.is_favorite(id));
            Ok(())
        }
        None => {
            println!("No listing with id {}.", id);
            println!("It may have been removed by its source.");
            Ok(())
        }
    }
}

fn handle_fav(ctx: &mut AppContext, id: i64) -> Result<()> {
    let title = ctx
        .api
        .listing(id)
        .map(|l| l.title.clone())
        .ok_or(TirgusError::ListingNotFound(id))?;

    ctx.api.toggle_favorite(id);
    if ctx.api.is_favorite(id) {
        println!("{} {}", "Saved:".green(), title);
    } else {
        println!("{} {}", "Removed:".yellow(), title);
    }
    Ok(())
}

fn handle_favorites(ctx: &AppContext) -> Result<()> {
    let view = ctx.api.view();
    let saved: Vec<AnnotatedListing<'_>> = view
        .annotated
        .iter()
        .filter(|entry| entry.is_favorite)
        .copied()
        .collect();

    if saved.is_empty() {
        println!("No favorites yet. Save one with `tirgus fav <id>`.");
        return Ok(());
    }
    println!("{} saved listing(s)", saved.len().to_string().bold());
    println!();
    print_listings(&saved);
    Ok(())
}

fn handle_notifications(
    ctx: &mut AppContext,
    read: Option<String>,
    clear: bool,
    restore: bool,
) -> Result<()> {
    if clear {
        ctx.api.clear_notifications();
        println!("Notifications cleared.");
        return Ok(());
    }
    if restore {
        ctx.api.restore_notifications(seed::notifications());
        println!("Demo notifications restored.");
        return Ok(());
    }
    if let Some(raw) = read {
        let id = Uuid::parse_str(&raw)
            .map_err(|_| TirgusError::Store(format!("'{}' is not a notification id", raw)))?;
        ctx.api.mark_notification_read(id);
        println!("Marked as read.");
        return Ok(());
    }

    let notifications = ctx.api.notifications();
    if notifications.is_empty() {
        println!("No notifications.");
        return Ok(());
    }
    for notification in notifications {
        print_notification(notification);
    }
    println!();
    println!("{} unread", ctx.api.unread_count());
    Ok(())
}

fn handle_refresh(ctx: &mut AppContext) -> Result<()> {
    let count = ctx.api.refresh_listings(&SeedSource::new())?;
    println!("Refreshed {} listings from the demo source.", count);
    Ok(())
}

fn handle_hidden(ctx: &mut AppContext, id: i64, hidden: bool) -> Result<()> {
    if ctx.api.listing(id).is_none() {
        return Err(TirgusError::ListingNotFound(id));
    }
    ctx.api.set_hidden(id, hidden);
    if hidden {
        println!("Listing {} is now hidden.", id);
    } else {
        println!("Listing {} is visible again.", id);
    }
    Ok(())
}

fn handle_config(
    ctx: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key.as_deref(), value) {
        (None, _) => {
            println!("user = {}", ctx.config.user);
            match ctx.config.reference_date {
                Some(date) => println!("reference-date = {}", date),
                None => println!("reference-date = (today)"),
            }
        }
        (Some("user"), None) => println!("user = {}", ctx.config.user),
        (Some("user"), Some(v)) => {
            ctx.config.user = v;
            ctx.config.save(&ctx.data_dir)?;
            println!("user = {}", ctx.config.user);
        }
        (Some("reference-date"), None) => match ctx.config.reference_date {
            Some(date) => println!("reference-date = {}", date),
            None => println!("reference-date = (today)"),
        },
        (Some("reference-date"), Some(v)) => {
            let date: NaiveDate = v
                .parse()
                .map_err(|_| TirgusError::Store(format!("'{}' is not a date (YYYY-MM-DD)", v)))?;
            ctx.config.reference_date = Some(date);
            ctx.config.save(&ctx.data_dir)?;
            println!("reference-date = {}", date);
        }
        (Some(other), _) => {
            println!("Unknown config key: {}", other);
        }
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const PRICE_WIDTH: usize = 12;
const LOCATION_WIDTH: usize = 18;
const FAV_MARKER: &str = "♥";

fn print_listings(entries: &[AnnotatedListing<'_>]) {
    if entries.is_empty() {
        println!("No listings found.");
        println!("Try adjusting your search or filters.");
        return;
    }

    for entry in entries {
        let listing = entry.listing;
        let idx_str = format!("{:>3}. ", listing.id);

        let price = format!("{} {}", listing.price, listing.currency);
        let location = truncate_to_width(&listing.location, LOCATION_WIDTH);
        let marker = if entry.is_favorite { FAV_MARKER } else { " " };

        let fixed = idx_str.width() + PRICE_WIDTH + LOCATION_WIDTH + 2 + 14;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let title = truncate_to_width(&listing.title, available);
        let padding = available.saturating_sub(title.width());

        let time_ago = format_time_ago(listing.date_posted);

        // Pad before coloring so the escape codes don't skew the columns.
        let price_padded = format!("{:>width$}", price, width = PRICE_WIDTH);
        let location_padded = format!("{:<width$}", location, width = LOCATION_WIDTH);

        println!(
            "{}{}{} {}  {} {} {}",
            idx_str,
            title.bold(),
            " ".repeat(padding),
            price_padded.green(),
            location_padded,
            if entry.is_favorite {
                marker.red()
            } else {
                marker.normal()
            },
            time_ago.dimmed(),
        );
    }
}

fn print_stats(stats: &DashboardStats, counts: &TabCounts) {
    println!("{}", "Dashboard".bold());
    println!("  Total listings     {}", stats.total_listings);
    println!("  New today          {}", stats.new_today);
    println!("  Saved              {}", stats.saved_count);
    println!("  Avg. car price     {} EUR", stats.average_price.cars);
    println!(
        "  Avg. property      {} EUR",
        stats.average_price.real_estate
    );
    println!();
    println!(
        "Tabs: all {} · cars {} · real estate {}",
        counts.all, counts.cars, counts.real_estate
    );
}

fn print_listing_detail(listing: &Listing, is_favorite: bool) {
    let marker = if is_favorite {
        format!(" {}", FAV_MARKER.red())
    } else {
        String::new()
    };
    println!("{}{}", listing.title.bold(), marker);
    println!("--------------------------------");
    println!("{} {}", listing.price.to_string().green(), listing.currency);
    println!("{} · {} · {}", listing.location, listing.category, listing.kind);
    println!();

    match &listing.specs {
        Specs::Car(car) => {
            println!("Year          {}", car.year);
            println!("Mileage       {} km", car.mileage);
            println!("Fuel          {}", car.fuel);
            println!("Transmission  {}", car.transmission);
            println!("Color         {}", car.color);
        }
        Specs::RealEstate(re) => {
            println!("Rooms         {}", re.rooms);
            println!("Area          {} m2", re.area);
            if let Some(floor) = re.floor {
                match re.total_floors {
                    Some(total) => println!("Floor         {}/{}", floor, total),
                    None => println!("Floor         {}", floor),
                }
            }
            if let Some(land) = re.land_area {
                println!("Land area     {} m2", land);
            }
            println!("Built         {}", re.year_built);
        }
    }

    println!();
    println!("{}", listing.description);

    if let Some(history) = &listing.price_history {
        println!();
        println!("{}", "Price history".bold());
        for point in history {
            println!("  {}  {} {}", point.date, point.price, listing.currency);
        }
    }

    println!();
    println!(
        "{}",
        format!(
            "Posted {} on {}, {} image(s)",
            listing.date_posted,
            listing.source,
            listing.images.len()
        )
        .dimmed()
    );
}

fn print_notification(notification: &Notification) {
    let marker = if notification.read {
        "  ".normal()
    } else {
        "● ".yellow()
    };
    let kind = match notification.kind {
        NotificationKind::NewListing => "new listing",
        NotificationKind::PriceChange => "price change",
        NotificationKind::System => "system",
    };
    let time_ago = format_time_ago(notification.created_at.date_naive());
    println!(
        "{}{} {} {}",
        marker,
        notification.title.bold(),
        format!("[{}]", kind).dimmed(),
        time_ago.dimmed()
    );
    println!("   {}", notification.message);
    println!("   {}", notification.id.to_string().dimmed());
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(date: NaiveDate) -> String {
    let now = Utc::now().date_naive();
    let days = (now - date).num_days().max(0) as u64;
    let formatter = timeago::Formatter::new();
    formatter.convert(std::time::Duration::from_secs(days * 24 * 60 * 60))
}
