//! Listing Controller Demo
//!
//! Drives the listing controller through a scripted session:
//! - Catalogue load
//! - Search, then a second search that supersedes it before it settles
//! - Page change
//! - "Show all events" reset
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use std::sync::Arc;
use std::time::Duration;
use storefront::{
    Config, ListingAction, ListingStore, ListingView, StaticEventSource,
    catalog::CategoryFilter,
    listing::ListingEnvironment,
};
use storefront_core::environment::SystemClock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_view(step: &str, view: &ListingView) {
    println!("\n{step}");
    println!("   phase:   {:?}", view.phase);
    println!("   mode:    {:?}  query: {:?}  category: {}", view.mode, view.query, view.category);
    println!(
        "   results: {} (page {}/{})",
        view.total_results, view.controls.current, view.controls.total_pages
    );
    for event in &view.events {
        println!("     - {} {} [{}] {}", event.date, event.name, event.category.label(), event.price);
    }
    if view.show_all_available {
        println!("   no events found, \"show all events\" offered");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n============================================");
    println!("   Storefront - Listing Controller Demo");
    println!("============================================");

    let config = Config::from_env();
    let delays = config.listing.delays();
    let settle = delays.search.max(delays.page).max(delays.show_all) + Duration::from_millis(100);

    let environment = ListingEnvironment::new(
        Arc::new(StaticEventSource::sample()?),
        Arc::new(SystemClock),
        delays,
    );
    let listing = ListingStore::new(environment, config.listing.page_size);

    // 1. Load
    let phase = listing.load(Duration::from_secs(5)).await?;
    println!("\n1. Catalogue loaded: {phase:?}");
    print_view("   Upcoming events", &listing.view().await);

    // 2. Search
    listing
        .dispatch(ListingAction::Search {
            query: "festival".to_string(),
            category: CategoryFilter::All,
        })
        .await?;
    print_view("2. Searching \"festival\" (pending)", &listing.view().await);
    tokio::time::sleep(settle).await;
    print_view("   Settled", &listing.view().await);

    // 3. Superseded search: only the second one is applied
    listing
        .dispatch(ListingAction::Search {
            query: "jazz".to_string(),
            category: CategoryFilter::All,
        })
        .await?;
    listing
        .dispatch(ListingAction::Search {
            query: String::new(),
            category: CategoryFilter::parse("sports"),
        })
        .await?;
    tokio::time::sleep(settle).await;
    print_view("3. \"jazz\" superseded by category \"sports\"", &listing.view().await);

    // 4. Empty search
    listing
        .dispatch(ListingAction::Search {
            query: "opera".to_string(),
            category: CategoryFilter::All,
        })
        .await?;
    tokio::time::sleep(settle).await;
    print_view("4. Searching \"opera\"", &listing.view().await);

    // 5. Show all, then page 2
    listing.dispatch(ListingAction::ShowAll).await?;
    tokio::time::sleep(settle).await;
    print_view("5. Show all events", &listing.view().await);

    listing.dispatch(ListingAction::ChangePage { page: 2 }).await?;
    tokio::time::sleep(settle).await;
    print_view("6. Page 2", &listing.view().await);

    listing.shutdown(Duration::from_secs(5)).await?;
    println!("\n✓ Demo complete\n");
    Ok(())
}
