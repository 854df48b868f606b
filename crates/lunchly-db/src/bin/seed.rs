//! # Seed Data Generator
//!
//! Populates the database with sample customers and reservations for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./lunchly.db (or $LUNCHLY_DB_PATH)
//! cargo run -p lunchly-db --bin seed
//!
//! # Specify database path
//! cargo run -p lunchly-db --bin seed -- --db ./data/lunchly.db
//! ```
//!
//! ## Generated Data
//! - One customer per entry in `CUSTOMERS`
//! - Between zero and five reservations each, spread over the next weeks,
//!   so the "best customers" ranking has ties and a customer with none

use chrono::{Duration, NaiveDate};
use lunchly_core::{Customer, Reservation};
use lunchly_db::{Database, DbConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// (first name, last name, phone, reservations to create)
const CUSTOMERS: &[(&str, &str, &str, u32)] = &[
    ("Jane", "Doe", "555-0100", 4),
    ("John", "Doyle", "555-0101", 2),
    ("Anita", "Bath", "555-0102", 5),
    ("Paul", "Ramírez", "555-0103", 1),
    ("Lucy", "O'Connor", "555-0104", 2),
    ("Chen", "Wei", "555-0105", 3),
    ("Amelie", "Müller", "555-0106", 0),
    ("Ravi", "Patel", "555-0107", 1),
    ("Grace", "Hopper", "555-0108", 3),
    ("Omar", "Haddad", "555-0109", 2),
    ("Sofia", "Rossi", "555-0110", 1),
    ("Ken", "Adams", "555-0111", 4),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut config = DbConfig::from_env()?;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Lunchly Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $LUNCHLY_DB_PATH or ./lunchly.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Lunchly Seed Data Generator");
    println!("==============================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;
    let service = db.customer_search();

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = service.count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let first_day = NaiveDate::from_ymd_opt(2024, 9, 2)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or("invalid seed start date")?;

    let reservations = db.reservations();
    let mut booked = 0;

    for (idx, (first, last, phone, visits)) in CUSTOMERS.iter().enumerate() {
        let mut customer = Customer::new(*first, *last, *phone, None);
        service.save(&mut customer).await?;

        for visit in 0..*visits {
            let start_at = first_day
                + Duration::days(i64::from(visit) * 7 + idx as i64)
                + Duration::hours(i64::from(visit % 3) * 2);
            let guests = 1 + (idx as i64 + i64::from(visit)) % 6;

            let mut reservation = Reservation::for_customer(&customer, start_at, guests, None)?;
            reservations.save(&mut reservation).await?;
            booked += 1;
        }

        info!(name = %customer.full_name(), visits = *visits, "Seeded customer");
    }

    println!();
    println!("✓ Created {} customers and {} reservations", CUSTOMERS.len(), booked);

    println!();
    println!("Verifying queries...");
    let matches = service.search("jane doyle").await?;
    println!("  Search 'jane doyle': {} results", matches.len());

    let best = service.top_customers().await?;
    if let Some(top) = best.first() {
        println!(
            "  Best customer: {} ({} reservations)",
            top.customer.full_name(),
            top.amount
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lunchly_db=trace` - Show trace for the database crate only
/// - Default: INFO, with debug for lunchly crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lunchly_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
