//! # Seed Data Generator
//!
//! Populates the database with sample customers and addresses for
//! development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 customers (default)
//! cargo run -p clientele-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p clientele-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p clientele-db --bin seed -- --db ./data/clientele.db
//! ```
//!
//! Each customer gets one to three addresses in their home city.

use std::env;
use std::time::Instant;

use clientele_core::{AddressInput, CustomerFilter, CustomerInput, NewAddress};
use clientele_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Asha", "Deepa", "Farhan", "Isha", "Karan", "Meera", "Nikhil", "Priya", "Rahul",
    "Ravi", "Sanjana", "Tanvi", "Vikram", "Zoya",
];

const LAST_NAMES: &[&str] = &[
    "Bose", "Deshpande", "Gupta", "Iyer", "Joshi", "Kulkarni", "Menon", "Nair", "Patil",
    "Reddy", "Shah", "Verma",
];

/// (city, state, pincode prefix)
const CITIES: &[(&str, &str, &str)] = &[
    ("Pune", "Maharashtra", "411"),
    ("Mumbai", "Maharashtra", "400"),
    ("Bengaluru", "Karnataka", "560"),
    ("Chennai", "Tamil Nadu", "600"),
    ("Hyderabad", "Telangana", "500"),
    ("Kolkata", "West Bengal", "700"),
    ("Jaipur", "Rajasthan", "302"),
];

const STREETS: &[&str] = &[
    "MG Road",
    "FC Road",
    "Station Road",
    "Nehru Nagar",
    "Gandhi Chowk",
    "Lake View Colony",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,clientele=debug,sqlx=warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut count: usize = 50;
    let mut db_path = String::from("./clientele_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(50);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Clientele Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of customers to generate (default: 50)");
                println!("  -d, --db <PATH>    Database file path (default: ./clientele_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, customers = count, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.customers().count(&CustomerFilter::all()).await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has customers, skipping seed. Delete the file to regenerate."
        );
        return Ok(());
    }

    let start = Instant::now();
    let mut customers = 0usize;
    let mut addresses = 0usize;

    for seed in 0..count {
        let customer = match db.customers().insert(&generate_customer(seed)).await {
            Ok(customer) => customer,
            Err(e) => {
                warn!(seed, error = %e, "Failed to insert customer");
                continue;
            }
        };
        customers += 1;

        for n in 0..(1 + seed % 3) {
            let row = NewAddress::for_customer(&customer.id, &generate_address(seed, n));
            match db.addresses().insert(&row).await {
                Ok(_) => addresses += 1,
                Err(e) => warn!(seed, error = %e, "Failed to insert address"),
            }
        }
    }

    info!(
        customers,
        addresses,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    let pune = db
        .customers()
        .count(&CustomerFilter::all().city("pune"))
        .await?;
    info!(pune, "Customers in Pune");

    db.close().await;
    Ok(())
}

fn generate_customer(seed: usize) -> CustomerInput {
    let (city, state, prefix) = CITIES[seed % CITIES.len()];

    CustomerInput::new(
        FIRST_NAMES[seed % FIRST_NAMES.len()],
        LAST_NAMES[(seed * 7) % LAST_NAMES.len()],
    )
    .phone(format!("98{:08}", seed * 7919 % 100_000_000))
    .city(city)
    .state(state)
    .pincode(format!("{}{:03}", prefix, seed % 1000))
}

fn generate_address(seed: usize, n: usize) -> AddressInput {
    let (city, state, prefix) = CITIES[seed % CITIES.len()];

    AddressInput::new(
        format!("{} {}", 1 + (seed * 13 + n * 5) % 200, STREETS[(seed + n) % STREETS.len()]),
        city,
        state,
        format!("{}{:03}", prefix, (seed + n) % 1000),
    )
}
