//! # Seed Data Generator
//!
//! Populates the database with staff accounts and catalog items for
//! development, then runs a handful of checkouts so the reports have
//! something to aggregate.
//!
//! ## Usage
//! ```bash
//! # Seed 200 items (default)
//! cargo run -p tally-db --bin seed
//!
//! # Custom amount
//! cargo run -p tally-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p tally-db --bin seed -- --db ./data/tally.db
//! ```
//!
//! Each item gets a deterministic quantity, price, and cost derived from
//! its index, so repeated runs against a fresh file produce the same
//! catalog.

use std::env;

use tally_core::{ItemDraft, Position};
use tally_db::{Database, DbConfig};

/// Item names per category for realistic test data
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    (
        "Beverages",
        "bottle",
        &[
            "Cola", "Lemon Soda", "Orange Soda", "Spring Water", "Sparkling Water",
            "Apple Juice", "Orange Juice", "Iced Tea", "Energy Drink", "Lemonade",
        ],
    ),
    (
        "Snacks",
        "pack",
        &[
            "Potato Chips", "Tortilla Chips", "Pretzels", "Chocolate Bar", "Gummy Bears",
            "Cookies", "Crackers", "Trail Mix", "Popcorn", "Granola Bar",
        ],
    ),
    (
        "Dairy",
        "carton",
        &[
            "Whole Milk", "Skim Milk", "Greek Yogurt", "Butter", "Cheddar Cheese",
            "Mozzarella", "Sour Cream", "Cream Cheese", "Heavy Cream", "Eggs",
        ],
    ),
    (
        "Grocery",
        "ea",
        &[
            "White Bread", "Wheat Bread", "Spaghetti", "Penne", "White Rice",
            "Brown Rice", "Canned Beans", "Canned Soup", "Flour", "Sugar",
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 200;
    let mut db_path = String::from("./tally_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(200);
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
                println!("Tally POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: ./tally_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tally POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing items
    let existing = db.items().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Staff accounts
    let manager = db
        .users()
        .create("morgan", "morgan@tally.local", Position::Manager)
        .await?;
    let cashier = db
        .users()
        .create("casey", "casey@tally.local", Position::Cashier)
        .await?;
    db.users()
        .create("riley", "riley@tally.local", Position::Admin)
        .await?;
    println!(
        "✓ Created staff: manager #{}, cashier #{}, admin",
        manager.id, cashier.id
    );

    // Generate catalog
    println!();
    println!("Generating items...");

    let mut item_ids = Vec::new();
    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for batch in 0.. {
        for (category, unit, names) in CATEGORIES {
            for (name_idx, name) in names.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = batch * 100 + name_idx;
                let draft = generate_item(category, unit, name, batch, seed);

                match db.items().upsert(&draft).await {
                    Ok(item) => item_ids.push(item.id),
                    Err(e) => {
                        eprintln!("Failed to upsert {}: {}", draft.name, e);
                        continue;
                    }
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} items...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} items in {:?}", generated, elapsed);

    // A few sales so the reports have rows
    println!();
    println!("Running sample checkouts...");

    let mut sold = 0;
    for (idx, item_id) in item_ids.iter().take(20).enumerate() {
        let qty = 1 + (idx as i64 % 3);
        let outcome = db.checkout().sell(*item_id, qty, cashier.id).await?;
        if outcome.is_committed() {
            sold += 1;
        }
    }
    println!("✓ Committed {} sales", sold);

    // Spot-check the reports
    let top = db.reports().top_selling(5).await?;
    println!();
    println!("Top sellers:");
    for row in &top {
        println!(
            "  {:<24} qty {:>3}  profit ${:.2}",
            row.item_name,
            row.total_quantity,
            row.total_profit_cents as f64 / 100.0
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single item draft with deterministic pseudo-random data.
fn generate_item(category: &str, unit: &str, name: &str, batch: usize, seed: usize) -> ItemDraft {
    // Later batches re-list the same names under a numbered category so
    // the (name, category) pair stays unique.
    let category = if batch == 0 {
        category.to_string()
    } else {
        format!("{} {}", category, batch + 1)
    };

    // Price $0.99 - $12.99, cost 55-75% of price
    let price_cents = 99 + ((seed * 37) % 1200) as i64;
    let cost_pct = 55 + (seed % 20) as i64;
    let cost_cents = price_cents * cost_pct / 100;

    ItemDraft {
        name: name.to_string(),
        unit: unit.to_string(),
        category,
        quantity: (seed % 50) as i64 + 5,
        price_cents,
        cost_cents,
    }
}
